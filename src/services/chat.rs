//! Chat session with the backend assistant

use crate::activity::{ActivityKind, ActivityLog};
use crate::api::BackendClient;
use crate::error::{UpscaleError, UpscaleResult};
use crate::models::{ChatMessage, SessionToken};

pub const GREETING: &str =
    "Hello! I'm your UpScale financial assistant. How can I help you today?";

pub const FALLBACK_REPLY: &str =
    "I'm sorry, I'm having trouble connecting right now. Please try again.";

/// Transcript plus the single outstanding request
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    pending: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::bot(GREETING)],
            pending: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Record the user's message and return the text to send.
    ///
    /// Blank input yields `None` and changes nothing.
    pub fn begin_send(&mut self, input: &str) -> UpscaleResult<Option<String>> {
        let text = input.trim();
        if text.is_empty() {
            return Ok(None);
        }
        if self.pending {
            return Err(UpscaleError::Validation(
                "Wait for the assistant to reply".into(),
            ));
        }

        self.messages.push(ChatMessage::user(text));
        self.pending = true;
        Ok(Some(text.to_string()))
    }

    /// Append the reply, or the fallback text when the call failed
    pub fn receive(&mut self, result: UpscaleResult<String>, log: &ActivityLog) -> &ChatMessage {
        self.pending = false;
        let text = match result {
            Ok(reply) => reply,
            Err(e) => {
                log.record_failure(ActivityKind::ChatFailed, "chatbot", &e);
                FALLBACK_REPLY.to_string()
            }
        };
        self.messages.push(ChatMessage::bot(text));
        &self.messages[self.messages.len() - 1]
    }

    /// One full turn: send, wait, append. Returns the bot's reply.
    pub async fn send(
        &mut self,
        client: &BackendClient,
        auth: Option<&SessionToken>,
        input: &str,
        log: &ActivityLog,
    ) -> UpscaleResult<Option<String>> {
        let Some(text) = self.begin_send(input)? else {
            return Ok(None);
        };
        let result = client.chat(auth, &text).await;
        Ok(Some(self.receive(result, log).text.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::http::testing::ScriptedHttpClient;
    use crate::models::Sender;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn starts_with_greeting() {
        let chat = ChatSession::new();
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].sender, Sender::Bot);
        assert_eq!(chat.messages()[0].text, GREETING);
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut chat = ChatSession::new();
        assert_eq!(chat.begin_send("   ").unwrap(), None);
        assert_eq!(chat.messages().len(), 1);
        assert!(!chat.is_pending());
    }

    #[test]
    fn second_send_while_pending_is_rejected() {
        let mut chat = ChatSession::new();
        assert_eq!(chat.begin_send(" hi ").unwrap().as_deref(), Some("hi"));
        assert!(chat.begin_send("again").unwrap_err().is_validation());
        assert_eq!(chat.messages().len(), 2);
    }

    #[tokio::test]
    async fn turn_appends_reply() {
        let temp = TempDir::new().unwrap();
        let log = ActivityLog::new(temp.path().join("activity.log"));
        let http = Arc::new(
            ScriptedHttpClient::new().json("/chatbot", 200, r#"{"reply": "Diversify."}"#),
        );
        let client = BackendClient::new("http://b.test", http.clone(), 100);

        let mut chat = ChatSession::new();
        let reply = chat
            .send(&client, None, "What is an ETF?", &log)
            .await
            .unwrap();
        assert_eq!(reply.as_deref(), Some("Diversify."));
        assert_eq!(chat.messages().len(), 3);
        assert!(!chat.is_pending());
        assert_eq!(
            http.bodies_for("/chatbot")[0],
            serde_json::json!({"auth": null, "user_input": "What is an ETF?"})
        );
        assert!(log.read_all().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failure_uses_fallback_and_logs() {
        let temp = TempDir::new().unwrap();
        let log = ActivityLog::new(temp.path().join("activity.log"));
        let http = Arc::new(ScriptedHttpClient::new().json("/chatbot", 500, ""));
        let client = BackendClient::new("http://b.test", http, 100);

        let mut chat = ChatSession::new();
        let reply = chat.send(&client, None, "hello", &log).await.unwrap();
        assert_eq!(reply.as_deref(), Some(FALLBACK_REPLY));
        assert_eq!(log.read_all().unwrap()[0].kind, ActivityKind::ChatFailed);
    }
}
