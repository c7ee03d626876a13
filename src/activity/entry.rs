//! Activity entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    SessionStarted,
    SessionFailed,
    SignedIn,
    SignedUp,
    IdentityFailed,
    RequestFailed,
    LessonCompleted,
    QuizFinished,
    BudgetExported,
    ChatFailed,
}

impl ActivityKind {
    /// Whether the entry records a failure
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::SessionFailed | Self::IdentityFailed | Self::RequestFailed | Self::ChatFailed
        )
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::SessionStarted => "SESSION",
            Self::SessionFailed => "SESSION FAILED",
            Self::SignedIn => "SIGN IN",
            Self::SignedUp => "SIGN UP",
            Self::IdentityFailed => "IDENTITY FAILED",
            Self::RequestFailed => "REQUEST FAILED",
            Self::LessonCompleted => "LESSON",
            Self::QuizFinished => "QUIZ",
            Self::BudgetExported => "EXPORT",
            Self::ChatFailed => "CHAT FAILED",
        };
        f.write_str(label)
    }
}

/// A single activity log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: Uuid,

    /// When it happened (UTC)
    pub timestamp: DateTime<Utc>,

    pub kind: ActivityKind,

    /// What it happened to: an endpoint, a lesson id, a file path
    pub subject: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ActivityEntry {
    pub fn new(kind: ActivityKind, subject: impl Into<String>, details: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            kind,
            subject: subject.into(),
            details,
        }
    }

    /// One-line rendering for terminal output
    pub fn format_human_readable(&self) -> String {
        let mut line = format!(
            "{} {:<15} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.kind.to_string(),
            self.subject
        );
        if let Some(details) = &self.details {
            line.push_str(" - ");
            line.push_str(details);
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_shape() {
        let entry = ActivityEntry::new(ActivityKind::LessonCompleted, "bull-bear", None);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["kind"], "lesson_completed");
        assert_eq!(json["subject"], "bull-bear");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_human_readable() {
        let entry = ActivityEntry::new(
            ActivityKind::RequestFailed,
            "news",
            Some("HTTP 502 from news".into()),
        );
        let line = entry.format_human_readable();
        assert!(line.contains("REQUEST FAILED"));
        assert!(line.ends_with("news - HTTP 502 from news"));
        assert!(ActivityKind::RequestFailed.is_failure());
        assert!(!ActivityKind::SignedIn.is_failure());
    }
}
