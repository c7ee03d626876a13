//! News article model
//!
//! Articles are passed through from the backend as-is; every field is
//! optional and display code falls back to empty text.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest description shown on a card before it is cut
pub const SUMMARY_LIMIT: usize = 150;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub source: Option<ArticleSource>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl Article {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn source_name(&self) -> &str {
        self.source
            .as_ref()
            .and_then(|s| s.name.as_deref())
            .unwrap_or("")
    }

    pub fn published(&self) -> Option<DateTime<Utc>> {
        self.published_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Description cut to the card limit with a trailing ellipsis
    pub fn summary(&self) -> String {
        let description = self.description();
        if description.chars().count() > SUMMARY_LIMIT {
            let cut: String = description.chars().take(SUMMARY_LIMIT).collect();
            format!("{}...", cut)
        } else {
            description.to_string()
        }
    }

    /// Card date label relative to `now`
    pub fn relative_date(&self, now: DateTime<Utc>) -> String {
        let Some(published) = self.published() else {
            return String::new();
        };

        let elapsed = now.signed_duration_since(published);
        let hours = elapsed.num_hours();
        let days = elapsed.num_days();

        if hours < 1 {
            "Just now".to_string()
        } else if hours < 24 {
            format!("{}h ago", hours)
        } else if days < 7 {
            format!("{}d ago", days)
        } else {
            published.format("%b %-d, %Y").to_string()
        }
    }
}

/// Keyword filters offered above the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NewsCategory {
    #[default]
    All,
    Market,
    Stocks,
    Crypto,
    Economy,
}

impl NewsCategory {
    pub const ALL: [NewsCategory; 5] = [
        Self::All,
        Self::Market,
        Self::Stocks,
        Self::Crypto,
        Self::Economy,
    ];

    /// Keyword matched against title and description; `None` matches everything
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Market => Some("market"),
            Self::Stocks => Some("stocks"),
            Self::Crypto => Some("crypto"),
            Self::Economy => Some("economy"),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All News",
            Self::Market => "Markets",
            Self::Stocks => "Stocks",
            Self::Crypto => "Crypto",
            Self::Economy => "Economy",
        }
    }

    /// Next category in button order, wrapping around
    pub fn next(&self) -> Self {
        let index = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
