//! User settings for UpScale
//!
//! Manages the backend location, budget preferences and the reference ranges
//! used to grade budget fields.

use std::fmt;
use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::paths::UpscalePaths;
use crate::error::UpscaleError;
use crate::models::budget::{default_reference_ranges, ReferenceRanges};

/// How the budget builder frames its advice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
pub enum BudgetStyle {
    /// Compare each field against typical student spending
    #[default]
    #[serde(rename = "student")]
    #[value(name = "student")]
    Student,
    /// Show the 50/30/20 guideline split of income
    #[serde(rename = "50-30-20")]
    #[value(name = "50-30-20")]
    FiftyThirtyTwenty,
}

impl fmt::Display for BudgetStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Student => write!(f, "student"),
            Self::FiftyThirtyTwenty => write!(f, "50-30-20"),
        }
    }
}

/// User settings for UpScale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Base URL of the UpScale backend; endpoint names are appended to it
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Web API key for the identity provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_api_key: Option<String>,

    /// Ask the news endpoint for everything instead of top headlines
    #[serde(default)]
    pub news_everything: bool,

    /// Preferred budget style
    #[serde(default)]
    pub budget_style: BudgetStyle,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Highest zero-based page the stock pager will request
    #[serde(default = "default_max_stock_page")]
    pub max_stock_page: u32,

    /// Typical monthly spending per category, amounts in cents
    #[serde(default = "default_reference_ranges")]
    pub reference_ranges: ReferenceRanges,

    /// Whether the activity log is written
    #[serde(default = "default_true")]
    pub activity_log: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_api_base_url() -> String {
    "http://localhost:5173/api/react".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_max_stock_page() -> u32 {
    9
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            api_base_url: default_api_base_url(),
            request_timeout_ms: default_request_timeout_ms(),
            identity_api_key: None,
            news_everything: false,
            budget_style: BudgetStyle::default(),
            currency_symbol: default_currency(),
            max_stock_page: default_max_stock_page(),
            reference_ranges: default_reference_ranges(),
            activity_log: true,
        }
    }
}

impl Settings {
    /// Request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &UpscalePaths) -> Result<Self, UpscaleError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                UpscaleError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                UpscaleError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &UpscalePaths) -> Result<(), UpscaleError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            UpscaleError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            UpscaleError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Reject settings that would make the client unusable
    pub fn validate(&self) -> Result<(), UpscaleError> {
        if self.api_base_url.trim().is_empty() {
            return Err(UpscaleError::Config("api_base_url must not be empty".into()));
        }
        if self.request_timeout_ms == 0 {
            return Err(UpscaleError::Config(
                "request_timeout_ms must be greater than zero".into(),
            ));
        }
        for (category, band) in &self.reference_ranges {
            if band.min.is_negative() || band.max < band.min {
                return Err(UpscaleError::Config(format!(
                    "Invalid reference range for {}: {}",
                    category, band
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::budget::{BudgetCategory, RangeBand};
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.api_base_url, "http://localhost:5173/api/react");
        assert_eq!(settings.request_timeout(), Duration::from_secs(10));
        assert_eq!(settings.budget_style, BudgetStyle::Student);
        assert_eq!(settings.max_stock_page, 9);
        assert!(settings.activity_log);
        assert_eq!(settings.reference_ranges.len(), 6);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = UpscalePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.budget_style = BudgetStyle::FiftyThirtyTwenty;
        settings.news_everything = true;
        settings
            .reference_ranges
            .insert(BudgetCategory::Phone, RangeBand::dollars(30, 80));

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.budget_style, BudgetStyle::FiftyThirtyTwenty);
        assert!(loaded.news_everything);
        assert_eq!(
            loaded.reference_ranges[&BudgetCategory::Phone],
            RangeBand::dollars(30, 80)
        );
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"budget_style": "50-30-20"}"#).unwrap();
        assert_eq!(settings.budget_style, BudgetStyle::FiftyThirtyTwenty);
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.reference_ranges.len(), 6);
    }

    #[test]
    fn test_invalid_range_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = UpscalePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(
            paths.settings_file(),
            r#"{"reference_ranges": {"housing": {"min": 500, "max": 100}}}"#,
        )
        .unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, UpscaleError::Config(_)));
    }
}
