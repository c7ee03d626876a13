//! Company listing and price history models

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::UpscaleError;

/// Price the backend sends when it has no quote
pub const UNKNOWN_PRICE: f64 = -1.0;

/// Placeholder shown for a price that is not known yet
pub const PRICE_PLACEHOLDER: &str = "—";

fn known(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v != UNKNOWN_PRICE)
}

/// Format a price with two decimals, or the placeholder when unknown
pub fn format_price(price: Option<f64>) -> String {
    match known(price) {
        Some(p) => format!("{:.2}", p),
        None => PRICE_PLACEHOLDER.to_string(),
    }
}

/// One row of the paginated company listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
    /// Last price from the listing; usually the unknown sentinel
    #[serde(default)]
    pub price: Option<f64>,
}

impl Company {
    pub fn known_price(&self) -> Option<f64> {
        known(self.price)
    }
}

/// A single time-bucketed open/close/high/low record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Nanoseconds since the Unix epoch
    #[serde(rename = "TimeStamp")]
    pub timestamp: i64,
    #[serde(rename = "OpenPrice", default)]
    pub open: Option<f64>,
    #[serde(rename = "ClosePrice", default)]
    pub close: Option<f64>,
    #[serde(rename = "MomentHigh", default)]
    pub high: Option<f64>,
    #[serde(rename = "MomentLow", default)]
    pub low: Option<f64>,
}

impl PriceBar {
    pub fn time(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.timestamp)
    }

    /// Close price, falling back to the open while the bar is still forming
    pub fn display_price(&self) -> Option<f64> {
        known(self.close).or_else(|| known(self.open))
    }

    /// The bar with the greatest timestamp; the later one wins a tie
    pub fn latest(bars: &[PriceBar]) -> Option<&PriceBar> {
        bars.iter().max_by_key(|bar| bar.timestamp)
    }
}

/// How far back a history request reaches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum FramePeriod {
    #[serde(rename = "LAST_DAY")]
    #[value(name = "LAST_DAY")]
    LastDay,
    #[serde(rename = "LAST_WEEK")]
    #[value(name = "LAST_WEEK")]
    LastWeek,
    #[serde(rename = "LAST_FULL_WEEK")]
    #[value(name = "LAST_FULL_WEEK")]
    LastFullWeek,
    #[serde(rename = "LAST_MONTH")]
    #[value(name = "LAST_MONTH")]
    LastMonth,
    #[serde(rename = "LAST_QUARTER")]
    #[value(name = "LAST_QUARTER")]
    LastQuarter,
    #[serde(rename = "LAST_HALF")]
    #[value(name = "LAST_HALF")]
    LastHalf,
    #[serde(rename = "LAST_YEAR")]
    #[value(name = "LAST_YEAR")]
    LastYear,
    #[serde(rename = "LAST_YEAR_2")]
    #[value(name = "LAST_YEAR_2")]
    LastTwoYears,
    #[serde(rename = "LAST_HALF_DECADE")]
    #[value(name = "LAST_HALF_DECADE")]
    LastHalfDecade,
    #[serde(rename = "LAST_DECADE")]
    #[value(name = "LAST_DECADE")]
    LastDecade,
    #[serde(rename = "PAST_YEAR")]
    #[value(name = "PAST_YEAR")]
    YearToDate,
    #[serde(rename = "ALL")]
    #[value(name = "ALL")]
    All,
}

impl fmt::Display for FramePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .to_possible_value()
            .map(|v| v.get_name().to_string())
            .unwrap_or_default();
        f.write_str(&name)
    }
}

/// Bucket width of a history request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum, Default)]
pub enum FrameInterval {
    #[serde(rename = "MINUTES_1")]
    #[value(name = "MINUTES_1")]
    OneMinute,
    #[serde(rename = "MINUTES_5")]
    #[value(name = "MINUTES_5")]
    FiveMinutes,
    #[serde(rename = "QUARTER_HOUR")]
    #[value(name = "QUARTER_HOUR")]
    QuarterHour,
    #[serde(rename = "HALF_HOUR")]
    #[value(name = "HALF_HOUR")]
    HalfHour,
    #[serde(rename = "HOUR")]
    #[value(name = "HOUR")]
    Hour,
    #[default]
    #[serde(rename = "DAY")]
    #[value(name = "DAY")]
    Day,
    #[serde(rename = "WEEK")]
    #[value(name = "WEEK")]
    Week,
    #[serde(rename = "FULL_WEEK")]
    #[value(name = "FULL_WEEK")]
    FullWeek,
    #[serde(rename = "MONTH")]
    #[value(name = "MONTH")]
    Month,
    #[serde(rename = "QUARTER")]
    #[value(name = "QUARTER")]
    Quarter,
}

impl fmt::Display for FrameInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .to_possible_value()
            .map(|v| v.get_name().to_string())
            .unwrap_or_default();
        f.write_str(&name)
    }
}

/// A rendered candlestick chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ChartImage {
    /// Decode the backend's base64 JPEG, tolerating a `data:` URL prefix
    pub fn from_base64(encoded: &str) -> Result<Self, UpscaleError> {
        let (mime_type, payload) = match encoded.strip_prefix("data:") {
            Some(rest) => {
                let (meta, data) = rest.split_once(',').ok_or_else(|| {
                    UpscaleError::Validation("Malformed data URL in chart image".into())
                })?;
                let mime = meta.trim_end_matches(";base64");
                (mime.to_string(), data)
            }
            None => ("image/jpeg".to_string(), encoded),
        };

        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| UpscaleError::Validation(format!("Invalid chart image data: {}", e)))?;

        Ok(Self { bytes, mime_type })
    }

    /// Conventional file extension for the image type
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/png" => "png",
            "image/gif" => "gif",
            _ => "jpg",
        }
    }
}
