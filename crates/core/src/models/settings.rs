use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::day_range::DayRange;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Largest label offset chrono accepts, just under a day.
const MAX_OFFSET_MINUTES: i32 = 24 * 60 - 1;

/// Dashboard configuration.
///
/// Every field has a default, so a partial JSON document is enough:
/// `{"base_url": "https://api.example.com"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Backend address; `/crypto` is appended for lookups.
    pub base_url: String,

    /// Day range selected when the dashboard starts.
    pub default_days: DayRange,

    /// Per-request timeout for the HTTP backend.
    pub request_timeout_secs: u64,

    /// Offset from UTC, in minutes, used when formatting chart labels.
    pub label_utc_offset_minutes: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_days: DayRange::default(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            label_utc_offset_minutes: 0,
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|e| CoreError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.base_url.trim().is_empty() {
            return Err(CoreError::Config("base_url must not be empty".into()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(CoreError::Config(format!(
                "base_url must start with http:// or https:// (got {})",
                self.base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(CoreError::Config(
                "request_timeout_secs must be greater than zero".into(),
            ));
        }
        if !(-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&self.label_utc_offset_minutes) {
            return Err(CoreError::Config(format!(
                "label_utc_offset_minutes out of range: {}",
                self.label_utc_offset_minutes
            )));
        }
        Ok(())
    }

    /// The chart label timezone as a chrono offset.
    pub fn label_offset(&self) -> Result<chrono::FixedOffset, CoreError> {
        self.label_utc_offset_minutes
            .checked_mul(60)
            .and_then(chrono::FixedOffset::east_opt)
            .ok_or_else(|| {
                CoreError::Config(format!(
                    "label_utc_offset_minutes out of range: {}",
                    self.label_utc_offset_minutes
                ))
            })
    }
}
