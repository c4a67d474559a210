use thiserror::Error;

/// Backend `detail` that signals the upstream history lookup was throttled.
pub const HISTORY_FETCH_FAILED_DETAIL: &str = "Failed to fetch historical price data";

/// User-facing message for [`CoreError::RateLimited`].
pub const RATE_LIMIT_MESSAGE: &str = "API rate limit exceeded. Please wait and try again.";

/// User-facing message when the backend gave no usable detail.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Try again later.";

/// User-facing message when the request never completed.
pub const CONNECTIVITY_ERROR_MESSAGE: &str =
    "Could not connect to the server. Please try again later.";

/// Unified error type for the entire crypto-dashboard-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Backend / Network ───────────────────────────────────────────
    #[error("Backend error ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Backend {
        status: u16,
        detail: Option<String>,
    },

    #[error("Backend rate limit reached")]
    RateLimited,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// The response body was not JSON at all (proxy error page, truncated body)
    #[error("Unreadable response body: {0}")]
    UnreadableBody(String),

    // ── Input / Configuration ───────────────────────────────────────
    #[error("Invalid day range: {0} (expected 1, 7 or 30)")]
    InvalidDayRange(u32),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl CoreError {
    /// Classify a non-success backend response by its `detail` field.
    pub fn from_backend(status: u16, detail: Option<String>) -> Self {
        match detail {
            Some(d) if d == HISTORY_FETCH_FAILED_DETAIL => CoreError::RateLimited,
            Some(d) if d.trim().is_empty() => CoreError::Backend { status, detail: None },
            detail => CoreError::Backend { status, detail },
        }
    }

    /// The message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            CoreError::RateLimited => RATE_LIMIT_MESSAGE.to_string(),
            CoreError::Backend {
                detail: Some(detail),
                ..
            } => detail.clone(),
            CoreError::Network(_) | CoreError::UnreadableBody(_) => {
                CONNECTIVITY_ERROR_MESSAGE.to_string()
            }
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return CoreError::UnreadableBody(e.to_string());
        }
        // Strip the query string: it carries whatever the user typed.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
