use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::day_range::DayRange;
use crate::models::record::CryptoRecord;
use crate::models::settings::Settings;
use super::traits::CryptoBackend;

/// HTTP client for the dashboard backend.
///
/// - **Endpoint**: `GET {base_url}/crypto?query=<text>&days=<1|7|30>`
/// - **Success**: 200 with a [`CryptoRecord`] JSON body.
/// - **Failure**: any other status, with `{"detail": "..."}` when the
///   backend has something to say.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self, CoreError> {
        Self::with_timeout(base_url, crate::models::settings::DEFAULT_TIMEOUT_SECS)
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, CoreError> {
        Self::with_timeout(&settings.base_url, settings.request_timeout_secs)
    }

    #[cfg_attr(target_arch = "wasm32", allow(unused_variables))]
    fn with_timeout(base_url: &str, timeout_secs: u64) -> Result<Self, CoreError> {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(timeout_secs));
        let client = builder
            .build()
            .map_err(|e| CoreError::Config(format!("HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full lookup URL for a query and day range.
    pub fn lookup_url(&self, query: &str, days: DayRange) -> String {
        format!(
            "{}/crypto?query={}&days={}",
            self.base_url,
            urlencoding::encode(query),
            days.days()
        )
    }
}

// ── Response bodies ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Parse a body as JSON; anything else is unreadable.
fn parse_json(body: &str) -> Result<serde_json::Value, CoreError> {
    serde_json::from_str(body).map_err(|e| CoreError::UnreadableBody(e.to_string()))
}

/// Pull a human-readable `detail` out of a JSON error body.
///
/// Missing or non-string details yield `None`.
fn extract_detail(body: serde_json::Value) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_value(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl CryptoBackend for HttpBackend {
    fn name(&self) -> &str {
        "HttpBackend"
    }

    async fn fetch(&self, query: &str, days: DayRange) -> Result<CryptoRecord, CoreError> {
        let url = self.lookup_url(query, days);
        tracing::debug!(query, days = days.days(), "requesting coin record");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();

        if status.is_success() {
            let body = resp.text().await?;
            let record: CryptoRecord = serde_json::from_value(parse_json(&body)?)?;
            tracing::debug!(
                id = %record.id,
                points = record.history.len(),
                "received coin record"
            );
            return Ok(record);
        }

        let body = resp.text().await?;
        let detail = match parse_json(&body) {
            Ok(value) => extract_detail(value),
            Err(e) => {
                tracing::warn!(status = status.as_u16(), "backend error body is not JSON");
                return Err(e);
            }
        };
        tracing::warn!(
            status = status.as_u16(),
            detail = detail.as_deref().unwrap_or(""),
            "backend rejected lookup"
        );
        Err(CoreError::from_backend(status.as_u16(), detail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lookup_url_encodes_query_and_days() {
        let backend = HttpBackend::new("http://localhost:8000/").unwrap();
        assert_eq!(
            backend.lookup_url("shiba inu", DayRange::Thirty),
            "http://localhost:8000/crypto?query=shiba%20inu&days=30"
        );
    }

    #[test]
    fn extract_detail_reads_string_detail() {
        assert_eq!(
            extract_detail(json!({"detail": "Cryptocurrency not found"})),
            Some("Cryptocurrency not found".to_string())
        );
    }

    #[test]
    fn extract_detail_ignores_other_shapes() {
        assert_eq!(extract_detail(json!({"error": "boom"})), None);
        assert_eq!(extract_detail(json!({"detail": [{"msg": "field required"}]})), None);
        assert_eq!(extract_detail(json!("just a string")), None);
    }

    #[test]
    fn parse_json_rejects_non_json() {
        assert!(matches!(parse_json("<html>502</html>"), Err(CoreError::UnreadableBody(_))));
        assert!(matches!(parse_json(""), Err(CoreError::UnreadableBody(_))));
        assert!(parse_json(r#"{"detail": null}"#).is_ok());
    }
}
