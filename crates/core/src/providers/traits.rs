use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::day_range::DayRange;
use crate::models::record::CryptoRecord;

/// Source of coin records.
///
/// The production implementation talks to the dashboard backend over
/// HTTP; tests plug in an in-memory one. The query controller only
/// depends on this trait.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait CryptoBackend: Send + Sync {
    /// Human-readable name of this backend (for logs/errors).
    fn name(&self) -> &str;

    /// Look up a coin by id, name or symbol and return its current stats
    /// plus `days` worth of price history.
    ///
    /// `query` is already trimmed and lowercased by the caller.
    async fn fetch(&self, query: &str, days: DayRange) -> Result<CryptoRecord, CoreError>;
}
