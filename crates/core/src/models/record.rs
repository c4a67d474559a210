use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One sample of a coin's price history.
///
/// On the wire this is a two-element array: `[timestamp_ms, price_usd]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(i64, f64)", into = "(i64, f64)")]
pub struct HistoryPoint {
    /// Unix timestamp in milliseconds
    pub timestamp_ms: i64,
    pub price_usd: f64,
}

impl HistoryPoint {
    pub fn new(timestamp_ms: i64, price_usd: f64) -> Self {
        Self {
            timestamp_ms,
            price_usd,
        }
    }

    /// The sample time, or `None` if the timestamp is out of chrono's range.
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp_ms)
    }
}

impl From<(i64, f64)> for HistoryPoint {
    fn from((timestamp_ms, price_usd): (i64, f64)) -> Self {
        Self::new(timestamp_ms, price_usd)
    }
}

impl From<HistoryPoint> for (i64, f64) {
    fn from(p: HistoryPoint) -> Self {
        (p.timestamp_ms, p.price_usd)
    }
}

/// Current stats plus price history for one coin, as returned by
/// `GET /crypto`.
///
/// The record is consumed as-is; `id` is the stable key used by the
/// result cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryptoRecord {
    /// Stable coin identifier (e.g., "bitcoin")
    pub id: String,

    /// Ticker symbol as the backend reports it (e.g., "btc")
    pub symbol: String,

    /// Display name (e.g., "Bitcoin")
    pub name: String,

    /// Current price in USD
    pub price_usd: f64,

    #[serde(default)]
    pub percent_change_24h: Option<f64>,

    #[serde(default)]
    pub volume_24h_usd: Option<f64>,

    /// Price samples, oldest first
    #[serde(default)]
    pub history: Vec<HistoryPoint>,
}

impl CryptoRecord {
    /// Prices only, in history order.
    pub fn prices(&self) -> Vec<f64> {
        self.history.iter().map(|p| p.price_usd).collect()
    }

    /// Lowest and highest historical price, or `None` for an empty history.
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        let mut iter = self.history.iter().map(|p| p.price_usd);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }
}
