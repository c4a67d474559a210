use std::collections::HashMap;

use super::day_range::DayRange;
use super::record::CryptoRecord;

/// Session-scoped store of fetched records, keyed by coin id and day range.
///
/// - An entry exists only after a successful fetch for that pair.
/// - Nothing is evicted or expires; the cache lives as long as its owner.
/// - Owned by the query controller, never shared globally.
#[derive(Debug, Clone, Default)]
pub struct ResultCache {
    entries: HashMap<String, HashMap<DayRange, CryptoRecord>>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a record. Returns None on a miss.
    pub fn get(&self, id: &str, days: DayRange) -> Option<&CryptoRecord> {
        self.entries.get(id)?.get(&days)
    }

    /// Store a record, replacing any existing entry for the pair.
    pub fn put(&mut self, id: &str, days: DayRange, record: CryptoRecord) {
        self.entries
            .entry(id.to_string())
            .or_default()
            .insert(days, record);
    }

    pub fn contains(&self, id: &str, days: DayRange) -> bool {
        self.get(id, days).is_some()
    }

    /// Total number of cached (id, day range) pairs.
    pub fn len(&self) -> usize {
        self.entries.values().map(|ranges| ranges.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of distinct coins with at least one cached range.
    pub fn coin_count(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
