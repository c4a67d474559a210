use std::sync::Arc;

use crate::errors::CoreError;
use crate::models::cache::ResultCache;
use crate::models::day_range::DayRange;
use crate::models::record::CryptoRecord;
use crate::models::state::DashboardState;
use crate::providers::traits::CryptoBackend;

/// What a search or range change ended up doing.
#[derive(Debug)]
pub enum SearchOutcome {
    /// Nothing to do: blank query, or no coin loaded for a range change
    Ignored,
    /// Served from the result cache, no request made
    CacheHit,
    /// Fetched and now current
    Loaded,
    /// Fetch failed; the user-facing message is in the state
    Failed(CoreError),
    /// A newer request was issued meanwhile; the state was left alone
    Superseded,
}

/// A request that has been issued but not yet completed.
///
/// Obtained from [`QueryService::begin_search`]; run it against the
/// backend (possibly on another task) and hand the result back to
/// [`QueryService::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    seq: u64,
    query: String,
    days: DayRange,
}

impl PendingFetch {
    /// Sequence number; later requests have larger numbers.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Normalized (trimmed, lowercased) query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn days(&self) -> DayRange {
        self.days
    }

    pub async fn run(&self, backend: &dyn CryptoBackend) -> Result<CryptoRecord, CoreError> {
        backend.fetch(&self.query, self.days).await
    }
}

/// Result of selecting a new day range, before any network I/O.
#[derive(Debug)]
pub enum RangeChange {
    /// No coin loaded; only the selection changed
    Ignored,
    /// The cached record for the new range is now current
    CacheHit,
    /// Not cached: this request must be run and completed
    Fetch(PendingFetch),
}

/// Owns the dashboard state and decides when to hit the backend.
///
/// Flow:
/// 1. `search` normalizes the query, clears the previous result and issues
///    a request for the selected range.
/// 2. Successful records go into the [`ResultCache`] under
///    `(record.id, range)` and become current.
/// 3. `change_day_range` serves from the cache when it can and re-runs the
///    search otherwise.
///
/// Every issued request gets a sequence number. Only the completion of the
/// latest one may touch the visible state, so a slow stale response can
/// never overwrite a newer result. Stale successes still land in the cache.
pub struct QueryService {
    backend: Arc<dyn CryptoBackend>,
    cache: ResultCache,
    state: DashboardState,
    latest_seq: u64,
}

impl QueryService {
    pub fn new(backend: Arc<dyn CryptoBackend>, days: DayRange) -> Self {
        Self {
            backend,
            cache: ResultCache::new(),
            state: DashboardState::new(days),
            latest_seq: 0,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Shared handle to the backend, for running [`PendingFetch`]es elsewhere.
    pub fn backend(&self) -> Arc<dyn CryptoBackend> {
        Arc::clone(&self.backend)
    }

    /// Sequence number of the most recently issued request or cache hit.
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// Record typed text without searching.
    pub fn set_query(&mut self, text: &str) {
        self.state.query = text.to_string();
    }

    // ── Search ──────────────────────────────────────────────────────

    /// Look up `text` for the selected day range.
    pub async fn search(&mut self, text: &str) -> SearchOutcome {
        let Some(pending) = self.begin_search(text) else {
            return SearchOutcome::Ignored;
        };
        let backend = self.backend();
        let result = pending.run(backend.as_ref()).await;
        self.complete(pending, result)
    }

    /// Validate the query and issue a request, without awaiting it.
    ///
    /// Returns `None` for a blank query; nothing else changes then apart
    /// from the stored query text.
    pub fn begin_search(&mut self, text: &str) -> Option<PendingFetch> {
        self.state.query = text.to_string();

        let query = text.trim().to_lowercase();
        if query.is_empty() {
            tracing::debug!("ignoring blank query");
            return None;
        }

        self.state.error = None;
        self.state.current = None;
        self.state.busy = true;
        self.latest_seq += 1;

        tracing::info!(seq = self.latest_seq, %query, days = self.state.days.days(), "search issued");
        Some(PendingFetch {
            seq: self.latest_seq,
            query,
            days: self.state.days,
        })
    }

    /// Apply the result of a request issued by [`begin_search`](Self::begin_search).
    pub fn complete(
        &mut self,
        pending: PendingFetch,
        result: Result<CryptoRecord, CoreError>,
    ) -> SearchOutcome {
        let is_latest = pending.seq == self.latest_seq;

        match result {
            Ok(record) => {
                self.cache.put(&record.id, pending.days, record.clone());
                if !is_latest {
                    tracing::debug!(seq = pending.seq, latest = self.latest_seq, id = %record.id, "stale response cached, state untouched");
                    return SearchOutcome::Superseded;
                }
                tracing::info!(seq = pending.seq, id = %record.id, days = pending.days.days(), "record loaded");
                self.state.current = Some(record);
                self.state.error = None;
                self.state.busy = false;
                SearchOutcome::Loaded
            }
            Err(e) => {
                if !is_latest {
                    tracing::debug!(seq = pending.seq, latest = self.latest_seq, error = %e, "stale failure dropped");
                    return SearchOutcome::Superseded;
                }
                tracing::warn!(seq = pending.seq, error = %e, "search failed");
                self.state.current = None;
                self.state.error = Some(e.user_message());
                self.state.busy = false;
                SearchOutcome::Failed(e)
            }
        }
    }

    // ── Day range ───────────────────────────────────────────────────

    /// Select a new day range and show the current coin for it.
    pub async fn change_day_range(&mut self, days: DayRange) -> SearchOutcome {
        match self.begin_day_range_change(days) {
            RangeChange::Ignored => SearchOutcome::Ignored,
            RangeChange::CacheHit => SearchOutcome::CacheHit,
            RangeChange::Fetch(pending) => {
                let backend = self.backend();
                let result = pending.run(backend.as_ref()).await;
                self.complete(pending, result)
            }
        }
    }

    /// Select a new day range; resolve from the cache or issue a request.
    ///
    /// Only the selection changes when no coin is on screen, including
    /// while a search is still in flight: that search completes for the
    /// range it was issued with.
    pub fn begin_day_range_change(&mut self, days: DayRange) -> RangeChange {
        self.state.days = days;

        let Some(id) = self.state.current_id().map(str::to_string) else {
            tracing::debug!(
                days = days.days(),
                busy = self.state.busy,
                "no coin loaded, range selection only"
            );
            return RangeChange::Ignored;
        };

        if let Some(cached) = self.cache.get(&id, days).cloned() {
            tracing::debug!(%id, days = days.days(), "range served from cache");
            self.latest_seq += 1;
            self.state.current = Some(cached);
            self.state.error = None;
            self.state.busy = false;
            return RangeChange::CacheHit;
        }

        let query = self.state.query.clone();
        match self.begin_search(&query) {
            Some(pending) => RangeChange::Fetch(pending),
            None => RangeChange::Ignored,
        }
    }
}
