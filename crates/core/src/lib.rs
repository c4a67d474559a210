pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use std::sync::Arc;

use models::{
    cache::ResultCache, chart::ChartView, day_range::DayRange, settings::Settings,
    state::DashboardState,
};
use providers::{http_backend::HttpBackend, traits::CryptoBackend};
use services::{
    chart_service::ChartService,
    query_service::{PendingFetch, QueryService, RangeChange, SearchOutcome},
};

use errors::CoreError;

/// Main entry point for the Crypto Dashboard core library.
/// Holds the query state, the result cache and the chart renderer.
#[must_use]
pub struct CryptoDashboard {
    settings: Settings,
    query_service: QueryService,
    chart_service: ChartService,
}

impl std::fmt::Debug for CryptoDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoDashboard")
            .field("backend", &self.query_service.backend().name())
            .field("days", &self.query_service.state().days)
            .field("current", &self.query_service.state().current_id())
            .field("cached_records", &self.query_service.cache().len())
            .finish()
    }
}

impl CryptoDashboard {
    /// Dashboard talking to the HTTP backend described by `settings`.
    pub fn new(settings: Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        let backend = Arc::new(HttpBackend::from_settings(&settings)?);
        Self::with_backend(settings, backend)
    }

    /// Dashboard with default settings (backend on `http://localhost:8000`).
    pub fn create_default() -> Result<Self, CoreError> {
        Self::new(Settings::default())
    }

    /// Dashboard on top of any backend (used by tests and alternative transports).
    pub fn with_backend(
        settings: Settings,
        backend: Arc<dyn CryptoBackend>,
    ) -> Result<Self, CoreError> {
        settings.validate()?;
        let chart_service = ChartService::with_offset(settings.label_offset()?);
        Ok(Self {
            query_service: QueryService::new(backend, settings.default_days),
            chart_service,
            settings,
        })
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn state(&self) -> &DashboardState {
        self.query_service.state()
    }

    #[must_use]
    pub fn cache(&self) -> &ResultCache {
        self.query_service.cache()
    }

    /// Shared backend handle for running [`PendingFetch`]es on other tasks.
    #[must_use]
    pub fn backend(&self) -> Arc<dyn CryptoBackend> {
        self.query_service.backend()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.state().busy
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Update the search box text without searching.
    pub fn set_query(&mut self, text: &str) {
        self.query_service.set_query(text);
    }

    /// Search for a coin by id, name or symbol for the selected day range.
    pub async fn search(&mut self, text: &str) -> SearchOutcome {
        self.query_service.search(text).await
    }

    /// Switch the chart to another day range, from cache when possible.
    pub async fn change_day_range(&mut self, days: DayRange) -> SearchOutcome {
        self.query_service.change_day_range(days).await
    }

    // ── Split request lifecycle (for event loops) ───────────────────

    /// Issue a search without awaiting it. See [`QueryService::begin_search`].
    pub fn begin_search(&mut self, text: &str) -> Option<PendingFetch> {
        self.query_service.begin_search(text)
    }

    /// Select a day range without awaiting any fetch it requires.
    pub fn begin_day_range_change(&mut self, days: DayRange) -> RangeChange {
        self.query_service.begin_day_range_change(days)
    }

    /// Feed back the result of a [`PendingFetch`].
    pub fn complete(
        &mut self,
        pending: PendingFetch,
        result: Result<CryptoRecord, CoreError>,
    ) -> SearchOutcome {
        self.query_service.complete(pending, result)
    }

    // ── Charts ──────────────────────────────────────────────────────

    /// Chart for the current record and selected range, if a coin is loaded.
    #[must_use]
    pub fn chart(&self) -> Option<ChartView> {
        let state = self.state();
        state
            .current
            .as_ref()
            .map(|record| self.chart_service.render_record(record, state.days))
    }
}

pub use models::record::{CryptoRecord, HistoryPoint};
