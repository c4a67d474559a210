use super::day_range::DayRange;
use super::record::CryptoRecord;

/// Everything the dashboard view renders from.
///
/// After a fetch attempt finishes, at most one of `current` and `error`
/// is set. Both are cleared when a new attempt starts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    /// Text as typed by the user, untrimmed
    pub query: String,

    /// Selected history range
    pub days: DayRange,

    /// Last successfully loaded record
    pub current: Option<CryptoRecord>,

    /// User-facing error message of the last failed attempt
    pub error: Option<String>,

    /// True while the most recently issued request is in flight
    pub busy: bool,
}

impl DashboardState {
    pub fn new(days: DayRange) -> Self {
        Self {
            days,
            ..Self::default()
        }
    }

    /// Id of the coin currently on screen.
    pub fn current_id(&self) -> Option<&str> {
        self.current.as_ref().map(|r| r.id.as_str())
    }
}
