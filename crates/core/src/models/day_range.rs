use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// How many days of price history a chart covers.
///
/// Serialized as the plain number of days (`1`, `7`, `30`), which is also
/// what the backend's `days` query parameter expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum DayRange {
    /// Last 24 hours, labelled by time of day
    One,
    /// Last week; the initial selection
    #[default]
    Seven,
    /// Last month
    Thirty,
}

impl DayRange {
    /// Every selectable range, in the order the range buttons appear.
    pub const ALL: [DayRange; 3] = [DayRange::One, DayRange::Seven, DayRange::Thirty];

    pub fn days(self) -> u32 {
        match self {
            DayRange::One => 1,
            DayRange::Seven => 7,
            DayRange::Thirty => 30,
        }
    }

    /// Short button label ("1D", "7D", "30D").
    pub fn label(self) -> &'static str {
        match self {
            DayRange::One => "1D",
            DayRange::Seven => "7D",
            DayRange::Thirty => "30D",
        }
    }

    /// Intraday ranges label the x axis with times instead of dates.
    pub fn is_intraday(self) -> bool {
        self == DayRange::One
    }
}

impl TryFrom<u32> for DayRange {
    type Error = CoreError;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        match days {
            1 => Ok(DayRange::One),
            7 => Ok(DayRange::Seven),
            30 => Ok(DayRange::Thirty),
            other => Err(CoreError::InvalidDayRange(other)),
        }
    }
}

impl From<DayRange> for u32 {
    fn from(range: DayRange) -> Self {
        range.days()
    }
}

impl std::fmt::Display for DayRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
