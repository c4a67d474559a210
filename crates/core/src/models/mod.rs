pub mod cache;
pub mod chart;
pub mod day_range;
pub mod record;
pub mod settings;
pub mod state;
