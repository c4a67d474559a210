pub mod chart_service;
pub mod query_service;
