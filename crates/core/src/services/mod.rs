pub mod chart_service;
pub mod forecast_service;
pub mod history_service;
pub mod holding_service;
pub mod range_service;
