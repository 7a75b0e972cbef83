pub mod budget;
pub mod chart;
pub mod holding;
pub mod money;
pub mod portfolio;
pub mod price;
pub mod settings;
