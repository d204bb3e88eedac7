//! Domain services

pub mod cost_estimator;
pub mod driver_matcher;
pub mod fuel_economy;
pub mod quote_selector;

pub use cost_estimator::{estimate, CostResult, ShipmentRequest};
pub use driver_matcher::{can_operate, find_available_driver, find_available_vehicle};
pub use quote_selector::{select_best, QuoteSelection};
