//! Domain model types

pub mod assignment;
pub mod city;
pub mod driver;
pub mod order;
pub mod pricing;
pub mod vehicle;

pub use assignment::{Assignment, DeliveryIssue};
pub use city::{City, Route};
pub use driver::Driver;
pub use order::{Order, QuoteOption, QuoteOptions};
pub use pricing::PriceConfig;
pub use vehicle::{Vehicle, VehicleSpec};
