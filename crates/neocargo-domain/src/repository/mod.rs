//! Repository trait definitions for data access
//!
//! The core only assumes a data-access collaborator supporting
//! equality filtering and stable ordering; these traits are the seam.

use neocargo_types::Result;

use crate::model::{Assignment, City, Driver, Order, PriceConfig, Route, Vehicle, VehicleSpec};

/// Read access to the active fleet with its specifications
pub trait VehicleRepository {
    /// All active vehicles paired with their specs
    fn active_fleet(&self) -> Result<Vec<(Vehicle, VehicleSpec)>>;

    /// Find a vehicle by id
    fn find_vehicle(&self, id: u64) -> Result<Option<Vehicle>>;
}

/// Read access to drivers
pub trait DriverRepository {
    /// All drivers, in stable id order
    fn drivers(&self) -> Result<Vec<Driver>>;

    /// Find a driver by id
    fn find_driver(&self, id: u64) -> Result<Option<Driver>>;
}

/// Read access to orders
pub trait OrderRepository {
    fn find_order(&self, id: u64) -> Result<Option<Order>>;
}

/// Read access to assignments
pub trait AssignmentRepository {
    /// The assignment bound to an order, if any
    fn assignment_for_order(&self, order_id: u64) -> Result<Option<Assignment>>;

    /// Ids of vehicles bound to in-progress assignments
    fn busy_vehicle_ids(&self) -> Result<Vec<u64>>;

    /// Whether the driver already runs an in-progress delivery
    fn driver_has_in_progress(&self, driver_id: u64) -> Result<bool>;
}

/// City and route resolution
pub trait CityRepository {
    /// Find an active city by exact (case-insensitive) name
    fn find_city_by_name(&self, name: &str) -> Result<Option<City>>;

    /// Find a city by id
    fn find_city(&self, id: u64) -> Result<Option<City>>;

    /// The route for a directed (origin, destination) pair
    fn find_route(&self, origin: u64, destination: u64) -> Result<Option<Route>>;
}

/// Provider of the single current price configuration
pub trait PriceConfigProvider {
    /// The current configuration; defaults when none is stored
    fn current_prices(&self) -> Result<PriceConfig>;
}
