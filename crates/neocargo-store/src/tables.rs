//! In-memory record tables with write-time validation

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use neocargo_domain::model::{
    Assignment, City, DeliveryIssue, Driver, Order, PriceConfig, Route, Vehicle, VehicleSpec,
};
use neocargo_domain::repository::{
    AssignmentRepository, CityRepository, DriverRepository, OrderRepository, PriceConfigProvider,
    VehicleRepository,
};
use neocargo_types::{Error, Result};

/// Every record table, serialized as one JSON document.
///
/// Ids come from a single ascending sequence, so insertion order is
/// recoverable from id order in every table. BTreeMap keeps iteration
/// in id order, which the matching rules rely on for determinism.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tables {
    next_id: u64,
    specs: BTreeMap<u64, VehicleSpec>,
    vehicles: BTreeMap<u64, Vehicle>,
    drivers: BTreeMap<u64, Driver>,
    cities: BTreeMap<u64, City>,
    routes: BTreeMap<u64, Route>,
    orders: BTreeMap<u64, Order>,
    assignments: BTreeMap<u64, Assignment>,
    issues: BTreeMap<u64, DeliveryIssue>,
    price_config: Option<PriceConfig>,
}

impl Tables {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Register a city; the (name, state) pair must be unique
    pub fn insert_city(&mut self, name: &str, state: &str) -> Result<u64> {
        let duplicate = self.cities.values().any(|c| {
            c.name.eq_ignore_ascii_case(name) && c.state.eq_ignore_ascii_case(state)
        });
        if duplicate {
            return Err(Error::validation(format!(
                "city {name}/{state} already registered"
            )));
        }
        let id = self.next_id();
        self.cities.insert(
            id,
            City {
                id,
                name: name.to_string(),
                state: state.to_string(),
                active: true,
            },
        );
        Ok(id)
    }

    /// Register a directed route between two existing cities
    pub fn insert_route(
        &mut self,
        origin: u64,
        destination: u64,
        distance_km: f64,
        estimated_hours: Option<f64>,
        toll_cost: f64,
    ) -> Result<u64> {
        if origin == destination {
            return Err(Error::validation(
                "route origin and destination must differ",
            ));
        }
        if !self.cities.contains_key(&origin) {
            return Err(Error::NotFound(format!("city {origin}")));
        }
        if !self.cities.contains_key(&destination) {
            return Err(Error::NotFound(format!("city {destination}")));
        }
        if distance_km <= 0.0 {
            return Err(Error::validation("route distance must be positive"));
        }
        let duplicate = self
            .routes
            .values()
            .any(|r| r.origin == origin && r.destination == destination);
        if duplicate {
            return Err(Error::validation(format!(
                "route {origin} -> {destination} already registered"
            )));
        }
        let id = self.next_id();
        self.routes.insert(
            id,
            Route {
                id,
                origin,
                destination,
                distance_km,
                estimated_hours,
                toll_cost,
                active: true,
            },
        );
        Ok(id)
    }

    /// Register a vehicle specification
    pub fn insert_spec(&mut self, mut spec: VehicleSpec) -> u64 {
        let id = self.next_id();
        spec.id = id;
        self.specs.insert(id, spec);
        id
    }

    /// Register a vehicle; its plate must be unique and its spec must exist
    pub fn insert_vehicle(&mut self, mut vehicle: Vehicle) -> Result<u64> {
        if !self.specs.contains_key(&vehicle.spec_id) {
            return Err(Error::NotFound(format!("vehicle spec {}", vehicle.spec_id)));
        }
        let duplicate = self
            .vehicles
            .values()
            .any(|v| v.plate.eq_ignore_ascii_case(&vehicle.plate));
        if duplicate {
            return Err(Error::validation(format!(
                "plate {} already registered",
                vehicle.plate
            )));
        }
        let id = self.next_id();
        vehicle.id = id;
        self.vehicles.insert(id, vehicle);
        Ok(id)
    }

    /// Remove a vehicle; refused while any assignment references it
    pub fn remove_vehicle(&mut self, id: u64) -> Result<()> {
        if !self.vehicles.contains_key(&id) {
            return Err(Error::NotFound(format!("vehicle {id}")));
        }
        if self.assignments.values().any(|a| a.vehicle_id == id) {
            return Err(Error::validation(format!(
                "vehicle {id} is referenced by assignments"
            )));
        }
        self.vehicles.remove(&id);
        Ok(())
    }

    pub fn insert_driver(&mut self, mut driver: Driver) -> u64 {
        let id = self.next_id();
        driver.id = id;
        self.drivers.insert(id, driver);
        id
    }

    pub fn insert_order(&mut self, mut order: Order) -> u64 {
        let id = self.next_id();
        order.id = id;
        self.orders.insert(id, order);
        id
    }

    /// Bind an assignment to an order. At most one non-cancelled
    /// assignment may exist per order; a cancelled one permits a
    /// fresh binding.
    pub fn insert_assignment(&mut self, mut assignment: Assignment) -> Result<u64> {
        let bound = self.assignments.values().any(|a| {
            a.order_id == assignment.order_id
                && a.status != neocargo_types::AssignmentStatus::Cancelled
        });
        if bound {
            return Err(Error::validation(format!(
                "order {} already has an assignment",
                assignment.order_id
            )));
        }
        let id = self.next_id();
        assignment.id = id;
        self.assignments.insert(id, assignment);
        Ok(id)
    }

    pub fn insert_issue(&mut self, mut issue: DeliveryIssue) -> u64 {
        let id = self.next_id();
        issue.id = id;
        self.issues.insert(id, issue);
        id
    }

    pub fn set_price_config(&mut self, config: PriceConfig) {
        self.price_config = Some(config);
    }

    pub fn order_mut(&mut self, id: u64) -> Result<&mut Order> {
        self.orders
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound(format!("order {id}")))
    }

    pub fn driver_mut(&mut self, id: u64) -> Result<&mut Driver> {
        self.drivers
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound(format!("driver {id}")))
    }

    pub fn vehicle_mut(&mut self, id: u64) -> Result<&mut Vehicle> {
        self.vehicles
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound(format!("vehicle {id}")))
    }

    pub fn assignment_mut(&mut self, id: u64) -> Result<&mut Assignment> {
        self.assignments
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound(format!("assignment {id}")))
    }

    pub fn issue_mut(&mut self, id: u64) -> Result<&mut DeliveryIssue> {
        self.issues
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound(format!("issue {id}")))
    }

    pub fn all_vehicles(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.values()
    }

    pub fn all_cities(&self) -> impl Iterator<Item = &City> {
        self.cities.values()
    }

    pub fn all_routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.values()
    }

    pub fn all_orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    pub fn all_assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.assignments.values()
    }

    pub fn all_issues(&self) -> impl Iterator<Item = &DeliveryIssue> {
        self.issues.values()
    }

    pub fn find_issue(&self, id: u64) -> Option<&DeliveryIssue> {
        self.issues.get(&id)
    }

    pub fn find_assignment(&self, id: u64) -> Option<&Assignment> {
        self.assignments.get(&id)
    }

    pub fn find_spec(&self, id: u64) -> Option<&VehicleSpec> {
        self.specs.get(&id)
    }
}

impl VehicleRepository for Tables {
    fn active_fleet(&self) -> Result<Vec<(Vehicle, VehicleSpec)>> {
        self.vehicles
            .values()
            .filter(|v| v.active)
            .map(|v| {
                let spec = self
                    .specs
                    .get(&v.spec_id)
                    .ok_or_else(|| Error::NotFound(format!("vehicle spec {}", v.spec_id)))?;
                Ok((v.clone(), spec.clone()))
            })
            .collect()
    }

    fn find_vehicle(&self, id: u64) -> Result<Option<Vehicle>> {
        Ok(self.vehicles.get(&id).cloned())
    }
}

impl DriverRepository for Tables {
    fn drivers(&self) -> Result<Vec<Driver>> {
        Ok(self.drivers.values().cloned().collect())
    }

    fn find_driver(&self, id: u64) -> Result<Option<Driver>> {
        Ok(self.drivers.get(&id).cloned())
    }
}

impl OrderRepository for Tables {
    fn find_order(&self, id: u64) -> Result<Option<Order>> {
        Ok(self.orders.get(&id).cloned())
    }
}

impl AssignmentRepository for Tables {
    fn assignment_for_order(&self, order_id: u64) -> Result<Option<Assignment>> {
        // Latest wins; earlier cancelled bindings stay in history
        Ok(self
            .assignments
            .values()
            .filter(|a| a.order_id == order_id)
            .last()
            .cloned())
    }

    fn busy_vehicle_ids(&self) -> Result<Vec<u64>> {
        Ok(self
            .assignments
            .values()
            .filter(|a| a.status == neocargo_types::AssignmentStatus::InProgress)
            .map(|a| a.vehicle_id)
            .collect())
    }

    fn driver_has_in_progress(&self, driver_id: u64) -> Result<bool> {
        Ok(self.assignments.values().any(|a| {
            a.driver_id == driver_id && a.status == neocargo_types::AssignmentStatus::InProgress
        }))
    }
}

impl CityRepository for Tables {
    fn find_city_by_name(&self, name: &str) -> Result<Option<City>> {
        Ok(self
            .cities
            .values()
            .find(|c| c.active && c.matches_name(name))
            .cloned())
    }

    fn find_city(&self, id: u64) -> Result<Option<City>> {
        Ok(self.cities.get(&id).cloned())
    }

    fn find_route(&self, origin: u64, destination: u64) -> Result<Option<Route>> {
        Ok(self
            .routes
            .values()
            .find(|r| r.active && r.origin == origin && r.destination == destination)
            .cloned())
    }
}

impl PriceConfigProvider for Tables {
    fn current_prices(&self) -> Result<PriceConfig> {
        Ok(self.price_config.clone().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use neocargo_types::{AssignmentStatus, FuelType, LicenseClass, VehicleType};

    fn spec() -> VehicleSpec {
        VehicleSpec {
            id: 0,
            vehicle_type: VehicleType::Van,
            primary_fuel: FuelType::Diesel,
            alternate_fuel: None,
            primary_efficiency_km_l: 10.0,
            alternate_efficiency_km_l: None,
            max_payload_kg: 3500.0,
            average_speed_kmh: 80.0,
            primary_degradation_per_kg: 0.001,
            alternate_degradation_per_kg: None,
        }
    }

    fn vehicle(spec_id: u64, plate: &str) -> Vehicle {
        Vehicle {
            id: 0,
            spec_id,
            brand: "Ford".to_string(),
            model: "Transit".to_string(),
            plate: plate.to_string(),
            year: 2022,
            color: "White".to_string(),
            min_license: Some(LicenseClass::B),
            current_city: None,
            active: true,
        }
    }

    fn assignment(order_id: u64, driver_id: u64, vehicle_id: u64) -> Assignment {
        Assignment {
            id: 0,
            order_id,
            driver_id,
            vehicle_id,
            status: AssignmentStatus::Pending,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_ids_ascend_across_tables() {
        let mut tables = Tables::default();
        let city_a = tables.insert_city("São Paulo", "SP").unwrap();
        let city_b = tables.insert_city("Santos", "SP").unwrap();
        let spec_id = tables.insert_spec(spec());
        assert_eq!((city_a, city_b, spec_id), (1, 2, 3));
    }

    #[test]
    fn test_duplicate_city_rejected() {
        let mut tables = Tables::default();
        tables.insert_city("Santos", "SP").unwrap();
        let err = tables.insert_city("santos", "sp").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_route_self_loop_rejected() {
        let mut tables = Tables::default();
        let city = tables.insert_city("Santos", "SP").unwrap();
        let err = tables
            .insert_route(city, city, 10.0, None, 0.0)
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_duplicate_route_pair_rejected() {
        let mut tables = Tables::default();
        let a = tables.insert_city("Santos", "SP").unwrap();
        let b = tables.insert_city("Campinas", "SP").unwrap();
        tables.insert_route(a, b, 120.0, None, 12.0).unwrap();
        // Reverse direction is a different route
        tables.insert_route(b, a, 120.0, None, 12.0).unwrap();
        let err = tables.insert_route(a, b, 99.0, None, 0.0).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_route_requires_existing_cities() {
        let mut tables = Tables::default();
        let a = tables.insert_city("Santos", "SP").unwrap();
        let err = tables.insert_route(a, 999, 10.0, None, 0.0).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_duplicate_plate_rejected() {
        let mut tables = Tables::default();
        let spec_id = tables.insert_spec(spec());
        tables.insert_vehicle(vehicle(spec_id, "ABC1234")).unwrap();
        let err = tables
            .insert_vehicle(vehicle(spec_id, "abc1234"))
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_vehicle_requires_existing_spec() {
        let mut tables = Tables::default();
        let err = tables.insert_vehicle(vehicle(42, "ABC1234")).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_one_live_assignment_per_order() {
        let mut tables = Tables::default();
        let first = tables.insert_assignment(assignment(10, 1, 2)).unwrap();
        let err = tables.insert_assignment(assignment(10, 3, 4)).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        // A different order is fine
        tables.insert_assignment(assignment(11, 3, 4)).unwrap();

        // Cancelling the first binding permits a fresh one
        tables.assignment_mut(first).unwrap().status = AssignmentStatus::Cancelled;
        let second = tables.insert_assignment(assignment(10, 3, 4)).unwrap();
        let latest = tables.assignment_for_order(10).unwrap().unwrap();
        assert_eq!(latest.id, second);
    }

    #[test]
    fn test_remove_vehicle_blocked_while_referenced() {
        let mut tables = Tables::default();
        let spec_id = tables.insert_spec(spec());
        let vehicle_id = tables.insert_vehicle(vehicle(spec_id, "ABC1234")).unwrap();
        tables
            .insert_assignment(assignment(10, 1, vehicle_id))
            .unwrap();

        let err = tables.remove_vehicle(vehicle_id).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_active_fleet_joins_specs_and_skips_inactive() {
        let mut tables = Tables::default();
        let spec_id = tables.insert_spec(spec());
        let kept = tables.insert_vehicle(vehicle(spec_id, "AAA0001")).unwrap();
        let parked = tables.insert_vehicle(vehicle(spec_id, "BBB0002")).unwrap();
        tables.vehicle_mut(parked).unwrap().active = false;

        let fleet = tables.active_fleet().unwrap();
        assert_eq!(fleet.len(), 1);
        assert_eq!(fleet[0].0.id, kept);
        assert_eq!(fleet[0].1.id, spec_id);
    }

    #[test]
    fn test_busy_vehicles_are_in_progress_only() {
        let mut tables = Tables::default();
        let done = tables.insert_assignment(assignment(10, 1, 100)).unwrap();
        let rolling = tables.insert_assignment(assignment(11, 2, 200)).unwrap();
        // Third stays pending, which does not lock its vehicle
        tables.insert_assignment(assignment(12, 3, 300)).unwrap();
        tables.assignment_mut(done).unwrap().status = AssignmentStatus::Completed;
        tables.assignment_mut(rolling).unwrap().status = AssignmentStatus::InProgress;

        let busy = tables.busy_vehicle_ids().unwrap();
        assert_eq!(busy, vec![200]);
    }

    #[test]
    fn test_city_lookup_ignores_inactive() {
        let mut tables = Tables::default();
        let id = tables.insert_city("Santos", "SP").unwrap();
        assert!(tables.find_city_by_name("santos").unwrap().is_some());

        if let Some(city) = tables.cities.get_mut(&id) {
            city.active = false;
        }
        assert!(tables.find_city_by_name("santos").unwrap().is_none());
    }

    #[test]
    fn test_default_prices_when_unset() {
        let tables = Tables::default();
        let prices = tables.current_prices().unwrap();
        assert!((prices.diesel_price - 3.869).abs() < 1e-9);
        assert!((prices.profit_margin_percent - 20.0).abs() < 1e-9);
    }
}
