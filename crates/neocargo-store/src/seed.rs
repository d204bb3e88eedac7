//! Master-data seeding from a TOML file
//!
//! A seed file declares cities, routes, vehicle specs, vehicles,
//! drivers and fuel prices. Cross-references use names instead of ids
//! so seed files stay hand-editable; ids are assigned on insert.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use neocargo_domain::model::{Driver, PriceConfig, Vehicle, VehicleSpec};
use neocargo_types::{ConfigError, Error, FuelType, LicenseClass, Result, VehicleType};

use crate::Store;

#[derive(Debug, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub prices: Option<PriceConfig>,
    #[serde(default)]
    pub cities: Vec<SeedCity>,
    #[serde(default)]
    pub routes: Vec<SeedRoute>,
    #[serde(default)]
    pub specs: Vec<SeedSpec>,
    #[serde(default)]
    pub vehicles: Vec<SeedVehicle>,
    #[serde(default)]
    pub drivers: Vec<SeedDriver>,
}

#[derive(Debug, Deserialize)]
pub struct SeedCity {
    pub name: String,
    pub state: String,
}

/// Route endpoints reference cities by name
#[derive(Debug, Deserialize)]
pub struct SeedRoute {
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    #[serde(default)]
    pub toll_cost: f64,
}

/// One spec per vehicle type; vehicles reference it by type
#[derive(Debug, Deserialize)]
pub struct SeedSpec {
    pub vehicle_type: VehicleType,
    pub primary_fuel: FuelType,
    pub primary_efficiency_km_l: f64,
    pub primary_degradation_per_kg: f64,
    #[serde(default)]
    pub alternate_fuel: Option<FuelType>,
    #[serde(default)]
    pub alternate_efficiency_km_l: Option<f64>,
    #[serde(default)]
    pub alternate_degradation_per_kg: Option<f64>,
    pub max_payload_kg: f64,
    pub average_speed_kmh: f64,
}

#[derive(Debug, Deserialize)]
pub struct SeedVehicle {
    pub vehicle_type: VehicleType,
    pub brand: String,
    pub model: String,
    pub plate: String,
    pub year: i32,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub min_license: Option<LicenseClass>,
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SeedDriver {
    pub name: String,
    pub license: LicenseClass,
    pub city: String,
}

/// Insert counts reported after a seed run
#[derive(Debug, Default)]
pub struct SeedSummary {
    pub cities: usize,
    pub routes: usize,
    pub specs: usize,
    pub vehicles: usize,
    pub drivers: usize,
}

pub fn load_file(path: &Path) -> Result<SeedFile> {
    let content = fs::read_to_string(path).map_err(|e| {
        Error::Config(ConfigError::ParseError(format!(
            "Failed to read seed file: {e}"
        )))
    })?;
    load_str(&content)
}

pub fn load_str(content: &str) -> Result<SeedFile> {
    toml::from_str(content).map_err(|e| {
        Error::Config(ConfigError::ParseError(format!(
            "Failed to parse seed TOML: {e}"
        )))
    })
}

/// Apply a seed file in one transaction.
///
/// The whole file commits or nothing does, so a bad record half-way
/// through cannot leave a partially seeded store.
pub fn apply(store: &mut Store, seed: &SeedFile) -> Result<SeedSummary> {
    let summary = store.transaction(|tables| {
        let mut summary = SeedSummary::default();

        if let Some(prices) = &seed.prices {
            tables.set_price_config(prices.clone());
        }

        let mut city_ids: HashMap<String, u64> = HashMap::new();
        for city in &seed.cities {
            let id = tables.insert_city(&city.name, &city.state)?;
            city_ids.insert(city.name.to_lowercase(), id);
            summary.cities += 1;
        }

        let lookup_city = |city_ids: &HashMap<String, u64>, name: &str| -> Result<u64> {
            city_ids
                .get(&name.to_lowercase())
                .copied()
                .ok_or_else(|| Error::CityNotFound(name.to_string()))
        };

        for route in &seed.routes {
            let origin = lookup_city(&city_ids, &route.origin)?;
            let destination = lookup_city(&city_ids, &route.destination)?;
            tables.insert_route(
                origin,
                destination,
                route.distance_km,
                route.estimated_hours,
                route.toll_cost,
            )?;
            summary.routes += 1;
        }

        let mut spec_ids: HashMap<VehicleType, u64> = HashMap::new();
        for spec in &seed.specs {
            if spec_ids.contains_key(&spec.vehicle_type) {
                return Err(Error::validation(format!(
                    "duplicate spec for vehicle type {}",
                    spec.vehicle_type
                )));
            }
            let id = tables.insert_spec(VehicleSpec {
                id: 0,
                vehicle_type: spec.vehicle_type,
                primary_fuel: spec.primary_fuel,
                alternate_fuel: spec.alternate_fuel,
                primary_efficiency_km_l: spec.primary_efficiency_km_l,
                alternate_efficiency_km_l: spec.alternate_efficiency_km_l,
                max_payload_kg: spec.max_payload_kg,
                average_speed_kmh: spec.average_speed_kmh,
                primary_degradation_per_kg: spec.primary_degradation_per_kg,
                alternate_degradation_per_kg: spec.alternate_degradation_per_kg,
            });
            spec_ids.insert(spec.vehicle_type, id);
            summary.specs += 1;
        }

        for vehicle in &seed.vehicles {
            let spec_id = spec_ids.get(&vehicle.vehicle_type).copied().ok_or_else(|| {
                Error::validation(format!(
                    "no spec declared for vehicle type {}",
                    vehicle.vehicle_type
                ))
            })?;
            let current_city = match &vehicle.city {
                Some(name) => Some(lookup_city(&city_ids, name)?),
                None => None,
            };
            tables.insert_vehicle(Vehicle {
                id: 0,
                spec_id,
                brand: vehicle.brand.clone(),
                model: vehicle.model.clone(),
                plate: vehicle.plate.clone(),
                year: vehicle.year,
                color: vehicle.color.clone().unwrap_or_default(),
                min_license: vehicle.min_license,
                current_city,
                active: true,
            })?;
            summary.vehicles += 1;
        }

        for driver in &seed.drivers {
            let current_city = lookup_city(&city_ids, &driver.city)?;
            tables.insert_driver(Driver {
                id: 0,
                name: driver.name.clone(),
                license: driver.license,
                current_city,
                available: true,
                completed_deliveries: 0,
                created_at: Utc::now(),
            });
            summary.drivers += 1;
        }

        Ok(summary)
    })?;

    info!(
        cities = summary.cities,
        routes = summary.routes,
        specs = summary.specs,
        vehicles = summary.vehicles,
        drivers = summary.drivers,
        "seed applied"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use neocargo_domain::repository::{CityRepository, DriverRepository, VehicleRepository};

    const TEST_TOML: &str = r#"
[prices]
diesel_price = 3.869
gasoline_price = 4.449
alcohol_price = 3.499
profit_margin_percent = 20.0

[[cities]]
name = "São Paulo"
state = "SP"

[[cities]]
name = "Rio de Janeiro"
state = "RJ"

[[routes]]
origin = "São Paulo"
destination = "Rio de Janeiro"
distance_km = 430.0
estimated_hours = 6.0
toll_cost = 45.80

[[specs]]
vehicle_type = "flatbed"
primary_fuel = "diesel"
primary_efficiency_km_l = 8.0
primary_degradation_per_kg = 0.0002
max_payload_kg = 30000.0
average_speed_kmh = 60.0

[[specs]]
vehicle_type = "van"
primary_fuel = "diesel"
alternate_fuel = "gasoline"
primary_efficiency_km_l = 10.0
primary_degradation_per_kg = 0.001
alternate_efficiency_km_l = 9.0
alternate_degradation_per_kg = 0.001
max_payload_kg = 3500.0
average_speed_kmh = 80.0

[[vehicles]]
vehicle_type = "flatbed"
brand = "Scania"
model = "R450"
plate = "ABC1234"
year = 2022
min_license = "E"
city = "São Paulo"

[[vehicles]]
vehicle_type = "van"
brand = "Ford"
model = "Transit"
plate = "DEF5678"
year = 2021
city = "São Paulo"

[[drivers]]
name = "Carlos Silva"
license = "E"
city = "São Paulo"
"#;

    #[test]
    fn test_parse_seed_file() {
        let seed = load_str(TEST_TOML).unwrap();
        assert_eq!(seed.cities.len(), 2);
        assert_eq!(seed.routes.len(), 1);
        assert_eq!(seed.specs.len(), 2);
        assert_eq!(seed.vehicles.len(), 2);
        assert_eq!(seed.drivers.len(), 1);
        assert!(seed.prices.is_some());
    }

    #[test]
    fn test_apply_resolves_name_references() {
        let mut store = Store::in_memory();
        let seed = load_str(TEST_TOML).unwrap();
        let summary = apply(&mut store, &seed).unwrap();

        assert_eq!(summary.cities, 2);
        assert_eq!(summary.vehicles, 2);

        let origin = store.find_city_by_name("São Paulo").unwrap().unwrap();
        let destination = store.find_city_by_name("Rio de Janeiro").unwrap().unwrap();
        let route = store.find_route(origin.id, destination.id).unwrap().unwrap();
        assert!((route.distance_km - 430.0).abs() < 1e-9);

        let fleet = store.active_fleet().unwrap();
        assert_eq!(fleet.len(), 2);
        assert!(fleet.iter().all(|(v, s)| v.spec_id == s.id));

        let drivers = store.drivers().unwrap();
        assert_eq!(drivers.len(), 1);
        assert_eq!(drivers[0].current_city, origin.id);
    }

    #[test]
    fn test_unknown_city_reference_aborts_whole_seed() {
        let toml = r#"
[[cities]]
name = "Santos"
state = "SP"

[[drivers]]
name = "Ana"
license = "B"
city = "Nowhere"
"#;
        let mut store = Store::in_memory();
        let seed = load_str(toml).unwrap();
        let err = apply(&mut store, &seed).unwrap_err();
        assert!(matches!(err, Error::CityNotFound(_)));
        // Rolled back: the valid city was not kept either
        assert!(store.find_city_by_name("Santos").unwrap().is_none());
    }

    #[test]
    fn test_vehicle_without_spec_rejected() {
        let toml = r#"
[[vehicles]]
vehicle_type = "van"
brand = "Ford"
model = "Transit"
plate = "DEF5678"
year = 2021
"#;
        let mut store = Store::in_memory();
        let seed = load_str(toml).unwrap();
        assert!(apply(&mut store, &seed).is_err());
    }
}
