//! Shared fixtures for service tests

use chrono::Utc;

use neocargo_domain::model::{Driver, Vehicle, VehicleSpec};
use neocargo_store::Store;
use neocargo_types::{FuelType, LicenseClass, VehicleType};

/// An in-memory store with two cities, routes both ways, a flatbed
/// (license E, id before the van) and a van, and two drivers in
/// São Paulo.
pub fn seeded_store() -> Store {
    let mut store = Store::in_memory();
    store
        .transaction(|tables| {
            let sao_paulo = tables.insert_city("São Paulo", "SP")?;
            let rio = tables.insert_city("Rio de Janeiro", "RJ")?;
            tables.insert_route(sao_paulo, rio, 430.0, Some(6.0), 45.80)?;
            tables.insert_route(rio, sao_paulo, 430.0, Some(6.0), 45.80)?;

            let flatbed_spec = tables.insert_spec(VehicleSpec {
                id: 0,
                vehicle_type: VehicleType::Flatbed,
                primary_fuel: FuelType::Diesel,
                alternate_fuel: None,
                primary_efficiency_km_l: 8.0,
                alternate_efficiency_km_l: None,
                max_payload_kg: 30000.0,
                average_speed_kmh: 60.0,
                primary_degradation_per_kg: 0.0002,
                alternate_degradation_per_kg: None,
            });
            let van_spec = tables.insert_spec(VehicleSpec {
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
            });

            tables.insert_vehicle(Vehicle {
                id: 0,
                spec_id: flatbed_spec,
                brand: "Scania".to_string(),
                model: "R450".to_string(),
                plate: "ABC1234".to_string(),
                year: 2022,
                color: "White".to_string(),
                min_license: Some(LicenseClass::E),
                current_city: Some(sao_paulo),
                active: true,
            })?;
            tables.insert_vehicle(Vehicle {
                id: 0,
                spec_id: van_spec,
                brand: "Ford".to_string(),
                model: "Transit".to_string(),
                plate: "DEF5678".to_string(),
                year: 2021,
                color: "Silver".to_string(),
                min_license: Some(LicenseClass::B),
                current_city: Some(sao_paulo),
                active: true,
            })?;

            tables.insert_driver(Driver {
                id: 0,
                name: "Carlos Silva".to_string(),
                license: LicenseClass::E,
                current_city: sao_paulo,
                available: true,
                completed_deliveries: 0,
                created_at: Utc::now(),
            });
            tables.insert_driver(Driver {
                id: 0,
                name: "Ana Souza".to_string(),
                license: LicenseClass::B,
                current_city: sao_paulo,
                available: true,
                completed_deliveries: 3,
                created_at: Utc::now(),
            });

            Ok(())
        })
        .expect("fixture seed");
    store
}
