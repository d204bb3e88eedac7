//! Vehicle specifications and concrete fleet assets

use neocargo_types::{FuelType, LicenseClass, VehicleType};
use serde::{Deserialize, Serialize};

/// Technical specification shared by all vehicles of one type.
///
/// Efficiency figures are km per litre; degradation is the efficiency
/// lost per kg of cargo. Degradation coefficients are non-negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleSpec {
    pub id: u64,
    pub vehicle_type: VehicleType,
    pub primary_fuel: FuelType,
    #[serde(default)]
    pub alternate_fuel: Option<FuelType>,
    pub primary_efficiency_km_l: f64,
    #[serde(default)]
    pub alternate_efficiency_km_l: Option<f64>,
    pub max_payload_kg: f64,
    pub average_speed_kmh: f64,
    pub primary_degradation_per_kg: f64,
    #[serde(default)]
    pub alternate_degradation_per_kg: Option<f64>,
}

impl VehicleSpec {
    /// The alternate fuel triple (fuel, base efficiency, degradation),
    /// if one is fully configured
    pub fn alternate_triple(&self) -> Option<(FuelType, f64, f64)> {
        match (
            self.alternate_fuel,
            self.alternate_efficiency_km_l,
            self.alternate_degradation_per_kg,
        ) {
            (Some(fuel), Some(efficiency), Some(degradation)) => {
                Some((fuel, efficiency, degradation))
            }
            _ => None,
        }
    }
}

/// A concrete asset of the fleet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: u64,
    pub spec_id: u64,
    pub brand: String,
    pub model: String,
    /// License plate, unique across the fleet
    pub plate: String,
    pub year: i32,
    pub color: String,
    /// Minimum license class required to operate it; None = no restriction
    #[serde(default)]
    pub min_license: Option<LicenseClass>,
    /// City where the vehicle currently sits, if stationed
    #[serde(default)]
    pub current_city: Option<u64>,
    /// Inactive vehicles are invisible to quoting and assignment
    pub active: bool,
}

impl Vehicle {
    /// Human-readable description used in quotes, "Brand Model - PLATE"
    pub fn description(&self) -> String {
        format!("{} {} - {}", self.brand, self.model, self.plate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flatbed_spec() -> VehicleSpec {
        VehicleSpec {
            id: 1,
            vehicle_type: VehicleType::Flatbed,
            primary_fuel: FuelType::Diesel,
            alternate_fuel: None,
            primary_efficiency_km_l: 8.0,
            alternate_efficiency_km_l: None,
            max_payload_kg: 30000.0,
            average_speed_kmh: 60.0,
            primary_degradation_per_kg: 0.0002,
            alternate_degradation_per_kg: None,
        }
    }

    #[test]
    fn test_alternate_triple_absent() {
        assert!(flatbed_spec().alternate_triple().is_none());
    }

    #[test]
    fn test_alternate_triple_requires_all_fields() {
        let mut spec = flatbed_spec();
        spec.alternate_fuel = Some(FuelType::Alcohol);
        // Efficiency and degradation still missing
        assert!(spec.alternate_triple().is_none());

        spec.alternate_efficiency_km_l = Some(6.0);
        spec.alternate_degradation_per_kg = Some(0.0003);
        let (fuel, efficiency, degradation) = spec.alternate_triple().unwrap();
        assert_eq!(fuel, FuelType::Alcohol);
        assert!((efficiency - 6.0).abs() < f64::EPSILON);
        assert!((degradation - 0.0003).abs() < f64::EPSILON);
    }

    #[test]
    fn test_vehicle_description() {
        let vehicle = Vehicle {
            id: 1,
            spec_id: 1,
            brand: "Scania".to_string(),
            model: "R450".to_string(),
            plate: "ABC1234".to_string(),
            year: 2022,
            color: "White".to_string(),
            min_license: Some(LicenseClass::E),
            current_city: None,
            active: true,
        };
        assert_eq!(vehicle.description(), "Scania R450 - ABC1234");
    }
}
