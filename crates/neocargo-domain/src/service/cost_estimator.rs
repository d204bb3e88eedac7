//! Per-vehicle cost and travel time estimation

use neocargo_types::FuelType;
use serde::{Deserialize, Serialize};

use crate::model::{PriceConfig, Vehicle, VehicleSpec};
use crate::service::fuel_economy;

/// One shipment to be priced against the fleet
#[derive(Debug, Clone)]
pub struct ShipmentRequest {
    pub cargo_weight_kg: f64,
    pub distance_km: f64,
    /// Maximum allowed travel time; None = no limit
    pub max_hours: Option<f64>,
    pub toll_cost: f64,
}

/// Estimation result for a single vehicle and fuel choice.
///
/// Always produced, never an error: infeasibility is carried in
/// `feasible` plus a human-readable `reason` so callers can explain
/// why a vehicle was excluded. Numeric fields stay populated when the
/// only failure is the time budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostResult {
    pub vehicle_id: u64,
    pub vehicle: String,
    pub fuel_type: Option<FuelType>,
    pub effective_efficiency_km_l: f64,
    pub litres_needed: f64,
    pub fuel_cost: f64,
    pub toll_cost: f64,
    pub total_cost: f64,
    pub cost_with_margin: f64,
    pub travel_hours: f64,
    pub feasible: bool,
    pub reason: Option<String>,
}

/// Estimate cost and travel time for one vehicle carrying one shipment.
///
/// With `use_alternate_fuel` set, the vehicle spec's alternate fuel
/// triple is used when fully configured; otherwise the primary fuel
/// applies.
pub fn estimate(
    vehicle: &Vehicle,
    spec: &VehicleSpec,
    prices: &PriceConfig,
    request: &ShipmentRequest,
    use_alternate_fuel: bool,
) -> CostResult {
    if request.cargo_weight_kg > spec.max_payload_kg {
        return CostResult {
            vehicle_id: vehicle.id,
            vehicle: vehicle.description(),
            fuel_type: None,
            effective_efficiency_km_l: 0.0,
            litres_needed: 0.0,
            fuel_cost: 0.0,
            toll_cost: 0.0,
            total_cost: 0.0,
            cost_with_margin: 0.0,
            travel_hours: 0.0,
            feasible: false,
            reason: Some(format!(
                "Cargo exceeds the {} kg payload limit",
                spec.max_payload_kg
            )),
        };
    }

    let (fuel, base_efficiency, degradation) = match (use_alternate_fuel, spec.alternate_triple()) {
        (true, Some(triple)) => triple,
        _ => (
            spec.primary_fuel,
            spec.primary_efficiency_km_l,
            spec.primary_degradation_per_kg,
        ),
    };

    let efficiency =
        fuel_economy::effective_efficiency(base_efficiency, request.cargo_weight_kg, degradation);
    let litres_needed = request.distance_km / efficiency;
    let fuel_cost = litres_needed * prices.price_of(fuel);
    let total_cost = fuel_cost + request.toll_cost;
    let cost_with_margin = total_cost * (1.0 + prices.profit_margin_percent / 100.0);
    let travel_hours = request.distance_km / spec.average_speed_kmh;

    let mut feasible = true;
    let mut reason = None;
    if let Some(max_hours) = request.max_hours {
        if travel_hours > max_hours {
            feasible = false;
            reason = Some(format!(
                "Travel time ({travel_hours:.2} h) exceeds the {max_hours} h limit"
            ));
        }
    }

    CostResult {
        vehicle_id: vehicle.id,
        vehicle: vehicle.description(),
        fuel_type: Some(fuel),
        effective_efficiency_km_l: efficiency,
        litres_needed,
        fuel_cost,
        toll_cost: request.toll_cost,
        total_cost,
        cost_with_margin,
        travel_hours,
        feasible,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neocargo_types::VehicleType;

    fn flatbed() -> (Vehicle, VehicleSpec) {
        let spec = VehicleSpec {
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
        };
        let vehicle = Vehicle {
            id: 1,
            spec_id: 1,
            brand: "Scania".to_string(),
            model: "R450".to_string(),
            plate: "ABC1234".to_string(),
            year: 2022,
            color: "White".to_string(),
            min_license: None,
            current_city: None,
            active: true,
        };
        (vehicle, spec)
    }

    fn van() -> (Vehicle, VehicleSpec) {
        let spec = VehicleSpec {
            id: 2,
            vehicle_type: VehicleType::Van,
            primary_fuel: FuelType::Diesel,
            alternate_fuel: None,
            primary_efficiency_km_l: 10.0,
            alternate_efficiency_km_l: None,
            max_payload_kg: 3500.0,
            average_speed_kmh: 80.0,
            primary_degradation_per_kg: 0.001,
            alternate_degradation_per_kg: None,
        };
        let vehicle = Vehicle {
            id: 2,
            spec_id: 2,
            brand: "Ford".to_string(),
            model: "Transit".to_string(),
            plate: "DEF5678".to_string(),
            year: 2022,
            color: "White".to_string(),
            min_license: None,
            current_city: None,
            active: true,
        };
        (vehicle, spec)
    }

    fn request(weight: f64, distance: f64, max_hours: Option<f64>, toll: f64) -> ShipmentRequest {
        ShipmentRequest {
            cargo_weight_kg: weight,
            distance_km: distance,
            max_hours,
            toll_cost: toll,
        }
    }

    #[test]
    fn test_flatbed_estimate() {
        let (vehicle, spec) = flatbed();
        let prices = PriceConfig::default();
        let result = estimate(
            &vehicle,
            &spec,
            &prices,
            &request(10000.0, 430.0, Some(24.0), 45.80),
            false,
        );

        assert!(result.feasible);
        assert_eq!(result.fuel_type, Some(FuelType::Diesel));
        // 8 - (10000 * 0.0002) = 6 km/L
        assert!((result.effective_efficiency_km_l - 6.0).abs() < 1e-9);
        // 430 / 6 = 71.67 L
        assert!((result.litres_needed - 71.6667).abs() < 0.01);
        // 71.67 * 3.869 ~= 277.3
        assert!(result.fuel_cost > 270.0 && result.fuel_cost < 280.0);
        // 430 / 60 ~= 7.17 h
        assert!((result.travel_hours - 7.1667).abs() < 0.01);
    }

    #[test]
    fn test_payload_exceeded_is_infeasible_not_error() {
        let (vehicle, spec) = van();
        let prices = PriceConfig::default();
        let result = estimate(
            &vehicle,
            &spec,
            &prices,
            &request(5000.0, 430.0, Some(24.0), 45.80),
            false,
        );

        assert!(!result.feasible);
        assert!(result.reason.as_deref().unwrap().contains("payload limit"));
        assert!((result.litres_needed - 0.0).abs() < f64::EPSILON);
        assert!(result.fuel_type.is_none());
    }

    #[test]
    fn test_time_budget_exceeded_keeps_numbers() {
        let (vehicle, spec) = flatbed();
        let prices = PriceConfig::default();
        let result = estimate(
            &vehicle,
            &spec,
            &prices,
            &request(1000.0, 430.0, Some(2.0), 45.80),
            false,
        );

        assert!(!result.feasible);
        assert!(result.reason.as_deref().unwrap().contains("exceeds"));
        // Numeric fields still populated for inspection
        assert!(result.litres_needed > 0.0);
        assert!(result.cost_with_margin > 0.0);
        assert!(result.travel_hours > 2.0);
    }

    #[test]
    fn test_margin_formula() {
        let (vehicle, spec) = flatbed();
        let prices = PriceConfig::default();
        let result = estimate(
            &vehicle,
            &spec,
            &prices,
            &request(1000.0, 100.0, None, 10.0),
            false,
        );

        let expected = (result.fuel_cost + result.toll_cost) * 1.20;
        assert!((result.cost_with_margin - expected).abs() < 1e-6);
        assert!((result.total_cost - (result.fuel_cost + result.toll_cost)).abs() < 1e-9);
    }

    #[test]
    fn test_alternate_fuel_fallback_to_primary() {
        // No alternate configured: the flag is ignored
        let (vehicle, spec) = flatbed();
        let prices = PriceConfig::default();
        let primary = estimate(
            &vehicle,
            &spec,
            &prices,
            &request(1000.0, 430.0, None, 0.0),
            false,
        );
        let forced_alternate = estimate(
            &vehicle,
            &spec,
            &prices,
            &request(1000.0, 430.0, None, 0.0),
            true,
        );
        assert_eq!(primary.fuel_type, forced_alternate.fuel_type);
        assert!((primary.litres_needed - forced_alternate.litres_needed).abs() < f64::EPSILON);
    }

    #[test]
    fn test_alternate_fuel_triple_used() {
        let (vehicle, mut spec) = van();
        spec.alternate_fuel = Some(FuelType::Alcohol);
        spec.alternate_efficiency_km_l = Some(7.0);
        spec.alternate_degradation_per_kg = Some(0.0015);
        let prices = PriceConfig::default();

        let result = estimate(
            &vehicle,
            &spec,
            &prices,
            &request(1000.0, 430.0, None, 0.0),
            true,
        );

        assert_eq!(result.fuel_type, Some(FuelType::Alcohol));
        // 7 - 1000 * 0.0015 = 5.5 km/L
        assert!((result.effective_efficiency_km_l - 5.5).abs() < 1e-9);
        let expected_fuel_cost = (430.0 / 5.5) * prices.alcohol_price;
        assert!((result.fuel_cost - expected_fuel_cost).abs() < 1e-6);
    }
}
