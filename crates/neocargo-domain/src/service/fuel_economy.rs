//! Weight-degraded fuel economy model

/// Floor for effective efficiency, keeping downstream divisions safe
pub const MIN_EFFICIENCY_KM_L: f64 = 0.01;

/// Effective efficiency (km/L) after weight-based degradation.
///
/// Heavier loads reduce fuel economy linearly: each kg of cargo costs
/// `degradation_per_kg` km/L. The base rate and the degradation are
/// per-vehicle-type configuration, not physics. The result is floored
/// at [`MIN_EFFICIENCY_KM_L`].
pub fn effective_efficiency(
    base_efficiency_km_l: f64,
    cargo_weight_kg: f64,
    degradation_per_kg: f64,
) -> f64 {
    let degraded = base_efficiency_km_l - cargo_weight_kg * degradation_per_kg;
    degraded.max(MIN_EFFICIENCY_KM_L)
}
