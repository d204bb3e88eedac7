//! Fleet-wide quote selection

use serde::{Deserialize, Serialize};

use crate::model::{PriceConfig, Vehicle, VehicleSpec};
use crate::service::cost_estimator::{estimate, CostResult, ShipmentRequest};

/// The three distinguished results of a fleet quote, plus every
/// per-vehicle result for display.
///
/// All three slots are None when no vehicle is feasible; callers must
/// treat that as "cannot quote", not as an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteSelection {
    /// Minimum fuel consumed (litres), not minimum price
    pub cheapest: Option<CostResult>,
    /// Minimum travel time
    pub fastest: Option<CostResult>,
    /// Minimum normalized cost + normalized time
    pub balanced: Option<CostResult>,
    pub all_results: Vec<CostResult>,
}

impl QuoteSelection {
    pub fn has_feasible(&self) -> bool {
        self.cheapest.is_some()
    }
}

/// Quote one shipment against the whole active fleet.
///
/// Each vehicle is estimated with its primary fuel; when an alternate
/// fuel is configured, the alternate variant replaces the primary one
/// only if it consumes strictly less fuel. That litre-based rule (not
/// a cost comparison) is what makes the "economical" option economical.
pub fn select_best(
    fleet: &[(Vehicle, VehicleSpec)],
    prices: &PriceConfig,
    request: &ShipmentRequest,
) -> QuoteSelection {
    let mut all_results = Vec::with_capacity(fleet.len());

    for (vehicle, spec) in fleet {
        let primary = estimate(vehicle, spec, prices, request, false);
        if spec.alternate_triple().is_some() {
            let alternate = estimate(vehicle, spec, prices, request, true);
            if alternate.litres_needed < primary.litres_needed {
                all_results.push(alternate);
            } else {
                all_results.push(primary);
            }
        } else {
            all_results.push(primary);
        }
    }

    let feasible: Vec<&CostResult> = all_results.iter().filter(|r| r.feasible).collect();

    if feasible.is_empty() {
        return QuoteSelection {
            cheapest: None,
            fastest: None,
            balanced: None,
            all_results,
        };
    }

    let cheapest = min_by_first(&feasible, |r| r.litres_needed).clone();
    let fastest = min_by_first(&feasible, |r| r.travel_hours).clone();

    let balanced = if feasible.len() > 1 {
        let costs: Vec<f64> = feasible.iter().map(|r| r.cost_with_margin).collect();
        let hours: Vec<f64> = feasible.iter().map(|r| r.travel_hours).collect();

        let cost_min = costs.iter().cloned().fold(f64::INFINITY, f64::min);
        let cost_max = costs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let hours_min = hours.iter().cloned().fold(f64::INFINITY, f64::min);
        let hours_max = hours.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        // Min-max rescaling to [0, 1] on each axis; a degenerate axis
        // (min == max) uses a denominator of 1 so it contributes zero
        let cost_range = if cost_max > cost_min { cost_max - cost_min } else { 1.0 };
        let hours_range = if hours_max > hours_min { hours_max - hours_min } else { 1.0 };

        min_by_first(&feasible, |r| {
            let cost_norm = (r.cost_with_margin - cost_min) / cost_range;
            let hours_norm = (r.travel_hours - hours_min) / hours_range;
            cost_norm + hours_norm
        })
        .clone()
    } else {
        feasible[0].clone()
    };

    QuoteSelection {
        cheapest: Some(cheapest),
        fastest: Some(fastest),
        balanced: Some(balanced),
        all_results,
    }
}

/// Minimum by key; the first of equally-minimal results wins
fn min_by_first<'a>(results: &[&'a CostResult], key: impl Fn(&CostResult) -> f64) -> &'a CostResult {
    let mut best = results[0];
    let mut best_key = key(best);
    for result in &results[1..] {
        let k = key(result);
        if k < best_key {
            best = result;
            best_key = k;
        }
    }
    best
}
