//! Shipment quoting against the active fleet

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use neocargo_domain::model::{City, Order, QuoteOption, QuoteOptions, Route};
use neocargo_domain::repository::{
    CityRepository, OrderRepository, PriceConfigProvider, VehicleRepository,
};
use neocargo_domain::service::{select_best, CostResult, QuoteSelection, ShipmentRequest};
use neocargo_store::Store;
use neocargo_types::{Error, OrderStatus, Result};

use crate::resolver;

/// An ad-hoc quote, not tied to any stored order
#[derive(Debug, Serialize)]
pub struct QuotePreview {
    pub origin: City,
    pub destination: City,
    pub route: Route,
    pub selection: QuoteSelection,
}

/// Quote a shipment without creating an order.
///
/// `max_hours` of None means no time budget.
pub fn preview<R>(
    repo: &R,
    origin_label: &str,
    destination_label: &str,
    cargo_weight_kg: f64,
    max_hours: Option<f64>,
) -> Result<QuotePreview>
where
    R: CityRepository + VehicleRepository + PriceConfigProvider,
{
    if cargo_weight_kg <= 0.0 {
        return Err(Error::validation("cargo weight must be positive"));
    }

    let origin = resolver::resolve_city(repo, origin_label)?;
    let destination = resolver::resolve_city(repo, destination_label)?;
    let route = resolver::resolve_route(repo, &origin, &destination)?;

    let request = ShipmentRequest {
        cargo_weight_kg,
        distance_km: route.distance_km,
        max_hours,
        toll_cost: route.toll_cost,
    };
    let fleet = repo.active_fleet()?;
    let prices = repo.current_prices()?;
    let selection = select_best(&fleet, &prices, &request);

    Ok(QuotePreview {
        origin,
        destination,
        route,
        selection,
    })
}

/// Compute and attach quote options to a drafted order.
///
/// The order's deadline becomes the time budget (days times 24 h).
/// When at least one vehicle is feasible the three options are stored
/// and the order moves to pending approval; when none is, the order
/// stays in drafting with no options, which is an outcome rather than
/// an error.
pub fn quote_order(store: &mut Store, order_id: u64) -> Result<Order> {
    store.transaction(|tables| {
        let order = tables
            .find_order(order_id)?
            .ok_or_else(|| Error::NotFound(format!("order {order_id}")))?;
        if order.status != OrderStatus::Quote {
            return Err(Error::validation(format!(
                "order {order_id} has already been quoted"
            )));
        }

        let origin = resolver::resolve_city(tables, &order.origin)?;
        let destination = resolver::resolve_city(tables, &order.destination)?;
        let route = resolver::resolve_route(tables, &origin, &destination)?;

        let request = ShipmentRequest {
            cargo_weight_kg: order.cargo_weight_kg,
            distance_km: route.distance_km,
            max_hours: Some(f64::from(order.deadline_days) * 24.0),
            toll_cost: route.toll_cost,
        };
        let fleet = tables.active_fleet()?;
        let prices = tables.current_prices()?;
        let selection = select_best(&fleet, &prices, &request);

        let (Some(cheapest), Some(fastest), Some(balanced)) =
            (&selection.cheapest, &selection.fastest, &selection.balanced)
        else {
            info!(order_id, "no feasible vehicle for order");
            return Ok(order);
        };

        let stored = tables.order_mut(order_id)?;
        stored.quote_options = Some(QuoteOptions {
            economical: to_option(cheapest),
            fast: to_option(fastest),
            balanced: to_option(balanced),
        });
        stored.status = OrderStatus::Pending;
        stored.updated_at = Utc::now();
        info!(order_id, "order quoted");
        Ok(stored.clone())
    })
}

fn to_option(result: &CostResult) -> QuoteOption {
    QuoteOption {
        price: result.cost_with_margin,
        hours: result.travel_hours,
        vehicle: result.vehicle.clone(),
    }
}
