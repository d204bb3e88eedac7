//! Order lifecycle: creation, option confirmation, approval

use chrono::Utc;
use tracing::info;

use neocargo_domain::model::Order;
use neocargo_domain::repository::OrderRepository;
use neocargo_store::Store;
use neocargo_types::{Error, OrderStatus, QuoteChoice, Result};

/// Fields supplied by the client when drafting an order
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub client: String,
    pub origin: String,
    pub destination: String,
    pub cargo_weight_kg: f64,
    pub deadline_days: u32,
    pub notes: Option<String>,
}

/// Draft a new order in quoting state.
///
/// City labels are kept as free text here; they are resolved when the
/// order is quoted or assigned.
pub fn create_order(store: &mut Store, new: NewOrder) -> Result<Order> {
    if new.client.trim().is_empty() {
        return Err(Error::validation("client name must not be empty"));
    }
    if new.cargo_weight_kg <= 0.0 {
        return Err(Error::validation("cargo weight must be positive"));
    }
    if new.deadline_days == 0 {
        return Err(Error::validation("deadline must be at least one day"));
    }

    store.transaction(|tables| {
        let now = Utc::now();
        let id = tables.insert_order(Order {
            id: 0,
            client: new.client.clone(),
            origin: new.origin.clone(),
            destination: new.destination.clone(),
            cargo_weight_kg: new.cargo_weight_kg,
            deadline_days: new.deadline_days,
            notes: new.notes.clone(),
            chosen_option: None,
            quote_options: None,
            final_price: None,
            final_hours: None,
            final_vehicle: None,
            status: OrderStatus::Quote,
            created_at: now,
            updated_at: now,
        });
        info!(order_id = id, client = %new.client, "order created");
        tables
            .find_order(id)?
            .ok_or_else(|| Error::NotFound(format!("order {id}")))
    })
}

/// Record the client's pick among the three quoted options.
///
/// The picked option's price, time and vehicle become the order's
/// final terms.
pub fn confirm_option(store: &mut Store, order_id: u64, choice: QuoteChoice) -> Result<Order> {
    store.transaction(|tables| {
        let order = tables.order_mut(order_id)?;
        if order.status != OrderStatus::Pending {
            return Err(Error::validation(format!(
                "order {order_id} is {} and cannot confirm an option",
                order.status
            )));
        }
        let Some(options) = &order.quote_options else {
            return Err(Error::validation(format!(
                "order {order_id} has no quote options"
            )));
        };

        let picked = options.get(choice);
        order.final_price = Some(picked.price);
        order.final_hours = Some(picked.hours);
        order.final_vehicle = Some(picked.vehicle.clone());
        order.chosen_option = Some(choice);
        order.updated_at = Utc::now();
        info!(order_id, %choice, "quote option confirmed");
        Ok(order.clone())
    })
}

/// Approve a pending order; requires a confirmed option
pub fn approve(store: &mut Store, order_id: u64) -> Result<Order> {
    store.transaction(|tables| {
        let order = tables.order_mut(order_id)?;
        if order.status != OrderStatus::Pending {
            return Err(Error::validation(format!(
                "order {order_id} is {} and cannot be approved",
                order.status
            )));
        }
        if order.chosen_option.is_none() {
            return Err(Error::validation(format!(
                "order {order_id} has no confirmed option"
            )));
        }
        order.status = OrderStatus::Approved;
        order.updated_at = Utc::now();
        info!(order_id, "order approved");
        Ok(order.clone())
    })
}

/// Reject a pending order
pub fn reject(store: &mut Store, order_id: u64) -> Result<Order> {
    store.transaction(|tables| {
        let order = tables.order_mut(order_id)?;
        if order.status != OrderStatus::Pending {
            return Err(Error::validation(format!(
                "order {order_id} is {} and cannot be rejected",
                order.status
            )));
        }
        order.status = OrderStatus::Rejected;
        order.updated_at = Utc::now();
        info!(order_id, "order rejected");
        Ok(order.clone())
    })
}

/// Client-side cancellation, allowed while still quoting or pending
pub fn cancel_order(store: &mut Store, order_id: u64) -> Result<Order> {
    store.transaction(|tables| {
        let order = tables.order_mut(order_id)?;
        if !order.can_cancel() {
            return Err(Error::validation(format!(
                "order {order_id} is {} and cannot be cancelled",
                order.status
            )));
        }
        order.status = OrderStatus::Cancelled;
        order.updated_at = Utc::now();
        info!(order_id, "order cancelled");
        Ok(order.clone())
    })
}
