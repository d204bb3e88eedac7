//! Automatic driver and vehicle assignment

use std::collections::HashSet;

use chrono::Utc;
use tracing::info;

use neocargo_domain::model::Assignment;
use neocargo_domain::repository::{
    AssignmentRepository, DriverRepository, OrderRepository, VehicleRepository,
};
use neocargo_domain::service::{find_available_driver, find_available_vehicle};
use neocargo_store::Store;
use neocargo_types::{AssignmentStatus, Error, OrderStatus, Result};

use crate::resolver;

/// Assign a vehicle and driver to an approved order.
///
/// The vehicle is picked first (lowest id wins among idle active
/// vehicles in the origin city), then the least-utilized driver who
/// may operate it. The driver is marked unavailable and the order
/// moves to in-transit; the delivery itself starts separately.
pub fn assign(store: &mut Store, order_id: u64) -> Result<Assignment> {
    store.transaction(|tables| {
        let order = tables
            .find_order(order_id)?
            .ok_or_else(|| Error::NotFound(format!("order {order_id}")))?;
        if order.status != OrderStatus::Approved {
            return Err(Error::validation(format!(
                "order {order_id} must be approved before assignment"
            )));
        }
        if let Some(existing) = tables.assignment_for_order(order_id)? {
            if existing.status != AssignmentStatus::Cancelled {
                return Err(Error::validation(format!(
                    "order {order_id} already has an assignment"
                )));
            }
        }

        let origin = resolver::resolve_city(tables, &order.origin)?;
        // Destination is resolved on completion but validated up front
        resolver::resolve_city(tables, &order.destination)?;

        let busy: HashSet<u64> = tables.busy_vehicle_ids()?.into_iter().collect();
        let fleet = tables.active_fleet()?;
        let vehicles: Vec<_> = fleet.into_iter().map(|(v, _)| v).collect();
        let vehicle = find_available_vehicle(&vehicles, &busy, origin.id, None)
            .cloned()
            .ok_or_else(|| {
                Error::validation(format!("no vehicle available in {}", origin.full_name()))
            })?;

        let drivers = tables.drivers()?;
        let driver = find_available_driver(&drivers, origin.id, vehicle.min_license)
            .cloned()
            .ok_or_else(|| match vehicle.min_license {
                Some(class) => Error::validation(format!(
                    "no driver with license {class} available in {}",
                    origin.full_name()
                )),
                None => Error::validation(format!(
                    "no driver available in {}",
                    origin.full_name()
                )),
            })?;

        let now = Utc::now();
        let id = tables.insert_assignment(Assignment {
            id: 0,
            order_id,
            driver_id: driver.id,
            vehicle_id: vehicle.id,
            status: AssignmentStatus::Pending,
            notes: None,
            created_at: now,
            updated_at: now,
        })?;
        tables.driver_mut(driver.id)?.available = false;

        let stored_order = tables.order_mut(order_id)?;
        stored_order.status = OrderStatus::InTransit;
        stored_order.updated_at = now;

        info!(
            order_id,
            assignment_id = id,
            driver_id = driver.id,
            vehicle_id = vehicle.id,
            "order assigned"
        );
        Ok(tables.assignment_mut(id)?.clone())
    })
}

/// Put a pending assignment on the road
pub fn start(store: &mut Store, assignment_id: u64) -> Result<Assignment> {
    store.transaction(|tables| {
        let assignment = tables
            .find_assignment(assignment_id)
            .ok_or_else(|| Error::NotFound(format!("assignment {assignment_id}")))?
            .clone();
        if assignment.status != AssignmentStatus::Pending {
            return Err(Error::validation(format!(
                "assignment {assignment_id} is {} and cannot be started",
                assignment.status
            )));
        }
        if tables.driver_has_in_progress(assignment.driver_id)? {
            return Err(Error::validation(format!(
                "driver {} already has a delivery in progress",
                assignment.driver_id
            )));
        }

        let stored = tables.assignment_mut(assignment_id)?;
        stored.status = AssignmentStatus::InProgress;
        stored.updated_at = Utc::now();
        info!(assignment_id, "delivery started");
        Ok(stored.clone())
    })
}

/// Complete an in-progress delivery.
///
/// Driver and vehicle relocate to the destination city, the driver
/// becomes available again with one more completed delivery, and the
/// order closes.
pub fn complete(store: &mut Store, assignment_id: u64) -> Result<Assignment> {
    store.transaction(|tables| {
        let assignment = tables
            .find_assignment(assignment_id)
            .ok_or_else(|| Error::NotFound(format!("assignment {assignment_id}")))?
            .clone();
        if assignment.status == AssignmentStatus::Completed {
            return Err(Error::validation(format!(
                "delivery {assignment_id} has already been completed"
            )));
        }
        if assignment.status != AssignmentStatus::InProgress {
            return Err(Error::validation(format!(
                "delivery {assignment_id} must be in progress to complete"
            )));
        }

        let order = tables
            .find_order(assignment.order_id)?
            .ok_or_else(|| Error::NotFound(format!("order {}", assignment.order_id)))?;
        let destination = resolver::resolve_city(tables, &order.destination)?;
        let now = Utc::now();

        let driver = tables.driver_mut(assignment.driver_id)?;
        driver.current_city = destination.id;
        driver.available = true;
        driver.completed_deliveries += 1;

        tables.vehicle_mut(assignment.vehicle_id)?.current_city = Some(destination.id);

        let stored_order = tables.order_mut(assignment.order_id)?;
        stored_order.status = OrderStatus::Completed;
        stored_order.updated_at = now;

        let stored = tables.assignment_mut(assignment_id)?;
        stored.status = AssignmentStatus::Completed;
        stored.updated_at = now;
        info!(assignment_id, order_id = assignment.order_id, "delivery completed");
        Ok(stored.clone())
    })
}

/// Cancel a not-yet-completed assignment.
///
/// The driver is freed, the reason lands in the assignment notes, and
/// the order returns to approved so it can be reassigned.
pub fn cancel(store: &mut Store, assignment_id: u64, reason: Option<&str>) -> Result<Assignment> {
    store.transaction(|tables| {
        let assignment = tables
            .find_assignment(assignment_id)
            .ok_or_else(|| Error::NotFound(format!("assignment {assignment_id}")))?
            .clone();
        if assignment.is_terminal() {
            return Err(Error::validation(format!(
                "delivery {assignment_id} is {} and cannot be cancelled",
                assignment.status
            )));
        }

        let now = Utc::now();
        tables.driver_mut(assignment.driver_id)?.available = true;

        let stored_order = tables.order_mut(assignment.order_id)?;
        stored_order.status = OrderStatus::Approved;
        stored_order.updated_at = now;

        let stored = tables.assignment_mut(assignment_id)?;
        stored.status = AssignmentStatus::Cancelled;
        stored.notes = reason.map(str::to_string);
        stored.updated_at = now;
        info!(assignment_id, "delivery cancelled");
        Ok(stored.clone())
    })
}
