//! License rules and driver/vehicle lookup for assignment

use std::collections::HashSet;

use neocargo_types::LicenseClass;

use crate::model::{Driver, Vehicle};

/// The classes a given license may operate: each class covers
/// everything below it plus itself (B ⊂ C ⊂ D ⊂ E)
pub fn license_covers(license: LicenseClass) -> &'static [LicenseClass] {
    use LicenseClass::*;
    match license {
        B => &[B],
        C => &[B, C],
        D => &[B, C, D],
        E => &[B, C, D, E],
    }
}

/// Whether a driver license may operate a vehicle with the given
/// minimum class. No minimum means no restriction.
pub fn can_operate(driver_license: LicenseClass, vehicle_min_license: Option<LicenseClass>) -> bool {
    match vehicle_min_license {
        None => true,
        Some(min) => license_covers(driver_license).contains(&min),
    }
}

/// All license classes whose coverage includes `min_license`
pub fn classes_covering(min_license: LicenseClass) -> Vec<LicenseClass> {
    use LicenseClass::*;
    [B, C, D, E]
        .into_iter()
        .filter(|class| license_covers(*class).contains(&min_license))
        .collect()
}

/// Find an available driver stationed in the origin city.
///
/// Drivers are ranked by ascending completed-delivery count so the
/// least-utilized driver wins; id order breaks ties.
pub fn find_available_driver<'a>(
    drivers: &'a [Driver],
    origin_city: u64,
    min_license: Option<LicenseClass>,
) -> Option<&'a Driver> {
    drivers
        .iter()
        .filter(|d| d.available && d.current_city == origin_city)
        .filter(|d| can_operate(d.license, min_license))
        .min_by_key(|d| (d.completed_deliveries, d.id))
}

/// Find an active vehicle stationed in the origin city that is not
/// bound to an in-progress assignment.
///
/// When a driver license is given, only vehicles that driver may
/// operate qualify. Candidates are taken in ascending id order.
pub fn find_available_vehicle<'a>(
    vehicles: &'a [Vehicle],
    busy_vehicle_ids: &HashSet<u64>,
    origin_city: u64,
    driver_license: Option<LicenseClass>,
) -> Option<&'a Vehicle> {
    vehicles
        .iter()
        .filter(|v| v.active && v.current_city == Some(origin_city))
        .filter(|v| !busy_vehicle_ids.contains(&v.id))
        .filter(|v| match driver_license {
            Some(license) => can_operate(license, v.min_license),
            None => true,
        })
        .min_by_key(|v| v.id)
}
