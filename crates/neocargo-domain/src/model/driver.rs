//! Drivers and their availability state

use chrono::{DateTime, Utc};
use neocargo_types::LicenseClass;
use serde::{Deserialize, Serialize};

/// A driver available for deliveries.
///
/// The `available` flag is the mutual-exclusion gate used by the
/// matcher: an unavailable driver is invisible to assignment searches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    pub id: u64,
    pub name: String,
    pub license: LicenseClass,
    /// City where the driver is currently stationed
    pub current_city: u64,
    pub available: bool,
    /// Counter of successfully completed deliveries, used for
    /// load-balancing when picking a driver
    pub completed_deliveries: u32,
    pub created_at: DateTime<Utc>,
}
