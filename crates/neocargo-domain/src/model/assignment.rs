//! Delivery assignments and driver-reported issues

use chrono::{DateTime, Utc};
use neocargo_types::{AssignmentStatus, IssueStatus, IssueType};
use serde::{Deserialize, Serialize};

/// Binding of one order to one driver and one vehicle.
///
/// At most one non-cancelled assignment exists per order. There is no
/// in-place reassignment: freeing the resources means cancelling and
/// creating a new one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: u64,
    pub order_id: u64,
    pub driver_id: u64,
    pub vehicle_id: u64,
    pub status: AssignmentStatus,
    /// Free-text notes; cancellation reasons land here
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Assignment {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.status,
            AssignmentStatus::Completed | AssignmentStatus::Cancelled
        )
    }
}

/// A problem reported by the driver on an active delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryIssue {
    pub id: u64,
    pub assignment_id: u64,
    pub issue_type: IssueType,
    pub description: String,
    pub status: IssueStatus,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
