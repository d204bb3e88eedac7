//! Delivery issue reporting and resolution
//!
//! Issue status only moves forward: open, under review, resolved.

use chrono::Utc;
use tracing::info;

use neocargo_domain::model::DeliveryIssue;
use neocargo_store::Store;
use neocargo_types::{AssignmentStatus, Error, IssueStatus, IssueType, Result};

/// Report a problem on an active (pending or in-progress) delivery
pub fn report_issue(
    store: &mut Store,
    assignment_id: u64,
    issue_type: IssueType,
    description: &str,
) -> Result<DeliveryIssue> {
    if description.trim().is_empty() {
        return Err(Error::validation("issue description must not be empty"));
    }

    store.transaction(|tables| {
        let assignment = tables
            .find_assignment(assignment_id)
            .ok_or_else(|| Error::NotFound(format!("assignment {assignment_id}")))?;
        if !matches!(
            assignment.status,
            AssignmentStatus::Pending | AssignmentStatus::InProgress
        ) {
            return Err(Error::validation(format!(
                "delivery {assignment_id} is {} and cannot take issue reports",
                assignment.status
            )));
        }

        let id = tables.insert_issue(DeliveryIssue {
            id: 0,
            assignment_id,
            issue_type,
            description: description.trim().to_string(),
            status: IssueStatus::Open,
            resolution: None,
            resolved_at: None,
            created_at: Utc::now(),
        });
        info!(issue_id = id, assignment_id, %issue_type, "issue reported");
        tables
            .find_issue(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("issue {id}")))
    })
}

/// Move an open issue under review
pub fn review_issue(store: &mut Store, issue_id: u64) -> Result<DeliveryIssue> {
    store.transaction(|tables| {
        let issue = tables.issue_mut(issue_id)?;
        if issue.status != IssueStatus::Open {
            return Err(Error::validation(format!(
                "issue {issue_id} is {} and cannot move under review",
                issue.status
            )));
        }
        issue.status = IssueStatus::UnderReview;
        info!(issue_id, "issue under review");
        Ok(issue.clone())
    })
}

/// Resolve an issue, recording the resolution text and timestamp.
///
/// Review is optional: an open issue may be resolved directly.
pub fn resolve_issue(store: &mut Store, issue_id: u64, resolution: &str) -> Result<DeliveryIssue> {
    if resolution.trim().is_empty() {
        return Err(Error::validation("resolution must not be empty"));
    }

    store.transaction(|tables| {
        let issue = tables.issue_mut(issue_id)?;
        if issue.status == IssueStatus::Resolved {
            return Err(Error::validation(format!(
                "issue {issue_id} has already been resolved"
            )));
        }
        issue.status = IssueStatus::Resolved;
        issue.resolution = Some(resolution.trim().to_string());
        issue.resolved_at = Some(Utc::now());
        info!(issue_id, "issue resolved");
        Ok(issue.clone())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::{assign, complete, start};
    use crate::order::{approve, confirm_option, create_order, NewOrder};
    use crate::quote::quote_order;
    use crate::testutil::seeded_store;
    use neocargo_types::QuoteChoice;

    fn assigned(store: &mut Store) -> u64 {
        let order = create_order(
            store,
            NewOrder {
                client: "Acme Ltda".to_string(),
                origin: "São Paulo - SP".to_string(),
                destination: "Rio de Janeiro - RJ".to_string(),
                cargo_weight_kg: 1000.0,
                deadline_days: 2,
                notes: None,
            },
        )
        .unwrap();
        quote_order(store, order.id).unwrap();
        confirm_option(store, order.id, QuoteChoice::Balanced).unwrap();
        approve(store, order.id).unwrap();
        assign(store, order.id).unwrap().id
    }

    #[test]
    fn test_report_on_pending_delivery() {
        let mut store = seeded_store();
        let assignment_id = assigned(&mut store);

        let issue =
            report_issue(&mut store, assignment_id, IssueType::Vehicle, "flat tire").unwrap();
        assert_eq!(issue.status, IssueStatus::Open);
        assert_eq!(issue.assignment_id, assignment_id);
        assert!(issue.resolution.is_none());
    }

    #[test]
    fn test_report_rejected_after_completion() {
        let mut store = seeded_store();
        let assignment_id = assigned(&mut store);
        start(&mut store, assignment_id).unwrap();
        complete(&mut store, assignment_id).unwrap();

        let err =
            report_issue(&mut store, assignment_id, IssueType::Other, "late").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_report_requires_description() {
        let mut store = seeded_store();
        let assignment_id = assigned(&mut store);
        let err = report_issue(&mut store, assignment_id, IssueType::Route, "  ").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_status_moves_forward_only() {
        let mut store = seeded_store();
        let assignment_id = assigned(&mut store);
        let issue =
            report_issue(&mut store, assignment_id, IssueType::Route, "road closed").unwrap();

        let reviewed = review_issue(&mut store, issue.id).unwrap();
        assert_eq!(reviewed.status, IssueStatus::UnderReview);

        // Already past open
        assert!(review_issue(&mut store, issue.id).is_err());

        let resolved = resolve_issue(&mut store, issue.id, "took the coastal road").unwrap();
        assert_eq!(resolved.status, IssueStatus::Resolved);
        assert!(resolved.resolved_at.is_some());

        assert!(resolve_issue(&mut store, issue.id, "again").is_err());
    }

    #[test]
    fn test_open_issue_may_resolve_without_review() {
        let mut store = seeded_store();
        let assignment_id = assigned(&mut store);
        let issue =
            report_issue(&mut store, assignment_id, IssueType::Cargo, "box damaged").unwrap();

        let resolved = resolve_issue(&mut store, issue.id, "repacked").unwrap();
        assert_eq!(resolved.status, IssueStatus::Resolved);
        assert_eq!(resolved.resolution.as_deref(), Some("repacked"));
    }

    #[test]
    fn test_unknown_assignment_is_not_found() {
        let mut store = seeded_store();
        let err = report_issue(&mut store, 999, IssueType::Other, "ghost").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
