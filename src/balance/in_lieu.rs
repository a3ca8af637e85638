//! In-lieu grant aggregation.
//!
//! This module sums approved compensatory-day grants for an employee,
//! resolving the two historically-used day-count fields through
//! [`InLieuGrant::effective_days`](crate::models::InLieuGrant::effective_days).

use rust_decimal::Decimal;
use tracing::warn;

use crate::models::ComputationWarning;
use crate::store::LeaveStore;

/// The result of aggregating an employee's in-lieu grants.
#[derive(Debug, Clone)]
pub struct InLieuAggregation {
    /// The summed day count over approved grants.
    pub total_days: Decimal,
    /// How many approved grants contributed.
    pub counted_grants: usize,
    /// Non-fatal signals recorded during aggregation.
    pub warnings: Vec<ComputationWarning>,
}

/// Sums the approved in-lieu grants for an employee.
///
/// Pending and rejected grants contribute zero. A fetch failure is recorded
/// as a warning and the aggregation returns a zero total; the overall
/// computation is not aborted.
pub fn aggregate_in_lieu(store: &dyn LeaveStore, employee_id: &str) -> InLieuAggregation {
    match store.in_lieu_grants(employee_id) {
        Ok(grants) => {
            let mut total_days = Decimal::ZERO;
            let mut counted_grants = 0;
            for grant in grants.iter().filter(|g| g.status.is_approved()) {
                total_days += grant.effective_days();
                counted_grants += 1;
            }
            InLieuAggregation {
                total_days,
                counted_grants,
                warnings: Vec::new(),
            }
        }
        Err(err) => {
            warn!(
                employee_id = %employee_id,
                error = %err,
                "in-lieu grant fetch failed; subtotal contributes zero"
            );
            InLieuAggregation {
                total_days: Decimal::ZERO,
                counted_grants: 0,
                warnings: vec![ComputationWarning::InLieuFetchFailed {
                    message: err.to_string(),
                }],
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::str::FromStr;

    use crate::models::{ApprovalStatus, InLieuGrant};
    use crate::store::{FaultPoint, InMemoryStore};

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_grant(
        id: &str,
        days: Option<&str>,
        compensation_days: Option<&str>,
        status: ApprovalStatus,
    ) -> InLieuGrant {
        InLieuGrant {
            id: id.to_string(),
            employee_id: "emp_001".to_string(),
            days: days.map(dec),
            compensation_days: compensation_days.map(dec),
            status,
            created_at: Utc::now(),
        }
    }

    /// IL-001: only approved grants count.
    #[test]
    fn test_only_approved_grants_count() {
        let store = InMemoryStore::new();
        store.insert_grant(create_grant("g1", Some("2"), None, ApprovalStatus::Approved));
        store.insert_grant(create_grant("g2", Some("5"), None, ApprovalStatus::Pending));
        store.insert_grant(create_grant("g3", Some("3"), None, ApprovalStatus::Rejected));

        let result = aggregate_in_lieu(&store, "emp_001");

        assert_eq!(result.total_days, dec("2"));
        assert_eq!(result.counted_grants, 1);
        assert!(result.warnings.is_empty());
    }

    /// IL-002: canonical field preferred, legacy used as fallback.
    #[test]
    fn test_field_fallback_chain() {
        let store = InMemoryStore::new();
        store.insert_grant(create_grant(
            "g1",
            Some("2"),
            Some("3"),
            ApprovalStatus::Approved,
        ));
        store.insert_grant(create_grant(
            "g2",
            None,
            Some("1.5"),
            ApprovalStatus::Approved,
        ));
        store.insert_grant(create_grant("g3", None, None, ApprovalStatus::Approved));

        let result = aggregate_in_lieu(&store, "emp_001");

        // 2 (canonical wins) + 1.5 (legacy fallback) + 0 (neither)
        assert_eq!(result.total_days, dec("3.5"));
        assert_eq!(result.counted_grants, 3);
    }

    /// IL-003: fetch failure contributes zero with a degraded warning.
    #[test]
    fn test_fetch_failure_contributes_zero() {
        let store = InMemoryStore::new();
        store.insert_grant(create_grant("g1", Some("2"), None, ApprovalStatus::Approved));
        store.inject_fault(FaultPoint::InLieuGrants);

        let result = aggregate_in_lieu(&store, "emp_001");

        assert_eq!(result.total_days, Decimal::ZERO);
        assert_eq!(result.counted_grants, 0);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].is_degraded());
    }

    #[test]
    fn test_no_grants_sums_to_zero() {
        let store = InMemoryStore::new();

        let result = aggregate_in_lieu(&store, "emp_001");

        assert_eq!(result.total_days, Decimal::ZERO);
        assert_eq!(result.counted_grants, 0);
        assert!(result.warnings.is_empty());
    }
}
