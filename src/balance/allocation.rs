//! Base allocation resolution.
//!
//! This module determines the base number of entitlement days for an
//! employee and year, preferring an explicit yearly override row over the
//! tenure formula.

use rust_decimal::Decimal;
use tracing::warn;

use crate::config::EntitlementPolicy;
use crate::models::{AllocationType, ComputationWarning, Employee};
use crate::store::LeaveStore;

/// Where a resolved base entitlement came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationSource {
    /// An explicit yearly allocation row was used.
    YearlyOverride {
        /// The id of the allocation row that won.
        allocation_id: String,
    },
    /// No usable override existed; the tenure formula was applied.
    TenureFormula {
        /// The employee's completed years of service.
        years_of_service: u32,
    },
}

/// The result of a base allocation resolution.
#[derive(Debug, Clone)]
pub struct AllocationResolution {
    /// The resolved base entitlement days.
    pub base_days: Decimal,
    /// Where the value came from.
    pub source: AllocationSource,
    /// Non-fatal signals recorded during resolution.
    pub warnings: Vec<ComputationWarning>,
}

/// Resolves the base entitlement for an employee and year.
///
/// Resolution order:
/// 1. An annual-type [`YearlyAllocation`](crate::models::YearlyAllocation)
///    row for the year, when one exists with positive `allocated_days`.
///    Duplicate rows are resolved most-recently-created wins, with a
///    [`ComputationWarning::DuplicateAllocations`] recorded.
/// 2. The tenure formula from [`EntitlementPolicy`].
///
/// A lookup failure does not abort resolution: it is recorded as a warning
/// and the tenure formula is applied.
pub fn resolve_base_allocation(
    store: &dyn LeaveStore,
    policy: &EntitlementPolicy,
    employee: &Employee,
    year: i32,
) -> AllocationResolution {
    let mut warnings = Vec::new();

    match store.yearly_allocations(&employee.id, year, AllocationType::Annual) {
        Ok(rows) => {
            if rows.len() > 1 {
                warn!(
                    employee_id = %employee.id,
                    year,
                    count = rows.len(),
                    "duplicate yearly allocations; using most recently created"
                );
                warnings.push(ComputationWarning::DuplicateAllocations {
                    year,
                    count: rows.len(),
                });
            }
            if let Some(row) = rows.into_iter().max_by_key(|r| r.created_at) {
                if row.allocated_days > Decimal::ZERO {
                    return AllocationResolution {
                        base_days: row.allocated_days,
                        source: AllocationSource::YearlyOverride {
                            allocation_id: row.id,
                        },
                        warnings,
                    };
                }
            }
        }
        Err(err) => {
            warn!(
                employee_id = %employee.id,
                year,
                error = %err,
                "allocation lookup failed; falling back to tenure formula"
            );
            warnings.push(ComputationWarning::AllocationLookupFailed {
                message: err.to_string(),
            });
        }
    }

    AllocationResolution {
        base_days: policy.base_days_for_tenure(employee.years_of_service),
        source: AllocationSource::TenureFormula {
            years_of_service: employee.years_of_service,
        },
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::str::FromStr;

    use crate::models::YearlyAllocation;
    use crate::store::{FaultPoint, InMemoryStore};

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_employee(years_of_service: u32) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            name: "Amina Osei".to_string(),
            years_of_service,
            cached_balance: None,
        }
    }

    fn create_allocation(id: &str, days: &str, created_hour: u32) -> YearlyAllocation {
        YearlyAllocation {
            id: id.to_string(),
            employee_id: "emp_001".to_string(),
            year: 2026,
            allocation_type: AllocationType::Annual,
            allocated_days: dec(days),
            created_at: Utc.with_ymd_and_hms(2025, 12, 1, created_hour, 0, 0).unwrap(),
        }
    }

    /// AR-001: explicit positive override wins regardless of tenure.
    #[test]
    fn test_positive_override_wins() {
        let store = InMemoryStore::new();
        store.insert_allocation(create_allocation("alloc_1", "20", 9));
        let employee = create_test_employee(12);

        let result =
            resolve_base_allocation(&store, &EntitlementPolicy::default(), &employee, 2026);

        assert_eq!(result.base_days, dec("20"));
        assert_eq!(
            result.source,
            AllocationSource::YearlyOverride {
                allocation_id: "alloc_1".to_string()
            }
        );
        assert!(result.warnings.is_empty());
    }

    /// AR-002: no override row applies the tenure formula.
    #[test]
    fn test_tenure_formula_thresholds() {
        let store = InMemoryStore::new();
        let policy = EntitlementPolicy::default();

        let senior = create_test_employee(10);
        let result = resolve_base_allocation(&store, &policy, &senior, 2026);
        assert_eq!(result.base_days, dec("24.67"));
        assert_eq!(
            result.source,
            AllocationSource::TenureFormula {
                years_of_service: 10
            }
        );

        let junior = create_test_employee(9);
        let result = resolve_base_allocation(&store, &policy, &junior, 2026);
        assert_eq!(result.base_days, dec("18.67"));
    }

    /// AR-003: non-positive override falls through to the formula.
    #[test]
    fn test_non_positive_override_is_ignored() {
        let store = InMemoryStore::new();
        store.insert_allocation(create_allocation("alloc_zero", "0", 9));
        let employee = create_test_employee(3);

        let result =
            resolve_base_allocation(&store, &EntitlementPolicy::default(), &employee, 2026);

        assert_eq!(result.base_days, dec("18.67"));
        assert!(matches!(
            result.source,
            AllocationSource::TenureFormula { .. }
        ));
    }

    /// AR-004: duplicates resolve most-recently-created wins, with a warning.
    #[test]
    fn test_duplicate_rows_newest_wins() {
        let store = InMemoryStore::new();
        store.insert_allocation(create_allocation("alloc_old", "19", 8));
        store.insert_allocation(create_allocation("alloc_new", "22", 15));
        let employee = create_test_employee(3);

        let result =
            resolve_base_allocation(&store, &EntitlementPolicy::default(), &employee, 2026);

        assert_eq!(result.base_days, dec("22"));
        assert_eq!(
            result.source,
            AllocationSource::YearlyOverride {
                allocation_id: "alloc_new".to_string()
            }
        );
        assert_eq!(
            result.warnings,
            vec![ComputationWarning::DuplicateAllocations {
                year: 2026,
                count: 2
            }]
        );
    }

    /// AR-005: lookup failure degrades to the formula instead of aborting.
    #[test]
    fn test_lookup_failure_degrades_to_formula() {
        let store = InMemoryStore::new();
        store.insert_allocation(create_allocation("alloc_1", "20", 9));
        store.inject_fault(FaultPoint::Allocations);
        let employee = create_test_employee(12);

        let result =
            resolve_base_allocation(&store, &EntitlementPolicy::default(), &employee, 2026);

        assert_eq!(result.base_days, dec("24.67"));
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].is_degraded());
    }

    #[test]
    fn test_allocation_for_other_year_is_ignored() {
        let store = InMemoryStore::new();
        store.insert_allocation(create_allocation("alloc_1", "20", 9));
        let employee = create_test_employee(3);

        let result =
            resolve_base_allocation(&store, &EntitlementPolicy::default(), &employee, 2025);

        assert_eq!(result.base_days, dec("18.67"));
    }
}
