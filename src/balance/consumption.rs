//! Leave consumption aggregation.
//!
//! This module sums approved annual-leave days taken by an employee within a
//! calendar-year window, and computes an informational per-type breakdown
//! that does not affect the balance.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::warn;

use crate::models::ComputationWarning;
use crate::store::LeaveStore;

/// The result of aggregating an employee's leave consumption for a year.
#[derive(Debug, Clone)]
pub struct ConsumptionAggregation {
    /// Approved annual-leave days taken within the window.
    pub annual_days_taken: Decimal,
    /// Informational breakdown of approved days per (lowercased) leave type
    /// within the window; not part of the balance.
    pub days_by_type: BTreeMap<String, Decimal>,
    /// Non-fatal signals recorded during aggregation.
    pub warnings: Vec<ComputationWarning>,
}

impl ConsumptionAggregation {
    fn degraded(message: String) -> Self {
        Self {
            annual_days_taken: Decimal::ZERO,
            days_by_type: BTreeMap::new(),
            warnings: vec![ComputationWarning::ConsumptionFetchFailed { message }],
        }
    }
}

/// Returns the inclusive calendar-year window `[year-01-01, year-12-31]`,
/// or `None` when the year falls outside the supported calendar range.
pub fn year_window(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let end = NaiveDate::from_ymd_opt(year, 12, 31)?;
    Some((start, end))
}

/// Sums the approved annual-leave consumption for an employee and year.
///
/// Only records with approved status, an annual leave type (matched
/// case-insensitively), and a date range fully inside the year window count
/// toward `annual_days_taken`. The per-type breakdown covers every approved
/// record in the window regardless of type. A fetch failure is recorded as a
/// warning and contributes zero.
pub fn aggregate_consumption(
    store: &dyn LeaveStore,
    employee_id: &str,
    year: i32,
) -> ConsumptionAggregation {
    let Some((window_start, window_end)) = year_window(year) else {
        warn!(employee_id = %employee_id, year, "year outside supported calendar range");
        return ConsumptionAggregation::degraded(format!(
            "year {year} outside supported calendar range"
        ));
    };

    match store.leave_records(employee_id) {
        Ok(records) => {
            let mut annual_days_taken = Decimal::ZERO;
            let mut days_by_type: BTreeMap<String, Decimal> = BTreeMap::new();
            for record in records {
                if !record.status.is_approved()
                    || !record.within_window(window_start, window_end)
                {
                    continue;
                }
                *days_by_type
                    .entry(record.leave_type.to_ascii_lowercase())
                    .or_insert(Decimal::ZERO) += record.days_taken;
                if record.is_annual() {
                    annual_days_taken += record.days_taken;
                }
            }
            ConsumptionAggregation {
                annual_days_taken,
                days_by_type,
                warnings: Vec::new(),
            }
        }
        Err(err) => {
            warn!(
                employee_id = %employee_id,
                year,
                error = %err,
                "leave record fetch failed; consumption contributes zero"
            );
            ConsumptionAggregation::degraded(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    use crate::models::{ApprovalStatus, LeaveConsumptionRecord};
    use crate::store::{FaultPoint, InMemoryStore};

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::from_str(s).unwrap()
    }

    fn create_record(
        id: &str,
        leave_type: &str,
        start: &str,
        end: &str,
        days: &str,
        status: ApprovalStatus,
    ) -> LeaveConsumptionRecord {
        LeaveConsumptionRecord {
            id: id.to_string(),
            employee_id: "emp_001".to_string(),
            leave_type: leave_type.to_string(),
            start_date: date(start),
            end_date: date(end),
            days_taken: dec(days),
            status,
        }
    }

    /// CA-001: approved annual records inside the window count.
    #[test]
    fn test_sums_approved_annual_in_window() {
        let store = InMemoryStore::new();
        store.insert_leave_record(create_record(
            "l1",
            "annual",
            "2026-03-02",
            "2026-03-06",
            "5",
            ApprovalStatus::Approved,
        ));
        store.insert_leave_record(create_record(
            "l2",
            "Annual",
            "2026-07-13",
            "2026-07-14",
            "2",
            ApprovalStatus::Approved,
        ));

        let result = aggregate_consumption(&store, "emp_001", 2026);

        assert_eq!(result.annual_days_taken, dec("7"));
        assert_eq!(result.days_by_type.get("annual"), Some(&dec("7")));
    }

    /// CA-002: pending records and other leave types are excluded from the
    /// total.
    #[test]
    fn test_excludes_pending_and_other_types() {
        let store = InMemoryStore::new();
        store.insert_leave_record(create_record(
            "l1",
            "annual",
            "2026-03-02",
            "2026-03-06",
            "5",
            ApprovalStatus::Approved,
        ));
        store.insert_leave_record(create_record(
            "l2",
            "annual",
            "2026-08-03",
            "2026-08-07",
            "5",
            ApprovalStatus::Pending,
        ));
        store.insert_leave_record(create_record(
            "l3",
            "sick",
            "2026-02-09",
            "2026-02-10",
            "2",
            ApprovalStatus::Approved,
        ));

        let result = aggregate_consumption(&store, "emp_001", 2026);

        assert_eq!(result.annual_days_taken, dec("5"));
        // The breakdown still reports the sick leave.
        assert_eq!(result.days_by_type.get("sick"), Some(&dec("2")));
        assert!(!result.days_by_type.contains_key("pending"));
    }

    /// CA-003: records spilling over the year boundary are excluded.
    #[test]
    fn test_window_containment_is_strict() {
        let store = InMemoryStore::new();
        store.insert_leave_record(create_record(
            "l1",
            "annual",
            "2025-12-29",
            "2026-01-02",
            "4",
            ApprovalStatus::Approved,
        ));
        store.insert_leave_record(create_record(
            "l2",
            "annual",
            "2026-12-28",
            "2027-01-02",
            "4",
            ApprovalStatus::Approved,
        ));

        let result = aggregate_consumption(&store, "emp_001", 2026);

        assert_eq!(result.annual_days_taken, Decimal::ZERO);
    }

    /// CA-004: fetch failure contributes zero with a degraded warning.
    #[test]
    fn test_fetch_failure_contributes_zero() {
        let store = InMemoryStore::new();
        store.insert_leave_record(create_record(
            "l1",
            "annual",
            "2026-03-02",
            "2026-03-06",
            "5",
            ApprovalStatus::Approved,
        ));
        store.inject_fault(FaultPoint::LeaveRecords);

        let result = aggregate_consumption(&store, "emp_001", 2026);

        assert_eq!(result.annual_days_taken, Decimal::ZERO);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].is_degraded());
    }

    #[test]
    fn test_breakdown_merges_case_variants() {
        let store = InMemoryStore::new();
        store.insert_leave_record(create_record(
            "l1",
            "Sick",
            "2026-02-09",
            "2026-02-10",
            "2",
            ApprovalStatus::Approved,
        ));
        store.insert_leave_record(create_record(
            "l2",
            "sick",
            "2026-05-11",
            "2026-05-11",
            "1",
            ApprovalStatus::Approved,
        ));

        let result = aggregate_consumption(&store, "emp_001", 2026);

        assert_eq!(result.days_by_type.get("sick"), Some(&dec("3")));
        assert_eq!(result.days_by_type.len(), 1);
    }

    #[test]
    fn test_year_window_bounds() {
        let (start, end) = year_window(2026).unwrap();
        assert_eq!(start, date("2026-01-01"));
        assert_eq!(end, date("2026-12-31"));
    }
}
