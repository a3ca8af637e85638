//! Balance composition.
//!
//! This module orchestrates the allocation resolver and the two aggregators,
//! combines their outputs with the fixed formula, and triggers the
//! denormalized cache write as a documented side effect.

use chrono::{Datelike, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, info};

use crate::config::EntitlementPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{BalanceResult, ComputationWarning};
use crate::store::LeaveStore;

use super::allocation::resolve_base_allocation;
use super::cache;
use super::consumption::aggregate_consumption;
use super::in_lieu::aggregate_in_lieu;

/// Rounds a day count to two decimal places, midpoints away from zero.
///
/// The result always carries two decimal places so cached and serialized
/// values read consistently (e.g. `20.00` rather than `20`).
pub fn round2(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Returns the current calendar year, used when no year is requested.
pub fn current_year() -> i32 {
    Utc::now().date_naive().year()
}

/// Computes the remaining leave balance for an employee.
///
/// Resolves the employee row, runs the three ledger sub-computations, and
/// composes `remaining = round2(base + in_lieu - taken)`. The composed
/// result is written back onto the employee row as a denormalized cache
/// after composition; a write failure appends a warning but never changes
/// the numeric fields the caller receives.
///
/// # Arguments
///
/// * `store` - The datastore holding the employee row and the three ledgers
/// * `policy` - Tenure-formula constants for the base entitlement
/// * `employee_id` - The employee to compute for
/// * `year` - The calendar year; defaults to the current year
///
/// # Errors
///
/// Only employee resolution is fatal: a missing row returns
/// [`EngineError::EmployeeNotFound`], a failed lookup
/// [`EngineError::EmployeeLookup`]. Ledger sub-query failures degrade the
/// computation instead — the affected subtotal contributes zero, a warning
/// is recorded, and [`BalanceResult::partial`] is set.
pub fn compute_balance(
    store: &dyn LeaveStore,
    policy: &EntitlementPolicy,
    employee_id: &str,
    year: Option<i32>,
) -> EngineResult<BalanceResult> {
    let employee = store
        .find_employee(employee_id)
        .map_err(|err| EngineError::EmployeeLookup {
            employee_id: employee_id.to_string(),
            message: err.to_string(),
        })?
        .ok_or_else(|| EngineError::EmployeeNotFound {
            employee_id: employee_id.to_string(),
        })?;
    let year = year.unwrap_or_else(current_year);

    let allocation = resolve_base_allocation(store, policy, &employee, year);
    let in_lieu = aggregate_in_lieu(store, &employee.id);
    let consumption = aggregate_consumption(store, &employee.id, year);

    debug!(
        employee_id = %employee.id,
        year,
        days_by_type = ?consumption.days_by_type,
        "per-type consumption breakdown"
    );

    let mut warnings = allocation.warnings;
    warnings.extend(in_lieu.warnings);
    warnings.extend(consumption.warnings);
    let partial = warnings.iter().any(ComputationWarning::is_degraded);

    let remaining_balance =
        round2(allocation.base_days + in_lieu.total_days - consumption.annual_days_taken);

    let mut result = BalanceResult {
        employee_id: employee.id.clone(),
        year,
        base_leave_balance: allocation.base_days,
        in_lieu_balance: in_lieu.total_days,
        leave_taken: consumption.annual_days_taken,
        remaining_balance,
        partial,
        warnings,
        computed_at: Utc::now(),
    };

    if let Some(warning) = cache::write_back(store, &employee.id, &result) {
        result.warnings.push(warning);
    }

    info!(
        employee_id = %result.employee_id,
        year = result.year,
        remaining = %result.remaining_balance,
        partial = result.partial,
        "balance computed"
    );

    Ok(result)
}
