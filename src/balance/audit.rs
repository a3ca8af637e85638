//! Reconciliation auditing.
//!
//! This module independently recomputes an employee's balance from the raw
//! ledgers and reports field-level drift: disagreement between the legacy
//! and canonical in-lieu day-count fields, and disagreement between the
//! denormalized cache on the employee row and a from-scratch recomputation.
//! It is a stateless, read-only diagnostic; it never writes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::config::EntitlementPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{CachedBalance, ComputationWarning};
use crate::store::LeaveStore;

use super::allocation::resolve_base_allocation;
use super::composer::{current_year, round2};
use super::consumption::aggregate_consumption;

/// Field-level findings for a single approved in-lieu grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantFieldAudit {
    /// The grant the findings apply to.
    pub grant_id: String,
    /// The canonical day-count field, as stored.
    pub canonical_days: Option<Decimal>,
    /// The legacy day-count field, as stored.
    pub legacy_days: Option<Decimal>,
    /// `legacy - canonical`, present only when both fields are populated.
    pub difference: Option<Decimal>,
    /// True when both fields are populated and disagree.
    pub drifted: bool,
}

/// Aggregated in-lieu reconciliation findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InLieuReconciliation {
    /// Per-grant findings over approved grants.
    pub grants: Vec<GrantFieldAudit>,
    /// Total computed from the canonical field only.
    pub canonical_total: Decimal,
    /// Total computed from the legacy field only.
    pub legacy_total: Decimal,
    /// The grants whose two fields disagree.
    pub drifted_grant_ids: Vec<String>,
}

/// The balance recomputed from raw records, using the same formula as the
/// composer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecomputedBalance {
    /// The resolved base entitlement.
    pub base_leave_balance: Decimal,
    /// The in-lieu subtotal (canonical-then-legacy resolution).
    pub in_lieu_balance: Decimal,
    /// Approved annual-leave days taken within the year.
    pub leave_taken: Decimal,
    /// The composed remainder.
    pub remaining_balance: Decimal,
}

/// Side-by-side comparison of the denormalized cache and the recomputation.
///
/// No automatic correction: consumers decide what to do with a mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheComparison {
    /// The cache currently stored on the employee row, if any.
    pub cached: Option<CachedBalance>,
    /// True when the cached in-lieu subtotal equals the recomputed one.
    pub in_lieu_matches: bool,
    /// True when the cached remainder equals the recomputed one.
    pub remaining_matches: bool,
}

/// The complete output of a reconciliation audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// Unique identifier for this report.
    pub report_id: Uuid,
    /// The employee the audit covers.
    pub employee_id: String,
    /// The calendar year the recomputation covered.
    pub year: i32,
    /// When the audit ran.
    pub generated_at: DateTime<Utc>,
    /// In-lieu field drift findings.
    pub in_lieu: InLieuReconciliation,
    /// The from-scratch balance recomputation.
    pub recomputed: RecomputedBalance,
    /// Cached vs recomputed comparison.
    pub cache: CacheComparison,
    /// Non-fatal signals recorded while re-fetching the ledgers.
    pub warnings: Vec<ComputationWarning>,
}

/// Runs a reconciliation audit for an employee.
///
/// Re-fetches the employee row and all three ledgers, reports per-grant
/// drift between the legacy and canonical day-count fields, recomputes the
/// balance with the same formula as
/// [`compute_balance`](crate::balance::compute_balance), and places it side
/// by side with the denormalized cache. Findings are diagnostic data, never
/// errors; only employee resolution is fatal. This entry point performs no
/// writes.
pub fn audit_reconciliation(
    store: &dyn LeaveStore,
    policy: &EntitlementPolicy,
    employee_id: &str,
    year: Option<i32>,
) -> EngineResult<ReconciliationReport> {
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

    let mut warnings = Vec::new();

    // Per-grant field drift and both single-field totals from one fetch.
    let mut grants_audit = Vec::new();
    let mut canonical_total = Decimal::ZERO;
    let mut legacy_total = Decimal::ZERO;
    let mut effective_total = Decimal::ZERO;
    match store.in_lieu_grants(&employee.id) {
        Ok(grants) => {
            for grant in grants.iter().filter(|g| g.status.is_approved()) {
                let difference = match (grant.compensation_days, grant.days) {
                    (Some(legacy), Some(canonical)) => Some(legacy - canonical),
                    _ => None,
                };
                let drifted = difference.is_some_and(|d| !d.is_zero());
                if drifted {
                    warn!(
                        employee_id = %employee.id,
                        grant_id = %grant.id,
                        "in-lieu day-count fields disagree"
                    );
                }
                grants_audit.push(GrantFieldAudit {
                    grant_id: grant.id.clone(),
                    canonical_days: grant.days,
                    legacy_days: grant.compensation_days,
                    difference,
                    drifted,
                });
                canonical_total += grant.days.unwrap_or(Decimal::ZERO);
                legacy_total += grant.compensation_days.unwrap_or(Decimal::ZERO);
                effective_total += grant.effective_days();
            }
        }
        Err(err) => {
            warn!(
                employee_id = %employee.id,
                error = %err,
                "in-lieu grant fetch failed during audit"
            );
            warnings.push(ComputationWarning::InLieuFetchFailed {
                message: err.to_string(),
            });
        }
    }
    let drifted_grant_ids: Vec<String> = grants_audit
        .iter()
        .filter(|g| g.drifted)
        .map(|g| g.grant_id.clone())
        .collect();

    let allocation = resolve_base_allocation(store, policy, &employee, year);
    warnings.extend(allocation.warnings);
    let consumption = aggregate_consumption(store, &employee.id, year);
    warnings.extend(consumption.warnings);

    let recomputed = RecomputedBalance {
        base_leave_balance: allocation.base_days,
        in_lieu_balance: effective_total,
        leave_taken: consumption.annual_days_taken,
        remaining_balance: round2(
            allocation.base_days + effective_total - consumption.annual_days_taken,
        ),
    };

    let cached = employee.cached_balance.clone();
    let cache = CacheComparison {
        in_lieu_matches: cached
            .as_ref()
            .is_some_and(|c| c.in_lieu_balance == recomputed.in_lieu_balance),
        remaining_matches: cached
            .as_ref()
            .is_some_and(|c| c.remaining_balance == recomputed.remaining_balance),
        cached,
    };

    Ok(ReconciliationReport {
        report_id: Uuid::new_v4(),
        employee_id: employee.id,
        year,
        generated_at: Utc::now(),
        in_lieu: InLieuReconciliation {
            grants: grants_audit,
            canonical_total,
            legacy_total,
            drifted_grant_ids,
        },
        recomputed,
        cache,
        warnings,
    })
}
