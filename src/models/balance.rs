//! Balance result models.
//!
//! This module contains the [`BalanceResult`] type produced by every balance
//! computation and the [`ComputationWarning`] values that record degraded
//! sub-queries as data rather than log-only events.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A non-fatal signal recorded during a balance computation.
///
/// Warnings are first-class data on [`BalanceResult`] so that aggregators and
/// the reconciliation auditor can be unit-tested without a process-wide
/// logger. The fetch-failure variants mark the computation as degraded (see
/// [`ComputationWarning::is_degraded`]); the remaining variants are
/// informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum ComputationWarning {
    /// The yearly-allocation lookup failed; the tenure formula was applied.
    AllocationLookupFailed {
        /// A description of the lookup failure.
        message: String,
    },
    /// More than one allocation row exists for (employee, year, type); the
    /// most recently created row was used.
    DuplicateAllocations {
        /// The year the duplicate rows apply to.
        year: i32,
        /// How many rows were found.
        count: usize,
    },
    /// The in-lieu grant fetch failed; the subtotal contributes zero.
    InLieuFetchFailed {
        /// A description of the fetch failure.
        message: String,
    },
    /// The leave-record fetch failed; consumption contributes zero.
    ConsumptionFetchFailed {
        /// A description of the fetch failure.
        message: String,
    },
    /// The denormalized cache write failed; the returned result is
    /// unaffected.
    CacheWriteFailed {
        /// A description of the write failure.
        message: String,
    },
}

impl ComputationWarning {
    /// Returns true if this warning means a ledger sub-query failed and the
    /// computed balance may under-count the true value.
    pub fn is_degraded(&self) -> bool {
        matches!(
            self,
            ComputationWarning::AllocationLookupFailed { .. }
                | ComputationWarning::InLieuFetchFailed { .. }
                | ComputationWarning::ConsumptionFetchFailed { .. }
        )
    }
}

impl fmt::Display for ComputationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComputationWarning::AllocationLookupFailed { message } => {
                write!(f, "allocation lookup failed: {message}")
            }
            ComputationWarning::DuplicateAllocations { year, count } => {
                write!(f, "{count} allocation rows found for {year}; newest used")
            }
            ComputationWarning::InLieuFetchFailed { message } => {
                write!(f, "in-lieu grant fetch failed: {message}")
            }
            ComputationWarning::ConsumptionFetchFailed { message } => {
                write!(f, "leave record fetch failed: {message}")
            }
            ComputationWarning::CacheWriteFailed { message } => {
                write!(f, "balance cache write failed: {message}")
            }
        }
    }
}

/// The complete result of a balance computation.
///
/// Produced fresh on every invocation and never persisted as its own entity;
/// the denormalized [`CachedBalance`](crate::models::CachedBalance) on the
/// employee record is derived from it.
///
/// Invariant: `remaining_balance` equals
/// `round2(base_leave_balance + in_lieu_balance - leave_taken)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceResult {
    /// The employee the balance was computed for.
    pub employee_id: String,
    /// The calendar year the computation covered.
    pub year: i32,
    /// The base entitlement for the year (override or tenure formula).
    pub base_leave_balance: Decimal,
    /// The sum of approved in-lieu grant days.
    pub in_lieu_balance: Decimal,
    /// Approved annual-leave days taken within the year.
    pub leave_taken: Decimal,
    /// The composed remainder, rounded to two decimal places.
    pub remaining_balance: Decimal,
    /// True when a ledger sub-query failed and defaults were applied; the
    /// balance may under-count until the underlying query issue is fixed.
    pub partial: bool,
    /// Non-fatal signals recorded during the computation.
    pub warnings: Vec<ComputationWarning>,
    /// When the computation ran.
    pub computed_at: DateTime<Utc>,
}
