//! Balance computation logic for the Entitlement Balance Engine.
//!
//! This module contains the components that turn the three ledgers into a
//! remaining-balance figure: base allocation resolution, in-lieu grant
//! aggregation, consumption aggregation, the composing orchestrator with its
//! denormalized cache write-back, and the read-only reconciliation auditor.

mod allocation;
mod audit;
mod cache;
mod composer;
mod consumption;
mod in_lieu;

pub use allocation::{AllocationResolution, AllocationSource, resolve_base_allocation};
pub use audit::{
    CacheComparison, GrantFieldAudit, InLieuReconciliation, RecomputedBalance,
    ReconciliationReport, audit_reconciliation,
};
pub use cache::write_back;
pub use composer::{compute_balance, current_year, round2};
pub use consumption::{ConsumptionAggregation, aggregate_consumption, year_window};
pub use in_lieu::{InLieuAggregation, aggregate_in_lieu};
