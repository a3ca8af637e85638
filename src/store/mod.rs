//! Datastore seam for the Entitlement Balance Engine.
//!
//! This module defines the [`LeaveStore`] trait through which the engine
//! reads the employee row and the three ledgers, and issues its single
//! denormalized cache write. Timeout and retry behavior belong to the store
//! implementation, not the engine.

mod memory;

pub use memory::{FaultPoint, InMemoryStore};

use thiserror::Error;

use crate::models::{
    AllocationType, CachedBalance, Employee, InLieuGrant, LeaveConsumptionRecord, YearlyAllocation,
};

/// A datastore operation failure.
///
/// The engine treats these as degraded signals for ledger reads and as fatal
/// only for the employee lookup; see
/// [`compute_balance`](crate::balance::compute_balance).
#[derive(Debug, Clone, Error)]
#[error("datastore {operation} failed: {message}")]
pub struct StoreError {
    /// The logical operation that failed (e.g. "employee lookup").
    pub operation: String,
    /// A description of the failure.
    pub message: String,
}

impl StoreError {
    /// Creates a new store error for the given operation.
    pub fn new(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage contract used by the balance components and the auditor.
///
/// Implementations own the connection and timeout behavior of the underlying
/// datastore. The reads are not expected to share a transaction or snapshot;
/// the engine is written to tolerate interleaved ledger mutation (see the
/// crate documentation).
pub trait LeaveStore: Send + Sync {
    /// Looks up an employee row by identifier.
    fn find_employee(&self, employee_id: &str) -> StoreResult<Option<Employee>>;

    /// Returns the yearly allocation rows for (employee, year, type).
    ///
    /// At most one row is expected; callers resolve duplicates explicitly.
    fn yearly_allocations(
        &self,
        employee_id: &str,
        year: i32,
        allocation_type: AllocationType,
    ) -> StoreResult<Vec<YearlyAllocation>>;

    /// Returns every in-lieu grant for the employee, regardless of status.
    fn in_lieu_grants(&self, employee_id: &str) -> StoreResult<Vec<InLieuGrant>>;

    /// Returns every leave consumption record for the employee.
    fn leave_records(&self, employee_id: &str) -> StoreResult<Vec<LeaveConsumptionRecord>>;

    /// Writes the denormalized balance cache onto the employee row.
    ///
    /// Last-writer-wins; no lock is taken on the row.
    fn write_cached_balance(&self, employee_id: &str, cache: CachedBalance) -> StoreResult<()>;
}
