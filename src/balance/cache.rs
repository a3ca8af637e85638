//! Denormalized cache write-back.
//!
//! This module persists a composed balance onto the employee record as a
//! read optimization. The write is fire-and-forget relative to the caller:
//! a failure is logged and reported as a warning, never as an error.

use tracing::warn;

use crate::models::{BalanceResult, CachedBalance, ComputationWarning};
use crate::store::LeaveStore;

/// Writes the denormalized balance cache for a freshly composed result.
///
/// Stores the in-lieu subtotal and the composed remainder on the employee
/// row in a single update, with `stale` reset to false. No transaction wraps
/// the preceding ledger reads and this write; concurrent computations for
/// the same employee race with last-writer-wins semantics, and each caller
/// keeps its own freshly computed result regardless of what the cache ends
/// up holding.
///
/// Returns a [`ComputationWarning::CacheWriteFailed`] on failure, `None` on
/// success.
pub fn write_back(
    store: &dyn LeaveStore,
    employee_id: &str,
    result: &BalanceResult,
) -> Option<ComputationWarning> {
    let cache = CachedBalance {
        in_lieu_balance: result.in_lieu_balance,
        remaining_balance: result.remaining_balance,
        computed_at: result.computed_at,
        stale: false,
    };

    match store.write_cached_balance(employee_id, cache) {
        Ok(()) => None,
        Err(err) => {
            warn!(
                employee_id = %employee_id,
                error = %err,
                "balance cache write failed; returning computed result anyway"
            );
            Some(ComputationWarning::CacheWriteFailed {
                message: err.to_string(),
            })
        }
    }
}
