//! Employee model and related types.
//!
//! This module defines the Employee struct and the CachedBalance value that
//! holds the denormalized balance fields on the employee record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A denormalized balance snapshot stored on the employee record.
///
/// The two balance fields are a read optimization, not an authoritative
/// source: they hold the output of the most recent balance computation and
/// can be stale between writes. The fields serialize under the historical
/// column names `annual_leave_balance` (the in-lieu subtotal) and
/// `leave_balance` (the composed remainder) so features that read the
/// employee row directly keep working.
///
/// # Example
///
/// ```
/// use entitlement_engine::models::CachedBalance;
/// use chrono::Utc;
/// use rust_decimal::Decimal;
///
/// let cache = CachedBalance {
///     in_lieu_balance: Decimal::new(2, 0),
///     remaining_balance: Decimal::new(2167, 2),
///     computed_at: Utc::now(),
///     stale: false,
/// };
/// let json = serde_json::to_string(&cache).unwrap();
/// assert!(json.contains("\"annual_leave_balance\":\"2\""));
/// assert!(json.contains("\"leave_balance\":\"21.67\""));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedBalance {
    /// The in-lieu subtotal from the last computation.
    #[serde(rename = "annual_leave_balance")]
    pub in_lieu_balance: Decimal,
    /// The composed remaining balance from the last computation.
    #[serde(rename = "leave_balance")]
    pub remaining_balance: Decimal,
    /// When the cached values were computed.
    pub computed_at: DateTime<Utc>,
    /// Set by ledger-owning workflows when the cache is known to lag.
    #[serde(default)]
    pub stale: bool,
}

/// Represents an employee whose leave entitlement is tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's display name.
    pub name: String,
    /// Completed years of service, maintained by profile-edit flows.
    pub years_of_service: u32,
    /// Denormalized balance cache written by the engine; `None` until the
    /// first computation runs for this employee.
    #[serde(default)]
    pub cached_balance: Option<CachedBalance>,
}
