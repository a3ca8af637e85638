//! Ledger record models.
//!
//! This module defines the three relational record sets the engine reads:
//! yearly base allocations, in-lieu compensatory grants, and consumed leave
//! requests. All three are owned and mutated by out-of-scope workflows; the
//! engine only reads them.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The leave type string that counts toward the annual balance.
///
/// Consumption records carry free-form type strings; matching against this
/// constant is case-insensitive.
pub const ANNUAL_LEAVE_TYPE: &str = "annual";

/// Workflow status shared by in-lieu grants and leave requests.
///
/// Only `Approved` rows contribute to any balance figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    /// Awaiting a decision; does not count.
    Pending,
    /// Approved; counts toward the balance.
    Approved,
    /// Rejected; does not count.
    Rejected,
}

impl ApprovalStatus {
    /// Returns true if the row should contribute to balance figures.
    pub fn is_approved(&self) -> bool {
        *self == ApprovalStatus::Approved
    }
}

/// The entitlement category of a yearly allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationType {
    /// Annual paid-leave entitlement; the only type the engine resolves.
    Annual,
    /// Sick-leave entitlement, tracked by admin tooling but outside the
    /// annual balance.
    Sick,
}

/// An explicit per-year entitlement override created by admin tooling.
///
/// At most one row is expected per (employee, year, type); when duplicates
/// exist the most recently created row wins (see
/// [`resolve_base_allocation`](crate::balance::resolve_base_allocation)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyAllocation {
    /// Unique identifier for the allocation row.
    pub id: String,
    /// The employee this allocation belongs to.
    pub employee_id: String,
    /// The calendar year the allocation applies to.
    pub year: i32,
    /// The entitlement category.
    pub allocation_type: AllocationType,
    /// The number of entitlement days allocated for the year.
    pub allocated_days: Decimal,
    /// When the row was created; used to break ties between duplicates.
    pub created_at: DateTime<Utc>,
}

/// A compensatory day-off credit awarded for extra work.
///
/// The day count is stored under one of two historically-used field names:
/// `days` is the canonical field, `compensation_days` the legacy one kept for
/// backward compatibility. [`InLieuGrant::effective_days`] is the single
/// resolution point between them; the reconciliation auditor reports rows
/// where the two disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InLieuGrant {
    /// Unique identifier for the grant.
    pub id: String,
    /// The employee the grant was awarded to.
    pub employee_id: String,
    /// The canonical day-count field.
    #[serde(default)]
    pub days: Option<Decimal>,
    /// The legacy day-count field, populated by older workflows.
    #[serde(default)]
    pub compensation_days: Option<Decimal>,
    /// Workflow status; only approved grants count.
    pub status: ApprovalStatus,
    /// When the grant was created.
    pub created_at: DateTime<Utc>,
}

impl InLieuGrant {
    /// Resolves the day count, preferring the canonical field over the
    /// legacy one. A grant with neither field contributes zero.
    ///
    /// # Example
    ///
    /// ```
    /// use entitlement_engine::models::{ApprovalStatus, InLieuGrant};
    /// use chrono::Utc;
    /// use rust_decimal::Decimal;
    ///
    /// let grant = InLieuGrant {
    ///     id: "grant_001".to_string(),
    ///     employee_id: "emp_001".to_string(),
    ///     days: None,
    ///     compensation_days: Some(Decimal::new(3, 0)),
    ///     status: ApprovalStatus::Approved,
    ///     created_at: Utc::now(),
    /// };
    /// assert_eq!(grant.effective_days(), Decimal::new(3, 0));
    /// ```
    pub fn effective_days(&self) -> Decimal {
        self.days.or(self.compensation_days).unwrap_or(Decimal::ZERO)
    }

    /// Returns true if both the canonical and legacy fields are populated.
    pub fn has_both_day_fields(&self) -> bool {
        self.days.is_some() && self.compensation_days.is_some()
    }
}

/// An approved-or-pending record of leave taken by an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveConsumptionRecord {
    /// Unique identifier for the record.
    pub id: String,
    /// The employee who took the leave.
    pub employee_id: String,
    /// Free-form leave type (e.g. "annual", "sick", "Annual").
    pub leave_type: String,
    /// First day of the leave, inclusive.
    pub start_date: NaiveDate,
    /// Last day of the leave, inclusive.
    pub end_date: NaiveDate,
    /// Days deducted by this record; rows written without a value count as
    /// zero.
    #[serde(default)]
    pub days_taken: Decimal,
    /// Workflow status; only approved records count.
    pub status: ApprovalStatus,
}

impl LeaveConsumptionRecord {
    /// Returns true if this record's leave type matches the annual category,
    /// ignoring case.
    pub fn is_annual(&self) -> bool {
        self.leave_type.eq_ignore_ascii_case(ANNUAL_LEAVE_TYPE)
    }

    /// Returns true if the record's date range lies fully inside the given
    /// inclusive window.
    pub fn within_window(&self, window_start: NaiveDate, window_end: NaiveDate) -> bool {
        self.start_date >= window_start && self.end_date <= window_end
    }
}
