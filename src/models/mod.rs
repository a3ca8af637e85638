//! Core data models for the Entitlement Balance Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod balance;
mod employee;
mod ledger;

pub use balance::{BalanceResult, ComputationWarning};
pub use employee::{CachedBalance, Employee};
pub use ledger::{
    ANNUAL_LEAVE_TYPE, AllocationType, ApprovalStatus, InLieuGrant, LeaveConsumptionRecord,
    YearlyAllocation,
};
