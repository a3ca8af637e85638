//! HTTP API module for the Entitlement Balance Engine.
//!
//! This module provides the REST endpoints for reading an employee's leave
//! balance and for running the diagnostics-gated reconciliation audit.

mod handlers;
mod response;
mod state;

pub use handlers::create_router;
pub use response::ApiError;
pub use state::AppState;
