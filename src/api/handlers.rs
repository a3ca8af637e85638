//! HTTP request handlers for the Entitlement Balance Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::balance::{audit_reconciliation, compute_balance};

use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/employees/:employee_id/balance", get(balance_handler))
        .route(
            "/employees/:employee_id/balance/audit",
            get(audit_handler),
        )
        .with_state(state)
}

/// Query parameters shared by the balance and audit endpoints.
#[derive(Debug, Deserialize)]
struct BalanceQuery {
    /// The calendar year to compute for; defaults to the current year.
    year: Option<i32>,
}

/// Handler for GET /employees/:employee_id/balance.
///
/// Computes the remaining leave balance and writes the denormalized cache
/// as a side effect.
async fn balance_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Query(query): Query<BalanceQuery>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        year = ?query.year,
        "Processing balance request"
    );

    match compute_balance(state.store(), state.policy(), &employee_id, query.year) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %result.employee_id,
                remaining_balance = %result.remaining_balance,
                partial = result.partial,
                "Balance computed successfully"
            );
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Balance computation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            api_error.into_response()
        }
    }
}

/// Handler for GET /employees/:employee_id/balance/audit.
///
/// Runs the read-only reconciliation audit. Gated to diagnostic
/// deployments; answers 403 when diagnostics are disabled.
async fn audit_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Query(query): Query<BalanceQuery>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();

    if !state.diagnostics_enabled() {
        warn!(
            correlation_id = %correlation_id,
            employee_id = %employee_id,
            "Audit requested but diagnostics are disabled"
        );
        return (StatusCode::FORBIDDEN, Json(ApiError::diagnostics_disabled())).into_response();
    }

    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        year = ?query.year,
        "Processing reconciliation audit request"
    );

    match audit_reconciliation(state.store(), state.policy(), &employee_id, query.year) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %report.employee_id,
                drifted_grants = report.in_lieu.drifted_grant_ids.len(),
                remaining_matches = report.cache.remaining_matches,
                "Reconciliation audit completed"
            );
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Reconciliation audit failed"
            );
            let api_error: ApiErrorResponse = err.into();
            api_error.into_response()
        }
    }
}
