//! Application state for the Entitlement Balance Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::EntitlementPolicy;
use crate::store::LeaveStore;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// datastore, the entitlement policy, and the diagnostics gate for the
/// reconciliation audit endpoint.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn LeaveStore>,
    policy: Arc<EntitlementPolicy>,
    diagnostics_enabled: bool,
}

impl AppState {
    /// Creates a new application state with diagnostics disabled.
    pub fn new(store: Arc<dyn LeaveStore>, policy: EntitlementPolicy) -> Self {
        Self {
            store,
            policy: Arc::new(policy),
            diagnostics_enabled: false,
        }
    }

    /// Enables or disables the reconciliation audit endpoint.
    ///
    /// The audit surface is diagnostic tooling; production deployments leave
    /// it off.
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics_enabled = enabled;
        self
    }

    /// Returns a reference to the datastore.
    pub fn store(&self) -> &dyn LeaveStore {
        self.store.as_ref()
    }

    /// Returns a reference to the entitlement policy.
    pub fn policy(&self) -> &EntitlementPolicy {
        &self.policy
    }

    /// Returns true if the audit endpoint is available.
    pub fn diagnostics_enabled(&self) -> bool {
        self.diagnostics_enabled
    }
}
