//! Entitlement policy configuration.
//!
//! This module provides the [`EntitlementPolicy`] type holding the
//! tenure-formula constants, with a YAML loader for deployments that
//! override the defaults.
//!
//! # Example
//!
//! ```
//! use entitlement_engine::config::EntitlementPolicy;
//!
//! let policy = EntitlementPolicy::default();
//! assert_eq!(policy.base_days_for_tenure(12).to_string(), "24.67");
//! assert_eq!(policy.base_days_for_tenure(3).to_string(), "18.67");
//! ```

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Tenure-formula constants for the base entitlement.
///
/// The base number of entitlement days an employee receives when no explicit
/// [`YearlyAllocation`](crate::models::YearlyAllocation) override exists for
/// the year. The defaults reproduce the fixed formula used across the
/// system's lifetime: 24.67 days at ten or more years of service, 18.67
/// otherwise.
///
/// # File Format
///
/// ```text
/// # policy.yaml
/// standard_base_days: "18.67"
/// long_service_base_days: "24.67"
/// long_service_years: 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementPolicy {
    /// Base entitlement days for employees below the long-service threshold.
    pub standard_base_days: Decimal,
    /// Base entitlement days at or above the long-service threshold.
    pub long_service_base_days: Decimal,
    /// Years of service at which the long-service base applies.
    pub long_service_years: u32,
}

impl Default for EntitlementPolicy {
    fn default() -> Self {
        Self {
            standard_base_days: Decimal::new(1867, 2),
            long_service_base_days: Decimal::new(2467, 2),
            long_service_years: 10,
        }
    }
}

impl EntitlementPolicy {
    /// Loads a policy from a YAML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the policy file (e.g., "./config/policy.yaml")
    ///
    /// # Returns
    ///
    /// Returns the parsed policy, or an error if the file is missing
    /// (`PolicyNotFound`) or contains invalid YAML (`PolicyParse`).
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::PolicyNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::PolicyParse {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Applies the tenure formula for an employee with the given completed
    /// years of service.
    pub fn base_days_for_tenure(&self, years_of_service: u32) -> Decimal {
        if years_of_service >= self.long_service_years {
            self.long_service_base_days
        } else {
            self.standard_base_days
        }
    }
}
