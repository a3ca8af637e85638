//! In-memory reference implementation of [`LeaveStore`].
//!
//! Backs the test suites and benchmarks. Rows live in `RwLock`-guarded
//! tables keyed by employee; [`FaultPoint`] injection simulates datastore
//! failures so degraded-mode behavior can be exercised without a real
//! database.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, RwLock};

use crate::models::{
    AllocationType, CachedBalance, Employee, InLieuGrant, LeaveConsumptionRecord, YearlyAllocation,
};

use super::{LeaveStore, StoreError, StoreResult};

/// A store operation that can be made to fail on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultPoint {
    /// Fail `find_employee`.
    EmployeeLookup,
    /// Fail `yearly_allocations`.
    Allocations,
    /// Fail `in_lieu_grants`.
    InLieuGrants,
    /// Fail `leave_records`.
    LeaveRecords,
    /// Fail `write_cached_balance`.
    CacheWrite,
}

/// An in-memory [`LeaveStore`] with fault injection.
///
/// # Example
///
/// ```
/// use entitlement_engine::models::Employee;
/// use entitlement_engine::store::{FaultPoint, InMemoryStore, LeaveStore};
///
/// let store = InMemoryStore::new();
/// store.insert_employee(Employee {
///     id: "emp_001".to_string(),
///     name: "Amina Osei".to_string(),
///     years_of_service: 12,
///     cached_balance: None,
/// });
/// assert!(store.find_employee("emp_001").unwrap().is_some());
///
/// store.inject_fault(FaultPoint::EmployeeLookup);
/// assert!(store.find_employee("emp_001").is_err());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    employees: RwLock<HashMap<String, Employee>>,
    allocations: RwLock<Vec<YearlyAllocation>>,
    grants: RwLock<Vec<InLieuGrant>>,
    leave_records: RwLock<Vec<LeaveConsumptionRecord>>,
    faults: Mutex<HashSet<FaultPoint>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an employee row.
    pub fn insert_employee(&self, employee: Employee) {
        if let Ok(mut employees) = self.employees.write() {
            employees.insert(employee.id.clone(), employee);
        }
    }

    /// Inserts a yearly allocation row.
    pub fn insert_allocation(&self, allocation: YearlyAllocation) {
        if let Ok(mut allocations) = self.allocations.write() {
            allocations.push(allocation);
        }
    }

    /// Inserts an in-lieu grant row.
    pub fn insert_grant(&self, grant: InLieuGrant) {
        if let Ok(mut grants) = self.grants.write() {
            grants.push(grant);
        }
    }

    /// Inserts a leave consumption record.
    pub fn insert_leave_record(&self, record: LeaveConsumptionRecord) {
        if let Ok(mut records) = self.leave_records.write() {
            records.push(record);
        }
    }

    /// Makes the given operation fail until cleared.
    pub fn inject_fault(&self, point: FaultPoint) {
        if let Ok(mut faults) = self.faults.lock() {
            faults.insert(point);
        }
    }

    /// Clears a previously injected fault.
    pub fn clear_fault(&self, point: FaultPoint) {
        if let Ok(mut faults) = self.faults.lock() {
            faults.remove(&point);
        }
    }

    /// Returns a snapshot of an employee row, for test assertions.
    pub fn employee(&self, employee_id: &str) -> Option<Employee> {
        self.employees
            .read()
            .ok()
            .and_then(|employees| employees.get(employee_id).cloned())
    }

    fn check_fault(&self, point: FaultPoint, operation: &str) -> StoreResult<()> {
        let faults = self
            .faults
            .lock()
            .map_err(|_| StoreError::new(operation, "fault table poisoned"))?;
        if faults.contains(&point) {
            return Err(StoreError::new(operation, "simulated datastore failure"));
        }
        Ok(())
    }
}

impl LeaveStore for InMemoryStore {
    fn find_employee(&self, employee_id: &str) -> StoreResult<Option<Employee>> {
        self.check_fault(FaultPoint::EmployeeLookup, "employee lookup")?;
        let employees = self
            .employees
            .read()
            .map_err(|_| StoreError::new("employee lookup", "lock poisoned"))?;
        Ok(employees.get(employee_id).cloned())
    }

    fn yearly_allocations(
        &self,
        employee_id: &str,
        year: i32,
        allocation_type: AllocationType,
    ) -> StoreResult<Vec<YearlyAllocation>> {
        self.check_fault(FaultPoint::Allocations, "allocation lookup")?;
        let allocations = self
            .allocations
            .read()
            .map_err(|_| StoreError::new("allocation lookup", "lock poisoned"))?;
        Ok(allocations
            .iter()
            .filter(|a| {
                a.employee_id == employee_id
                    && a.year == year
                    && a.allocation_type == allocation_type
            })
            .cloned()
            .collect())
    }

    fn in_lieu_grants(&self, employee_id: &str) -> StoreResult<Vec<InLieuGrant>> {
        self.check_fault(FaultPoint::InLieuGrants, "in-lieu grant fetch")?;
        let grants = self
            .grants
            .read()
            .map_err(|_| StoreError::new("in-lieu grant fetch", "lock poisoned"))?;
        Ok(grants
            .iter()
            .filter(|g| g.employee_id == employee_id)
            .cloned()
            .collect())
    }

    fn leave_records(&self, employee_id: &str) -> StoreResult<Vec<LeaveConsumptionRecord>> {
        self.check_fault(FaultPoint::LeaveRecords, "leave record fetch")?;
        let records = self
            .leave_records
            .read()
            .map_err(|_| StoreError::new("leave record fetch", "lock poisoned"))?;
        Ok(records
            .iter()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect())
    }

    fn write_cached_balance(&self, employee_id: &str, cache: CachedBalance) -> StoreResult<()> {
        self.check_fault(FaultPoint::CacheWrite, "cache write")?;
        let mut employees = self
            .employees
            .write()
            .map_err(|_| StoreError::new("cache write", "lock poisoned"))?;
        match employees.get_mut(employee_id) {
            Some(employee) => {
                employee.cached_balance = Some(cache);
                Ok(())
            }
            None => Err(StoreError::new(
                "cache write",
                format!("no employee row for '{employee_id}'"),
            )),
        }
    }
}
