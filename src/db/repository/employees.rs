//! Employee registration trait.
//!
//! Registration is the only way ids enter the system; every other store
//! operation speaks [`EmployeeId`].

use async_trait::async_trait;

use super::error::StoreResult;
use crate::models::{Employee, EmployeeId};

/// Store trait for the employee registry.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Register a profile under its unique name and return the assigned id.
    ///
    /// Registration is idempotent on the name: registering a name that
    /// already exists returns the existing id and leaves the stored profile
    /// unchanged.
    ///
    /// # Arguments
    /// * `employee` - The validated profile to persist
    ///
    /// # Returns
    /// * `Ok(EmployeeId)` - The id assigned to (or already held by) the name
    /// * `Err(StoreError::Serialization)` - If the profile cannot be serialized
    async fn register_employee(&self, employee: &Employee) -> StoreResult<EmployeeId>;

    /// Load every registered employee with its deserialized profile, ordered
    /// by id.
    ///
    /// # Returns
    /// * `Ok(Vec<(EmployeeId, Employee)>)` - The full registry
    /// * `Err(StoreError::Serialization)` - If a stored profile is corrupt
    async fn load_employees(&self) -> StoreResult<Vec<(EmployeeId, Employee)>>;

    /// Look up the id registered for a canonical name.
    ///
    /// # Returns
    /// * `Ok(Some(EmployeeId))` - If the name is registered
    /// * `Ok(None)` - Otherwise
    async fn employee_id(&self, name: &str) -> StoreResult<Option<EmployeeId>>;
}
