//! Schedule ledger trait: day-by-day `(employee, date, on_shift)` decisions.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::error::StoreResult;
use crate::db::models::ScheduleEntry;
use crate::models::EmployeeId;

/// Store trait for writing and reading schedule entries.
///
/// The ledger is append-only from the generator's point of view: a decision,
/// once written, is never updated in place. Whole stretches are removed only
/// through [`clear_window`](EntryStore::clear_window) (attempt rollback) and
/// [`clear_all_entries`](EntryStore::clear_all_entries) (seed bootstrap).
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Write one decision.
    ///
    /// # Arguments
    /// * `employee_id` - A registered employee
    /// * `date` - The calendar day the decision covers
    /// * `on_shift` - `true` for on shift, `false` for at home
    ///
    /// # Returns
    /// * `Ok(())` - The decision was recorded
    /// * `Err(StoreError::DuplicateEntry)` - The slot was already written
    /// * `Err(StoreError::UnknownEmployee)` - The id is not registered
    async fn upsert_entry(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
        on_shift: bool,
    ) -> StoreResult<()>;

    /// Read one decision.
    ///
    /// # Returns
    /// * `Ok(Some(bool))` - The recorded decision
    /// * `Ok(None)` - No entry exists for the slot
    async fn on_shift_flag(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
    ) -> StoreResult<Option<bool>>;

    /// Ids of every employee recorded on shift for `date`, ordered by id.
    async fn employees_on_shift(&self, date: NaiveDate) -> StoreResult<Vec<EmployeeId>>;

    /// Every entry recorded for one employee, ordered by date.
    async fn entries_for_employee(
        &self,
        employee_id: EmployeeId,
    ) -> StoreResult<Vec<ScheduleEntry>>;

    /// Every entry with a date in `[from, to]`, ordered by date then id.
    ///
    /// The generator captures a planning window with this before its first
    /// attempt and rewrites the captured slices when rolling back.
    async fn entries_in_window(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> StoreResult<Vec<ScheduleEntry>>;

    /// Remove every entry with a date in `[from, to]`.
    async fn clear_window(&self, from: NaiveDate, to: NaiveDate) -> StoreResult<()>;

    /// Remove every entry. Employee registrations are kept.
    async fn clear_all_entries(&self) -> StoreResult<()>;
}
