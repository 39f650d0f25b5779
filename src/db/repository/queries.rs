//! Derived queries over the schedule ledger.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::error::StoreResult;
use crate::models::EmployeeId;

/// Store trait for streak and aggregate queries.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ScheduleQueries: Send + Sync {
    /// Length of the run of same-kind days ending at `reference_date`.
    ///
    /// Starting at `reference_date` and walking strictly backwards one
    /// calendar day at a time, counts entries matching `on_shift`. The walk
    /// stops at the first missing entry, entry of the opposite kind, or
    /// calendar gap. This is the single streak primitive; feasibility
    /// checks, day labeling, and summaries all go through it.
    ///
    /// # Arguments
    /// * `employee_id` - A registered employee
    /// * `reference_date` - The day the run ends at (inclusive)
    /// * `on_shift` - Which kind of day to count
    ///
    /// # Returns
    /// * `Ok(u32)` - The run length; `0` when `reference_date` has no entry
    ///   of the requested kind
    async fn consecutive_same_kind(
        &self,
        employee_id: EmployeeId,
        reference_date: NaiveDate,
        on_shift: bool,
    ) -> StoreResult<u32>;

    /// Number of recorded days of one kind with `date <= up_to`.
    async fn total_days(
        &self,
        employee_id: EmployeeId,
        on_shift: bool,
        up_to: NaiveDate,
    ) -> StoreResult<u32>;

    /// Minimum and maximum dates present in the ledger.
    ///
    /// # Returns
    /// * `Ok(Some((min, max)))` - When at least one entry exists
    /// * `Ok(None)` - When the ledger is empty
    async fn schedule_date_range(&self) -> StoreResult<Option<(NaiveDate, NaiveDate)>>;
}
