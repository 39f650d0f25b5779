//! Store trait definitions for schedule persistence.
//!
//! This module provides a collection of focused store traits that abstract
//! schedule persistence. By splitting responsibilities across multiple traits,
//! implementations can be more focused and testable.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for store operations
//! - [`employees`]: Employee registration and lookup
//! - [`entries`]: The append-only (employee, date, on_shift) ledger
//! - [`queries`]: Streak and aggregate queries derived from the ledger
//!
//! # Trait Composition
//!
//! A complete store implementation typically implements all traits:
//!
//! ```ignore
//! impl EmployeeStore for MyStore { ... }
//! impl EntryStore for MyStore { ... }
//! impl ScheduleQueries for MyStore { ... }
//! ```
//!
//! # Convenience Trait Bound
//!
//! For functions that need all store capabilities, use the [`FullStore`] trait bound:
//!
//! ```ignore
//! async fn my_service<S: FullStore>(store: &S) -> StoreResult<()> {
//!     let id = store.register_employee(&employee).await?;
//!     store.upsert_entry(id, date, true).await?;
//!     Ok(())
//! }
//! ```

pub mod employees;
pub mod entries;
pub mod error;
pub mod queries;

// Re-export error types
pub use error::{StoreError, StoreResult};

// Re-export all traits
pub use employees::EmployeeStore;
pub use entries::EntryStore;
pub use queries::ScheduleQueries;

/// Composite trait bound for a complete store implementation.
///
/// This trait is automatically implemented for any type that implements
/// all three store traits. Use this as a convenient bound when you need
/// access to all store operations.
///
/// # Example
///
/// ```ignore
/// async fn rebuild_window<S: FullStore>(
///     store: &S,
///     from: NaiveDate,
///     to: NaiveDate,
/// ) -> StoreResult<()> {
///     store.clear_window(from, to).await?;
///     Ok(())
/// }
/// ```
pub trait FullStore: EmployeeStore + EntryStore + ScheduleQueries {}

// Blanket implementation: any type implementing all three traits automatically implements FullStore
impl<T> FullStore for T where T: EmployeeStore + EntryStore + ScheduleQueries {}
