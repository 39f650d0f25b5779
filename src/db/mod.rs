//! Storage module for schedule data.
//!
//! This module provides abstractions for schedule persistence via the store
//! pattern, allowing different storage backends to be swapped easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  ShiftScheduler facade (scheduler.rs)       │
//! └───────────────────┬─────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────┐
//! │  Service Layer (services/) - Scheduling     │
//! │  - Feasibility checks and day labeling      │
//! │  - Scoring, day selection, generation       │
//! └───────────────────┬─────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────┐
//! │  Store Traits (repository/)                 │
//! └───────────────────┬─────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────┐
//! │  Local Store (in-memory)                    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The module includes:
//! - `models`: Row types persisted by the store
//! - `repository`: Trait definitions for store operations
//! - `repositories::local`: In-memory implementation

pub mod models;
pub mod repositories;
pub mod repository;

pub use models::{EmployeeRecord, ScheduleEntry};
pub use repositories::LocalStore;
pub use repository::{
    EmployeeStore, EntryStore, FullStore, ScheduleQueries, StoreError, StoreResult,
};
