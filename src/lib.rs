//! # Shift Scheduler
//!
//! Constraint-based fair shift scheduling engine.
//!
//! This crate plans which employees travel for on-site shift duty and which
//! stay home, day by day, balancing hard constraints (rest periods, shift
//! caps, mandatory home days, sabbath observance) against soft preferences
//! (preferred partners, wished home days, fair totals). Schedules are built
//! over an append-only per-day ledger so that fresh planning always continues
//! from recorded history.
//!
//! ## Features
//!
//! - **Employee profiles**: Availability, rest minimums, shift caps,
//!   partner and home-day preferences, alias names for imports
//! - **Feasibility rules**: Hard constraints applied when building each day
//! - **Weighted scoring**: Soft preferences ranked by configurable weights
//! - **Backtracking day selection**: Exact search with a relaxed fallback
//! - **Multi-attempt generation**: Ranked candidate schedules, best persisted
//! - **Seed import**: Rebuild history from alias-named day feeds
//!
//! ## Architecture
//!
//! - [`api`]: Request, result, and feed types for callers
//! - [`config`]: Tunable limits and scoring weights
//! - [`db`]: Store traits and the in-memory [`db::LocalStore`]
//! - [`models`]: Employee profiles, date ranges, per-employee running state
//! - [`services`]: Constraint evaluation, scoring, day selection, generation
//! - [`scheduler`]: The [`ShiftScheduler`] facade tying it all together
//!
//! ## Quick Start
//!
//! ```ignore
//! use shift_scheduler::{Employee, GenerateRequest, LocalStore, ShiftScheduler};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut scheduler = ShiftScheduler::new(LocalStore::new());
//!     scheduler.register_employee(Employee::new("Noa").with_manager()).await?;
//!     scheduler.register_employee(Employee::new("Amit").with_partner("Noa")).await?;
//!
//!     let results = scheduler
//!         .generate_fair_schedule(&GenerateRequest::for_days(14))
//!         .await?;
//!     for (date, names) in &results[0].schedule {
//!         println!("{date}: {names:?}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod services;

pub use api::{EmployeeSummary, GenerateRequest, ScheduleResult, SeedRow};
pub use config::{SchedulerConfig, ScoreWeights};
pub use db::LocalStore;
pub use error::{SchedulerError, SchedulerResult};
pub use models::{DateRange, Employee, EmployeeId, RosterMember};
pub use scheduler::ShiftScheduler;
