//! Service layer for scheduling logic and orchestration.
//!
//! This module contains the scheduling engine proper. Services are free
//! functions generic over the store traits, so they work with any storage
//! backend and compose into the [`crate::scheduler::ShiftScheduler`] facade:
//!
//! - `constraints`: feasibility predicate and post-hoc day labeling
//! - `scoring`: the weighted fairness/preference score
//! - `selector`: per-day shift selection (backtracking plus relaxed fallback)
//! - `generator`: multi-attempt window generation and ranking
//! - `seed`: alias-resolved history import
//! - `summary`: per-employee history digests

pub mod constraints;
pub mod generator;
pub mod scoring;
pub mod seed;
pub mod selector;
pub mod summary;

pub use constraints::{check_feasibility, label_day, DayLabels, Feasibility, RejectReason};
pub use generator::generate_fair_schedule;
pub use scoring::{fleet_average, score_candidate, CandidateScore};
pub use seed::{feed_from_json, seed_from_feed};
pub use selector::{select_day, DaySelection};
pub use summary::employee_summaries;
