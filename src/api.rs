//! Caller-facing Data Transfer Objects (DTOs).
//!
//! This module defines the types that cross the scheduler boundary: the
//! generation request, the ranked schedule result, seed feed rows, and
//! per-employee summaries.
//!
//! ## Design Guidelines
//!
//! 1. **Primitives Only**: Dates as `NaiveDate`, employees as `String` names
//! 2. **Flat Structures**: Maps keyed by date, optimized for JSON ergonomics
//! 3. **Serializable**: All types round-trip through serde
//! 4. **Deterministic**: Ordered collections so equal schedules compare equal

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::config::ScoreWeights;
use crate::models::DateRange;

// =========================================================
// Generation Request
// =========================================================

fn default_num_schedules() -> usize {
    1
}

/// Parameters for one call to `generate_fair_schedule`.
///
/// Only `days` is required; everything else falls back to engine defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Number of consecutive days to plan.
    pub days: u32,
    /// First day of the window. When omitted the scheduler continues one day
    /// after the last recorded entry, or starts tomorrow on an empty store.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Scoring weight overrides for this run only.
    #[serde(default)]
    pub weights: Option<ScoreWeights>,
    /// How many ranked schedules to return.
    #[serde(default = "default_num_schedules")]
    pub num_schedules: usize,
    /// Fixed seed for the tie-break shuffle. Runs with the same seed and the
    /// same store contents produce identical schedules.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl GenerateRequest {
    /// Request a single schedule covering `days` days.
    pub fn for_days(days: u32) -> Self {
        Self {
            days,
            start_date: None,
            weights: None,
            num_schedules: default_num_schedules(),
            rng_seed: None,
        }
    }

    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = Some(weights);
        self
    }

    pub fn with_num_schedules(mut self, num_schedules: usize) -> Self {
        self.num_schedules = num_schedules;
        self
    }

    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

// =========================================================
// Schedule Result
// =========================================================

/// One generated schedule with its constraint tags and total score.
///
/// All maps are keyed by date and cover exactly the generated window. The
/// `satisfied` and `violated` lists hold human-readable tags; constraint
/// dissatisfaction is data here, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Names on shift, per day.
    pub schedule: BTreeMap<NaiveDate, BTreeSet<String>>,
    /// Tags for constraints the day honors.
    pub satisfied: BTreeMap<NaiveDate, Vec<String>>,
    /// Tags for constraints the day breaks.
    pub violated: BTreeMap<NaiveDate, Vec<String>>,
    /// Sum of the daily scores; higher ranks first.
    pub overall_score: f64,
}

impl ScheduleResult {
    /// Names on shift for one day of the window.
    pub fn names_on(&self, date: NaiveDate) -> Option<&BTreeSet<String>> {
        self.schedule.get(&date)
    }

    /// Number of days the schedule covers.
    pub fn num_days(&self) -> usize {
        self.schedule.len()
    }
}

// =========================================================
// Seed Feed
// =========================================================

/// One day of an imported shift history.
///
/// Names on both sides are aliases resolved against the roster; unknown
/// aliases are skipped with a warning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedRow {
    pub date: NaiveDate,
    #[serde(default)]
    pub on_shift: Vec<String>,
    #[serde(default)]
    pub at_home: Vec<String>,
}

// =========================================================
// Employee Summary
// =========================================================

/// Which kind of day an unbroken run is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreakKind {
    OnShift,
    AtHome,
}

/// An unbroken run of same-kind days ending at the last recorded date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub kind: StreakKind,
    pub days: u32,
}

/// Recorded history digest for one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    pub name: String,
    pub total_shift_days: u32,
    pub total_home_days: u32,
    /// Run ending at the employee's most recent entry, if any.
    pub current_streak: Option<Streak>,
    /// Contiguous on-shift stretches, compressed and ordered.
    pub shift_ranges: Vec<DateRange>,
    /// Contiguous at-home stretches, compressed and ordered.
    pub home_ranges: Vec<DateRange>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn request_json_fills_defaults() {
        let request: GenerateRequest = serde_json::from_str(r#"{ "days": 7 }"#).unwrap();
        assert_eq!(request.days, 7);
        assert_eq!(request.start_date, None);
        assert_eq!(request.num_schedules, 1);
        assert_eq!(request.rng_seed, None);
        assert!(request.weights.is_none());
    }

    #[test]
    fn request_builders_compose() {
        let request = GenerateRequest::for_days(14)
            .with_start_date(date(2025, 3, 1))
            .with_num_schedules(3)
            .with_rng_seed(42);
        assert_eq!(request.days, 14);
        assert_eq!(request.start_date, Some(date(2025, 3, 1)));
        assert_eq!(request.num_schedules, 3);
        assert_eq!(request.rng_seed, Some(42));
    }

    #[test]
    fn seed_row_accepts_one_sided_days() {
        let row: SeedRow =
            serde_json::from_str(r#"{ "date": "2025-01-03", "on_shift": ["noa", "amit"] }"#)
                .unwrap();
        assert_eq!(row.date, date(2025, 1, 3));
        assert_eq!(row.on_shift.len(), 2);
        assert!(row.at_home.is_empty());
    }

    #[test]
    fn schedule_result_serializes_to_wire_shape() {
        let mut schedule = BTreeMap::new();
        schedule.insert(
            date(2025, 1, 1),
            BTreeSet::from(["Noa".to_string(), "Amit".to_string()]),
        );
        let mut satisfied = BTreeMap::new();
        satisfied.insert(date(2025, 1, 1), vec!["Noa: Traveling with preferred partner".to_string()]);
        let result = ScheduleResult {
            schedule,
            satisfied,
            violated: BTreeMap::new(),
            overall_score: 12.5,
        };

        let value: serde_json::Value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["schedule"]["2025-01-01"][0], "Amit");
        assert_eq!(value["schedule"]["2025-01-01"][1], "Noa");
        assert_eq!(value["overall_score"], 12.5);

        let back: ScheduleResult = serde_json::from_value(value).unwrap();
        assert_eq!(back, result);
    }
}
