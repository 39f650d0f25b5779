//! Weighted fairness and preference scoring.
//!
//! The scorer ranks candidates for a day's shift. It is pure and
//! deterministic: the same `(employee, state, date, fleet_average, weights)`
//! always yields the same score and tags. Negative terms push hard-worked
//! employees home; positive terms surface preference costs the selector
//! should weigh.

use chrono::NaiveDate;

use crate::config::ScoreWeights;
use crate::models::{Employee, EmployeeState};

/// Shift runs longer than this start costing score.
pub const LONG_SHIFT_RUN_DAYS: u32 = 5;

/// Score and satisfied tags for one candidate on one date.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateScore {
    pub score: f64,
    /// Tags reported if the candidate ends up chosen for the day.
    pub tags: Vec<String>,
}

/// Mean `total_shifts` across the day's available employees.
///
/// Returns `0.0` for an empty fleet. The relaxed selection path skips this
/// and scores against a zero average to neutralize the balance term.
pub fn fleet_average(totals: &[u32]) -> f64 {
    if totals.is_empty() {
        return 0.0;
    }
    totals.iter().map(|&t| f64::from(t)).sum::<f64>() / totals.len() as f64
}

/// Score one candidate for one date.
///
/// Additive terms, starting from zero:
/// - long consecutive shift runs subtract `consecutive_shift * run`;
///   short runs earn a satisfied tag instead
/// - being above the fleet average subtracts `total_shifts * diff`;
///   at or below average earns a tag instead
/// - having a preferred partner adds `partner_preference` (the selector
///   enforces that the partner actually joins)
/// - a wished home day adds `wish_day_at_home`, the cost the schedule pays
///   by still sending the employee out
pub fn score_candidate(
    employee: &Employee,
    state: &EmployeeState,
    date: NaiveDate,
    fleet_average: f64,
    weights: &ScoreWeights,
) -> CandidateScore {
    let mut score = 0.0;
    let mut tags = Vec::new();

    if state.consecutive_shift_days > LONG_SHIFT_RUN_DAYS {
        score -= f64::from(weights.consecutive_shift) * f64::from(state.consecutive_shift_days);
    } else {
        tags.push(format!("{}: No long consecutive shifts", employee.name));
    }

    let diff = f64::from(state.total_shifts) - fleet_average;
    if diff > 0.0 {
        score -= f64::from(weights.total_shifts) * diff;
    } else {
        tags.push(format!("{}: Below average shifts", employee.name));
    }

    if employee.preferred_shift_partner.is_some() {
        score += f64::from(weights.partner_preference);
    }

    if employee.prefers_home_on(date) {
        score += f64::from(weights.wish_day_at_home);
    }

    CandidateScore { score, tags }
}
