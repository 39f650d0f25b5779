//! Per-day shift selection.
//!
//! Selection runs in two phases. The strict phase filters candidates through
//! the feasibility predicate, scores the survivors, and searches for a subset
//! of the required size containing a manager and every chosen employee's
//! preferred partner. When no such subset exists, the relaxed fallback
//! ignores everything except availability and greedily fills the shift,
//! tagging every concession it makes.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::config::{ScoreWeights, SchedulerConfig};
use crate::db::repository::FullStore;
use crate::error::SchedulerResult;
use crate::models::{EmployeeId, EmployeeState, RosterMember};
use crate::services::constraints::{self, Feasibility};
use crate::services::scoring;

/// Outcome of selecting one day's shift.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySelection {
    /// Employees put on shift, best ranked first. May be shorter than the
    /// required size (relaxed shortfall) or empty (nobody at all).
    pub chosen: Vec<EmployeeId>,
    /// Sum of the chosen employees' scores.
    pub score: f64,
    pub satisfied: Vec<String>,
    pub violated: Vec<String>,
}

/// One scored candidate for the day.
#[derive(Debug, Clone)]
struct Candidate {
    id: EmployeeId,
    name: String,
    is_manager: bool,
    partner: Option<String>,
    score: f64,
    tags: Vec<String>,
}

/// Select the employees on shift for `date`.
///
/// Refreshes each available employee's consecutive-run counters from the
/// store (anchored at the previous day), filters by feasibility, scores the
/// survivors against the day's fleet average, and searches for a valid
/// subset. Falls back to relaxed selection when the strict search fails.
///
/// # Arguments
/// * `store` - Backing store; read for runs and previous-day flags
/// * `roster` - All registered employees
/// * `states` - Running counters, updated in place for available employees
/// * `date` - The day to staff
/// * `config` - Required size and search depth limit
/// * `weights` - Scoring weights for this run
/// * `rng` - Source of tie-break variety between attempts
pub async fn select_day<S: FullStore>(
    store: &S,
    roster: &[RosterMember],
    states: &mut HashMap<EmployeeId, EmployeeState>,
    date: NaiveDate,
    config: &SchedulerConfig,
    weights: &ScoreWeights,
    rng: &mut StdRng,
) -> SchedulerResult<DaySelection> {
    let anchor = date.pred_opt();

    // Refresh runs from the recorded history and fetch previous-day flags
    let mut available: Vec<&RosterMember> = Vec::new();
    let mut prev_flags: HashMap<EmployeeId, Option<bool>> = HashMap::new();
    for member in roster {
        if !member.employee.is_available_on(date) {
            continue;
        }
        let (shift_run, home_run, prev) = match anchor {
            Some(anchor) => (
                store.consecutive_same_kind(member.id, anchor, true).await?,
                store.consecutive_same_kind(member.id, anchor, false).await?,
                store.on_shift_flag(member.id, anchor).await?,
            ),
            None => (0, 0, None),
        };
        let state = states.entry(member.id).or_default();
        state.consecutive_shift_days = shift_run;
        state.consecutive_home_days = home_run;
        prev_flags.insert(member.id, prev);
        available.push(member);
    }

    let totals: Vec<u32> = available
        .iter()
        .map(|m| states.get(&m.id).map(|s| s.total_shifts).unwrap_or(0))
        .collect();
    let average = scoring::fleet_average(&totals);

    // Feasibility filter; rejections contribute the day's violated tags
    let mut violated: Vec<String> = Vec::new();
    let mut candidates: Vec<Candidate> = Vec::new();
    for member in &available {
        let Some(state) = states.get(&member.id) else {
            continue;
        };
        let prev = prev_flags.get(&member.id).copied().flatten();
        match constraints::check_feasibility(&member.employee, date, state, prev) {
            Feasibility::Eligible => {
                candidates.push(scored_candidate(member, state, date, average, weights));
            }
            Feasibility::Rejected(reason) => {
                if let Some(tag) = constraints::violation_tag(member.name(), reason) {
                    violated.push(tag);
                }
            }
            Feasibility::Unavailable => {}
        }
    }

    // Shuffle before the stable sort so equal scores tie-break differently
    // between attempts
    candidates.shuffle(rng);
    candidates.sort_by(compare_candidates);

    if let Some(subset) = backtrack_select(
        &candidates,
        config.required_shift_size,
        config.selector_depth_limit,
    ) {
        let mut selection = collect_selection(&candidates, &subset);
        selection.violated.append(&mut violated);
        return Ok(selection);
    }

    Ok(relaxed_select(
        &available,
        states,
        date,
        config.required_shift_size,
        weights,
        violated,
    ))
}

fn scored_candidate(
    member: &RosterMember,
    state: &EmployeeState,
    date: NaiveDate,
    fleet_average: f64,
    weights: &ScoreWeights,
) -> Candidate {
    let scored = scoring::score_candidate(&member.employee, state, date, fleet_average, weights);
    Candidate {
        id: member.id,
        name: member.name().to_string(),
        is_manager: member.employee.is_manager,
        partner: member.employee.preferred_shift_partner.clone(),
        score: scored.score,
        tags: scored.tags,
    }
}

/// Descending by score, managers first among equal scores.
fn compare_candidates(a: &Candidate, b: &Candidate) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.is_manager.cmp(&a.is_manager))
}

fn collect_selection(candidates: &[Candidate], subset: &[usize]) -> DaySelection {
    let mut chosen = Vec::with_capacity(subset.len());
    let mut score = 0.0;
    let mut satisfied = Vec::new();
    for &i in subset {
        let candidate = &candidates[i];
        chosen.push(candidate.id);
        score += candidate.score;
        satisfied.extend(candidate.tags.iter().cloned());
    }
    DaySelection {
        chosen,
        score,
        satisfied,
        violated: Vec::new(),
    }
}

enum Search {
    Found,
    Exhausted,
    TooDeep,
}

/// Depth-first search for a subset of `required` candidates containing at
/// least one manager and every member's preferred partner.
///
/// Candidates are consumed in sorted order, so the first subset found is the
/// highest-ranked one. Returns `None` when the search space is exhausted or
/// the recursion depth limit is exceeded.
fn backtrack_select(
    candidates: &[Candidate],
    required: usize,
    depth_limit: u32,
) -> Option<Vec<usize>> {
    if required == 0 || candidates.len() < required {
        return None;
    }
    let mut subset: Vec<usize> = Vec::with_capacity(required);
    match extend_subset(candidates, required, 0, &mut subset, 0, depth_limit) {
        Search::Found => Some(subset),
        Search::Exhausted | Search::TooDeep => None,
    }
}

fn extend_subset(
    candidates: &[Candidate],
    required: usize,
    start: usize,
    subset: &mut Vec<usize>,
    depth: u32,
    depth_limit: u32,
) -> Search {
    if depth > depth_limit {
        return Search::TooDeep;
    }
    if subset.len() == required {
        return if subset_is_valid(candidates, subset) {
            Search::Found
        } else {
            Search::Exhausted
        };
    }
    for i in start..candidates.len() {
        if !partner_can_join(candidates, subset, i) {
            continue;
        }
        subset.push(i);
        match extend_subset(candidates, required, i + 1, subset, depth + 1, depth_limit) {
            Search::Found => return Search::Found,
            Search::TooDeep => return Search::TooDeep,
            Search::Exhausted => {
                subset.pop();
            }
        }
    }
    Search::Exhausted
}

fn subset_is_valid(candidates: &[Candidate], subset: &[usize]) -> bool {
    if !subset.iter().any(|&i| candidates[i].is_manager) {
        return false;
    }
    subset.iter().all(|&i| match &candidates[i].partner {
        None => true,
        Some(partner) => subset.iter().any(|&j| candidates[j].name == *partner),
    })
}

/// Eager prune: adding `i` is pointless when its partner is neither already
/// in the subset nor still ahead in the candidate list.
fn partner_can_join(candidates: &[Candidate], subset: &[usize], i: usize) -> bool {
    let Some(partner) = &candidates[i].partner else {
        return true;
    };
    subset.iter().any(|&j| candidates[j].name == *partner)
        || candidates[i + 1..].iter().any(|c| c.name == *partner)
}

/// Fallback when the strict search fails: availability is the only filter.
///
/// Scores use a zero fleet average so the balance term drops out. The
/// highest-scoring manager is taken first, remaining slots fill by
/// descending score, and every concession is tagged.
fn relaxed_select(
    available: &[&RosterMember],
    states: &HashMap<EmployeeId, EmployeeState>,
    date: NaiveDate,
    required: usize,
    weights: &ScoreWeights,
    mut violated: Vec<String>,
) -> DaySelection {
    let mut candidates: Vec<Candidate> = available
        .iter()
        .filter_map(|member| {
            states
                .get(&member.id)
                .map(|state| scored_candidate(member, state, date, 0.0, weights))
        })
        .collect();
    candidates.sort_by(compare_candidates);

    let mut subset: Vec<usize> = Vec::new();
    match candidates.iter().position(|c| c.is_manager) {
        Some(manager) => subset.push(manager),
        None => violated.push("No manager available".to_string()),
    }
    for i in 0..candidates.len() {
        if subset.len() >= required {
            break;
        }
        if !subset.contains(&i) {
            subset.push(i);
        }
    }
    if subset.len() < required {
        violated.push(format!(
            "Only found {} employees (needed {})",
            subset.len(),
            required
        ));
    }

    for &i in &subset {
        if let Some(partner) = &candidates[i].partner {
            if !subset.iter().any(|&j| candidates[j].name == *partner) {
                violated.push(format!("{}: Preferred partner not in shift", candidates[i].name));
            }
        }
    }

    let mut selection = collect_selection(&candidates, &subset);
    selection
        .satisfied
        .push("Using relaxed constraints".to_string());
    violated.push("Unable to meet all strict constraints".to_string());
    selection.violated = violated;
    selection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalStore;
    use crate::db::repository::{EmployeeStore, EntryStore};
    use crate::models::Employee;
    use rand::SeedableRng;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn register_all(store: &LocalStore, employees: Vec<Employee>) -> Vec<RosterMember> {
        let mut roster = Vec::new();
        for employee in employees {
            let id = store.register_employee(&employee).await.unwrap();
            roster.push(RosterMember { id, employee });
        }
        roster
    }

    fn fresh_states(roster: &[RosterMember]) -> HashMap<EmployeeId, EmployeeState> {
        roster
            .iter()
            .map(|m| (m.id, EmployeeState::default()))
            .collect()
    }

    fn small_config(required: usize) -> SchedulerConfig {
        SchedulerConfig {
            required_shift_size: required,
            ..SchedulerConfig::default()
        }
    }

    fn name_of(roster: &[RosterMember], id: EmployeeId) -> String {
        roster
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.name().to_string())
            .unwrap()
    }

    #[tokio::test]
    async fn test_strict_selection_takes_everyone_when_sizes_match() {
        let store = LocalStore::new();
        let mut employees: Vec<Employee> = (1..=3)
            .map(|i| Employee::new(format!("E{}", i)).with_available_from(date(2025, 1, 1)))
            .collect();
        employees[0].is_manager = true;
        let roster = register_all(&store, employees).await;
        let mut states = fresh_states(&roster);
        let config = small_config(3);
        let mut rng = StdRng::seed_from_u64(7);

        let selection = select_day(
            &store,
            &roster,
            &mut states,
            date(2025, 1, 6),
            &config,
            &config.weights,
            &mut rng,
        )
        .await
        .unwrap();

        assert_eq!(selection.chosen.len(), 3);
        assert_eq!(selection.score, 0.0);
        assert!(!selection
            .satisfied
            .contains(&"Using relaxed constraints".to_string()));
        // Scorer tags reported for every chosen employee
        assert!(selection
            .satisfied
            .contains(&"E2: Below average shifts".to_string()));
    }

    #[tokio::test]
    async fn test_partner_pair_is_kept_together() {
        let store = LocalStore::new();
        let mut employees = vec![
            Employee::new("Bo")
                .with_available_from(date(2025, 1, 1))
                .with_partner("Cy"),
            Employee::new("Cy").with_available_from(date(2025, 1, 1)),
            Employee::new("Manager").with_available_from(date(2025, 1, 1)),
            Employee::new("Dana").with_available_from(date(2025, 1, 1)),
        ];
        employees[2].is_manager = true;
        let roster = register_all(&store, employees).await;
        let config = small_config(3);

        // Whatever the shuffle, a subset containing Bo must contain Cy
        for seed in 0..10 {
            let mut states = fresh_states(&roster);
            let mut rng = StdRng::seed_from_u64(seed);
            let selection = select_day(
                &store,
                &roster,
                &mut states,
                date(2025, 1, 6),
                &config,
                &config.weights,
                &mut rng,
            )
            .await
            .unwrap();

            assert_eq!(selection.chosen.len(), 3);
            let names: Vec<String> = selection
                .chosen
                .iter()
                .map(|&id| name_of(&roster, id))
                .collect();
            assert!(names.contains(&"Manager".to_string()));
            if names.contains(&"Bo".to_string()) {
                assert!(names.contains(&"Cy".to_string()));
            }
        }
    }

    #[tokio::test]
    async fn test_unmatchable_partner_forces_relaxed_day() {
        let store = LocalStore::new();
        let mut employees = vec![
            Employee::new("Bo")
                .with_available_from(date(2025, 1, 1))
                .with_partner("Nobody"),
            Employee::new("Manager").with_available_from(date(2025, 1, 1)),
        ];
        employees[1].is_manager = true;
        let roster = register_all(&store, employees).await;
        let mut states = fresh_states(&roster);
        let config = small_config(2);
        let mut rng = StdRng::seed_from_u64(1);

        let selection = select_day(
            &store,
            &roster,
            &mut states,
            date(2025, 1, 6),
            &config,
            &config.weights,
            &mut rng,
        )
        .await
        .unwrap();

        // Strict search cannot satisfy Bo's partner; the relaxed path still
        // staffs the day and tags the broken preference
        assert_eq!(selection.chosen.len(), 2);
        assert!(selection
            .satisfied
            .contains(&"Using relaxed constraints".to_string()));
        assert!(selection
            .violated
            .contains(&"Unable to meet all strict constraints".to_string()));
        assert!(selection
            .violated
            .contains(&"Bo: Preferred partner not in shift".to_string()));
    }

    #[tokio::test]
    async fn test_missing_manager_is_tagged() {
        let store = LocalStore::new();
        let employees = vec![
            Employee::new("E1").with_available_from(date(2025, 1, 1)),
            Employee::new("E2").with_available_from(date(2025, 1, 1)),
        ];
        let roster = register_all(&store, employees).await;
        let mut states = fresh_states(&roster);
        let config = small_config(2);
        let mut rng = StdRng::seed_from_u64(1);

        let selection = select_day(
            &store,
            &roster,
            &mut states,
            date(2025, 1, 6),
            &config,
            &config.weights,
            &mut rng,
        )
        .await
        .unwrap();

        assert_eq!(selection.chosen.len(), 2);
        assert!(selection
            .violated
            .contains(&"No manager available".to_string()));
    }

    #[tokio::test]
    async fn test_understaffed_day_reports_the_shortfall() {
        let store = LocalStore::new();
        let mut employees = vec![
            Employee::new("E1").with_available_from(date(2025, 1, 1)),
            Employee::new("E2").with_available_from(date(2025, 1, 1)),
            Employee::new("E3").with_available_from(date(2025, 1, 1)),
        ];
        employees[0].is_manager = true;
        let roster = register_all(&store, employees).await;
        let mut states = fresh_states(&roster);
        let config = small_config(8);
        let mut rng = StdRng::seed_from_u64(1);

        let selection = select_day(
            &store,
            &roster,
            &mut states,
            date(2025, 1, 6),
            &config,
            &config.weights,
            &mut rng,
        )
        .await
        .unwrap();

        assert_eq!(selection.chosen.len(), 3);
        assert!(selection
            .violated
            .contains(&"Only found 3 employees (needed 8)".to_string()));
    }

    #[tokio::test]
    async fn test_seeded_home_run_blocks_selection_with_tag() {
        let store = LocalStore::new();
        let mut employees = vec![
            Employee::new("Eli")
                .with_available_from(date(2025, 1, 1))
                .with_min_home_days(5),
            Employee::new("M").with_available_from(date(2025, 1, 1)),
            Employee::new("E3").with_available_from(date(2025, 1, 1)),
        ];
        employees[1].is_manager = true;
        let roster = register_all(&store, employees).await;

        // Eli was home the two days before the selection date
        store
            .upsert_entry(roster[0].id, date(2025, 1, 4), false)
            .await
            .unwrap();
        store
            .upsert_entry(roster[0].id, date(2025, 1, 5), false)
            .await
            .unwrap();

        let mut states = fresh_states(&roster);
        let config = small_config(2);
        let mut rng = StdRng::seed_from_u64(1);

        let selection = select_day(
            &store,
            &roster,
            &mut states,
            date(2025, 1, 6),
            &config,
            &config.weights,
            &mut rng,
        )
        .await
        .unwrap();

        assert_eq!(selection.chosen.len(), 2);
        assert!(!selection.chosen.contains(&roster[0].id));
        assert!(selection
            .violated
            .contains(&"Eli: Must complete minimum 5 days at home (currently at 2)".to_string()));
    }

    #[test]
    fn managers_win_score_ties() {
        let make = |name: &str, manager: bool, score: f64| Candidate {
            id: EmployeeId::new(0),
            name: name.to_string(),
            is_manager: manager,
            partner: None,
            score,
            tags: Vec::new(),
        };
        let mut candidates = vec![
            make("a", false, 1.0),
            make("b", true, 1.0),
            make("c", false, 5.0),
        ];
        candidates.sort_by(compare_candidates);
        let order: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(order, vec!["c", "b", "a"]);
    }
}
