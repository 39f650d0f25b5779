//! Multi-attempt schedule generation.
//!
//! The generator plans a window of consecutive days by invoking the day
//! selector date by date, writing every decision to the store so later days
//! see earlier ones. Several independent attempts are run; each starts from
//! the pre-run store state and is rolled back afterwards, so attempts never
//! observe one another's partial writes. Successful attempts are ranked by
//! total score, the best one is re-applied to the store, and the top results
//! are returned.

use chrono::{Days, Local, NaiveDate};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::api::{GenerateRequest, ScheduleResult};
use crate::config::{ScoreWeights, SchedulerConfig};
use crate::db::models::ScheduleEntry;
use crate::db::repository::FullStore;
use crate::error::{SchedulerError, SchedulerResult};
use crate::models::{EmployeeId, EmployeeState, RosterMember};
use crate::services::constraints;
use crate::services::selector;

/// A successful attempt: the caller-facing result plus the window entries it
/// wrote, kept so the best attempt can be re-applied to the store.
struct RankedAttempt {
    result: ScheduleResult,
    entries: Vec<ScheduleEntry>,
}

/// Generate ranked fair schedules for a window of days.
///
/// Runs `attempts_per_schedule * num_schedules` independent attempts,
/// ranks the successful ones by `overall_score` descending, persists the
/// best window to the store, and returns the top `num_schedules` results.
/// No successful attempt yields an empty list and an untouched store; that
/// is a soft failure, not an error.
///
/// # Arguments
/// * `store` - Backing store; source of history and target of the best window
/// * `roster` - All registered employees
/// * `config` - Engine configuration
/// * `request` - Window length, optional start, weight overrides, RNG seed
pub async fn generate_fair_schedule<S: FullStore>(
    store: &S,
    roster: &[RosterMember],
    config: &SchedulerConfig,
    request: &GenerateRequest,
) -> SchedulerResult<Vec<ScheduleResult>> {
    if request.days == 0 {
        return Err(SchedulerError::InvalidRequest(
            "Schedule window must cover at least one day".to_string(),
        ));
    }

    let start_date = match request.start_date {
        Some(date) => date,
        None => next_unplanned_date(store).await?,
    };
    let end_date = start_date
        .checked_add_days(Days::new(u64::from(request.days - 1)))
        .ok_or_else(|| {
            SchedulerError::InvalidRequest(format!(
                "Window of {} days starting {} leaves the supported calendar range",
                request.days, start_date
            ))
        })?;

    let weights = request.weights.as_ref().unwrap_or(&config.weights);
    let attempts = config.attempts_per_schedule as usize * request.num_schedules;
    let mut rng = match request.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    info!(
        "Generating fair schedule: {} to {} ({} attempts for {} schedules)",
        start_date, end_date, attempts, request.num_schedules
    );

    // Captured once; every attempt starts from exactly this window state
    let pre_run = store.entries_in_window(start_date, end_date).await?;

    let mut ranked: Vec<RankedAttempt> = Vec::new();
    for attempt in 1..=attempts {
        restore_window(store, start_date, end_date, &pre_run).await?;
        match run_attempt(store, roster, config, weights, start_date, end_date, &mut rng).await {
            Ok(outcome) => ranked.push(outcome),
            Err(err @ (SchedulerError::CannotScheduleDay(_) | SchedulerError::Store(_))) => {
                warn!("Attempt {}/{} discarded: {}", attempt, attempts, err);
            }
            Err(err) => return Err(err),
        }
    }
    restore_window(store, start_date, end_date, &pre_run).await?;

    ranked.sort_by(|a, b| {
        b.result
            .overall_score
            .partial_cmp(&a.result.overall_score)
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(request.num_schedules);

    let Some(best) = ranked.first() else {
        warn!("No attempt produced a schedule for {} to {}", start_date, end_date);
        return Ok(Vec::new());
    };
    for entry in &best.entries {
        store
            .upsert_entry(entry.employee_id, entry.date, entry.on_shift)
            .await?;
    }
    info!(
        "Kept {} of {} successful attempts; best score {:.1}",
        ranked.len(),
        attempts,
        best.result.overall_score
    );

    Ok(ranked.into_iter().map(|a| a.result).collect())
}

/// First date with no recorded entry: one day past the store's newest entry,
/// or tomorrow when the store is empty.
async fn next_unplanned_date<S: FullStore>(store: &S) -> SchedulerResult<NaiveDate> {
    let next = match store.schedule_date_range().await? {
        Some((_, max_date)) => max_date.succ_opt(),
        None => Local::now().date_naive().succ_opt(),
    };
    next.ok_or_else(|| {
        SchedulerError::InvalidRequest(
            "Schedule window leaves the supported calendar range".to_string(),
        )
    })
}

/// Put the window back to the captured pre-run state.
async fn restore_window<S: FullStore>(
    store: &S,
    from: NaiveDate,
    to: NaiveDate,
    pre_run: &[ScheduleEntry],
) -> SchedulerResult<()> {
    store.clear_window(from, to).await?;
    for entry in pre_run {
        store
            .upsert_entry(entry.employee_id, entry.date, entry.on_shift)
            .await?;
    }
    Ok(())
}

/// Plan the window once, writing every day to the store as it goes.
async fn run_attempt<S: FullStore>(
    store: &S,
    roster: &[RosterMember],
    config: &SchedulerConfig,
    weights: &ScoreWeights,
    start_date: NaiveDate,
    end_date: NaiveDate,
    rng: &mut StdRng,
) -> SchedulerResult<RankedAttempt> {
    // Fresh state: prior shift totals from the store, counters at zero (the
    // selector refreshes runs per day)
    let anchor = start_date.pred_opt();
    let mut states: HashMap<EmployeeId, EmployeeState> = HashMap::with_capacity(roster.len());
    for member in roster {
        let prior = match anchor {
            Some(anchor) => store.total_days(member.id, true, anchor).await?,
            None => 0,
        };
        states.insert(member.id, EmployeeState::with_total_shifts(prior));
    }

    let mut schedule: BTreeMap<NaiveDate, BTreeSet<String>> = BTreeMap::new();
    let mut satisfied: BTreeMap<NaiveDate, Vec<String>> = BTreeMap::new();
    let mut violated: BTreeMap<NaiveDate, Vec<String>> = BTreeMap::new();
    let mut entries: Vec<ScheduleEntry> = Vec::new();
    let mut overall_score = 0.0;

    let mut date = start_date;
    loop {
        let selection =
            selector::select_day(store, roster, &mut states, date, config, weights, rng).await?;
        if selection.chosen.is_empty() {
            return Err(SchedulerError::CannotScheduleDay(date));
        }

        // Record the day: chosen on shift, every other available employee at
        // home
        let chosen: HashSet<EmployeeId> = selection.chosen.iter().copied().collect();
        let mut names = BTreeSet::new();
        for member in roster {
            if !member.employee.is_available_on(date) {
                continue;
            }
            let on_shift = chosen.contains(&member.id);
            store.upsert_entry(member.id, date, on_shift).await?;
            entries.push(ScheduleEntry {
                employee_id: member.id,
                date,
                on_shift,
            });
            let state = states.entry(member.id).or_default();
            if on_shift {
                state.record_shift_day(date);
                names.insert(member.name().to_string());
            } else {
                state.record_home_day();
            }
        }

        let labels = constraints::label_day(store, roster, date).await?;
        let mut day_satisfied = selection.satisfied;
        let mut day_violated = selection.violated;
        merge_tags(&mut day_satisfied, labels.satisfied);
        merge_tags(&mut day_violated, labels.violated);

        overall_score += selection.score;
        schedule.insert(date, names);
        satisfied.insert(date, day_satisfied);
        violated.insert(date, day_violated);

        if date == end_date {
            break;
        }
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }

    Ok(RankedAttempt {
        result: ScheduleResult {
            schedule,
            satisfied,
            violated,
            overall_score,
        },
        entries,
    })
}

/// Append tags not already present, preserving order.
fn merge_tags(into: &mut Vec<String>, from: Vec<String>) {
    for tag in from {
        if !into.contains(&tag) {
            into.push(tag);
        }
    }
}
