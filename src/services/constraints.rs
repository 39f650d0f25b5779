//! Constraint evaluation for shift scheduling.
//!
//! Two layers share the same rules:
//! 1. The **feasibility predicate** runs during selection and decides whether
//!    a candidate may join a day's shift at all.
//! 2. The **post-hoc labeler** runs after a day is recorded and reports each
//!    rule in both directions as human-readable satisfied/violated tags.
//!
//! Constraint dissatisfaction is data, never an error; only the predicate
//! removes candidates, and only structural impossibility is reported upstream.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::db::repository::{EntryStore, ScheduleQueries};
use crate::error::SchedulerResult;
use crate::models::{Employee, EmployeeState, RosterMember};

/// Outcome of the feasibility predicate for one `(employee, date)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feasibility {
    /// May be scheduled on the date.
    Eligible,
    /// Not yet available; the employee takes no part in the day at all.
    Unavailable,
    /// Must stay home on the date.
    Rejected(RejectReason),
}

/// Why a candidate must stay home.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Mid home run, below the employee's minimum stay.
    HomeRunIncomplete { run: u32, min: u32 },
    /// The consecutive shift cap has been reached.
    ShiftRunAtCap,
    /// The date falls in a mandatory home range.
    MandatoryHome,
    /// Going on shift would flip an observer's status on a Saturday.
    SabbathTransition,
}

/// Decide whether `employee` may be put on shift on `date`.
///
/// Rules are checked in a fixed order and the first match wins. The state is
/// expected to be refreshed from the store, anchored at the day before
/// `date`; `prev_on_shift` is the recorded decision for that previous day.
///
/// # Returns
/// * `Feasibility::Eligible` - No rule blocks the assignment
/// * `Feasibility::Unavailable` - The date precedes `available_from`
/// * `Feasibility::Rejected(reason)` - A mandatory rule blocks it
pub fn check_feasibility(
    employee: &Employee,
    date: NaiveDate,
    state: &EmployeeState,
    prev_on_shift: Option<bool>,
) -> Feasibility {
    if !employee.is_available_on(date) {
        return Feasibility::Unavailable;
    }

    if state.consecutive_home_days > 0
        && state.consecutive_home_days < employee.min_consecutive_home_days
    {
        return Feasibility::Rejected(RejectReason::HomeRunIncomplete {
            run: state.consecutive_home_days,
            min: employee.min_consecutive_home_days,
        });
    }

    // The cap check fires one day early so the run recorded today never
    // exceeds the maximum.
    if state.consecutive_shift_days >= employee.max_consecutive_shift_days.saturating_sub(1) {
        return Feasibility::Rejected(RejectReason::ShiftRunAtCap);
    }

    if employee.must_be_home_on(date) {
        return Feasibility::Rejected(RejectReason::MandatoryHome);
    }

    // An observer may stay on shift over a Saturday or stay home over it;
    // only the home-to-shift transition is blocked here. A missing previous
    // entry means no transition is detectable.
    if employee.is_sabbath_observer
        && date.weekday() == Weekday::Sat
        && prev_on_shift == Some(false)
    {
        return Feasibility::Rejected(RejectReason::SabbathTransition);
    }

    Feasibility::Eligible
}

/// Selection-time violated tag for a rejection.
///
/// Mandatory-home and sabbath rejections return `None`: those rules are
/// reported by [`label_day`], which sees the finished day and can emit the
/// satisfied direction instead.
pub fn violation_tag(name: &str, reason: RejectReason) -> Option<String> {
    match reason {
        RejectReason::HomeRunIncomplete { run, min } => Some(format!(
            "{}: Must complete minimum {} days at home (currently at {})",
            name, min, run
        )),
        RejectReason::ShiftRunAtCap => {
            Some(format!("{}: Maximum consecutive shift days reached", name))
        }
        RejectReason::MandatoryHome | RejectReason::SabbathTransition => None,
    }
}

/// Tags produced by labeling one recorded day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayLabels {
    pub satisfied: Vec<String>,
    pub violated: Vec<String>,
}

/// Annotate one recorded day of the schedule.
///
/// Reads the final statuses for `date` (and the day before) from the store
/// and reports each constraint in both directions. Employees without an
/// entry for the date are skipped.
///
/// # Arguments
/// * `store` - Backing store holding the recorded decisions
/// * `roster` - Registered employees to label
/// * `date` - The recorded day to annotate
pub async fn label_day<S>(
    store: &S,
    roster: &[RosterMember],
    date: NaiveDate,
) -> SchedulerResult<DayLabels>
where
    S: EntryStore + ScheduleQueries,
{
    let mut labels = DayLabels::default();
    let prev_date = date.pred_opt();

    for member in roster {
        let employee = &member.employee;
        if !employee.is_available_on(date) {
            continue;
        }
        let Some(on_shift) = store.on_shift_flag(member.id, date).await? else {
            continue;
        };
        let prev = match prev_date {
            Some(prev_date) => store.on_shift_flag(member.id, prev_date).await?,
            None => None,
        };
        let name = member.name();

        if employee.must_be_home_on(date) {
            if on_shift {
                labels
                    .violated
                    .push(format!("{}: Mandatory home day", name));
            } else {
                labels
                    .satisfied
                    .push(format!("{}: Mandatory home day respected", name));
            }
        }

        if employee.is_sabbath_observer && date.weekday() == Weekday::Sat {
            if let Some(prev) = prev {
                if prev == on_shift {
                    labels
                        .satisfied
                        .push(format!("{}: Shabbat observance respected", name));
                } else {
                    labels
                        .violated
                        .push(format!("{}: Cannot travel on Shabbat", name));
                }
            }
        }

        // A home run ended today; was it long enough?
        if on_shift && prev == Some(false) {
            if let Some(prev_date) = prev_date {
                let run = store.consecutive_same_kind(member.id, prev_date, false).await?;
                if run < employee.min_consecutive_home_days {
                    labels.violated.push(format!(
                        "{}: Home sequence ended after {} days (minimum {} required)",
                        name, run, employee.min_consecutive_home_days
                    ));
                }
            }
        }

        if let Some(partner_name) = &employee.preferred_shift_partner {
            if let Some(prev) = prev {
                if prev != on_shift {
                    let moved_together =
                        partner_transitioned_identically(store, roster, partner_name, prev, on_shift, date)
                            .await?;
                    if moved_together {
                        labels
                            .satisfied
                            .push(format!("{}: Traveling with preferred partner", name));
                    } else {
                        labels
                            .violated
                            .push(format!("{}: Traveling without preferred partner", name));
                    }
                }
            }
        }
    }

    Ok(labels)
}

/// Whether `partner_name` made the same `prev -> today` move on `date`.
async fn partner_transitioned_identically<S>(
    store: &S,
    roster: &[RosterMember],
    partner_name: &str,
    prev: bool,
    today: bool,
    date: NaiveDate,
) -> SchedulerResult<bool>
where
    S: EntryStore + ScheduleQueries,
{
    let Some(partner) = roster.iter().find(|m| m.name() == partner_name) else {
        return Ok(false);
    };
    let partner_today = store.on_shift_flag(partner.id, date).await?;
    let partner_prev = match date.pred_opt() {
        Some(prev_date) => store.on_shift_flag(partner.id, prev_date).await?,
        None => None,
    };
    Ok(partner_prev == Some(prev) && partner_today == Some(today))
}
