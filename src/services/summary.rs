//! Per-employee history digests built from the schedule ledger.

use crate::api::{EmployeeSummary, Streak, StreakKind};
use crate::db::repository::FullStore;
use crate::error::SchedulerResult;
use crate::models::{DateRange, RosterMember};

/// Summarize the recorded history of every roster member.
///
/// Each summary carries day totals, the runs of consecutive same-kind days
/// compressed into date ranges, and the streak ending at the employee's most
/// recent entry. Employees with no recorded days get zeroed totals and no
/// streak. Output follows roster order.
pub async fn employee_summaries<S: FullStore>(
    store: &S,
    roster: &[RosterMember],
) -> SchedulerResult<Vec<EmployeeSummary>> {
    let mut summaries = Vec::with_capacity(roster.len());
    for member in roster {
        let entries = store.entries_for_employee(member.id).await?;

        let mut shift_dates = Vec::new();
        let mut home_dates = Vec::new();
        for entry in &entries {
            if entry.on_shift {
                shift_dates.push(entry.date);
            } else {
                home_dates.push(entry.date);
            }
        }

        let current_streak = match entries.last() {
            Some(last) => {
                let days = store
                    .consecutive_same_kind(member.id, last.date, last.on_shift)
                    .await?;
                let kind = if last.on_shift {
                    StreakKind::OnShift
                } else {
                    StreakKind::AtHome
                };
                Some(Streak { kind, days })
            }
            None => None,
        };

        summaries.push(EmployeeSummary {
            name: member.name().to_string(),
            total_shift_days: shift_dates.len() as u32,
            total_home_days: home_dates.len() as u32,
            current_streak,
            shift_ranges: DateRange::from_sorted_dates(&shift_dates),
            home_ranges: DateRange::from_sorted_dates(&home_dates),
        });
    }
    Ok(summaries)
}
