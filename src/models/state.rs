//! Ephemeral per-generation counters for one employee.

use chrono::NaiveDate;

/// Running counters maintained while a window is being planned.
///
/// The consecutive-run fields are refreshed from the store before each day is
/// selected; `total_shifts` and `shift_history` are carried forward by the
/// generator across the window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeState {
    pub consecutive_home_days: u32,
    pub consecutive_shift_days: u32,
    pub total_shifts: u32,
    pub shift_history: Vec<NaiveDate>,
}

impl EmployeeState {
    pub fn with_total_shifts(total_shifts: u32) -> Self {
        Self {
            total_shifts,
            ..Self::default()
        }
    }

    /// The employee worked `date`.
    pub fn record_shift_day(&mut self, date: NaiveDate) {
        self.consecutive_home_days = 0;
        self.consecutive_shift_days += 1;
        self.total_shifts += 1;
        self.shift_history.push(date);
    }

    /// The employee stayed home.
    pub fn record_home_day(&mut self) {
        self.consecutive_home_days += 1;
        self.consecutive_shift_days = 0;
    }
}
