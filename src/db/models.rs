//! Row types persisted by the schedule store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::EmployeeId;

/// One `(employee, date)` decision in the schedule ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    pub on_shift: bool,
}

/// A registered employee row: assigned id, unique name, and the profile
/// serialized as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub id: EmployeeId,
    pub name: String,
    pub serialized_profile: String,
}
