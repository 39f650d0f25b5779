//! Employee profiles and the strongly-typed employee identifier.

use anyhow::Context;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config;
use crate::error::{SchedulerError, SchedulerResult};
use crate::models::DateRange;

/// Strongly-typed identifier assigned by the store at registration.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EmployeeId(pub i64);

impl EmployeeId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EmployeeId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<EmployeeId> for i64 {
    fn from(id: EmployeeId) -> Self {
        id.0
    }
}

/// Static scheduling profile for one employee.
///
/// The profile is immutable during generation; running counters live in
/// [`crate::models::EmployeeState`]. Profiles serialize to JSON for the
/// store's `serialized_profile` column and for roster files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Canonical name, unique across the roster.
    pub name: String,
    /// Alternate spellings accepted by the seed importer.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// First date the employee may be scheduled. Before it the employee is
    /// inert: never scheduled, never counted.
    pub available_from: NaiveDate,
    #[serde(default)]
    pub is_manager: bool,
    #[serde(default)]
    pub is_sabbath_observer: bool,
    /// A home stay, once begun, must last at least this many days.
    #[serde(default = "default_min_home_days")]
    pub min_consecutive_home_days: u32,
    /// Hard cap on consecutive on-shift days.
    #[serde(default = "default_max_shift_days")]
    pub max_consecutive_shift_days: u32,
    /// Canonical name of the colleague this employee wants to share shifts
    /// with. The preference is directional.
    #[serde(default)]
    pub preferred_shift_partner: Option<String>,
    /// Dates the employee must spend at home.
    #[serde(default)]
    pub mandatory_home_ranges: Vec<DateRange>,
    /// Dates the employee would rather spend at home.
    #[serde(default)]
    pub wish_home_ranges: Vec<DateRange>,
}

fn default_min_home_days() -> u32 {
    config::DEFAULT_MIN_HOME_DAYS
}

fn default_max_shift_days() -> u32 {
    config::DEFAULT_MAX_SHIFT_DAYS
}

impl Employee {
    /// New profile with default constraints, available from today.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            available_from: Local::now().date_naive(),
            is_manager: false,
            is_sabbath_observer: false,
            min_consecutive_home_days: default_min_home_days(),
            max_consecutive_shift_days: default_max_shift_days(),
            preferred_shift_partner: None,
            mandatory_home_ranges: Vec::new(),
            wish_home_ranges: Vec::new(),
        }
    }

    pub fn with_available_from(mut self, date: NaiveDate) -> Self {
        self.available_from = date;
        self
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_manager(mut self) -> Self {
        self.is_manager = true;
        self
    }

    pub fn with_sabbath_observance(mut self) -> Self {
        self.is_sabbath_observer = true;
        self
    }

    pub fn with_min_home_days(mut self, days: u32) -> Self {
        self.min_consecutive_home_days = days;
        self
    }

    pub fn with_max_shift_days(mut self, days: u32) -> Self {
        self.max_consecutive_shift_days = days;
        self
    }

    pub fn with_partner(mut self, name: impl Into<String>) -> Self {
        self.preferred_shift_partner = Some(name.into());
        self
    }

    pub fn with_mandatory_home(mut self, range: DateRange) -> Self {
        self.mandatory_home_ranges.push(range);
        self
    }

    pub fn with_wish_home(mut self, range: DateRange) -> Self {
        self.wish_home_ranges.push(range);
        self
    }

    /// Whether the employee may be scheduled on `date` at all.
    ///
    /// Mandatory-home windows and sabbath observance are not folded in here;
    /// they are separate feasibility rules, and the relaxed selection path
    /// skips them.
    pub fn is_available_on(&self, date: NaiveDate) -> bool {
        self.available_from <= date
    }

    pub fn must_be_home_on(&self, date: NaiveDate) -> bool {
        self.mandatory_home_ranges.iter().any(|r| r.contains(date))
    }

    pub fn prefers_home_on(&self, date: NaiveDate) -> bool {
        self.wish_home_ranges.iter().any(|r| r.contains(date))
    }

    /// The canonical name followed by every alias.
    pub fn known_names(&self) -> impl Iterator<Item = &String> {
        std::iter::once(&self.name).chain(self.aliases.iter())
    }

    /// Construction-time checks not already enforced by the type system.
    pub fn validate(&self) -> SchedulerResult<()> {
        if self.name.trim().is_empty() {
            return Err(SchedulerError::InvalidEmployee {
                name: self.name.clone(),
                reason: "name must not be empty".into(),
            });
        }
        if self.aliases.iter().any(|a| a.trim().is_empty()) {
            return Err(SchedulerError::InvalidEmployee {
                name: self.name.clone(),
                reason: "aliases must not be empty".into(),
            });
        }
        if self.preferred_shift_partner.as_deref() == Some(self.name.as_str()) {
            return Err(SchedulerError::InvalidEmployee {
                name: self.name.clone(),
                reason: "preferred partner must be another employee".into(),
            });
        }
        // Deserialized ranges bypass DateRange::new, so recheck them here
        for range in self
            .mandatory_home_ranges
            .iter()
            .chain(self.wish_home_ranges.iter())
        {
            if range.end < range.start {
                return Err(SchedulerError::InvalidEmployee {
                    name: self.name.clone(),
                    reason: format!("ill-formed date range {} to {}", range.start, range.end),
                });
            }
        }
        Ok(())
    }
}

/// A registered employee: the persisted id paired with its profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterMember {
    pub id: EmployeeId,
    pub employee: Employee,
}

impl RosterMember {
    pub fn name(&self) -> &str {
        &self.employee.name
    }
}

/// Parse a roster of employee profiles from a JSON array.
///
/// Each element deserializes into an [`Employee`]; omitted fields take the
/// profile defaults. Every parsed profile is validated before the roster is
/// returned.
pub fn roster_from_json(json: &str) -> anyhow::Result<Vec<Employee>> {
    let roster: Vec<Employee> =
        serde_json::from_str(json).context("Failed to deserialize employee roster JSON")?;
    for employee in &roster {
        employee
            .validate()
            .with_context(|| format!("Invalid employee profile '{}'", employee.name))?;
    }
    Ok(roster)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn defaults_follow_engine_configuration() {
        let employee = Employee::new("Noa");
        assert_eq!(employee.min_consecutive_home_days, 4);
        assert_eq!(employee.max_consecutive_shift_days, 14);
        assert!(!employee.is_manager);
        assert!(employee.aliases.is_empty());
    }

    #[test]
    fn availability_is_a_lower_bound() {
        let employee = Employee::new("Noa").with_available_from(date(2025, 1, 15));
        assert!(!employee.is_available_on(date(2025, 1, 14)));
        assert!(employee.is_available_on(date(2025, 1, 15)));
        assert!(employee.is_available_on(date(2025, 2, 1)));
    }

    #[test]
    fn home_window_helpers() {
        let employee = Employee::new("Noa")
            .with_available_from(date(2025, 1, 1))
            .with_mandatory_home(DateRange::new(date(2025, 1, 10), date(2025, 1, 12)).unwrap())
            .with_wish_home(DateRange::single(date(2025, 1, 20)));
        assert!(employee.must_be_home_on(date(2025, 1, 11)));
        assert!(!employee.must_be_home_on(date(2025, 1, 13)));
        assert!(employee.prefers_home_on(date(2025, 1, 20)));
        assert!(!employee.prefers_home_on(date(2025, 1, 21)));
    }

    #[test]
    fn self_partnering_is_invalid() {
        let employee = Employee::new("Noa").with_partner("Noa");
        assert!(matches!(
            employee.validate(),
            Err(SchedulerError::InvalidEmployee { .. })
        ));
    }

    #[test]
    fn profile_round_trips_through_json() {
        let employee = Employee::new("Noa")
            .with_available_from(date(2025, 1, 1))
            .with_aliases(["noa", "n."])
            .with_manager()
            .with_partner("Amit");
        let json = serde_json::to_string(&employee).unwrap();
        let back: Employee = serde_json::from_str(&json).unwrap();
        assert_eq!(back, employee);
    }

    #[test]
    fn roster_json_applies_defaults() {
        let json = r#"[
            { "name": "Noa", "available_from": "2025-01-01", "is_manager": true },
            { "name": "Amit", "available_from": "2025-01-15",
              "aliases": ["ami"],
              "min_consecutive_home_days": 7,
              "wish_home_ranges": [ { "start": "2025-02-01", "end": "2025-02-03" } ] }
        ]"#;
        let roster = roster_from_json(json).unwrap();
        assert_eq!(roster.len(), 2);
        assert!(roster[0].is_manager);
        assert_eq!(roster[0].max_consecutive_shift_days, 14);
        assert_eq!(roster[1].min_consecutive_home_days, 7);
        assert!(roster[1].prefers_home_on(date(2025, 2, 2)));
    }

    #[test]
    fn roster_json_rejects_invalid_profiles() {
        let json = r#"[ { "name": "  ", "available_from": "2025-01-01" } ]"#;
        assert!(roster_from_json(json).is_err());

        // Inverted range smuggled past the serde layer
        let json = r#"[
            { "name": "Noa", "available_from": "2025-01-01",
              "mandatory_home_ranges": [ { "start": "2025-02-10", "end": "2025-02-01" } ] }
        ]"#;
        assert!(roster_from_json(json).is_err());
    }
}
