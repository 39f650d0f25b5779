//! The scheduler facade.
//!
//! [`ShiftScheduler`] owns a store, a configuration, and the in-memory roster,
//! and exposes the operations a caller needs: registering employees, seeding
//! history, generating schedules, and querying what was planned. The heavy
//! lifting lives in [`crate::services`]; this layer wires the pieces together
//! and keeps the roster and the alias map consistent with the store.

use log::{debug, info, warn};
use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use crate::api::{EmployeeSummary, GenerateRequest, ScheduleResult, SeedRow};
use crate::config::SchedulerConfig;
use crate::db::repository::FullStore;
use crate::error::{SchedulerError, SchedulerResult};
use crate::models::{DateRange, Employee, EmployeeId, RosterMember};
use crate::services;

/// High-level entry point for schedule generation.
///
/// The roster mirrors the store's employee registry and stays sorted by
/// canonical name. Every canonical name and alias maps to exactly one
/// employee; registration rejects profiles that would break that.
///
/// # Examples
///
/// ```ignore
/// let mut scheduler = ShiftScheduler::new(LocalStore::new());
/// scheduler.register_employee(Employee::new("Noa").with_manager()).await?;
/// scheduler.register_employee(Employee::new("Amit")).await?;
///
/// let request = GenerateRequest::for_days(14);
/// let results = scheduler.generate_fair_schedule(&request).await?;
/// ```
pub struct ShiftScheduler<S: FullStore> {
    store: S,
    config: SchedulerConfig,
    roster: Vec<RosterMember>,
    alias_to_id: HashMap<String, EmployeeId>,
}

impl<S: FullStore> ShiftScheduler<S> {
    /// Create a scheduler with the default configuration and an empty roster.
    pub fn new(store: S) -> Self {
        Self::with_config(store, SchedulerConfig::default())
    }

    /// Create a scheduler with an explicit configuration.
    pub fn with_config(store: S, config: SchedulerConfig) -> Self {
        Self {
            store,
            config,
            roster: Vec::new(),
            alias_to_id: HashMap::new(),
        }
    }

    /// Open a scheduler over a store that already holds registrations.
    ///
    /// Loads every registered profile and rebuilds the roster and alias map.
    /// A loaded alias that collides with an earlier employee's name or alias
    /// is dropped with a warning; the first mapping wins.
    pub async fn open(store: S, config: SchedulerConfig) -> SchedulerResult<Self> {
        let mut scheduler = Self::with_config(store, config);
        let registered = scheduler.store.load_employees().await?;
        info!("Loaded {} registered employees", registered.len());

        for (id, employee) in registered {
            for alias in employee.known_names() {
                match scheduler.alias_to_id.get(alias.as_str()) {
                    Some(&existing) if existing != id => {
                        warn!(
                            "Alias '{}' of '{}' collides with employee {}, keeping the first mapping",
                            alias, employee.name, existing
                        );
                    }
                    _ => {
                        scheduler.alias_to_id.insert(alias.clone(), id);
                    }
                }
            }
            scheduler.roster.push(RosterMember { id, employee });
        }
        scheduler.roster.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(scheduler)
    }

    /// Register an employee and return its id.
    ///
    /// Idempotent on the canonical name: registering a name already on the
    /// roster returns the existing id without touching the stored profile.
    /// A new profile whose name or alias is already claimed by another
    /// employee is rejected.
    ///
    /// # Arguments
    /// * `employee` - The profile to validate and persist
    ///
    /// # Returns
    /// * `Ok(EmployeeId)` - The assigned (or existing) id
    /// * `Err(SchedulerError::InvalidEmployee)` - Invalid profile or claimed alias
    pub async fn register_employee(&mut self, employee: Employee) -> SchedulerResult<EmployeeId> {
        employee.validate()?;

        if let Some(member) = self.roster.iter().find(|m| m.name() == employee.name) {
            debug!("Employee '{}' already registered as {}", employee.name, member.id);
            return Ok(member.id);
        }
        for alias in employee.known_names() {
            if self.alias_to_id.contains_key(alias.as_str()) {
                return Err(SchedulerError::InvalidEmployee {
                    name: employee.name.clone(),
                    reason: format!("alias '{}' already registered", alias),
                });
            }
        }

        let id = self.store.register_employee(&employee).await?;
        info!("Registered employee '{}' with id {}", employee.name, id);

        for alias in employee.known_names() {
            self.alias_to_id.insert(alias.clone(), id);
        }
        self.roster.push(RosterMember { id, employee });
        self.roster.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(id)
    }

    /// Replace the schedule history with an imported feed.
    ///
    /// See [`services::seed_from_feed`] for alias resolution and skip rules.
    pub async fn seed_from_feed(&self, rows: &[SeedRow]) -> SchedulerResult<()> {
        services::seed_from_feed(&self.store, &self.alias_to_id, rows).await
    }

    /// Generate candidate schedules and persist the best one.
    ///
    /// Returns the ranked results, best first. See
    /// [`services::generate_fair_schedule`] for window selection, the attempt
    /// loop, and rollback behavior.
    pub async fn generate_fair_schedule(
        &self,
        request: &GenerateRequest,
    ) -> SchedulerResult<Vec<ScheduleResult>> {
        services::generate_fair_schedule(&self.store, &self.roster, &self.config, request).await
    }

    /// The date range covered by recorded entries, if any exist.
    pub async fn current_schedule_window(&self) -> SchedulerResult<Option<DateRange>> {
        match self.store.schedule_date_range().await? {
            Some((start, end)) => Ok(Some(DateRange::new(start, end)?)),
            None => Ok(None),
        }
    }

    /// Names recorded on shift for a date, sorted.
    pub async fn roster_on_date(&self, date: NaiveDate) -> SchedulerResult<BTreeSet<String>> {
        let mut names = BTreeSet::new();
        for id in self.store.employees_on_shift(date).await? {
            if let Some(member) = self.roster.iter().find(|m| m.id == id) {
                names.insert(member.name().to_string());
            }
        }
        Ok(names)
    }

    /// Constraint labels for a recorded date: `(satisfied, violated)` tags.
    pub async fn constraint_tags_for_date(
        &self,
        date: NaiveDate,
    ) -> SchedulerResult<(Vec<String>, Vec<String>)> {
        let labels = services::label_day(&self.store, &self.roster, date).await?;
        Ok((labels.satisfied, labels.violated))
    }

    /// History digest for every roster member, in roster order.
    pub async fn employee_summaries(&self) -> SchedulerResult<Vec<EmployeeSummary>> {
        services::employee_summaries(&self.store, &self.roster).await
    }

    /// The active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// The roster, sorted by canonical name.
    pub fn roster(&self) -> &[RosterMember] {
        &self.roster
    }
}
