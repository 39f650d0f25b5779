//! In-memory local store implementation.
//!
//! This module provides a local implementation of all store traits suitable
//! for unit testing and single-process scheduling runs. All data is stored in
//! memory using BTreeMap and HashMap structures, providing fast,
//! deterministic, and isolated execution.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use crate::db::models::{EmployeeRecord, ScheduleEntry};
use crate::db::repository::*;
use crate::models::{Employee, EmployeeId};

/// In-memory local store.
///
/// Entries are held as one map per calendar day keyed by employee id, so the
/// ordered reads the store traits promise fall out of BTreeMap iteration.
///
/// # Example
/// ```ignore
/// use shift_scheduler::db::repositories::LocalStore;
///
/// #[tokio::test]
/// async fn test_entry_storage() {
///     let store = LocalStore::new();
///
///     let id = store.register_employee(&employee).await.unwrap();
///     store.upsert_entry(id, date, true).await.unwrap();
///
///     assert_eq!(store.entry_count(), 1);
/// }
/// ```
#[derive(Clone)]
pub struct LocalStore {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    employees: BTreeMap<EmployeeId, EmployeeRecord>,
    ids_by_name: HashMap<String, EmployeeId>,

    // One slice per calendar day: employee id -> on_shift flag
    days: BTreeMap<NaiveDate, BTreeMap<EmployeeId, bool>>,

    // ID counter
    next_employee_id: i64,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            employees: BTreeMap::new(),
            ids_by_name: HashMap::new(),
            days: BTreeMap::new(),
            next_employee_id: 1,
        }
    }
}

impl LocalStore {
    /// Create a new empty local store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Get the number of registered employees.
    pub fn employee_count(&self) -> usize {
        self.data.read().unwrap().employees.len()
    }

    /// Get the number of schedule entries stored.
    pub fn entry_count(&self) -> usize {
        let data = self.data.read().unwrap();
        data.days.values().map(|slice| slice.len()).sum()
    }

    /// Check if an entry exists for the slot.
    pub fn has_entry(&self, employee_id: EmployeeId, date: NaiveDate) -> bool {
        let data = self.data.read().unwrap();
        data.days
            .get(&date)
            .is_some_and(|slice| slice.contains_key(&employee_id))
    }
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

// ==================== Employee Store ====================

#[async_trait]
impl EmployeeStore for LocalStore {
    async fn register_employee(&self, employee: &Employee) -> StoreResult<EmployeeId> {
        let mut data = self.data.write().unwrap();

        if let Some(&id) = data.ids_by_name.get(&employee.name) {
            return Ok(id);
        }

        let serialized_profile = serde_json::to_string(employee)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let id = EmployeeId::new(data.next_employee_id);
        data.next_employee_id += 1;

        data.ids_by_name.insert(employee.name.clone(), id);
        data.employees.insert(
            id,
            EmployeeRecord {
                id,
                name: employee.name.clone(),
                serialized_profile,
            },
        );

        Ok(id)
    }

    async fn load_employees(&self) -> StoreResult<Vec<(EmployeeId, Employee)>> {
        let data = self.data.read().unwrap();

        let mut employees = Vec::with_capacity(data.employees.len());
        for (id, record) in &data.employees {
            let profile: Employee = serde_json::from_str(&record.serialized_profile)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            employees.push((*id, profile));
        }

        Ok(employees)
    }

    async fn employee_id(&self, name: &str) -> StoreResult<Option<EmployeeId>> {
        let data = self.data.read().unwrap();
        Ok(data.ids_by_name.get(name).copied())
    }
}

// ==================== Entry Store ====================

#[async_trait]
impl EntryStore for LocalStore {
    async fn upsert_entry(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
        on_shift: bool,
    ) -> StoreResult<()> {
        let mut data = self.data.write().unwrap();

        if !data.employees.contains_key(&employee_id) {
            return Err(StoreError::UnknownEmployee(format!(
                "No employee registered with id {}",
                employee_id
            )));
        }

        let slice = data.days.entry(date).or_default();
        if slice.contains_key(&employee_id) {
            return Err(StoreError::DuplicateEntry { employee_id, date });
        }
        slice.insert(employee_id, on_shift);

        Ok(())
    }

    async fn on_shift_flag(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
    ) -> StoreResult<Option<bool>> {
        let data = self.data.read().unwrap();
        Ok(data
            .days
            .get(&date)
            .and_then(|slice| slice.get(&employee_id))
            .copied())
    }

    async fn employees_on_shift(&self, date: NaiveDate) -> StoreResult<Vec<EmployeeId>> {
        let data = self.data.read().unwrap();

        let Some(slice) = data.days.get(&date) else {
            return Ok(Vec::new());
        };

        Ok(slice
            .iter()
            .filter(|(_, &on_shift)| on_shift)
            .map(|(&id, _)| id)
            .collect())
    }

    async fn entries_for_employee(
        &self,
        employee_id: EmployeeId,
    ) -> StoreResult<Vec<ScheduleEntry>> {
        let data = self.data.read().unwrap();

        Ok(data
            .days
            .iter()
            .filter_map(|(&date, slice)| {
                slice.get(&employee_id).map(|&on_shift| ScheduleEntry {
                    employee_id,
                    date,
                    on_shift,
                })
            })
            .collect())
    }

    async fn entries_in_window(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> StoreResult<Vec<ScheduleEntry>> {
        let data = self.data.read().unwrap();

        let mut entries = Vec::new();
        for (&date, slice) in data.days.range(from..=to) {
            for (&employee_id, &on_shift) in slice {
                entries.push(ScheduleEntry {
                    employee_id,
                    date,
                    on_shift,
                });
            }
        }

        Ok(entries)
    }

    async fn clear_window(&self, from: NaiveDate, to: NaiveDate) -> StoreResult<()> {
        let mut data = self.data.write().unwrap();
        data.days.retain(|&date, _| date < from || date > to);
        Ok(())
    }

    async fn clear_all_entries(&self) -> StoreResult<()> {
        let mut data = self.data.write().unwrap();
        data.days.clear();
        Ok(())
    }
}

// ==================== Schedule Queries ====================

#[async_trait]
impl ScheduleQueries for LocalStore {
    async fn consecutive_same_kind(
        &self,
        employee_id: EmployeeId,
        reference_date: NaiveDate,
        on_shift: bool,
    ) -> StoreResult<u32> {
        let data = self.data.read().unwrap();

        let mut run = 0u32;
        let mut cursor = Some(reference_date);
        while let Some(date) = cursor {
            match data.days.get(&date).and_then(|slice| slice.get(&employee_id)) {
                Some(&kind) if kind == on_shift => {
                    run += 1;
                    cursor = date.pred_opt();
                }
                _ => break,
            }
        }

        Ok(run)
    }

    async fn total_days(
        &self,
        employee_id: EmployeeId,
        on_shift: bool,
        up_to: NaiveDate,
    ) -> StoreResult<u32> {
        let data = self.data.read().unwrap();

        let count = data
            .days
            .range(..=up_to)
            .filter_map(|(_, slice)| slice.get(&employee_id))
            .filter(|&&kind| kind == on_shift)
            .count();

        Ok(count as u32)
    }

    async fn schedule_date_range(&self) -> StoreResult<Option<(NaiveDate, NaiveDate)>> {
        let data = self.data.read().unwrap();

        let min = data.days.keys().next().copied();
        let max = data.days.keys().next_back().copied();
        Ok(min.zip(max))
    }
}
