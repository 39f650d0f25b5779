//! Engine configuration file support.
//!
//! This module provides the tunable knobs of the scheduling engine and
//! utilities for reading them from TOML configuration files. Every field has
//! a default, so a partial file (or no file at all) yields a working
//! configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{SchedulerError, SchedulerResult};

pub const DEFAULT_REQUIRED_SHIFT_SIZE: usize = 8;
pub const DEFAULT_MIN_HOME_DAYS: u32 = 4;
pub const DEFAULT_MAX_SHIFT_DAYS: u32 = 14;
pub const DEFAULT_SELECTOR_DEPTH_LIMIT: u32 = 100;
pub const DEFAULT_ATTEMPTS_PER_SCHEDULE: u32 = 3;

/// Engine configuration.
///
/// Per-employee limits (rest minimum, shift cap) live on the profiles
/// themselves, defaulting to [`DEFAULT_MIN_HOME_DAYS`] and
/// [`DEFAULT_MAX_SHIFT_DAYS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Number of employees every shift must have.
    #[serde(default = "default_required_shift_size")]
    pub required_shift_size: usize,
    /// Backtracking recursion bound for the day selector.
    #[serde(default = "default_selector_depth_limit")]
    pub selector_depth_limit: u32,
    /// Generation attempts made per requested schedule.
    #[serde(default = "default_attempts_per_schedule")]
    pub attempts_per_schedule: u32,
    #[serde(default)]
    pub weights: ScoreWeights,
}

/// Weights of the scoring conditions, all non-negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Penalty multiplier for long consecutive shift runs.
    #[serde(default = "default_consecutive_shift_weight")]
    pub consecutive_shift: u32,
    /// Penalty multiplier for being above the fleet's average shift count.
    #[serde(default = "default_total_shifts_weight")]
    pub total_shifts: u32,
    /// Bonus for employees who declared a preferred partner.
    #[serde(default = "default_partner_preference_weight")]
    pub partner_preference: u32,
    /// Reserved weight; no score term consumes it.
    #[serde(default = "default_home_days_balance_weight")]
    pub home_days_balance: u32,
    /// Applied when an employee is scheduled on a wished home day.
    #[serde(default = "default_wish_day_at_home_weight")]
    pub wish_day_at_home: u32,
}

fn default_required_shift_size() -> usize {
    DEFAULT_REQUIRED_SHIFT_SIZE
}

fn default_selector_depth_limit() -> u32 {
    DEFAULT_SELECTOR_DEPTH_LIMIT
}

fn default_attempts_per_schedule() -> u32 {
    DEFAULT_ATTEMPTS_PER_SCHEDULE
}

fn default_consecutive_shift_weight() -> u32 {
    7
}

fn default_total_shifts_weight() -> u32 {
    8
}

fn default_partner_preference_weight() -> u32 {
    6
}

fn default_home_days_balance_weight() -> u32 {
    5
}

fn default_wish_day_at_home_weight() -> u32 {
    4
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            required_shift_size: default_required_shift_size(),
            selector_depth_limit: default_selector_depth_limit(),
            attempts_per_schedule: default_attempts_per_schedule(),
            weights: ScoreWeights::default(),
        }
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            consecutive_shift: default_consecutive_shift_weight(),
            total_shifts: default_total_shifts_weight(),
            partner_preference: default_partner_preference_weight(),
            home_days_balance: default_home_days_balance_weight(),
            wish_day_at_home: default_wish_day_at_home_weight(),
        }
    }
}

impl SchedulerConfig {
    /// Parse a configuration from a TOML string; missing fields take their
    /// defaults.
    pub fn from_toml_str(content: &str) -> SchedulerResult<Self> {
        toml::from_str(content).map_err(|e| {
            SchedulerError::Configuration(format!("Failed to parse configuration: {}", e))
        })
    }

    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(SchedulerConfig)` if the file was read and parsed
    /// * `Err(SchedulerError::Configuration)` otherwise
    pub fn from_file<P: AsRef<Path>>(path: P) -> SchedulerResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            SchedulerError::Configuration(format!("Failed to read config file: {}", e))
        })?;
        Self::from_toml_str(&content)
    }
}
