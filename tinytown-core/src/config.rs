//! Configuration for the tinytown engine.
//!
//! Maps directly to the `[sim]`-side sections of `tinytown.toml`. Defaults
//! reproduce the canonical scenario, so an empty config is a valid config.

use serde::{Deserialize, Serialize};

/// Engine configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimConfig {
    /// Survival-gate thresholds.
    #[serde(default)]
    pub thresholds: RuleThresholds,
    /// Per-hour passive decay.
    #[serde(default)]
    pub metabolism: MetabolismConfig,
    /// Day length and reporting cadence.
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

impl SimConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`](crate::CoreError::Config) if the TOML
    /// is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::CoreError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

/// Hard floors that force survival actions, checked in priority order:
/// food, then rest, then money.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleThresholds {
    /// Below this, `eating` at the Food Store is forced.
    #[serde(default = "default_15")]
    pub food: i32,
    /// Below this, `sleep` at Home is forced.
    #[serde(default = "default_20")]
    pub rest: i32,
    /// Below this, `parttime` at the Food Store is forced.
    #[serde(default = "default_5")]
    pub money: i32,
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            food: 15,
            rest: 20,
            money: 5,
        }
    }
}

/// Fixed per-hour passive decay applied before decisions are made.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetabolismConfig {
    /// Food lost per hour.
    #[serde(default = "default_5")]
    pub food_decay: i32,
    /// Rest lost per hour.
    #[serde(default = "default_5")]
    pub rest_decay: i32,
}

impl Default for MetabolismConfig {
    fn default() -> Self {
        Self {
            food_decay: 5,
            rest_decay: 5,
        }
    }
}

/// Day length and statistics cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Hours simulated per day.
    #[serde(default = "default_24")]
    pub hours_per_day: u32,
    /// Interim statistics every N hours (emitted on hour % N == N - 1).
    #[serde(default = "default_6")]
    pub report_interval: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            hours_per_day: 24,
            report_interval: 6,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_5() -> i32 {
    5
}
fn default_15() -> i32 {
    15
}
fn default_20() -> i32 {
    20
}
fn default_6() -> u32 {
    6
}
fn default_24() -> u32 {
    24
}
