//! Optimizer configuration.
//!
//! All settings have defaults matching the reference grid: 10-minute slots
//! over a 07:00–24:00 window and no solver time limit.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::ClockTime;

/// Default slot width in minutes.
pub const DEFAULT_GRANULARITY_MINUTES: u16 = 10;

/// Time grid discretization settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Slot width in minutes.
    pub granularity_minutes: u16,
    /// First slot instant (inclusive).
    pub window_start: ClockTime,
    /// End of the operating window (exclusive).
    pub window_end: ClockTime,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            granularity_minutes: DEFAULT_GRANULARITY_MINUTES,
            window_start: ClockTime::new(7, 0).unwrap_or(ClockTime::MIDNIGHT),
            window_end: ClockTime::END_OF_DAY,
        }
    }
}

impl GridConfig {
    /// Sets the slot width.
    pub fn with_granularity(mut self, minutes: u16) -> Self {
        self.granularity_minutes = minutes;
        self
    }

    /// Sets the operating window.
    pub fn with_window(mut self, start: ClockTime, end: ClockTime) -> Self {
        self.window_start = start;
        self.window_end = end;
        self
    }

    /// Slot instants per day: `start, start + g, ...` strictly below `end`.
    ///
    /// Empty for an invalid configuration.
    pub fn instants(&self) -> Vec<ClockTime> {
        if self.granularity_minutes == 0 || self.window_start >= self.window_end {
            return Vec::new();
        }
        (self.window_start.minutes()..self.window_end.minutes())
            .step_by(usize::from(self.granularity_minutes))
            .filter_map(ClockTime::from_minutes)
            .collect()
    }
}

/// Solver adapter settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Wall-clock limit for one solve. `None` = wait for the backend.
    pub time_limit: Option<Duration>,
}

impl SolverConfig {
    /// Bounds each solve by `limit`.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

/// Complete optimizer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    pub grid: GridConfig,
    pub solver: SolverConfig,
}

impl OptimizerConfig {
    /// Parses a JSON configuration; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_grid(mut self, grid: GridConfig) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }
}
