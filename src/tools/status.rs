//! BAC Planner Status Tool
//!
//! Provides runtime status information about the planner service.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::config::PlannerConfig;

/// Usage instructions for AI assistants
pub const PLANNER_INSTRUCTIONS: &str = r#"
# BAC Planner Instructions

**Educational only - not medical advice.** The numbers come from a simple
model and must never be used to decide how much anyone should drink.

## Overview

The planner estimates how much pure ethanol would be needed to reach a
target blood alcohol concentration (BAC) and hold it for a number of hours:

1. **Total body water (TBW)** from the Watson equations (sex, weight,
   height, and for men, age).
2. **Loading dose** = target BAC (g/dL) x TBW in deciliters.
3. **Maintenance dose** = elimination rate beta (g/dL/h, default 0.015)
   x TBW in deciliters, per hour.
4. **Total** = loading + maintenance x duration.

Masses are converted to milliliters of ethanol (density 0.789 g/mL) and
to volumes of beer (5%), wine (12%), fortified wine (18%) and spirits (40%).

## Tools

- `calculate_plan` - full plan. Set `format: "markdown"` for readable text.
- `parse_target_bac` - check how a BAC string is interpreted.
- `estimate_tbw` - body water only.
- `list_beverages` - the reference beverage table.
- `bac_status` - service status.

## Target BAC Formats

| Input        | Interpreted as |
|--------------|----------------|
| `0.05%`      | 0.05 g/dL      |
| `0.08`       | 0.08 g/dL      |
| `0.5‰`       | 0.05 g/dL      |
| `0.5permille`| 0.05 g/dL      |
| `0.5/1000`   | 0.05 g/dL      |

A bare number is taken as g/dL (percent). Permille values are scaled by 0.1.

## Input Limits

Weight 30-200 kg, height 120-220 cm, age 15-100 years, duration 0.5-24 h.
Sex must be "male" or "female".
"#;

/// Planner status information
#[derive(Debug, Clone, Serialize)]
pub struct PlannerStatus {
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,
    pub started_at: String,
    pub uptime_seconds: u64,
    pub calculations_performed: u64,
    pub default_beta: f64,
    pub enforce_bounds: bool,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for the planner service
pub struct StatusTracker {
    start_time: Instant,
    started_at: String,
    calculations: u64,
    config: PlannerConfig,
}

impl StatusTracker {
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            start_time: Instant::now(),
            started_at: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            calculations: 0,
            config,
        }
    }

    /// Count one completed plan calculation
    pub fn record_calculation(&mut self) {
        self.calculations += 1;
    }

    pub fn calculations(&self) -> u64 {
        self.calculations
    }

    /// Get the current status
    pub fn get_status(&self) -> PlannerStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        PlannerStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            started_at: self.started_at.clone(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            calculations_performed: self.calculations,
            default_beta: self.config.default_beta,
            enforce_bounds: self.config.enforce_bounds,
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_calculation() {
        let mut tracker = StatusTracker::new(PlannerConfig::default());
        assert_eq!(tracker.calculations(), 0);
        tracker.record_calculation();
        tracker.record_calculation();
        assert_eq!(tracker.get_status().calculations_performed, 2);
    }

    #[test]
    fn test_status_reports_config() {
        let config = PlannerConfig { default_beta: 0.02, enforce_bounds: false };
        let status = StatusTracker::new(config).get_status();
        assert_eq!(status.default_beta, 0.02);
        assert!(!status.enforce_bounds);
        assert_eq!(status.process_id, std::process::id());
    }
}
