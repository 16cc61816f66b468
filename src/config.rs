//! Engine configuration.
//!
//! Product-level thresholds live here as named constants so callers can
//! override them per deployment, either with the `with_*` builders or by
//! loading a JSON document. Missing JSON fields fall back to the defaults.

use chrono::{Duration, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::SchedulingResult;
use crate::models::{ShiftKind, ShiftTemplate};

/// Minimum rest between the end of one shift and the start of the next
/// day's shift, in hours.
pub const DEFAULT_MIN_REST_HOURS: f64 = 8.0;

/// Longest run of consecutive working days before a warning.
pub const DEFAULT_MAX_CONSECUTIVE_DAYS: u32 = 6;

/// Hours deducted from a full-time budget per holiday in the week.
pub const DEFAULT_HOLIDAY_DEDUCTION_HOURS: f64 = 8.0;

/// Longest date range accepted by generation and validation.
pub const DEFAULT_MAX_RANGE_DAYS: u32 = 7;

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingConfig {
    /// Clopening threshold and rest-gap rule (hours).
    pub min_rest_hours: f64,
    /// Consecutive-days warning threshold.
    pub max_consecutive_days: u32,
    /// Full-time budget deduction per holiday (hours).
    pub holiday_deduction_hours: f64,
    /// High-traffic days enriched in Phase 2.
    pub priority_days: Vec<Weekday>,
    /// Shift patterns the generator places.
    pub shift_templates: Vec<ShiftTemplate>,
    /// Longest accepted range (days).
    pub max_range_days: u32,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            min_rest_hours: DEFAULT_MIN_REST_HOURS,
            max_consecutive_days: DEFAULT_MAX_CONSECUTIVE_DAYS,
            holiday_deduction_hours: DEFAULT_HOLIDAY_DEDUCTION_HOURS,
            priority_days: vec![Weekday::Fri, Weekday::Sat, Weekday::Sun],
            shift_templates: default_templates(),
            max_range_days: DEFAULT_MAX_RANGE_DAYS,
        }
    }
}

/// Opener 08:00-16:00, mid 11:00-19:00, closer 14:00-22:00.
fn default_templates() -> Vec<ShiftTemplate> {
    [
        (ShiftKind::Opener, 8, 16),
        (ShiftKind::Mid, 11, 19),
        (ShiftKind::Closer, 14, 22),
    ]
    .into_iter()
    .filter_map(|(kind, start, end)| {
        Some(ShiftTemplate::new(
            kind,
            NaiveTime::from_hms_opt(start, 0, 0)?,
            NaiveTime::from_hms_opt(end, 0, 0)?,
        ))
    })
    .collect()
}

impl SchedulingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON configuration document.
    pub fn from_json(json: &str) -> SchedulingResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_min_rest_hours(mut self, hours: f64) -> Self {
        self.min_rest_hours = hours;
        self
    }

    pub fn with_max_consecutive_days(mut self, days: u32) -> Self {
        self.max_consecutive_days = days;
        self
    }

    pub fn with_holiday_deduction_hours(mut self, hours: f64) -> Self {
        self.holiday_deduction_hours = hours;
        self
    }

    pub fn with_priority_days(mut self, days: Vec<Weekday>) -> Self {
        self.priority_days = days;
        self
    }

    pub fn with_shift_templates(mut self, templates: Vec<ShiftTemplate>) -> Self {
        self.shift_templates = templates;
        self
    }

    pub fn with_max_range_days(mut self, days: u32) -> Self {
        self.max_range_days = days;
        self
    }

    /// Rest gap as a duration.
    pub fn min_rest(&self) -> Duration {
        crate::models::hours_to_duration(self.min_rest_hours)
    }

    /// Holiday deduction as a duration.
    pub fn holiday_deduction(&self) -> Duration {
        crate::models::hours_to_duration(self.holiday_deduction_hours)
    }

    /// Template of a given kind, if configured.
    pub fn template(&self, kind: ShiftKind) -> Option<&ShiftTemplate> {
        self.shift_templates.iter().find(|t| t.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = SchedulingConfig::default();
        assert_eq!(c.min_rest(), Duration::hours(8));
        assert_eq!(c.max_consecutive_days, DEFAULT_MAX_CONSECUTIVE_DAYS);
        assert_eq!(c.priority_days.len(), 3);
        assert_eq!(c.shift_templates.len(), 3);
        assert!(c.template(ShiftKind::Mid).is_some());
    }

    #[test]
    fn test_builder_overrides() {
        let c = SchedulingConfig::new()
            .with_min_rest_hours(10.0)
            .with_max_consecutive_days(5)
            .with_priority_days(vec![Weekday::Sat]);
        assert_eq!(c.min_rest(), Duration::hours(10));
        assert_eq!(c.max_consecutive_days, 5);
        assert_eq!(c.priority_days, vec![Weekday::Sat]);
    }

    #[test]
    fn test_from_json_partial() {
        let json = r#"{"min_rest_hours": 11, "priority_days": ["Sat", "Sun"]}"#;
        let c = SchedulingConfig::from_json(json).unwrap();
        assert_eq!(c.min_rest(), Duration::hours(11));
        assert_eq!(c.priority_days, vec![Weekday::Sat, Weekday::Sun]);
        assert_eq!(c.max_range_days, DEFAULT_MAX_RANGE_DAYS);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(SchedulingConfig::from_json("{not json").is_err());
    }
}
