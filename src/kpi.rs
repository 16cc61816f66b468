//! Roster quality metrics (KPIs).
//!
//! Computes staffing indicators for one location and week from its shifts
//! and resolved constraints.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total hours | Sum of shift durations |
//! | Hours by employee | Per-employee sum of shift durations |
//! | Shifts by date | Headcount per calendar date |
//! | Budget utilization | Total hours / location weekly budget |
//! | Coverage rate | Fraction of (date, role) slots at or above minimum |
//!
//! Only shifts at the constraints' location that start inside the week are
//! counted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::constraints::WeekConstraints;
use crate::models::{duration_to_hours, ScheduleWeek, Shift};

/// Roster performance indicators.
///
/// All time values are in hours.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterKpi {
    /// Sum of shift hours.
    pub total_hours: f64,
    /// Hours per employee.
    pub hours_by_employee: HashMap<String, f64>,
    /// Shift count per date.
    pub shifts_by_date: BTreeMap<NaiveDate, usize>,
    /// Total hours over the location weekly budget, when one is set.
    pub budget_utilization: Option<f64>,
    /// Fraction of (date, role) slots meeting their minimum (0.0..=1.0).
    pub coverage_rate: f64,
}

impl RosterKpi {
    /// Computes KPIs from a week's shifts and its constraints.
    pub fn calculate(week: &ScheduleWeek, shifts: &[Shift], constraints: &WeekConstraints) -> Self {
        let scoped: Vec<&Shift> = shifts
            .iter()
            .filter(|s| s.location_id == constraints.location_id && week.contains(s.date()))
            .collect();

        let mut hours_by_employee: HashMap<String, f64> = HashMap::new();
        let mut shifts_by_date: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        let mut total_hours = 0.0;
        for shift in &scoped {
            let hours = duration_to_hours(shift.duration());
            total_hours += hours;
            *hours_by_employee.entry(shift.employee_id.clone()).or_default() += hours;
            *shifts_by_date.entry(shift.date()).or_default() += 1;
        }

        let budget_utilization = constraints
            .weekly_hours_budget
            .filter(|b| *b > 0.0)
            .map(|b| total_hours / b);

        let mut slots = 0usize;
        let mut met = 0usize;
        for (date, day) in &constraints.days {
            for slot in day.iter().filter(|s| s.min > 0) {
                slots += 1;
                let count = scoped
                    .iter()
                    .filter(|s| s.date() == *date && s.role == slot.role)
                    .count();
                if count >= slot.min as usize {
                    met += 1;
                }
            }
        }
        let coverage_rate = if slots == 0 {
            1.0
        } else {
            met as f64 / slots as f64
        };

        Self {
            total_hours,
            hours_by_employee,
            shifts_by_date,
            budget_utilization,
            coverage_rate,
        }
    }

    /// Whether coverage and budget use meet the given thresholds.
    pub fn meets_thresholds(&self, min_coverage: f64, max_budget_utilization: f64) -> bool {
        self.coverage_rate >= min_coverage
            && self
                .budget_utilization
                .is_none_or(|u| u <= max_budget_utilization)
    }
}
