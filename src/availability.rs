//! Employee availability.
//!
//! Derives, per employee and day, whether the employee may be scheduled and
//! inside which time window, plus how many hours of weekly budget remain.
//!
//! An employee is unavailable on a date when:
//! - an approved time-off request covers the date,
//! - the employee is hidden from scheduling, or
//! - a part-time employee already works their allowed number of distinct
//!   days this week and the date is not one of them.
//!
//! The availability window enforces the rest gap: a new shift must start at
//! least `min_rest` after the previous day's last shift ends and end at least
//! `min_rest` before the next day's first shift starts.

use chrono::{Duration, NaiveDate, NaiveTime};
use std::collections::HashMap;

use crate::config::SchedulingConfig;
use crate::generator::AssignmentLedger;
use crate::models::{Employee, Holiday, ScheduleWeek, Shift, TimeOffRequest, TimeWindow};

/// Availability rules for one schedule week.
#[derive(Debug, Clone)]
pub struct AvailabilityModel {
    week: ScheduleWeek,
    time_off: HashMap<String, Vec<TimeOffRequest>>,
    holidays: Vec<Holiday>,
    min_rest: Duration,
    holiday_deduction: Duration,
}

impl AvailabilityModel {
    /// Builds the model for a week from approved time off and holidays.
    pub fn new(
        config: &SchedulingConfig,
        week: &ScheduleWeek,
        time_off: &[TimeOffRequest],
        holidays: &[Holiday],
    ) -> Self {
        let mut by_employee: HashMap<String, Vec<TimeOffRequest>> = HashMap::new();
        for req in time_off {
            by_employee
                .entry(req.employee_id.clone())
                .or_default()
                .push(req.clone());
        }
        Self {
            week: week.clone(),
            time_off: by_employee,
            holidays: holidays.to_vec(),
            min_rest: config.min_rest(),
            holiday_deduction: config.holiday_deduction(),
        }
    }

    /// The week this model was built for.
    pub fn week(&self) -> &ScheduleWeek {
        &self.week
    }

    /// Whether approved time off covers the date.
    pub fn on_time_off(&self, employee_id: &str, date: NaiveDate) -> bool {
        self.time_off
            .get(employee_id)
            .is_some_and(|reqs| reqs.iter().any(|r| r.blocks(date)))
    }

    /// Whether the employee may be scheduled on `date`.
    pub fn is_available(
        &self,
        employee: &Employee,
        date: NaiveDate,
        ledger: &AssignmentLedger,
    ) -> bool {
        if employee.hidden || self.on_time_off(&employee.id, date) {
            return false;
        }
        if employee.is_part_time() {
            if let Some(allowed) = employee.allowed_days {
                let worked = ledger.worked_dates(&employee.id, &self.week);
                if worked.len() >= usize::from(allowed) && !worked.contains(&date) {
                    return false;
                }
            }
        }
        true
    }

    /// Window a new shift starting on `date` must fit into.
    ///
    /// Returns `None` when the employee is unavailable or the rest gap
    /// leaves no room.
    pub fn availability_window(
        &self,
        employee: &Employee,
        date: NaiveDate,
        ledger: &AssignmentLedger,
    ) -> Option<TimeWindow> {
        if !self.is_available(employee, date, ledger) {
            return None;
        }
        let day_start = date.and_time(NaiveTime::MIN);
        // Overnight shifts may run into the next day.
        let mut window = TimeWindow::new(day_start, day_start + Duration::days(2));

        if let Some(prev_end) = ledger.previous_end(&employee.id, date) {
            window.start = window.start.max(prev_end + self.min_rest);
        }
        if let Some(next_start) = ledger.next_start(&employee.id, date) {
            window.end = window.end.min(next_start - self.min_rest);
        }
        if window.is_empty() {
            None
        } else {
            Some(window)
        }
    }

    /// Weekly budget after the holiday deduction (full-time only).
    pub fn weekly_budget(&self, employee: &Employee, week: &ScheduleWeek) -> Duration {
        let budget = employee.max_weekly_duration();
        if !employee.is_full_time() {
            return budget;
        }
        let holidays = week.holidays_within(&self.holidays).len() as i32;
        (budget - self.holiday_deduction * holidays).max(Duration::zero())
    }

    /// Budget left after the hours already in the ledger for this week.
    ///
    /// Never negative.
    pub fn remaining_hours_budget(
        &self,
        employee: &Employee,
        week: &ScheduleWeek,
        ledger: &AssignmentLedger,
    ) -> Duration {
        let used = ledger.hours_in(&employee.id, week);
        (self.weekly_budget(employee, week) - used).max(Duration::zero())
    }

    /// Whether `shift` can be added for `employee` without breaking
    /// availability, the rest gap, double booking, or the hours budget.
    pub fn can_take(&self, employee: &Employee, shift: &Shift, ledger: &AssignmentLedger) -> bool {
        let Some(window) = self.availability_window(employee, shift.date(), ledger) else {
            return false;
        };
        window.encloses(&shift.window())
            && !ledger.overlaps(shift)
            && shift.duration() <= self.remaining_hours_budget(employee, &self.week, ledger)
    }
}
