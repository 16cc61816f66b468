//! Structural input validation.
//!
//! Checks the roster, existing shifts and time-off requests before a run.
//! Detects:
//! - Duplicate employee IDs
//! - Shifts referencing unknown employees
//! - Shifts whose end is not after their start
//! - Part-time day allowances outside 1-5
//! - Negative or non-finite hour budgets
//! - Time-off requests ending before they start
//! - A week scoped to a different location than the input

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::generator::ScheduleInput;

/// Validation result.
pub type InputResult = Result<(), Vec<InputError>>;

/// A structural input problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputError {
    /// Error category.
    pub kind: InputErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of input errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputErrorKind {
    /// Two employees share the same ID.
    DuplicateId,
    /// A shift references an employee missing from the roster.
    UnknownEmployee,
    /// A shift ends at or before its start.
    InvalidShiftTimes,
    /// Part-time allowed days outside 1-5.
    InvalidAllowedDays,
    /// Negative or non-finite hour budget.
    InvalidHoursBudget,
    /// Time-off request ends before it starts.
    InvalidTimeOff,
    /// The week belongs to another location.
    LocationMismatch,
}

impl InputErrorKind {
    /// Whether this problem prevents generation.
    ///
    /// Shifts of employees outside the roster (floaters, removed staff)
    /// still occupy coverage, so they are reported but do not block a run.
    pub fn blocks_generation(self) -> bool {
        !matches!(self, Self::UnknownEmployee)
    }
}

impl InputError {
    fn new(kind: InputErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a generation or validation input.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with every detected issue.
pub fn validate_input(input: &ScheduleInput) -> InputResult {
    let mut errors = Vec::new();

    if input.week.location_id != input.location.id {
        errors.push(InputError::new(
            InputErrorKind::LocationMismatch,
            format!(
                "Week is scoped to location '{}' but input is for '{}'",
                input.week.location_id, input.location.id
            ),
        ));
    }

    if let Some(budget) = input.location.weekly_hours_budget {
        if !budget.is_finite() || budget < 0.0 {
            errors.push(InputError::new(
                InputErrorKind::InvalidHoursBudget,
                format!("Location '{}' has invalid weekly budget {budget}", input.location.id),
            ));
        }
    }

    let mut employee_ids = HashSet::new();
    for emp in &input.employees {
        if !employee_ids.insert(emp.id.as_str()) {
            errors.push(InputError::new(
                InputErrorKind::DuplicateId,
                format!("Duplicate employee ID: {}", emp.id),
            ));
        }

        if !emp.max_weekly_hours.is_finite() || emp.max_weekly_hours < 0.0 {
            errors.push(InputError::new(
                InputErrorKind::InvalidHoursBudget,
                format!("Employee '{}' has invalid max hours {}", emp.id, emp.max_weekly_hours),
            ));
        }

        if let Some(days) = emp.allowed_days {
            if !(1..=5).contains(&days) {
                errors.push(InputError::new(
                    InputErrorKind::InvalidAllowedDays,
                    format!("Employee '{}' has {days} allowed days (expected 1-5)", emp.id),
                ));
            }
        }
    }

    for shift in &input.shifts {
        if !employee_ids.contains(shift.employee_id.as_str()) {
            errors.push(InputError::new(
                InputErrorKind::UnknownEmployee,
                format!(
                    "Shift on {} references unknown employee '{}'",
                    shift.date(),
                    shift.employee_id
                ),
            ));
        }
        if shift.end <= shift.start {
            errors.push(InputError::new(
                InputErrorKind::InvalidShiftTimes,
                format!(
                    "Shift of '{}' ends at {} before it starts at {}",
                    shift.employee_id, shift.end, shift.start
                ),
            ));
        }
    }

    for req in &input.time_off {
        if req.end_date < req.start_date {
            errors.push(InputError::new(
                InputErrorKind::InvalidTimeOff,
                format!(
                    "Time off of '{}' ends {} before it starts {}",
                    req.employee_id, req.end_date, req.start_date
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Employee, Location, Role, ScheduleWeek, Shift, TimeOffRequest};
    use chrono::{NaiveDate, NaiveTime};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
    }

    fn base() -> ScheduleInput {
        ScheduleInput::new(Location::new("L1"), ScheduleWeek::starting("L1", d(4)))
            .with_employee(Employee::new("E1", "L1", Role::Cashier))
            .with_employee(Employee::new("E2", "L1", Role::Custodian).part_time(3))
    }

    fn kinds(input: &ScheduleInput) -> Vec<InputErrorKind> {
        validate_input(input)
            .unwrap_err()
            .into_iter()
            .map(|e| e.kind)
            .collect()
    }

    #[test]
    fn test_valid_input() {
        let t = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
        let input = base()
            .with_shift(Shift::on_date("E1", "L1", Role::Cashier, d(5), t(22), t(6)))
            .with_time_off(TimeOffRequest::approved("E2", d(6), d(6)));
        assert!(validate_input(&input).is_ok());
    }

    #[test]
    fn test_duplicate_employee() {
        let input = base().with_employee(Employee::new("E1", "L1", Role::Cashier));
        assert_eq!(kinds(&input), vec![InputErrorKind::DuplicateId]);
    }

    #[test]
    fn test_unknown_employee_and_inverted_shift() {
        let at = |h| d(5).and_hms_opt(h, 0, 0).unwrap();
        let input = base()
            .with_shift(Shift::new("E9", "L1", Role::Cashier, at(8), at(16)))
            .with_shift(Shift::new("E1", "L1", Role::Cashier, at(16), at(16)));
        assert_eq!(
            kinds(&input),
            vec![InputErrorKind::UnknownEmployee, InputErrorKind::InvalidShiftTimes]
        );
    }

    #[test]
    fn test_only_unknown_employee_is_non_blocking() {
        assert!(!InputErrorKind::UnknownEmployee.blocks_generation());
        assert!(InputErrorKind::InvalidShiftTimes.blocks_generation());
        assert!(InputErrorKind::DuplicateId.blocks_generation());
    }

    #[test]
    fn test_allowed_days_range() {
        let input = base().with_employee(Employee::new("P1", "L1", Role::Cashier).part_time(6));
        assert_eq!(kinds(&input), vec![InputErrorKind::InvalidAllowedDays]);
        let input = base().with_employee(Employee::new("P2", "L1", Role::Cashier).part_time(0));
        assert_eq!(kinds(&input), vec![InputErrorKind::InvalidAllowedDays]);
    }

    #[test]
    fn test_negative_budget() {
        let input =
            base().with_employee(Employee::new("E3", "L1", Role::Cashier).with_max_hours(-1.0));
        assert_eq!(kinds(&input), vec![InputErrorKind::InvalidHoursBudget]);
    }

    #[test]
    fn test_inverted_time_off() {
        let input = base().with_time_off(TimeOffRequest::approved("E1", d(8), d(6)));
        assert_eq!(kinds(&input), vec![InputErrorKind::InvalidTimeOff]);
    }

    #[test]
    fn test_location_mismatch() {
        let input = ScheduleInput::new(Location::new("L1"), ScheduleWeek::starting("L2", d(4)));
        assert_eq!(kinds(&input), vec![InputErrorKind::LocationMismatch]);
    }

    #[test]
    fn test_collects_all_errors() {
        let input = base()
            .with_employee(Employee::new("E1", "L1", Role::Cashier))
            .with_time_off(TimeOffRequest::approved("E1", d(8), d(6)));
        let errors = validate_input(&input).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].message.contains("E1"));
    }
}
