//! Input snapshot for one generation or validation run.

use serde::{Deserialize, Serialize};

use crate::models::{
    holidays_between, Employee, Holiday, Location, ScheduleWeek, Shift, TimeOffRequest,
};

/// Immutable snapshot of everything a run reads.
///
/// Fetched once by the caller; the engine never reads the store mid-run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    /// Location being scheduled.
    pub location: Location,
    /// Date range of the run.
    pub week: ScheduleWeek,
    /// Employee roster.
    pub employees: Vec<Employee>,
    /// Shifts already placed for the week (manual or persisted).
    pub shifts: Vec<Shift>,
    /// Time-off requests overlapping the week.
    pub time_off: Vec<TimeOffRequest>,
    /// Holiday calendar covering the week.
    pub holidays: Vec<Holiday>,
}

impl ScheduleInput {
    /// Creates an input with the computed holiday calendar for the week.
    pub fn new(location: Location, week: ScheduleWeek) -> Self {
        let holidays = holidays_between(week.start, week.end);
        Self {
            location,
            week,
            employees: Vec::new(),
            shifts: Vec::new(),
            time_off: Vec::new(),
            holidays,
        }
    }

    /// Adds an employee.
    pub fn with_employee(mut self, employee: Employee) -> Self {
        self.employees.push(employee);
        self
    }

    /// Adds several employees.
    pub fn with_employees(mut self, employees: impl IntoIterator<Item = Employee>) -> Self {
        self.employees.extend(employees);
        self
    }

    /// Adds an existing shift.
    pub fn with_shift(mut self, shift: Shift) -> Self {
        self.shifts.push(shift);
        self
    }

    /// Adds several existing shifts.
    pub fn with_shifts(mut self, shifts: impl IntoIterator<Item = Shift>) -> Self {
        self.shifts.extend(shifts);
        self
    }

    /// Adds a time-off request.
    pub fn with_time_off(mut self, request: TimeOffRequest) -> Self {
        self.time_off.push(request);
        self
    }

    /// Replaces the holiday calendar.
    pub fn with_holidays(mut self, holidays: Vec<Holiday>) -> Self {
        self.holidays = holidays;
        self
    }

    /// Finds an employee by ID.
    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// Shifts at this location starting inside the week.
    pub fn shifts_in_scope(&self) -> impl Iterator<Item = &Shift> {
        self.shifts
            .iter()
            .filter(|s| s.location_id == self.location.id && self.week.contains(s.date()))
    }
}
