//! Employee model.
//!
//! Employees are owned by the employee-management system; the engine reads
//! them immutably for one generation run.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::Role;

/// A schedulable store employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    /// Unique employee identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Home location.
    pub location_id: String,
    /// Canonical role.
    pub role: Role,
    /// Employment type.
    pub employment: EmploymentType,
    /// Weekly max-hours budget.
    pub max_weekly_hours: f64,
    /// Days per week a part-time employee may work (1-5).
    pub allowed_days: Option<u8>,
    /// Excluded from scheduling (e.g. pending termination).
    pub hidden: bool,
}

/// Employment type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Other,
}

impl Employee {
    /// Creates a full-time employee with a 40-hour budget.
    pub fn new(id: impl Into<String>, location_id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            location_id: location_id.into(),
            role,
            employment: EmploymentType::FullTime,
            max_weekly_hours: 40.0,
            allowed_days: None,
            hidden: false,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Marks the employee part-time with an allowed-days count.
    pub fn part_time(mut self, allowed_days: u8) -> Self {
        self.employment = EmploymentType::PartTime;
        self.allowed_days = Some(allowed_days);
        self
    }

    /// Sets the employment type.
    pub fn with_employment(mut self, employment: EmploymentType) -> Self {
        self.employment = employment;
        self
    }

    /// Sets the weekly max-hours budget.
    pub fn with_max_hours(mut self, hours: f64) -> Self {
        self.max_weekly_hours = hours;
        self
    }

    /// Hides the employee from scheduling.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn is_full_time(&self) -> bool {
        self.employment == EmploymentType::FullTime
    }

    pub fn is_part_time(&self) -> bool {
        self.employment == EmploymentType::PartTime
    }

    /// Weekly budget as a duration (minute precision, never negative).
    pub fn max_weekly_duration(&self) -> Duration {
        hours_to_duration(self.max_weekly_hours)
    }
}

/// Upper bound for any hour-valued setting; larger values behave as unlimited.
pub const MAX_HOURS: f64 = 24.0 * 366.0;

/// Converts fractional hours to a minute-precision duration, flooring at zero
/// and capping at [`MAX_HOURS`].
pub fn hours_to_duration(hours: f64) -> Duration {
    if !hours.is_finite() || hours <= 0.0 {
        return Duration::zero();
    }
    Duration::minutes((hours.min(MAX_HOURS) * 60.0).round() as i64)
}

/// Converts a duration to fractional hours.
pub fn duration_to_hours(duration: Duration) -> f64 {
    duration.num_minutes() as f64 / 60.0
}
