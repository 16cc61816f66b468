//! Time-off requests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A time-off request covering whole days.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeOffRequest {
    pub employee_id: String,
    /// First day off (inclusive).
    pub start_date: NaiveDate,
    /// Last day off (inclusive).
    pub end_date: NaiveDate,
    pub status: TimeOffStatus,
}

/// Approval state of a request. Only approved requests block scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeOffStatus {
    Pending,
    Approved,
    Denied,
}

impl TimeOffRequest {
    /// Creates an approved request.
    pub fn approved(
        employee_id: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            start_date,
            end_date,
            status: TimeOffStatus::Approved,
        }
    }

    /// Sets the status.
    pub fn with_status(mut self, status: TimeOffStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether this request is approved and covers `date`.
    pub fn blocks(&self, date: NaiveDate) -> bool {
        self.status == TimeOffStatus::Approved && self.start_date <= date && date <= self.end_date
    }
}
