//! Selection context for candidate rule evaluation.

use chrono::NaiveDate;

use crate::generator::AssignmentLedger;
use crate::models::ScheduleWeek;

/// Run state passed to candidate rules.
///
/// Borrowed from the generator for the duration of one selection.
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext<'a> {
    /// Assignments so far (existing + tentative).
    pub ledger: &'a AssignmentLedger,
    /// Week being generated.
    pub week: &'a ScheduleWeek,
    /// Date of the slot being filled.
    pub date: NaiveDate,
}

impl<'a> SelectionContext<'a> {
    pub fn new(ledger: &'a AssignmentLedger, week: &'a ScheduleWeek, date: NaiveDate) -> Self {
        Self { ledger, week, date }
    }
}
