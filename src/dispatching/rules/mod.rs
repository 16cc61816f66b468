//! Built-in candidate rules.
//!
//! All rules return lower scores for employees that should be picked first.

use super::{CandidateRule, RuleScore, SelectionContext};
use crate::models::Employee;

/// Fewest shifts already held this week.
///
/// Spreads shifts across the roster before anyone gets a second one.
#[derive(Debug, Clone, Copy)]
pub struct FewestShifts;

impl CandidateRule for FewestShifts {
    fn name(&self) -> &'static str {
        "FEWEST_SHIFTS"
    }

    fn evaluate(&self, employee: &Employee, context: &SelectionContext<'_>) -> RuleScore {
        context.ledger.shift_count(&employee.id, context.week) as f64
    }

    fn description(&self) -> &'static str {
        "Fewest shifts assigned this week"
    }
}

/// Fewest hours already held this week.
#[derive(Debug, Clone, Copy)]
pub struct FewestHours;

impl CandidateRule for FewestHours {
    fn name(&self) -> &'static str {
        "FEWEST_HOURS"
    }

    fn evaluate(&self, employee: &Employee, context: &SelectionContext<'_>) -> RuleScore {
        context
            .ledger
            .hours_in(&employee.id, context.week)
            .num_minutes() as f64
    }

    fn description(&self) -> &'static str {
        "Fewest hours assigned this week"
    }
}

/// Full-time employees before part-time and other staff.
///
/// Keeps part-time day allowances for days full-timers cannot cover.
#[derive(Debug, Clone, Copy)]
pub struct FullTimeFirst;

impl CandidateRule for FullTimeFirst {
    fn name(&self) -> &'static str {
        "FULL_TIME_FIRST"
    }

    fn evaluate(&self, employee: &Employee, _context: &SelectionContext<'_>) -> RuleScore {
        if employee.is_full_time() {
            0.0
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::AssignmentLedger;
    use crate::models::{Role, ScheduleWeek, Shift};
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn test_rule_scores() {
        let d = NaiveDate::from_ymd_opt(2026, 1, 4).unwrap();
        let week = ScheduleWeek::starting("L1", d);
        let ledger = AssignmentLedger::from_existing(&[Shift::on_date(
            "E1",
            "L1",
            Role::Cashier,
            d,
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        )]);
        let ctx = SelectionContext::new(&ledger, &week, d);
        let busy = Employee::new("E1", "L1", Role::Cashier);
        let idle = Employee::new("E2", "L1", Role::Cashier).part_time(2);

        assert!((FewestShifts.evaluate(&busy, &ctx) - 1.0).abs() < 1e-10);
        assert!((FewestShifts.evaluate(&idle, &ctx) - 0.0).abs() < 1e-10);
        assert!((FewestHours.evaluate(&busy, &ctx) - 240.0).abs() < 1e-10);
        assert!(FullTimeFirst.evaluate(&busy, &ctx) < FullTimeFirst.evaluate(&idle, &ctx));
    }
}
