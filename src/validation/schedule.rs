//! Schedule rule checks.
//!
//! Inspects a week's shifts (generated or manually edited) and reports rule
//! breaches as warnings. Nothing here rejects a schedule; managers decide
//! what to do with the findings.
//!
//! Only shifts at the input's location that start inside the week are
//! considered.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

use crate::availability::AvailabilityModel;
use crate::config::SchedulingConfig;
use crate::constraints::ConstraintSet;
use crate::generator::ScheduleInput;
use crate::models::{duration_to_hours, hours_to_duration, Role, Shift};

/// A rule breach found in a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub kind: WarningKind,
    /// Employee concerned, when the rule is per-employee.
    pub employee_id: Option<String>,
    /// Dates involved, ascending.
    pub dates: Vec<NaiveDate>,
    /// Human-readable description.
    pub detail: String,
}

/// Categories of schedule warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarningKind {
    /// Weekly hours above the employee's budget.
    MaxHours,
    /// Rest between consecutive days below the minimum.
    Clopening,
    /// More consecutive working days than allowed.
    ConsecutiveDays,
    /// Production-station headcount above its daily ceiling.
    StationLimitExceeded,
    /// Team lead on duty without a manager that day.
    LeadershipGap,
    /// Two shifts of one employee overlap.
    DoubleBooking,
    /// Location hours above its weekly budget.
    LocationBudgetExceeded,
}

impl ValidationWarning {
    fn new(
        kind: WarningKind,
        employee_id: Option<&str>,
        dates: Vec<NaiveDate>,
        detail: String,
    ) -> Self {
        Self {
            kind,
            employee_id: employee_id.map(str::to_string),
            dates,
            detail,
        }
    }
}

/// Rule checker for a week of shifts.
#[derive(Debug, Clone, Default)]
pub struct ScheduleValidator {
    config: SchedulingConfig,
}

impl ScheduleValidator {
    pub fn new(config: SchedulingConfig) -> Self {
        Self { config }
    }

    /// Checks `shifts` against the rules of the input's location and week.
    ///
    /// Warnings are grouped by check, then ordered by employee ID and date.
    #[instrument(skip_all, fields(
        location_id = %input.location.id,
        week_start = %input.week.start,
        shifts = shifts.len()
    ))]
    pub fn validate(
        &self,
        input: &ScheduleInput,
        constraints: &ConstraintSet,
        shifts: &[Shift],
    ) -> Vec<ValidationWarning> {
        let week = &input.week;
        let scoped: Vec<&Shift> = shifts
            .iter()
            .filter(|s| s.location_id == input.location.id && week.contains(s.date()))
            .collect();

        let mut by_employee: BTreeMap<&str, Vec<&Shift>> = BTreeMap::new();
        for &shift in &scoped {
            by_employee.entry(shift.employee_id.as_str()).or_default().push(shift);
        }
        for list in by_employee.values_mut() {
            list.sort_by_key(|s| s.start);
        }

        let mut warnings = Vec::new();
        self.check_max_hours(input, &by_employee, &mut warnings);
        self.check_clopening(&by_employee, &mut warnings);
        self.check_consecutive_days(&by_employee, &mut warnings);
        check_double_booking(&by_employee, &mut warnings);

        let resolved = constraints.collect(&input.location, week);
        let mut by_date: BTreeMap<NaiveDate, Vec<&Shift>> = BTreeMap::new();
        for &shift in &scoped {
            by_date.entry(shift.date()).or_default().push(shift);
        }
        for (&date, day) in &by_date {
            check_station_limits(date, day, resolved.station_limits.get(&date), &mut warnings);
            check_leadership(date, day, &mut warnings);
        }

        if let Some(budget) = input.location.weekly_hours_budget {
            let total = scoped.iter().fold(chrono::Duration::zero(), |acc, s| acc + s.duration());
            if total > hours_to_duration(budget) {
                warnings.push(ValidationWarning::new(
                    WarningKind::LocationBudgetExceeded,
                    None,
                    week.dates(),
                    format!(
                        "location '{}' scheduled {:.1}h against a {budget:.1}h budget",
                        input.location.id,
                        duration_to_hours(total)
                    ),
                ));
            }
        }

        for w in &warnings {
            debug!(
                kind = ?w.kind,
                employee_id = ?w.employee_id,
                detail = %w.detail,
                "rule warning"
            );
        }
        info!(warnings = warnings.len(), "validation finished");
        warnings
    }

    fn check_max_hours(
        &self,
        input: &ScheduleInput,
        by_employee: &BTreeMap<&str, Vec<&Shift>>,
        warnings: &mut Vec<ValidationWarning>,
    ) {
        let availability =
            AvailabilityModel::new(&self.config, &input.week, &input.time_off, &input.holidays);
        for (&employee_id, shifts) in by_employee {
            let Some(employee) = input.employee(employee_id) else {
                continue;
            };
            let worked = shifts.iter().fold(chrono::Duration::zero(), |acc, s| acc + s.duration());
            let budget = availability.weekly_budget(employee, &input.week);
            if worked > budget {
                warnings.push(ValidationWarning::new(
                    WarningKind::MaxHours,
                    Some(employee_id),
                    distinct_dates(shifts),
                    format!(
                        "{:.1}h scheduled, budget {:.1}h",
                        duration_to_hours(worked),
                        duration_to_hours(budget)
                    ),
                ));
            }
        }
    }

    fn check_clopening(
        &self,
        by_employee: &BTreeMap<&str, Vec<&Shift>>,
        warnings: &mut Vec<ValidationWarning>,
    ) {
        let min_rest = self.config.min_rest();
        for (&employee_id, shifts) in by_employee {
            // latest end and earliest start per date
            let mut days: BTreeMap<NaiveDate, (NaiveDateTime, NaiveDateTime)> = BTreeMap::new();
            for shift in shifts {
                days.entry(shift.date())
                    .and_modify(|(end, start)| {
                        *end = (*end).max(shift.end);
                        *start = (*start).min(shift.start);
                    })
                    .or_insert((shift.end, shift.start));
            }
            for (date, &(last_end, _)) in &days {
                let Some(next) = date.succ_opt() else {
                    continue;
                };
                let Some(&(_, first_start)) = days.get(&next) else {
                    continue;
                };
                let rest = first_start - last_end;
                if rest < min_rest {
                    warnings.push(ValidationWarning::new(
                        WarningKind::Clopening,
                        Some(employee_id),
                        vec![*date, next],
                        format!(
                            "{:.1}h rest between {} and {}, minimum {:.1}h",
                            duration_to_hours(rest),
                            last_end,
                            first_start,
                            self.config.min_rest_hours
                        ),
                    ));
                }
            }
        }
    }

    fn check_consecutive_days(
        &self,
        by_employee: &BTreeMap<&str, Vec<&Shift>>,
        warnings: &mut Vec<ValidationWarning>,
    ) {
        let limit = self.config.max_consecutive_days as usize;
        for (&employee_id, shifts) in by_employee {
            for run in consecutive_runs(&distinct_dates(shifts)) {
                if run.len() > limit {
                    warnings.push(ValidationWarning::new(
                        WarningKind::ConsecutiveDays,
                        Some(employee_id),
                        run.clone(),
                        format!("{} consecutive days, limit {limit}", run.len()),
                    ));
                }
            }
        }
    }
}

fn check_double_booking(
    by_employee: &BTreeMap<&str, Vec<&Shift>>,
    warnings: &mut Vec<ValidationWarning>,
) {
    for (&employee_id, shifts) in by_employee {
        for (i, a) in shifts.iter().enumerate() {
            // sorted by start: later shifts cannot overlap once one starts after `a` ends
            for b in shifts[i + 1..].iter().take_while(|b| b.start < a.end) {
                let mut dates = vec![a.date(), b.date()];
                dates.dedup();
                warnings.push(ValidationWarning::new(
                    WarningKind::DoubleBooking,
                    Some(employee_id),
                    dates,
                    format!("{}..{} overlaps {}..{}", a.start, a.end, b.start, b.end),
                ));
            }
        }
    }
}

fn check_station_limits(
    date: NaiveDate,
    day: &[&Shift],
    limits: Option<&BTreeMap<Role, u32>>,
    warnings: &mut Vec<ValidationWarning>,
) {
    let Some(limits) = limits else {
        return;
    };
    for (role, &limit) in limits {
        let count = day.iter().filter(|s| &s.role == role).count() as u32;
        if count > limit {
            warnings.push(ValidationWarning::new(
                WarningKind::StationLimitExceeded,
                None,
                vec![date],
                format!("{count} {role} shifts, station limit {limit}"),
            ));
        }
    }
}

fn check_leadership(date: NaiveDate, day: &[&Shift], warnings: &mut Vec<ValidationWarning>) {
    if day.iter().any(|s| s.role.is_manager()) {
        return;
    }
    let mut leads: Vec<&str> = day
        .iter()
        .filter(|s| s.role == Role::TeamLead)
        .map(|s| s.employee_id.as_str())
        .collect();
    leads.sort_unstable();
    leads.dedup();
    for lead in leads {
        warnings.push(ValidationWarning::new(
            WarningKind::LeadershipGap,
            Some(lead),
            vec![date],
            "team lead scheduled without a store or assistant manager".to_string(),
        ));
    }
}

fn distinct_dates(shifts: &[&Shift]) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = shifts.iter().map(|s| s.date()).collect();
    dates.sort_unstable();
    dates.dedup();
    dates
}

/// Splits ascending distinct dates into runs of consecutive days.
fn consecutive_runs(dates: &[NaiveDate]) -> Vec<Vec<NaiveDate>> {
    let mut runs: Vec<Vec<NaiveDate>> = Vec::new();
    for &date in dates {
        let next = runs.last().and_then(|run| run.last()).and_then(|d| d.succ_opt());
        match runs.last_mut() {
            Some(run) if next == Some(date) => run.push(date),
            _ => {
                runs.push(vec![date]);
            }
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Employee, Location, RoleRequirement, ScheduleWeek, StationLimit};
    use chrono::NaiveTime;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
    }

    fn t(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn shift(emp: &str, role: Role, day: u32, start: u32, end: u32) -> Shift {
        Shift::on_date(emp, "L1", role, d(day), t(start), t(end))
    }

    fn input() -> ScheduleInput {
        ScheduleInput::new(Location::new("L1"), ScheduleWeek::starting("L1", d(4)))
            .with_employee(Employee::new("E1", "L1", Role::Cashier))
            .with_employee(Employee::new("E2", "L1", Role::Cashier).with_max_hours(16.0))
            .with_employee(Employee::new("T1", "L1", Role::TeamLead))
            .with_employee(Employee::new("M1", "L1", Role::StoreManager))
    }

    fn check(shifts: &[Shift]) -> Vec<ValidationWarning> {
        ScheduleValidator::default().validate(&input(), &ConstraintSet::new(), shifts)
    }

    fn kinds(warnings: &[ValidationWarning]) -> Vec<WarningKind> {
        warnings.iter().map(|w| w.kind).collect()
    }

    #[test]
    fn test_clean_schedule() {
        let shifts = vec![
            shift("E1", Role::Cashier, 5, 8, 16),
            shift("E1", Role::Cashier, 6, 8, 16),
            shift("M1", Role::StoreManager, 5, 8, 16),
            shift("T1", Role::TeamLead, 5, 11, 19),
        ];
        let warnings = check(&shifts);
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn test_clopening_pair() {
        let shifts = vec![
            shift("E1", Role::Cashier, 5, 15, 23),
            shift("E1", Role::Cashier, 6, 6, 14),
        ];
        let warnings = check(&shifts);
        assert_eq!(kinds(&warnings), vec![WarningKind::Clopening]);
        assert_eq!(warnings[0].employee_id.as_deref(), Some("E1"));
        assert_eq!(warnings[0].dates, vec![d(5), d(6)]);
    }

    #[test]
    fn test_clopening_uses_latest_close() {
        let shifts = vec![
            shift("E1", Role::Cashier, 5, 8, 23),
            shift("E1", Role::Cashier, 5, 10, 12),
            shift("E1", Role::Cashier, 6, 6, 14),
        ];
        let warnings = check(&shifts);
        assert_eq!(kinds(&warnings), vec![WarningKind::Clopening, WarningKind::DoubleBooking]);
        assert_eq!(warnings[0].dates, vec![d(5), d(6)]);
        assert!(warnings[0].detail.starts_with("7.0h"));
    }

    #[test]
    fn test_max_hours() {
        let shifts = vec![
            shift("E2", Role::Cashier, 4, 8, 16),
            shift("E2", Role::Cashier, 5, 8, 16),
            shift("E2", Role::Cashier, 6, 8, 12),
        ];
        let warnings = check(&shifts);
        assert_eq!(kinds(&warnings), vec![WarningKind::MaxHours]);
        assert_eq!(warnings[0].dates, vec![d(4), d(5), d(6)]);
    }

    #[test]
    fn test_consecutive_days() {
        let shifts: Vec<Shift> =
            (4..=10).map(|day| shift("E1", Role::Cashier, day, 9, 13)).collect();
        let warnings = check(&shifts);
        assert_eq!(kinds(&warnings), vec![WarningKind::ConsecutiveDays]);
        assert_eq!(warnings[0].dates.len(), 7);

        let strict =
            ScheduleValidator::new(SchedulingConfig::default().with_max_consecutive_days(3));
        let warnings = strict.validate(&input(), &ConstraintSet::new(), &shifts[..4]);
        assert_eq!(kinds(&warnings), vec![WarningKind::ConsecutiveDays]);
    }

    #[test]
    fn test_double_booking() {
        let shifts = vec![
            shift("E1", Role::Cashier, 5, 8, 16),
            shift("E1", Role::Cashier, 5, 12, 20),
        ];
        let warnings = check(&shifts);
        assert_eq!(kinds(&warnings), vec![WarningKind::DoubleBooking]);
        assert_eq!(warnings[0].dates, vec![d(5)]);
    }

    #[test]
    fn test_station_limit_exceeded() {
        let constraints = ConstraintSet::new()
            .with_requirements(RoleRequirement::every_day("L1", Role::ApparelProcessor, 1, 3))
            .with_station_limits(StationLimit::every_day("L1", Role::ApparelProcessor, 1));
        let shifts = vec![
            shift("A1", Role::ApparelProcessor, 5, 8, 16),
            shift("A2", Role::ApparelProcessor, 5, 8, 16),
        ];
        let warnings = ScheduleValidator::default().validate(&input(), &constraints, &shifts);
        assert_eq!(kinds(&warnings), vec![WarningKind::StationLimitExceeded]);
        assert_eq!(warnings[0].employee_id, None);
    }

    #[test]
    fn test_leadership_gap() {
        let shifts = vec![shift("T1", Role::TeamLead, 7, 8, 16)];
        let warnings = check(&shifts);
        assert_eq!(kinds(&warnings), vec![WarningKind::LeadershipGap]);
        assert_eq!(warnings[0].dates, vec![d(7)]);
    }

    #[test]
    fn test_location_budget() {
        let input = ScheduleInput::new(
            Location::new("L1").with_hours_budget(10.0),
            ScheduleWeek::starting("L1", d(4)),
        )
        .with_employee(Employee::new("E1", "L1", Role::Cashier));
        let shifts = vec![
            shift("E1", Role::Cashier, 5, 8, 16),
            shift("E1", Role::Cashier, 6, 8, 12),
        ];
        let warnings =
            ScheduleValidator::default().validate(&input, &ConstraintSet::new(), &shifts);
        assert_eq!(kinds(&warnings), vec![WarningKind::LocationBudgetExceeded]);
    }

    #[test]
    fn test_out_of_scope_shifts_ignored() {
        // a clopening pair and a double booking, but at another location or week
        let shifts = vec![
            Shift::on_date("E1", "L2", Role::Cashier, d(5), t(15), t(23)),
            Shift::on_date("E1", "L2", Role::Cashier, d(6), t(6), t(14)),
            shift("E1", Role::Cashier, 12, 8, 16),
            shift("E1", Role::Cashier, 12, 10, 18),
        ];
        let warnings = check(&shifts);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_consecutive_runs_split() {
        let runs = consecutive_runs(&[d(4), d(5), d(7), d(8), d(9)]);
        assert_eq!(runs, vec![vec![d(4), d(5)], vec![d(7), d(8), d(9)]]);
    }
}
