//! Assignment ledger.
//!
//! The ledger is the only state carried between generator steps. It is
//! threaded by value: each placement consumes the ledger and returns the
//! extended one, so every step can be exercised on its own from a known
//! ledger. Existing shifts are seeded first and are never modified.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::collections::{BTreeSet, HashMap};

use crate::models::{Role, ScheduleWeek, Shift, ShiftKind};

/// Shifts known so far in a run, indexed by employee.
#[derive(Debug, Clone, Default)]
pub struct AssignmentLedger {
    shifts: Vec<Shift>,
    by_employee: HashMap<String, Vec<usize>>,
}

impl AssignmentLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a ledger with pre-existing shifts, preserved verbatim.
    pub fn from_existing(shifts: &[Shift]) -> Self {
        shifts
            .iter()
            .cloned()
            .fold(Self::new(), |ledger, shift| ledger.with_shift(shift))
    }

    /// Returns the ledger extended with one shift.
    pub fn with_shift(mut self, shift: Shift) -> Self {
        self.by_employee
            .entry(shift.employee_id.clone())
            .or_default()
            .push(self.shifts.len());
        self.shifts.push(shift);
        self
    }

    /// All shifts in insertion order (existing first).
    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    pub fn into_shifts(self) -> Vec<Shift> {
        self.shifts
    }

    pub fn len(&self) -> usize {
        self.shifts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }

    /// Shifts created during the run.
    pub fn generated(&self) -> impl Iterator<Item = &Shift> {
        self.shifts.iter().filter(|s| s.is_generated())
    }

    /// All shifts of an employee, any date or location.
    pub fn employee_shifts<'a>(
        &'a self,
        employee_id: &str,
    ) -> impl Iterator<Item = &'a Shift> + 'a {
        self.by_employee
            .get(employee_id)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.shifts[idx])
    }

    /// Employee shifts starting within the week.
    pub fn employee_shifts_in<'a>(
        &'a self,
        employee_id: &str,
        week: &'a ScheduleWeek,
    ) -> impl Iterator<Item = &'a Shift> + 'a {
        self.employee_shifts(employee_id)
            .filter(move |s| week.contains(s.date()))
    }

    /// Number of shifts an employee holds in the week.
    pub fn shift_count(&self, employee_id: &str, week: &ScheduleWeek) -> usize {
        self.employee_shifts_in(employee_id, week).count()
    }

    /// Hours an employee holds in the week.
    pub fn hours_in(&self, employee_id: &str, week: &ScheduleWeek) -> Duration {
        self.employee_shifts_in(employee_id, week)
            .fold(Duration::zero(), |acc, s| acc + s.duration())
    }

    /// Distinct dates an employee works in the week.
    pub fn worked_dates(&self, employee_id: &str, week: &ScheduleWeek) -> BTreeSet<NaiveDate> {
        self.employee_shifts_in(employee_id, week)
            .map(Shift::date)
            .collect()
    }

    /// Whether the employee already works at the location on the date.
    pub fn works_at_on(&self, employee_id: &str, location_id: &str, date: NaiveDate) -> bool {
        self.employee_shifts(employee_id)
            .any(|s| s.location_id == location_id && s.date() == date)
    }

    /// Whether a candidate shift overlaps any shift of the same employee.
    pub fn overlaps(&self, candidate: &Shift) -> bool {
        self.employee_shifts(&candidate.employee_id)
            .any(|s| s.overlaps(candidate))
    }

    /// Latest end among the employee's shifts dated before `date`.
    pub fn previous_end(&self, employee_id: &str, date: NaiveDate) -> Option<NaiveDateTime> {
        self.employee_shifts(employee_id)
            .filter(|s| s.date() < date)
            .map(|s| s.end)
            .max()
    }

    /// Earliest start among the employee's shifts dated after `date`.
    pub fn next_start(&self, employee_id: &str, date: NaiveDate) -> Option<NaiveDateTime> {
        self.employee_shifts(employee_id)
            .filter(|s| s.date() > date)
            .map(|s| s.start)
            .min()
    }

    /// Shifts at a location on a date.
    pub fn day_shifts<'a>(
        &'a self,
        location_id: &'a str,
        date: NaiveDate,
    ) -> impl Iterator<Item = &'a Shift> + 'a {
        self.shifts
            .iter()
            .filter(move |s| s.location_id == location_id && s.date() == date)
    }

    /// Headcount for a role at a location on a date.
    pub fn role_count(&self, location_id: &str, date: NaiveDate, role: &Role) -> u32 {
        self.day_shifts(location_id, date)
            .filter(|s| &s.role == role)
            .count() as u32
    }

    /// Whether a store or assistant manager works at the location that day.
    pub fn has_manager(&self, location_id: &str, date: NaiveDate) -> bool {
        self.day_shifts(location_id, date).any(|s| s.role.is_manager())
    }

    /// How often the employee worked a shift kind in the week.
    pub fn kind_count(&self, employee_id: &str, kind: ShiftKind, week: &ScheduleWeek) -> usize {
        self.employee_shifts_in(employee_id, week)
            .filter(|s| s.kind == Some(kind))
            .count()
    }

    /// How many shifts of a kind cover a role at a location on a date.
    pub fn kind_coverage(
        &self,
        location_id: &str,
        date: NaiveDate,
        role: &Role,
        kind: ShiftKind,
    ) -> usize {
        self.day_shifts(location_id, date)
            .filter(|s| &s.role == role && s.kind == Some(kind))
            .count()
    }

    /// Total hours scheduled at a location within the week.
    pub fn location_hours(&self, location_id: &str, week: &ScheduleWeek) -> Duration {
        self.shifts
            .iter()
            .filter(|s| s.location_id == location_id && week.contains(s.date()))
            .fold(Duration::zero(), |acc, s| acc + s.duration())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShiftOrigin;
    use chrono::NaiveTime;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    fn t(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn week() -> ScheduleWeek {
        ScheduleWeek::starting("L1", day(4))
    }

    fn sample() -> AssignmentLedger {
        AssignmentLedger::from_existing(&[
            Shift::on_date("E1", "L1", Role::StoreManager, day(5), t(8), t(16))
                .with_kind(ShiftKind::Opener),
            Shift::on_date("E2", "L1", Role::Cashier, day(5), t(14), t(22))
                .with_kind(ShiftKind::Closer),
            Shift::on_date("E1", "L1", Role::StoreManager, day(7), t(8), t(16))
                .with_kind(ShiftKind::Opener),
            // outside the week
            Shift::on_date("E1", "L1", Role::StoreManager, day(12), t(8), t(16)),
        ])
    }

    #[test]
    fn test_counts_scoped_to_week() {
        let l = sample();
        assert_eq!(l.len(), 4);
        assert_eq!(l.shift_count("E1", &week()), 2);
        assert_eq!(l.hours_in("E1", &week()), Duration::hours(16));
        assert_eq!(l.worked_dates("E1", &week()).len(), 2);
        assert_eq!(l.shift_count("nobody", &week()), 0);
    }

    #[test]
    fn test_with_shift_threads_by_value() {
        let before = sample();
        let after = before.clone().with_shift(
            Shift::on_date("E3", "L1", Role::TeamLead, day(5), t(11), t(19))
                .with_origin(ShiftOrigin::PhaseOne),
        );
        assert_eq!(before.len(), 4);
        assert_eq!(after.len(), 5);
        assert_eq!(after.generated().count(), 1);
        assert_eq!(&after.shifts()[..4], before.shifts());
    }

    #[test]
    fn test_day_queries() {
        let l = sample();
        assert!(l.works_at_on("E1", "L1", day(5)));
        assert!(!l.works_at_on("E1", "L1", day(6)));
        assert_eq!(l.role_count("L1", day(5), &Role::Cashier), 1);
        assert!(l.has_manager("L1", day(5)));
        assert!(!l.has_manager("L1", day(6)));
        assert_eq!(l.kind_count("E1", ShiftKind::Opener, &week()), 2);
        assert_eq!(l.kind_coverage("L1", day(5), &Role::Cashier, ShiftKind::Closer), 1);
        assert_eq!(l.location_hours("L1", &week()), Duration::hours(24));
    }

    #[test]
    fn test_neighbouring_shifts() {
        let l = sample();
        assert_eq!(l.previous_end("E1", day(6)), Some(day(5).and_time(t(16))));
        assert_eq!(l.next_start("E1", day(6)), Some(day(7).and_time(t(8))));
        assert_eq!(l.previous_end("E1", day(5)), None);
    }

    #[test]
    fn test_overlap_is_per_employee() {
        let l = sample();
        let clash = Shift::on_date("E1", "L2", Role::StoreManager, day(5), t(12), t(18));
        assert!(l.overlaps(&clash));
        let other = Shift::on_date("E9", "L1", Role::Cashier, day(5), t(12), t(18));
        assert!(!l.overlaps(&other));
    }
}
