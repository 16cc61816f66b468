//! Shift model.
//!
//! A shift belongs to exactly one employee at one location. Its end may fall
//! on the next calendar day (overnight); [`Shift::on_date`] normalizes that
//! rollover. The shift's calendar date is the date it starts.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{Role, TimeWindow};

/// A scheduled work shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    pub employee_id: String,
    pub location_id: String,
    /// Role worked during this shift.
    pub role: Role,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Opener / mid / closer, when known.
    pub kind: Option<ShiftKind>,
    /// Who placed this shift.
    pub origin: ShiftOrigin,
}

/// Position of a shift within the store day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShiftKind {
    Opener,
    Mid,
    Closer,
}

/// Provenance of a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftOrigin {
    /// Present before the run (manual or previously persisted).
    Existing,
    /// Placed by guaranteed-minimum coverage.
    PhaseOne,
    /// Placed by priority-day enrichment.
    PhaseTwo,
}

/// A reusable shift pattern: kind plus wall-clock start and end.
///
/// `end <= start` denotes an overnight shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTemplate {
    pub kind: ShiftKind,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Shift {
    /// Creates an existing shift from explicit instants.
    pub fn new(
        employee_id: impl Into<String>,
        location_id: impl Into<String>,
        role: Role,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            location_id: location_id.into(),
            role,
            start,
            end,
            kind: None,
            origin: ShiftOrigin::Existing,
        }
    }

    /// Creates a shift on `date` from wall-clock times, rolling `end` to the
    /// next day when it is not after `start`.
    pub fn on_date(
        employee_id: impl Into<String>,
        location_id: impl Into<String>,
        role: Role,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Self {
        let start_at = date.and_time(start);
        let mut end_at = date.and_time(end);
        if end_at <= start_at {
            end_at += Duration::days(1);
        }
        Self::new(employee_id, location_id, role, start_at, end_at)
    }

    /// Sets the shift kind.
    pub fn with_kind(mut self, kind: ShiftKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Sets the origin.
    pub fn with_origin(mut self, origin: ShiftOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Calendar date the shift starts on.
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start, self.end)
    }

    /// Whether two shifts' intervals overlap (regardless of employee).
    pub fn overlaps(&self, other: &Shift) -> bool {
        self.window().overlaps(&other.window())
    }

    /// Whether the shift was created by the generator.
    pub fn is_generated(&self) -> bool {
        self.origin != ShiftOrigin::Existing
    }
}

impl ShiftTemplate {
    pub fn new(kind: ShiftKind, start: NaiveTime, end: NaiveTime) -> Self {
        Self { kind, start, end }
    }

    /// Template duration, accounting for overnight rollover.
    pub fn duration(&self) -> Duration {
        let d = self.end - self.start;
        if d <= Duration::zero() {
            d + Duration::days(1)
        } else {
            d
        }
    }

    /// Instantiates the template for an employee on `date`.
    pub fn place(
        &self,
        employee_id: impl Into<String>,
        location_id: impl Into<String>,
        role: Role,
        date: NaiveDate,
    ) -> Shift {
        Shift::on_date(employee_id, location_id, role, date, self.start, self.end)
            .with_kind(self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 2).unwrap()
    }

    #[test]
    fn test_overnight_rollover() {
        let s = Shift::on_date("E1", "L1", Role::Custodian, day(), t(22), t(6));
        assert_eq!(s.date(), day());
        assert_eq!(s.end.date(), day().succ_opt().unwrap());
        assert_eq!(s.duration(), Duration::hours(8));
        assert_eq!(s.origin, ShiftOrigin::Existing);
        assert!(!s.is_generated());
    }

    #[test]
    fn test_shift_overlap() {
        let a = Shift::on_date("E1", "L1", Role::Cashier, day(), t(8), t(16));
        let b = Shift::on_date("E1", "L1", Role::Cashier, day(), t(15), t(20));
        let c = Shift::on_date("E1", "L1", Role::Cashier, day(), t(16), t(20));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_template_place() {
        let tpl = ShiftTemplate::new(ShiftKind::Closer, t(14), t(22));
        assert_eq!(tpl.duration(), Duration::hours(8));
        let s = tpl.place("E9", "L1", Role::Cashier, day());
        assert_eq!(s.kind, Some(ShiftKind::Closer));
        assert_eq!(s.start, day().and_time(t(14)));

        let overnight = ShiftTemplate::new(ShiftKind::Closer, t(20), t(2));
        assert_eq!(overnight.duration(), Duration::hours(6));
    }
}
