//! Calendar models: time windows, holidays, and the schedule week.
//!
//! # Time Model
//! All instants are store-local `NaiveDateTime`s. A shift or window is the
//! half-open interval `[start, end)`, so back-to-back shifts do not overlap.
//!
//! # Holidays
//! Holidays are a pure function of the year, with no cached state:
//! - Christmas: December 25.
//! - Easter Sunday: anonymous Gregorian (Meeus/Jones/Butcher) computus.
//! - Thanksgiving: fourth Thursday of November.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::SchedulingError;

/// A time interval [start, end).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Interval start (inclusive).
    pub start: NaiveDateTime,
    /// Interval end (exclusive).
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// The whole calendar day `[date 00:00, date+1 00:00)`.
    pub fn whole_day(date: NaiveDate) -> Self {
        let start = date.and_time(chrono::NaiveTime::MIN);
        Self::new(start, start + Duration::days(1))
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether an instant falls within this window.
    #[inline]
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start && instant < self.end
    }

    /// Whether `other` lies entirely inside this window.
    pub fn encloses(&self, other: &Self) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Whether two windows overlap. Touching windows do not.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether the window is non-empty.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// A named public holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
}

impl Holiday {
    pub fn new(date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            date,
            name: name.into(),
        }
    }
}

/// Holidays observed in `year`, in date order.
pub fn holidays_for_year(year: i32) -> Vec<Holiday> {
    let mut holidays: Vec<Holiday> = [
        easter_sunday(year).map(|d| Holiday::new(d, "Easter")),
        NaiveDate::from_weekday_of_month_opt(year, 11, Weekday::Thu, 4)
            .map(|d| Holiday::new(d, "Thanksgiving")),
        NaiveDate::from_ymd_opt(year, 12, 25).map(|d| Holiday::new(d, "Christmas")),
    ]
    .into_iter()
    .flatten()
    .collect();
    holidays.sort_by_key(|h| h.date);
    holidays
}

/// Holidays for every year touched by `[start, end]`.
pub fn holidays_between(start: NaiveDate, end: NaiveDate) -> Vec<Holiday> {
    (start.year()..=end.year())
        .flat_map(holidays_for_year)
        .filter(|h| h.date >= start && h.date <= end)
        .collect()
}

/// Easter Sunday in the Gregorian calendar.
///
/// # Reference
/// Meeus (1991), "Astronomical Algorithms", Ch. 8
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k).rem_euclid(7);
    let m = (a + 11 * h + 22 * l) / 451;
    let n = h + l - 7 * m + 114;
    let month = (n / 31) as u32;
    let day = (n % 31 + 1) as u32;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// The (location, start, end) scope of one generation or validation run.
///
/// Both ends are inclusive calendar dates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleWeek {
    pub location_id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ScheduleWeek {
    pub fn new(location_id: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            location_id: location_id.into(),
            start,
            end,
        }
    }

    /// A seven-day week starting at `start`.
    pub fn starting(location_id: impl Into<String>, start: NaiveDate) -> Self {
        Self::new(location_id, start, start + Duration::days(6))
    }

    /// Number of days in the range (0 when inverted).
    pub fn span_days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(0)
    }

    /// Whether `date` falls within the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Dates of the range in ascending order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.start
            .iter_days()
            .take_while(|d| *d <= self.end)
            .collect()
    }

    /// Dates in fixed Sunday → Saturday order.
    pub fn dates_sunday_first(&self) -> Vec<NaiveDate> {
        let mut dates = self.dates();
        dates.sort_by_key(|d| (d.weekday().num_days_from_sunday(), *d));
        dates
    }

    /// Rejects inverted ranges and spans longer than `max_days`.
    pub fn check_range(&self, max_days: u32) -> Result<(), SchedulingError> {
        if self.end < self.start {
            return Err(SchedulingError::InvalidRange {
                start: self.start,
                end: self.end,
                reason: "week end precedes its start".into(),
            });
        }
        if self.span_days() > i64::from(max_days) {
            return Err(SchedulingError::InvalidRange {
                start: self.start,
                end: self.end,
                reason: format!(
                    "range spans {} days, at most {max_days} supported",
                    self.span_days()
                ),
            });
        }
        Ok(())
    }

    /// Holidays from `holidays` that fall inside the range.
    pub fn holidays_within<'a>(&self, holidays: &'a [Holiday]) -> Vec<&'a Holiday> {
        holidays.iter().filter(|h| self.contains(h.date)).collect()
    }
}
