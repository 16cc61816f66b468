//! Shift persistence.
//!
//! Generated shifts are written as one batch per (location, week) with an
//! optimistic version check. A commit either stores the whole batch or
//! nothing; the caller decides whether to regenerate after a conflict.

use std::collections::HashMap;

use tracing::{info, instrument, warn};

use crate::error::PersistenceError;
use crate::models::{ScheduleWeek, Shift, ShiftOrigin};

/// Result alias for store operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Storage for shifts keyed by (location, week).
pub trait ShiftStore {
    /// Current version of a week; 0 when nothing was ever committed.
    fn version(&self, key: &ScheduleWeek) -> PersistenceResult<u64>;

    /// Shifts stored for a week.
    fn load_week(&self, key: &ScheduleWeek) -> PersistenceResult<Vec<Shift>>;

    /// Appends a batch if the week is still at `expected_version`.
    ///
    /// Returns the new version. On any error nothing is written.
    fn commit_batch(
        &mut self,
        key: &ScheduleWeek,
        expected_version: u64,
        shifts: &[Shift],
    ) -> PersistenceResult<u64>;
}

#[derive(Debug, Clone, Default)]
struct StoredWeek {
    version: u64,
    shifts: Vec<Shift>,
}

/// In-process [`ShiftStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryShiftStore {
    weeks: HashMap<ScheduleWeek, StoredWeek>,
}

impl InMemoryShiftStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn all_shifts(&self) -> impl Iterator<Item = &Shift> {
        self.weeks.values().flat_map(|w| w.shifts.iter())
    }

    fn check_batch(&self, key: &ScheduleWeek, shifts: &[Shift]) -> Result<(), String> {
        for (i, shift) in shifts.iter().enumerate() {
            if shift.location_id != key.location_id || !key.contains(shift.date()) {
                return Err(format!(
                    "shift of '{}' on {} at '{}' is outside the batch scope",
                    shift.employee_id,
                    shift.date(),
                    shift.location_id
                ));
            }
            let clash = self
                .all_shifts()
                .chain(&shifts[..i])
                .find(|s| s.employee_id == shift.employee_id && s.overlaps(shift));
            if let Some(existing) = clash {
                return Err(format!(
                    "shift of '{}' at {} overlaps {}..{}",
                    shift.employee_id, shift.start, existing.start, existing.end
                ));
            }
        }
        Ok(())
    }
}

impl ShiftStore for InMemoryShiftStore {
    fn version(&self, key: &ScheduleWeek) -> PersistenceResult<u64> {
        Ok(self.weeks.get(key).map_or(0, |w| w.version))
    }

    fn load_week(&self, key: &ScheduleWeek) -> PersistenceResult<Vec<Shift>> {
        Ok(self
            .weeks
            .get(key)
            .map(|w| w.shifts.clone())
            .unwrap_or_default())
    }

    #[instrument(skip_all, fields(
        location_id = %key.location_id,
        week_start = %key.start,
        expected_version = expected_version,
        batch = shifts.len()
    ))]
    fn commit_batch(
        &mut self,
        key: &ScheduleWeek,
        expected_version: u64,
        shifts: &[Shift],
    ) -> PersistenceResult<u64> {
        let actual = self.version(key)?;
        if actual != expected_version {
            warn!(actual, "version conflict");
            return Err(PersistenceError::VersionConflict {
                key: key_label(key),
                expected: expected_version,
                actual,
            });
        }
        if let Err(reason) = self.check_batch(key, shifts) {
            warn!(%reason, "batch rejected");
            return Err(PersistenceError::Rejected {
                key: key_label(key),
                reason,
            });
        }

        let week = self.weeks.entry(key.clone()).or_default();
        // once stored, a shift is existing for every later run
        week.shifts.extend(
            shifts
                .iter()
                .cloned()
                .map(|s| s.with_origin(ShiftOrigin::Existing)),
        );
        week.version += 1;
        info!(version = week.version, "batch committed");
        Ok(week.version)
    }
}

fn key_label(key: &ScheduleWeek) -> String {
    format!("{}/{}..{}", key.location_id, key.start, key.end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use chrono::{NaiveDate, NaiveTime};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
    }

    fn shift(emp: &str, day: u32, start: u32, end: u32) -> Shift {
        let t = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
        Shift::on_date(emp, "L1", Role::Cashier, d(day), t(start), t(end))
    }

    fn key() -> ScheduleWeek {
        ScheduleWeek::starting("L1", d(4))
    }

    #[test]
    fn test_commit_and_load() {
        let mut store = InMemoryShiftStore::new();
        assert_eq!(store.version(&key()).unwrap(), 0);

        let batch = [
            shift("E1", 5, 8, 16).with_origin(ShiftOrigin::PhaseOne),
            shift("E2", 5, 8, 16).with_origin(ShiftOrigin::PhaseTwo),
        ];
        let v = store.commit_batch(&key(), 0, &batch).unwrap();
        assert_eq!(v, 1);
        let stored = store.load_week(&key()).unwrap();
        assert_eq!(stored.len(), 2);
        assert!(stored.iter().all(|s| !s.is_generated()));
        assert!(store.load_week(&ScheduleWeek::starting("L1", d(11))).unwrap().is_empty());
    }

    #[test]
    fn test_version_conflict_writes_nothing() {
        let mut store = InMemoryShiftStore::new();
        store.commit_batch(&key(), 0, &[shift("E1", 5, 8, 16)]).unwrap();

        let err = store
            .commit_batch(&key(), 0, &[shift("E2", 6, 8, 16)])
            .unwrap_err();
        assert_eq!(
            err,
            PersistenceError::VersionConflict {
                key: "L1/2026-01-04..2026-01-10".into(),
                expected: 0,
                actual: 1
            }
        );
        assert_eq!(store.load_week(&key()).unwrap().len(), 1);
    }

    #[test]
    fn test_overlap_rejects_whole_batch() {
        let mut store = InMemoryShiftStore::new();
        store.commit_batch(&key(), 0, &[shift("E1", 5, 8, 16)]).unwrap();

        let err = store
            .commit_batch(&key(), 1, &[shift("E2", 6, 8, 16), shift("E1", 5, 12, 20)])
            .unwrap_err();
        assert!(matches!(err, PersistenceError::Rejected { .. }));
        assert_eq!(store.load_week(&key()).unwrap().len(), 1);
        assert_eq!(store.version(&key()).unwrap(), 1);
    }

    #[test]
    fn test_overlap_within_batch_rejected() {
        let mut store = InMemoryShiftStore::new();
        let err = store
            .commit_batch(&key(), 0, &[shift("E1", 5, 8, 16), shift("E1", 5, 15, 20)])
            .unwrap_err();
        assert!(matches!(err, PersistenceError::Rejected { .. }));
        assert_eq!(store.version(&key()).unwrap(), 0);
    }

    #[test]
    fn test_out_of_scope_rejected() {
        let mut store = InMemoryShiftStore::new();
        let err = store
            .commit_batch(&key(), 0, &[shift("E1", 12, 8, 16)])
            .unwrap_err();
        assert!(matches!(err, PersistenceError::Rejected { .. }));
    }
}
