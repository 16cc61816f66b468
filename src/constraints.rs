//! Per-location staffing constraints.
//!
//! Each location configures its own requirements and station limits; there
//! is no global fallback. [`ConstraintSet::resolve`] turns the weekday-keyed
//! configuration into per-date slots for one [`ScheduleWeek`].
//!
//! # Slot order
//! Within a day, slots are ordered managers → other roles → team lead, so
//! that a manager placed in the same pass can satisfy the team-lead
//! dependency.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

use crate::error::ConfigurationError;
use crate::models::{Location, Role, RoleRequirement, ScheduleWeek, StationLimit};

/// Requirements and station limits of one location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationConstraints {
    pub requirements: Vec<RoleRequirement>,
    pub station_limits: Vec<StationLimit>,
}

/// Staffing configuration for all locations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConstraintSet {
    locations: HashMap<String, LocationConstraints>,
}

/// Merged demand for one role on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRequirement {
    pub role: Role,
    pub min: u32,
    pub max: u32,
    /// Production-station ceiling, if configured.
    pub station_limit: Option<u32>,
}

/// Constraints resolved for one location and date range.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeekConstraints {
    pub location_id: String,
    /// Slots per date, in slot order.
    pub days: BTreeMap<NaiveDate, Vec<SlotRequirement>>,
    /// Station ceilings per (date, role).
    pub station_limits: BTreeMap<NaiveDate, BTreeMap<Role, u32>>,
    /// Location weekly labor-hours budget.
    pub weekly_hours_budget: Option<f64>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a role requirement.
    pub fn with_requirement(mut self, requirement: RoleRequirement) -> Self {
        self.locations
            .entry(requirement.location_id.clone())
            .or_default()
            .requirements
            .push(requirement);
        self
    }

    /// Adds several role requirements.
    pub fn with_requirements(
        self,
        requirements: impl IntoIterator<Item = RoleRequirement>,
    ) -> Self {
        requirements
            .into_iter()
            .fold(self, |set, r| set.with_requirement(r))
    }

    /// Adds a station limit.
    pub fn with_station_limit(mut self, limit: StationLimit) -> Self {
        self.locations
            .entry(limit.location_id.clone())
            .or_default()
            .station_limits
            .push(limit);
        self
    }

    /// Adds several station limits.
    pub fn with_station_limits(self, limits: impl IntoIterator<Item = StationLimit>) -> Self {
        limits
            .into_iter()
            .fold(self, |set, l| set.with_station_limit(l))
    }

    /// Raw configuration of a location, if any.
    pub fn location(&self, location_id: &str) -> Option<&LocationConstraints> {
        self.locations.get(location_id)
    }

    /// Resolves the constraints a generation run must satisfy.
    ///
    /// # Errors
    /// - [`ConfigurationError::LocationNotEnabled`] for inactive or disabled locations.
    /// - [`ConfigurationError::NoRoleRequirements`] when nothing is configured.
    /// - [`ConfigurationError::InvalidRequirement`] when a merged min exceeds its max.
    pub fn resolve(
        &self,
        location: &Location,
        week: &ScheduleWeek,
    ) -> Result<WeekConstraints, ConfigurationError> {
        if !location.is_schedulable() {
            return Err(ConfigurationError::LocationNotEnabled {
                location_id: location.id.clone(),
            });
        }

        let has_requirements = self
            .location(&location.id)
            .is_some_and(|c| !c.requirements.is_empty());
        if !has_requirements {
            return Err(ConfigurationError::NoRoleRequirements {
                location_id: location.id.clone(),
            });
        }

        let resolved = self.collect(location, week);
        for slot in resolved.days.values().flatten() {
            if slot.min > slot.max {
                return Err(ConfigurationError::InvalidRequirement {
                    location_id: location.id.clone(),
                    role: slot.role.clone(),
                    min: slot.min,
                    max: slot.max,
                });
            }
        }
        Ok(resolved)
    }

    /// Collects constraints for a range without enabling checks.
    ///
    /// Used by read-only consumers such as the validator, which must inspect
    /// manually edited weeks of any location.
    pub fn collect(&self, location: &Location, week: &ScheduleWeek) -> WeekConstraints {
        let mut resolved = WeekConstraints {
            location_id: location.id.clone(),
            weekly_hours_budget: location.weekly_hours_budget,
            ..Default::default()
        };
        let Some(config) = self.location(&location.id) else {
            return resolved;
        };

        for date in week.dates() {
            let weekday = date.weekday();

            let mut limits: BTreeMap<Role, u32> = BTreeMap::new();
            for limit in config.station_limits.iter().filter(|l| l.weekday == weekday) {
                if !limit.role.is_production_station() {
                    warn!(
                        location_id = %location.id,
                        role = %limit.role,
                        "ignoring station limit on non-production role"
                    );
                    continue;
                }
                limits
                    .entry(limit.role.clone())
                    .and_modify(|m| *m = (*m).min(limit.max_per_day))
                    .or_insert(limit.max_per_day);
            }

            let mut merged: BTreeMap<Role, (u32, u32)> = BTreeMap::new();
            for req in config.requirements.iter().filter(|r| r.weekday == weekday) {
                let entry = merged.entry(req.role.clone()).or_insert((0, 0));
                entry.0 += req.min;
                entry.1 += req.max;
            }

            let mut slots: Vec<SlotRequirement> = merged
                .into_iter()
                .map(|(role, (min, max))| SlotRequirement {
                    station_limit: limits.get(&role).copied(),
                    role,
                    min,
                    max,
                })
                .collect();
            slots.sort_by_key(|s| (slot_tier(&s.role), s.role.clone()));

            resolved.days.insert(date, slots);
            if !limits.is_empty() {
                resolved.station_limits.insert(date, limits);
            }
        }
        resolved
    }
}

fn slot_tier(role: &Role) -> u8 {
    match role {
        r if r.is_manager() => 0,
        Role::TeamLead => 2,
        _ => 1,
    }
}

impl SlotRequirement {
    /// Headcount ceiling: the configured max, bounded by the station limit.
    pub fn cap(&self) -> u32 {
        match self.station_limit {
            Some(limit) => self.max.min(limit),
            None => self.max,
        }
    }

    /// Minimum reachable without breaching the ceiling.
    pub fn reachable_min(&self) -> u32 {
        self.min.min(self.cap())
    }
}

impl WeekConstraints {
    /// Slots for a date (empty when none are configured).
    pub fn slots(&self, date: NaiveDate) -> &[SlotRequirement] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Station ceiling for a production role on a date.
    pub fn station_limit(&self, date: NaiveDate, role: &Role) -> Option<u32> {
        self.station_limits
            .get(&date)
            .and_then(|limits| limits.get(role))
            .copied()
    }

    /// Sum of minimums across the week.
    pub fn total_minimum(&self) -> u32 {
        self.days.values().flatten().map(|s| s.min).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn week() -> ScheduleWeek {
        // 2026-01-04 is a Sunday
        ScheduleWeek::starting("L1", NaiveDate::from_ymd_opt(2026, 1, 4).unwrap())
    }

    fn base_set() -> ConstraintSet {
        ConstraintSet::new()
            .with_requirements(RoleRequirement::every_day("L1", Role::ApparelProcessor, 2, 4))
            .with_requirements(RoleRequirement::every_day("L1", Role::TeamLead, 1, 1))
            .with_requirements(RoleRequirement::every_day("L1", Role::StoreManager, 1, 1))
            .with_station_limits(StationLimit::every_day("L1", Role::ApparelProcessor, 3))
    }

    #[test]
    fn test_resolve_orders_slots() {
        let resolved = base_set().resolve(&Location::new("L1"), &week()).unwrap();
        assert_eq!(resolved.days.len(), 7);
        let roles: Vec<Role> = resolved
            .slots(week().start)
            .iter()
            .map(|s| s.role.clone())
            .collect();
        assert_eq!(
            roles,
            vec![Role::StoreManager, Role::ApparelProcessor, Role::TeamLead]
        );
    }

    #[test]
    fn test_station_limit_caps_slot() {
        let resolved = base_set().resolve(&Location::new("L1"), &week()).unwrap();
        let slot = &resolved.slots(week().start)[1];
        assert_eq!(slot.station_limit, Some(3));
        assert_eq!(slot.cap(), 3);
        assert_eq!(slot.reachable_min(), 2);
        assert_eq!(
            resolved.station_limit(week().start, &Role::ApparelProcessor),
            Some(3)
        );
    }

    #[test]
    fn test_requirements_merge_additively() {
        let set = ConstraintSet::new()
            .with_requirement(RoleRequirement::new("L1", Weekday::Mon, Role::Cashier, 1, 2))
            .with_requirement(RoleRequirement::new("L1", Weekday::Mon, Role::Cashier, 1, 1));
        let resolved = set.resolve(&Location::new("L1"), &week()).unwrap();
        let monday = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let slot = &resolved.slots(monday)[0];
        assert_eq!((slot.min, slot.max), (2, 3));
        assert!(resolved.slots(week().start).is_empty());
    }

    #[test]
    fn test_no_requirements_is_configuration_error() {
        let err = ConstraintSet::new()
            .resolve(&Location::new("L1"), &week())
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::NoRoleRequirements {
                location_id: "L1".into()
            }
        );
    }

    #[test]
    fn test_no_global_fallback() {
        // L2's requirements never apply to L1
        let set = ConstraintSet::new()
            .with_requirements(RoleRequirement::every_day("L2", Role::Cashier, 1, 1));
        assert!(set.resolve(&Location::new("L1"), &week()).is_err());
    }

    #[test]
    fn test_disabled_location_rejected() {
        let err = base_set()
            .resolve(&Location::new("L1").disabled(), &week())
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::LocationNotEnabled { .. }));
        // collect still works for read-only use
        let collected = base_set().collect(&Location::new("L1").disabled(), &week());
        assert_eq!(collected.days.len(), 7);
    }

    #[test]
    fn test_min_above_max_rejected() {
        let set = ConstraintSet::new()
            .with_requirement(RoleRequirement::new("L1", Weekday::Tue, Role::Cashier, 3, 1));
        let err = set.resolve(&Location::new("L1"), &week()).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidRequirement { min: 3, max: 1, .. }));
    }

    #[test]
    fn test_non_production_station_limit_ignored() {
        let set = ConstraintSet::new()
            .with_requirements(RoleRequirement::every_day("L1", Role::Cashier, 1, 2))
            .with_station_limits(StationLimit::every_day("L1", Role::Cashier, 1));
        let resolved = set.resolve(&Location::new("L1"), &week()).unwrap();
        assert_eq!(resolved.slots(week().start)[0].station_limit, None);
        assert!(resolved.station_limits.is_empty());
    }
}
