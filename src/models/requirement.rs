//! Staffing requirements and production-station limits.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::Role;

/// Minimum/maximum headcount for a role on a weekday at a location.
///
/// Minimums are additive across roles; roles never substitute for one
/// another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRequirement {
    pub location_id: String,
    pub weekday: Weekday,
    pub role: Role,
    pub min: u32,
    pub max: u32,
}

/// Per-day headcount ceiling for a production-station role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationLimit {
    pub location_id: String,
    pub role: Role,
    pub weekday: Weekday,
    pub max_per_day: u32,
}

impl RoleRequirement {
    pub fn new(
        location_id: impl Into<String>,
        weekday: Weekday,
        role: Role,
        min: u32,
        max: u32,
    ) -> Self {
        Self {
            location_id: location_id.into(),
            weekday,
            role,
            min,
            max,
        }
    }

    /// The same requirement on every day of the week.
    pub fn every_day(location_id: impl Into<String>, role: Role, min: u32, max: u32) -> Vec<Self> {
        let location_id = location_id.into();
        ALL_WEEKDAYS
            .iter()
            .map(|&wd| Self::new(location_id.clone(), wd, role.clone(), min, max))
            .collect()
    }
}

impl StationLimit {
    pub fn new(
        location_id: impl Into<String>,
        role: Role,
        weekday: Weekday,
        max_per_day: u32,
    ) -> Self {
        Self {
            location_id: location_id.into(),
            role,
            weekday,
            max_per_day,
        }
    }

    /// The same limit on every day of the week.
    pub fn every_day(location_id: impl Into<String>, role: Role, max_per_day: u32) -> Vec<Self> {
        let location_id = location_id.into();
        ALL_WEEKDAYS
            .iter()
            .map(|&wd| Self::new(location_id.clone(), role.clone(), wd, max_per_day))
            .collect()
    }
}

/// Weekdays in Sunday → Saturday order.
pub const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_day_expansion() {
        let reqs = RoleRequirement::every_day("L1", Role::Cashier, 1, 3);
        assert_eq!(reqs.len(), 7);
        assert_eq!(reqs[0].weekday, Weekday::Sun);
        assert!(reqs.iter().all(|r| r.min == 1 && r.max == 3));

        let limits = StationLimit::every_day("L1", Role::DonationPricer, 2);
        assert_eq!(limits.len(), 7);
        assert!(limits.iter().all(|l| l.max_per_day == 2));
    }
}
