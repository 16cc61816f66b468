//! Store location model.

use serde::{Deserialize, Serialize};

/// A store location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    /// Unique location identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Whether the store is operating.
    pub active: bool,
    /// Weekly labor-hours allocation. `None` = uncapped.
    pub weekly_hours_budget: Option<f64>,
    /// Whether the engine may generate schedules for this location.
    pub scheduling_enabled: bool,
}

impl Location {
    /// Creates an active, scheduling-enabled location with no hours cap.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            active: true,
            weekly_hours_budget: None,
            scheduling_enabled: true,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the weekly hours budget.
    pub fn with_hours_budget(mut self, hours: f64) -> Self {
        self.weekly_hours_budget = Some(hours);
        self
    }

    /// Disables generation for this location.
    pub fn disabled(mut self) -> Self {
        self.scheduling_enabled = false;
        self
    }

    /// Marks the location inactive.
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Active and enabled for scheduling.
    pub fn is_schedulable(&self) -> bool {
        self.active && self.scheduling_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_flags() {
        let l = Location::new("L1").with_name("Store A").with_hours_budget(400.0);
        assert!(l.is_schedulable());
        assert_eq!(l.weekly_hours_budget, Some(400.0));
        assert!(!l.clone().disabled().is_schedulable());
        assert!(!l.inactive().is_schedulable());
    }
}
