//! Rostering domain models.
//!
//! Provides the data types exchanged with the surrounding store system:
//! the roster and locations it supplies, the shifts the engine reads and
//! produces, and the staffing rules that drive generation.
//!
//! # Domain Mappings
//!
//! | u-roster | Scheduling term | Store system |
//! |----------|-----------------|--------------|
//! | Employee | Resource | Staff record |
//! | Shift | Assignment | Schedule entry |
//! | RoleRequirement | Capacity demand | Staffing matrix |
//! | StationLimit | Capacity ceiling | Production station cap |
//! | ScheduleWeek | Horizon | Week view |

mod calendar;
mod employee;
mod location;
mod requirement;
pub mod role;
mod shift;
mod time_off;

pub use calendar::{
    easter_sunday, holidays_between, holidays_for_year, Holiday, ScheduleWeek, TimeWindow,
};
pub use employee::{duration_to_hours, hours_to_duration, Employee, EmploymentType, MAX_HOURS};
pub use location::Location;
pub use requirement::{RoleRequirement, StationLimit, ALL_WEEKDAYS};
pub use role::Role;
pub use shift::{Shift, ShiftKind, ShiftOrigin, ShiftTemplate};
pub use time_off::{TimeOffRequest, TimeOffStatus};
