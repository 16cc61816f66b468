//! Retail shift rostering engine.
//!
//! Turns per-location staffing rules, an employee roster and the shifts
//! already placed for a week into a complete weekly schedule, then checks
//! any schedule (generated or manually edited) against labor and staffing
//! rules.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Employee`, `Location`, `Shift`,
//!   `RoleRequirement`, `StationLimit`, `TimeOffRequest`, `ScheduleWeek`,
//!   holiday calendar, and the `Role` catalog
//! - **`constraints`**: Per-location requirements resolved to per-date slots
//! - **`availability`**: Time off, rest gaps, part-time day caps, hours budgets
//! - **`dispatching`**: Candidate ranking rules and rule engine
//! - **`generator`**: Two-phase shift generation (minimum coverage, then
//!   priority-day enrichment)
//! - **`validation`**: Input integrity checks and schedule rule warnings
//! - **`kpi`**: Roster quality metrics
//! - **`store`**: All-or-nothing batch persistence with version checks
//! - **`config`**: Overridable thresholds and shift templates
//!
//! # Architecture
//!
//! Every run reads an immutable [`generator::ScheduleInput`] snapshot and
//! an injected random source; nothing is read from storage mid-run. The
//! caller commits [`generator::GenerationOutcome::new_shifts`] through a
//! [`store::ShiftStore`]. The crate emits `tracing` events but never
//! installs a subscriber.
//!
//! # References
//!
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of
//!   applications, methods and models"
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

pub mod availability;
pub mod config;
pub mod constraints;
pub mod dispatching;
pub mod error;
pub mod generator;
pub mod kpi;
pub mod models;
pub mod store;
pub mod validation;
