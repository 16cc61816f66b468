//! Input and schedule validation.
//!
//! - [`validate_input`]: structural checks that make a run refuse its input.
//! - [`ScheduleValidator`]: rule checks over a week of shifts, reported as
//!   warnings.

mod input;
mod schedule;

pub use input::{validate_input, InputError, InputErrorKind, InputResult};
pub use schedule::{ScheduleValidator, ValidationWarning, WarningKind};
