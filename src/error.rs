//! Error types.
//!
//! Only conditions that stop a run are errors. Per-slot shortfalls
//! ([`UnmetRequirement`](crate::generator::UnmetRequirement)) and soft rule
//! findings ([`ValidationWarning`](crate::validation::ValidationWarning)) are
//! result data.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::Role;
use crate::validation::InputError;

/// Errors that abort a generation run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SchedulingError {
    /// The location's staffing configuration is unusable.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The requested date range is inverted or too long.
    #[error("invalid range {start}..={end}: {reason}")]
    InvalidRange {
        start: NaiveDate,
        end: NaiveDate,
        reason: String,
    },

    /// Structural problems in the roster or existing shifts.
    #[error("invalid input: {} problem(s), first: {}", .0.len(), first_message(.0))]
    InvalidInput(Vec<InputError>),

    /// A configuration document could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// The batch write of generated shifts failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Staffing configuration problems for a location.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The location is inactive or not enabled for scheduling.
    #[error("location '{location_id}' is not enabled for scheduling")]
    LocationNotEnabled { location_id: String },

    /// A scheduling-enabled location has no role requirements.
    #[error("location '{location_id}' has no role requirements; add staffing minimums first")]
    NoRoleRequirements { location_id: String },

    /// A requirement's minimum exceeds its maximum.
    #[error("location '{location_id}': requirement for {role} has min {min} > max {max}")]
    InvalidRequirement {
        location_id: String,
        role: Role,
        min: u32,
        max: u32,
    },
}

/// Failures of the all-or-nothing shift batch commit.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// Another writer committed to the same (location, week) first.
    #[error("version conflict for {key}: expected {expected}, found {actual}")]
    VersionConflict {
        key: String,
        expected: u64,
        actual: u64,
    },

    /// A shift in the batch was refused; nothing was committed.
    #[error("batch rejected for {key}: {reason}")]
    Rejected { key: String, reason: String },
}

impl From<serde_json::Error> for SchedulingError {
    fn from(err: serde_json::Error) -> Self {
        SchedulingError::ConfigParse(err.to_string())
    }
}

/// Result alias for engine operations.
pub type SchedulingResult<T> = Result<T, SchedulingError>;

fn first_message(errors: &[InputError]) -> &str {
    errors.first().map_or("", |e| e.message.as_str())
}
