//! Two-phase shift generation.
//!
//! # Algorithm
//!
//! 1. **Phase 1, guaranteed minimum coverage.** Days are visited in fixed
//!    Sunday → Saturday order. Each slot is filled up to its minimum
//!    (bounded by any station limit) with eligible employees, fewest shifts
//!    first, remaining ties broken by the injected random source. Slots that
//!    cannot reach their minimum are recorded as [`UnmetRequirement`]s and
//!    the run continues.
//! 2. **Phase 2, priority-day enrichment.** The configured high-traffic days
//!    are visited in random order. Each slot is filled towards its maximum,
//!    bounded by station limits and the location's weekly hours budget.
//!
//! Existing shifts are never moved or removed: they count towards coverage
//! and new shifts are only placed into genuinely open capacity. Team-lead
//! slots are filled only when a manager works that day at the location.
//!
//! # Complexity
//! O(d * r * e²) where d=days, r=roles per day, e=eligible employees.

mod ledger;
mod phases;
mod request;

pub use ledger::AssignmentLedger;
pub use request::ScheduleInput;

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::availability::AvailabilityModel;
use crate::config::SchedulingConfig;
use crate::constraints::ConstraintSet;
use crate::dispatching::RuleEngine;
use crate::error::{SchedulingError, SchedulingResult};
use crate::kpi::RosterKpi;
use crate::models::{Role, Shift, ShiftOrigin};
use crate::validation::validate_input;

/// A (location, date, role) slot left below its minimum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmetRequirement {
    pub location_id: String,
    pub date: NaiveDate,
    pub role: Role,
    /// Missing headcount.
    pub shortfall: u32,
    pub reason: UnmetReason,
}

/// Why a slot stayed below its minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnmetReason {
    /// No available, eligible employee remained.
    NoEligibleEmployee,
    /// Team-lead slot with no manager on duty that day.
    LeadershipDependency,
    /// The station limit is below the configured minimum.
    StationLimit,
}

/// Result of a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOutcome {
    /// Existing shifts verbatim, followed by new shifts.
    pub shifts: Vec<Shift>,
    /// Slots left below their minimum.
    pub unmet: Vec<UnmetRequirement>,
    /// Metrics over the week's shifts at the location.
    pub kpi: RosterKpi,
}

impl GenerationOutcome {
    /// Shifts created by this run, ready for a batch commit.
    pub fn new_shifts(&self) -> Vec<Shift> {
        self.shifts.iter().filter(|s| s.is_generated()).cloned().collect()
    }

    /// Shifts placed by Phase 1.
    pub fn phase_one_shifts(&self) -> Vec<&Shift> {
        self.by_origin(ShiftOrigin::PhaseOne)
    }

    /// Shifts placed by Phase 2.
    pub fn phase_two_shifts(&self) -> Vec<&Shift> {
        self.by_origin(ShiftOrigin::PhaseTwo)
    }

    /// Whether every configured minimum was reached.
    pub fn is_fully_covered(&self) -> bool {
        self.unmet.is_empty()
    }

    fn by_origin(&self, origin: ShiftOrigin) -> Vec<&Shift> {
        self.shifts.iter().filter(|s| s.origin == origin).collect()
    }
}

/// Two-phase rule-based shift generator.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use rand::{rngs::StdRng, SeedableRng};
/// use u_roster::constraints::ConstraintSet;
/// use u_roster::generator::{ScheduleInput, TwoPhaseGenerator};
/// use u_roster::models::{Employee, Location, Role, RoleRequirement, ScheduleWeek};
///
/// let week = ScheduleWeek::starting("L1", NaiveDate::from_ymd_opt(2026, 1, 4).unwrap());
/// let input = ScheduleInput::new(Location::new("L1"), week)
///     .with_employee(Employee::new("E1", "L1", Role::Cashier))
///     .with_employee(Employee::new("E2", "L1", Role::Cashier));
/// let constraints = ConstraintSet::new()
///     .with_requirements(RoleRequirement::every_day("L1", Role::Cashier, 1, 1));
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let outcome = TwoPhaseGenerator::default()
///     .generate(&input, &constraints, &mut rng)
///     .unwrap();
/// assert_eq!(outcome.new_shifts().len(), 7);
/// assert!(outcome.is_fully_covered());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TwoPhaseGenerator {
    config: SchedulingConfig,
    engine: RuleEngine,
}

impl TwoPhaseGenerator {
    /// Creates a generator with the default candidate rules.
    pub fn new(config: SchedulingConfig) -> Self {
        Self {
            config,
            engine: RuleEngine::default(),
        }
    }

    /// Replaces the candidate rule engine.
    pub fn with_rule_engine(mut self, engine: RuleEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn config(&self) -> &SchedulingConfig {
        &self.config
    }

    /// Generates shifts for the input week.
    ///
    /// # Errors
    /// - [`SchedulingError::InvalidRange`] for inverted or over-long ranges.
    /// - [`SchedulingError::InvalidInput`] for structurally broken input.
    ///   Existing shifts of employees missing from the roster are kept and
    ///   only logged.
    /// - [`SchedulingError::Configuration`] from constraint resolution.
    ///
    /// Unfillable slots are not errors; see [`GenerationOutcome::unmet`].
    #[instrument(skip_all, fields(
        location_id = %input.location.id,
        week_start = %input.week.start,
        week_end = %input.week.end,
        employees = input.employees.len(),
        existing = input.shifts.len()
    ))]
    pub fn generate<R: Rng + ?Sized>(
        &self,
        input: &ScheduleInput,
        constraints: &ConstraintSet,
        rng: &mut R,
    ) -> SchedulingResult<GenerationOutcome> {
        input.week.check_range(self.config.max_range_days)?;
        if let Err(errors) = validate_input(input) {
            let (blocking, reported): (Vec<_>, Vec<_>) =
                errors.into_iter().partition(|e| e.kind.blocks_generation());
            if !blocking.is_empty() {
                return Err(SchedulingError::InvalidInput(blocking));
            }
            for error in &reported {
                warn!(detail = %error.message, "keeping shift outside the roster");
            }
        }
        let resolved = constraints.resolve(&input.location, &input.week)?;

        let availability =
            AvailabilityModel::new(&self.config, &input.week, &input.time_off, &input.holidays);
        let run = phases::Run::new(input, &resolved, &availability);

        let ledger = AssignmentLedger::from_existing(&input.shifts);
        let (ledger, unmet) = self.phase_one(&run, ledger, rng);
        let ledger = self.phase_two(&run, ledger, rng);

        let shifts = ledger.into_shifts();
        let kpi = RosterKpi::calculate(&input.week, &shifts, &resolved);
        info!(
            new_shifts = shifts.iter().filter(|s| s.is_generated()).count(),
            unmet = unmet.len(),
            coverage_rate = kpi.coverage_rate,
            "generation finished"
        );

        Ok(GenerationOutcome { shifts, unmet, kpi })
    }

    /// Generates with a fresh, non-reproducible random source.
    pub fn generate_with_entropy(
        &self,
        input: &ScheduleInput,
        constraints: &ConstraintSet,
    ) -> SchedulingResult<GenerationOutcome> {
        self.generate(input, constraints, &mut rand::rng())
    }
}
