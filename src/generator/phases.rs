//! Phase 1 and Phase 2 passes.
//!
//! Both passes share [`TwoPhaseGenerator::fill_slot`]: re-filter the
//! candidates after every placement, rank them with the rule engine, and
//! place the first shift template the top-ranked candidate can take.

use chrono::{Datelike, Duration, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use super::{AssignmentLedger, ScheduleInput, TwoPhaseGenerator, UnmetReason, UnmetRequirement};
use crate::availability::AvailabilityModel;
use crate::constraints::{SlotRequirement, WeekConstraints};
use crate::dispatching::SelectionContext;
use crate::models::{hours_to_duration, Employee, Role, Shift, ShiftOrigin, ShiftTemplate};

/// Read-only state shared by both passes.
pub(super) struct Run<'a> {
    input: &'a ScheduleInput,
    constraints: &'a WeekConstraints,
    availability: &'a AvailabilityModel,
    /// Location weekly labor-hours ceiling, Phase 2 only.
    budget: Option<Duration>,
}

impl<'a> Run<'a> {
    pub(super) fn new(
        input: &'a ScheduleInput,
        constraints: &'a WeekConstraints,
        availability: &'a AvailabilityModel,
    ) -> Self {
        Self {
            input,
            constraints,
            availability,
            budget: constraints.weekly_hours_budget.map(hours_to_duration),
        }
    }

    fn location_id(&self) -> &'a str {
        &self.input.location.id
    }
}

impl TwoPhaseGenerator {
    /// Guaranteed minimum coverage in Sunday → Saturday order.
    pub(super) fn phase_one<R: Rng + ?Sized>(
        &self,
        run: &Run<'_>,
        mut ledger: AssignmentLedger,
        rng: &mut R,
    ) -> (AssignmentLedger, Vec<UnmetRequirement>) {
        let location_id = run.location_id();
        let before = ledger.len();
        let mut unmet = Vec::new();

        for date in run.input.week.dates_sunday_first() {
            for slot in run.constraints.slots(date) {
                let current = ledger.role_count(location_id, date, &slot.role);
                if current >= slot.min {
                    continue;
                }
                if slot.role == Role::TeamLead && !ledger.has_manager(location_id, date) {
                    let reason = UnmetReason::LeadershipDependency;
                    unmet.push(self.unmet(run, date, slot, current, reason));
                    continue;
                }

                ledger = self.fill_slot(
                    run,
                    ledger,
                    date,
                    slot,
                    slot.reachable_min(),
                    ShiftOrigin::PhaseOne,
                    rng,
                );

                let filled = ledger.role_count(location_id, date, &slot.role);
                if filled < slot.min {
                    let reason = if filled >= slot.cap() {
                        UnmetReason::StationLimit
                    } else {
                        UnmetReason::NoEligibleEmployee
                    };
                    unmet.push(self.unmet(run, date, slot, filled, reason));
                }
            }
        }

        info!(
            placed = ledger.len() - before,
            unmet = unmet.len(),
            "phase 1 finished"
        );
        (ledger, unmet)
    }

    /// Priority-day enrichment in random day order.
    pub(super) fn phase_two<R: Rng + ?Sized>(
        &self,
        run: &Run<'_>,
        mut ledger: AssignmentLedger,
        rng: &mut R,
    ) -> AssignmentLedger {
        let location_id = run.location_id();
        let before = ledger.len();

        let mut dates: Vec<NaiveDate> = run
            .input
            .week
            .dates()
            .into_iter()
            .filter(|d| self.config.priority_days.contains(&d.weekday()))
            .collect();
        dates.shuffle(rng);

        for &date in &dates {
            for slot in run.constraints.slots(date) {
                if slot.role == Role::TeamLead && !ledger.has_manager(location_id, date) {
                    continue;
                }
                if ledger.role_count(location_id, date, &slot.role) >= slot.cap() {
                    continue;
                }
                ledger = self.fill_slot(
                    run,
                    ledger,
                    date,
                    slot,
                    slot.cap(),
                    ShiftOrigin::PhaseTwo,
                    rng,
                );
            }
        }

        info!(
            days = dates.len(),
            placed = ledger.len() - before,
            "phase 2 finished"
        );
        ledger
    }

    /// Places shifts for one slot until `target` headcount or no candidate
    /// can take a shift.
    #[allow(clippy::too_many_arguments)]
    fn fill_slot<R: Rng + ?Sized>(
        &self,
        run: &Run<'_>,
        mut ledger: AssignmentLedger,
        date: NaiveDate,
        slot: &SlotRequirement,
        target: u32,
        origin: ShiftOrigin,
        rng: &mut R,
    ) -> AssignmentLedger {
        let location_id = run.location_id();
        while ledger.role_count(location_id, date, &slot.role) < target {
            let candidates = eligible(run, &ledger, date, &slot.role);
            let context = SelectionContext::new(&ledger, &run.input.week, date);
            let ranked = self.engine.sort(candidates, &context, rng);

            let budget = (origin == ShiftOrigin::PhaseTwo).then_some(run.budget).flatten();
            let placed = ranked.into_iter().find_map(|employee| {
                self.choose_shift(run, &ledger, employee, date, &slot.role, budget, rng)
            });

            let Some(shift) = placed else {
                break;
            };
            debug!(
                employee_id = %shift.employee_id,
                role = %shift.role,
                %date,
                kind = ?shift.kind,
                ?origin,
                "shift placed"
            );
            ledger = ledger.with_shift(shift.with_origin(origin));
        }
        ledger
    }

    /// Picks the shift kind for an employee and returns the first template
    /// they can take.
    ///
    /// Managers rotate through kinds by how often they already worked each
    /// one this week; other roles take the kind least covered for the role
    /// that day. Ties are broken by the random source.
    #[allow(clippy::too_many_arguments)]
    fn choose_shift<R: Rng + ?Sized>(
        &self,
        run: &Run<'_>,
        ledger: &AssignmentLedger,
        employee: &Employee,
        date: NaiveDate,
        role: &Role,
        budget: Option<Duration>,
        rng: &mut R,
    ) -> Option<Shift> {
        let location_id = run.location_id();
        let week = &run.input.week;

        let mut templates: Vec<&ShiftTemplate> = self.config.shift_templates.iter().collect();
        templates.shuffle(rng);
        if role.is_manager() {
            templates.sort_by_key(|t| ledger.kind_count(&employee.id, t.kind, week));
        } else {
            templates.sort_by_key(|t| ledger.kind_coverage(location_id, date, role, t.kind));
        }

        let scheduled = ledger.location_hours(location_id, week);
        templates
            .into_iter()
            .map(|t| t.place(&employee.id, location_id, role.clone(), date))
            .find(|shift| {
                budget.is_none_or(|b| scheduled + shift.duration() <= b)
                    && run.availability.can_take(employee, shift, ledger)
            })
    }

    fn unmet(
        &self,
        run: &Run<'_>,
        date: NaiveDate,
        slot: &SlotRequirement,
        filled: u32,
        reason: UnmetReason,
    ) -> UnmetRequirement {
        let shortfall = slot.min.saturating_sub(filled);
        warn!(
            location_id = %run.location_id(),
            %date,
            role = %slot.role,
            shortfall,
            ?reason,
            "minimum not reached"
        );
        UnmetRequirement {
            location_id: run.location_id().to_string(),
            date,
            role: slot.role.clone(),
            shortfall,
            reason,
        }
    }
}

/// Employees who may fill a `role` slot on `date`: same home location and
/// role, not yet working there that day, and available.
fn eligible<'a>(
    run: &Run<'a>,
    ledger: &AssignmentLedger,
    date: NaiveDate,
    role: &Role,
) -> Vec<&'a Employee> {
    let location_id = run.location_id();
    run.input
        .employees
        .iter()
        .filter(|e| {
            e.location_id == location_id
                && &e.role == role
                && !ledger.works_at_on(&e.id, location_id, date)
                && run.availability.is_available(e, date, ledger)
        })
        .collect()
}
