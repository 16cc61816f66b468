//! Candidate rules and rule engine for employee selection.
//!
//! When a slot has more eligible employees than openings, the generator asks
//! a [`RuleEngine`] to order them. Rules score employees against the current
//! [`SelectionContext`]; ties left after every rule are broken by the
//! injected random source, so equally eligible employees (managers in
//! particular) do not always receive the same shifts.
//!
//! # Usage
//!
//! ```
//! use u_roster::dispatching::{rules, RuleEngine, TieBreaker};
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::FewestShifts)
//!     .with_rule(rules::FewestHours)
//!     .with_final_tie_breaker(TieBreaker::Random);
//! ```
//!
//! # References
//!
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod context;
mod engine;
pub mod rules;

pub use context::SelectionContext;
pub use engine::{RuleEngine, TieBreaker};

use crate::models::Employee;
use std::fmt::Debug;

/// Score returned by a candidate rule.
///
/// Lower scores = higher priority (selected first).
pub type RuleScore = f64;

/// A rule that scores how strongly an employee should be preferred.
///
/// # Score Convention
/// **Lower score = higher priority.**
pub trait CandidateRule: Send + Sync + Debug {
    /// Rule name (e.g., "FEWEST_SHIFTS").
    fn name(&self) -> &'static str;

    /// Scores an employee in the current selection context.
    fn evaluate(&self, employee: &Employee, context: &SelectionContext<'_>) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
