//! Rule engine for multi-criteria candidate ordering.
//!
//! Rules are applied in sequence; the next rule is consulted only on ties.
//! Remaining ties go to the final tie-breaker.
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Ordering;
use std::sync::Arc;

use super::{rules, CandidateRule, RuleScore, SelectionContext};
use crate::models::Employee;

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Uniformly random order from the injected source (default).
    #[default]
    Random,
    /// Deterministic by employee ID (lexicographic).
    ById,
}

/// A composable rule engine for candidate prioritization.
///
/// # Example
/// ```
/// use u_roster::dispatching::{rules, RuleEngine};
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::FewestShifts)
///     .with_rule(rules::FewestHours);
/// assert_eq!(engine.rule_names(), vec!["FEWEST_SHIFTS", "FEWEST_HOURS"]);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn CandidateRule>>,
    tie_breaker: TieBreaker,
    epsilon: f64,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::Random,
            epsilon: 1e-9,
        }
    }

    /// Fewest shifts first, then fewest hours, then random.
    pub fn spread_hours() -> Self {
        Self::new()
            .with_rule(rules::FewestShifts)
            .with_rule(rules::FewestHours)
    }

    /// Appends a rule.
    pub fn with_rule<R: CandidateRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Orders candidates, highest priority first.
    ///
    /// With [`TieBreaker::Random`] the candidates are shuffled before a
    /// stable sort, so rule ties end up in random order.
    pub fn sort<'e, R: Rng + ?Sized>(
        &self,
        mut candidates: Vec<&'e Employee>,
        context: &SelectionContext<'_>,
        rng: &mut R,
    ) -> Vec<&'e Employee> {
        if candidates.len() < 2 {
            return candidates;
        }
        // Scores are computed once; the ledger does not change during a sort.
        match self.tie_breaker {
            TieBreaker::Random => candidates.shuffle(rng),
            TieBreaker::ById => candidates.sort_by(|a, b| a.id.cmp(&b.id)),
        }
        let mut scored: Vec<(Vec<RuleScore>, &'e Employee)> = candidates
            .into_iter()
            .map(|e| (self.evaluate(e, context), e))
            .collect();
        scored.sort_by(|(a, _), (b, _)| self.compare_scores(a, b));
        scored.into_iter().map(|(_, e)| e).collect()
    }

    /// Evaluates a single employee and returns scores from each rule.
    pub fn evaluate(&self, employee: &Employee, context: &SelectionContext<'_>) -> Vec<RuleScore> {
        self.rules
            .iter()
            .map(|rule| rule.evaluate(employee, context))
            .collect()
    }

    fn compare_scores(&self, a: &[RuleScore], b: &[RuleScore]) -> Ordering {
        for (score_a, score_b) in a.iter().zip(b) {
            if (score_a - score_b).abs() > self.epsilon {
                return score_a.partial_cmp(score_b).unwrap_or(Ordering::Equal);
            }
        }
        Ordering::Equal
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::spread_hours()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
