//! Public value types of the simplex solver: steps, status, configuration, errors.
//!
//! - `Step`: immutable snapshot recorded after every pivot (plus one per phase end).
//! - `Status`: terminal (or in-flight) outcome of a solve.
//! - `SolveCfg`: iteration cap and pivot rule.
//! - `SolveError`: contract violations detected before any pivot runs.

use nalgebra::DVector;
use thiserror::Error;

/// Which phase produced a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Feasibility search over artificial variables.
    One,
    /// Optimization of the true objective.
    Two,
}

/// Snapshot of the basic solution after a pivot.
///
/// `solution` holds the decision variables only (slack/surplus/artificial values
/// are not exposed). During Phase I, `objective_value` is the Phase I objective,
/// i.e. minus the remaining artificial mass.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub solution: DVector<f64>,
    pub objective_value: f64,
    pub is_optimal: bool,
    pub phase: Phase,
}

/// Outcome of a solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    Optimal,
    Unbounded,
    Infeasible,
    /// In-flight; never returned by `solve`, used by consumers replaying steps.
    Searching,
    /// The pivot cap was reached before either phase terminated.
    IterationLimit,
}

impl Status {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Status::Searching)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Optimal => "optimal",
            Status::Unbounded => "unbounded",
            Status::Infeasible => "infeasible",
            Status::Searching => "searching",
            Status::IterationLimit => "iteration-limit",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entering/leaving selection rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PivotRule {
    /// Most negative reduced cost; ratio ties keep the first row found.
    #[default]
    Dantzig,
    /// Smallest improving column index; ratio ties go to the smallest basic index.
    /// Cannot cycle on degenerate tableaus; an improving column with no
    /// positive entry is reported as unbounded immediately.
    Bland,
}

/// Solver configuration.
#[derive(Clone, Copy, Debug)]
pub struct SolveCfg {
    /// Pivot cap applied to each phase separately.
    pub max_iterations: usize,
    pub rule: PivotRule,
}

impl Default for SolveCfg {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            rule: PivotRule::Dantzig,
        }
    }
}

impl SolveCfg {
    #[inline]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
    #[inline]
    pub fn with_rule(mut self, rule: PivotRule) -> Self {
        self.rule = rule;
        self
    }
}

/// Result of a solve: every recorded step plus the terminal status.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    pub steps: Vec<Step>,
    pub status: Status,
}

impl Solution {
    /// Last recorded step. `steps` is never empty after a solve.
    #[inline]
    pub fn final_step(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// Optimal point, only when the solve terminated `Optimal`.
    pub fn optimal_point(&self) -> Option<&DVector<f64>> {
        match self.status {
            Status::Optimal => self.final_step().map(|s| &s.solution),
            _ => None,
        }
    }

    /// Objective value at the optimum, only when the solve terminated `Optimal`.
    pub fn optimal_value(&self) -> Option<f64> {
        match self.status {
            Status::Optimal => self.final_step().map(|s| s.objective_value),
            _ => None,
        }
    }

    /// Number of pivots performed (terminal snapshots excluded).
    pub fn pivot_count(&self) -> usize {
        // one terminal snapshot per phase that ran
        let phases = 1 + usize::from(self.steps.iter().any(|s| s.phase == Phase::Two));
        self.steps.len().saturating_sub(phases)
    }
}

/// Malformed input rejected at construction.
#[derive(Debug, Error, PartialEq)]
pub enum SolveError {
    #[error("objective must have at least one coefficient")]
    EmptyObjective,

    #[error("dimension mismatch in {what}: expected {expected}, got {got}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("non-finite value in {what} at index {index}")]
    NonFinite { what: &'static str, index: usize },
}
