//! Two-phase simplex driver.
//!
//! Phase I maximizes minus the artificial sum from the slack/artificial basis;
//! if artificial mass remains the problem is infeasible. Otherwise artificials
//! are evicted and compacted away and Phase II optimizes the true objective
//! from the feasible basis Phase I left behind.

use nalgebra::DVector;

use super::tableau::{Entering, Tableau};
use super::types::{Phase, SolveCfg, SolveError, Solution, Status, Step};

/// Residual artificial mass above which Phase I declares infeasibility.
pub const INFEASIBILITY_TOL: f64 = 1e-8;

/// One-shot solver for `maximize c·x  s.t.  A x <= b, x >= 0`.
///
/// `solve` consumes the instance; build a fresh one per problem.
#[derive(Clone, Debug)]
pub struct SimplexSolver {
    cost: DVector<f64>,
    tableau: Tableau,
}

impl SimplexSolver {
    /// Validate dimensions and finiteness, then build the Phase I tableau.
    pub fn new(objective: &[f64], matrix: &[Vec<f64>], rhs: &[f64]) -> Result<Self, SolveError> {
        validate(objective, matrix, rhs)?;
        let n = objective.len();
        Ok(Self {
            cost: DVector::from_column_slice(objective),
            tableau: Tableau::phase_one(matrix, rhs, n),
        })
    }

    #[inline]
    pub fn num_vars(&self) -> usize {
        self.tableau.n
    }

    #[inline]
    pub fn num_constraints(&self) -> usize {
        self.tableau.num_rows()
    }

    /// Run both phases and return every recorded step with the terminal status.
    pub fn solve(mut self, cfg: SolveCfg) -> Solution {
        let mut steps = Vec::new();

        let phase_one = self.run_phase(Phase::One, &mut steps, cfg);
        if phase_one == Status::IterationLimit {
            tracing::debug!(pivots = steps.len() - 1, "phase I hit the iteration cap");
            return Solution {
                steps,
                status: Status::IterationLimit,
            };
        }
        let mass = self.tableau.artificial_mass();
        if mass > INFEASIBILITY_TOL {
            tracing::debug!(mass, "phase I left artificial mass; infeasible");
            return Solution {
                steps,
                status: Status::Infeasible,
            };
        }

        let dropped = self.tableau.drop_artificial();
        tracing::debug!(
            dropped,
            rows = self.tableau.num_rows(),
            cols = self.tableau.cols(),
            "phase I feasible"
        );
        self.tableau.set_phase_two_objective(&self.cost);

        let status = self.run_phase(Phase::Two, &mut steps, cfg);
        tracing::debug!(%status, steps = steps.len(), "phase II done");
        Solution { steps, status }
    }

    /// Pivot until optimal, unbounded, or `cfg.max_iterations` pivots. Pushes a
    /// step per pivot plus one terminal step.
    fn run_phase(&mut self, phase: Phase, steps: &mut Vec<Step>, cfg: SolveCfg) -> Status {
        let mut pivots = 0usize;
        let status = loop {
            let enter = match self.tableau.select_entering(cfg.rule) {
                Entering::Optimal => break Status::Optimal,
                Entering::Ray(col) => {
                    tracing::trace!(?phase, col, "improving ray");
                    break Status::Unbounded;
                }
                Entering::Column(col) => col,
            };
            if pivots >= cfg.max_iterations {
                break Status::IterationLimit;
            }
            let Some(leave) = self.tableau.select_leaving(enter, cfg.rule) else {
                break Status::Unbounded;
            };
            tracing::trace!(?phase, enter, leave, "pivot");
            self.tableau.pivot(enter, leave);
            pivots += 1;
            steps.push(self.snapshot(phase, false));
        };
        steps.push(self.snapshot(phase, status == Status::Optimal));
        status
    }

    fn snapshot(&self, phase: Phase, is_optimal: bool) -> Step {
        Step {
            solution: self.tableau.solution(),
            objective_value: self.tableau.objective_value(),
            is_optimal,
            phase,
        }
    }
}

/// Build a solver and run it.
///
/// Pre: `matrix.len() == rhs.len()`, every row has `objective.len()` entries,
/// all values finite. Post: `steps` is non-empty.
pub fn solve(
    objective: &[f64],
    matrix: &[Vec<f64>],
    rhs: &[f64],
    cfg: SolveCfg,
) -> Result<Solution, SolveError> {
    Ok(SimplexSolver::new(objective, matrix, rhs)?.solve(cfg))
}

fn validate(objective: &[f64], matrix: &[Vec<f64>], rhs: &[f64]) -> Result<(), SolveError> {
    if objective.is_empty() {
        return Err(SolveError::EmptyObjective);
    }
    if matrix.len() != rhs.len() {
        return Err(SolveError::DimensionMismatch {
            what: "rhs",
            expected: matrix.len(),
            got: rhs.len(),
        });
    }
    if let Some(index) = objective.iter().position(|v| !v.is_finite()) {
        return Err(SolveError::NonFinite {
            what: "objective",
            index,
        });
    }
    for (i, row) in matrix.iter().enumerate() {
        if row.len() != objective.len() {
            return Err(SolveError::DimensionMismatch {
                what: "constraint row",
                expected: objective.len(),
                got: row.len(),
            });
        }
        if row.iter().any(|v| !v.is_finite()) {
            return Err(SolveError::NonFinite {
                what: "constraint row",
                index: i,
            });
        }
    }
    if let Some(index) = rhs.iter().position(|v| !v.is_finite()) {
        return Err(SolveError::NonFinite { what: "rhs", index });
    }
    Ok(())
}
