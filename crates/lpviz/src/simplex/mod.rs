//! Two-phase tableau simplex for `maximize c·x  s.t.  A x <= b, x >= 0`.
//!
//! Purpose
//! - Produce the full pivot trace (one `Step` per pivot plus a terminal snapshot
//!   per phase) so callers can replay the path the method takes over the
//!   feasible region.
//! - Report infeasibility, unboundedness and non-convergence as `Status`
//!   values; only malformed input is an error (`SolveError`).
//!
//! Conventions
//! - Rows with negative RHS are negated into `>=` form and seeded with a
//!   surplus + artificial pair; all other rows get a slack.
//! - Tolerances: `1e-12` for pivot selection, `1e-10` for artificial eviction,
//!   `1e-8` for the infeasibility test.
//! - The tableau is dense; the column count is fixed per phase.
//!
//! Code cross-refs: `SimplexSolver`, `Step`, `Status`, `SolveCfg`, `PivotRule`

mod solver;
mod tableau;
mod types;

pub use solver::{solve, SimplexSolver, INFEASIBILITY_TOL};
pub use types::{Phase, PivotRule, SolveCfg, SolveError, Solution, Status, Step};

#[cfg(test)]
mod tests;
