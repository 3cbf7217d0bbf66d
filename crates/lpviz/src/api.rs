//! Curated surface for the command-line runner and the examples.
//!
//! Prefer these re-exports over reaching into submodules; they are what the
//! drawing side needs: a problem, its polygon and viewport, a solve, frames.

pub use crate::geom2::{fit_to_viewport, hull_from_halfplanes, Hs2, Viewport};
pub use crate::playback::{CancelToken, Frame, Playback, PlaybackCfg, Speed};
pub use crate::problem::rand::{draw_problem, RandomProblemCfg, ReplayToken};
pub use crate::problem::LpProblem;
pub use crate::simplex::{PivotRule, SolveCfg, SolveError, Solution, Status, Step};

use nalgebra::Vector2;

/// Viewport padding used by the canvas view.
pub const CANVAS_PADDING: f64 = 40.0;

/// Feasible polygon of `problem` and the viewport that fits it together with
/// the origin (the default start point of a solve).
pub fn polygon_and_viewport(problem: &LpProblem, width: f64, height: f64) -> (Vec<Vector2<f64>>, Viewport) {
    let hull = problem.feasible_polygon();
    let mut fit = hull.clone();
    fit.push(Vector2::zeros());
    let vp = fit_to_viewport(&fit, width, height, CANVAS_PADDING);
    (hull, vp)
}
