//! Two-phase simplex with a replayable pivot trace, plus the 2D geometry
//! needed to draw what it does.
//!
//! Modules
//! - `simplex`: dimension-generic tableau solver returning every pivot step.
//! - `geom2`: feasible-polygon vertices from half-planes, viewport fitting.
//! - `problem`: two-variable problems (demo, random generator).
//! - `playback`: eased frame sequence over a solve's steps, cancellable.

pub mod api;
pub mod geom2;
pub mod playback;
pub mod problem;
pub mod simplex;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::{DVector, Vector2 as Vec2};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom2::{fit_to_viewport, hull_from_halfplanes, GeomCfg, Hs2, Viewport};
    pub use crate::playback::{CancelToken, Frame, Playback, PlaybackCfg, Speed};
    pub use crate::problem::rand::{draw_problem, RandomProblemCfg, ReplayToken};
    pub use crate::problem::LpProblem;
    pub use crate::simplex::{
        solve, PivotRule, SimplexSolver, SolveCfg, SolveError, Solution, Status, Step,
    };
    pub use nalgebra::{DVector, Vector2 as Vec2};
}
