//! 2D geometry for the feasible region of a two-variable LP.
//!
//! Purpose
//! - Enumerate the vertices of `{x : a·x + b·y <= c}` (pairwise boundary
//!   intersections filtered by feasibility) in rotational order.
//! - Fit the resulting polygon into a screen rectangle for rendering.
//!
//! Numerics are eps-explicit (`GeomCfg`); all functions are pure.
//!
//! Code cross-refs: `Hs2`, `GeomCfg`, `hull_from_halfplanes`, `fit_to_viewport`

mod hull;
mod types;
mod util;
mod viewport;

pub use hull::{
    centroid, hull_from_halfplanes, hull_from_halfplanes_cfg, order_by_centroid_angle,
    polygon_area,
};
pub use types::{line_intersection, GeomCfg, Hs2};
pub use util::halfplanes_from_polygon;
pub use viewport::{fit_to_viewport, Viewport};
