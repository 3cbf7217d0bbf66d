//! Random two-variable LP problems (skewed radial polygons + replay tokens).
//!
//! Model
//! - `n` equally spaced angles with bounded skew, radii `base · [0.7, 1.3)`,
//!   then a small global shear.
//! - The polygon is translated so every vertex sits at least `pad` away from
//!   both axes (the origin is therefore not feasible and Phase I has work to
//!   do), and rounded to integer coordinates.
//! - One inequality per edge, oriented so the vertex centroid is inside, with
//!   a small random RHS perturbation to avoid degenerate vertices. `x1 >= 0`
//!   and `x2 >= 0` are appended.
//! - Objective coefficients are integers in `1..=objective_max`.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::LpProblem;
use crate::geom2::{halfplanes_from_polygon, Hs2};

/// Generator configuration.
#[derive(Clone, Copy, Debug)]
pub struct RandomProblemCfg {
    pub vertex_count: usize,
    /// Base radius is drawn uniformly from `[min, max)`.
    pub base_radius: (f64, f64),
    /// Per-vertex radius multiplier range.
    pub radius_variation: (f64, f64),
    /// Angular skew amplitude is drawn from this range; each angle moves by
    /// at most half of it.
    pub skew: (f64, f64),
    /// Maximum absolute shear coefficient on each axis.
    pub shear: f64,
    /// Minimum distance of every vertex from both axes.
    pub pad: f64,
    /// RHS perturbation amplitude (`c += U(-p, p)`).
    pub rhs_perturbation: f64,
    pub objective_max: u32,
}

impl Default for RandomProblemCfg {
    fn default() -> Self {
        Self {
            vertex_count: 15,
            base_radius: (15.0, 30.0),
            radius_variation: (0.7, 1.3),
            skew: (0.3, 0.7),
            shear: 0.15,
            pad: 5.0,
            rhs_perturbation: 1.0,
            objective_max: 5,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

#[inline]
fn uniform<R: Rng>(rng: &mut R, (lo, hi): (f64, f64)) -> f64 {
    lo + rng.gen::<f64>() * (hi - lo)
}

/// Integer-coordinate polygon vertices in angular order.
pub fn draw_vertices(cfg: RandomProblemCfg, tok: ReplayToken) -> Vec<Vector2<f64>> {
    let mut rng = tok.to_std_rng();
    draw_vertices_with(&cfg, &mut rng)
}

fn draw_vertices_with<R: Rng>(cfg: &RandomProblemCfg, rng: &mut R) -> Vec<Vector2<f64>> {
    let n = cfg.vertex_count.max(3);
    let base = uniform(rng, cfg.base_radius).max(1e-9);
    let skew = uniform(rng, cfg.skew);
    let mut angles: Vec<f64> = (0..n)
        .map(|k| {
            let theta = std::f64::consts::TAU * k as f64 / n as f64;
            theta + (rng.gen::<f64>() - 0.5) * skew
        })
        .collect();
    angles.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let verts: Vec<Vector2<f64>> = angles
        .into_iter()
        .map(|th| {
            let r = base * uniform(rng, cfg.radius_variation);
            Vector2::new(th.cos() * r, th.sin() * r)
        })
        .collect();

    let shear_x = (rng.gen::<f64>() * 2.0 - 1.0) * cfg.shear;
    let shear_y = (rng.gen::<f64>() * 2.0 - 1.0) * cfg.shear;
    let sheared: Vec<Vector2<f64>> = verts
        .iter()
        .map(|p| Vector2::new(p.x + shear_y * p.y, p.y + shear_x * p.x))
        .collect();

    let min = sheared.iter().fold(
        Vector2::new(f64::INFINITY, f64::INFINITY),
        |lo, p| lo.inf(p),
    );
    let shift = Vector2::new(
        (-min.x).max(0.0) + cfg.pad,
        (-min.y).max(0.0) + cfg.pad,
    );
    sheared
        .into_iter()
        .map(|p| (p + shift).map(f64::round))
        .collect()
}

/// Draw a random bounded LP whose feasible region excludes the origin.
pub fn draw_problem(cfg: RandomProblemCfg, tok: ReplayToken) -> LpProblem {
    let mut rng = tok.to_std_rng();
    let verts = draw_vertices_with(&cfg, &mut rng);
    let mut constraints: Vec<Hs2> = halfplanes_from_polygon(&verts)
        .into_iter()
        .map(|h| {
            let jitter = (rng.gen::<f64>() * 2.0 - 1.0) * cfg.rhs_perturbation;
            Hs2::new(h.n, h.c + jitter)
        })
        .collect();
    constraints.push(Hs2::from_abc(-1.0, 0.0, 0.0));
    constraints.push(Hs2::from_abc(0.0, -1.0, 0.0));

    let hi = cfg.objective_max.max(1);
    let objective = Vector2::new(
        f64::from(rng.gen_range(1..=hi)),
        f64::from(rng.gen_range(1..=hi)),
    );
    LpProblem::new(objective, constraints)
}
