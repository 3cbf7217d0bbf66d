//! Two-variable LP problems as handed to the solver and the renderer.
//!
//! `LpProblem` stores `maximize objective·x` subject to half-planes
//! `a·x1 + b·x2 <= c`. Non-negativity of `x1, x2` is implied by the solver
//! and made explicit in `feasible_polygon`.

pub mod rand;

use nalgebra::Vector2;

use crate::geom2::{hull_from_halfplanes, Hs2};
use crate::simplex::{self, SolveCfg, SolveError, Solution};

#[derive(Clone, Debug, PartialEq)]
pub struct LpProblem {
    pub objective: Vector2<f64>,
    pub constraints: Vec<Hs2>,
}

/// Built-in problem shown before anything is randomized.
const DEMO_CONSTRAINTS: [[f64; 3]; 25] = [
    [9.0, 10.0, 899.0],
    [7.0, -7.0, 63.0],
    [3.0, 3.0, 327.0],
    [0.0, 8.0, 425.0],
    [-2.0, 4.0, 116.0],
    [8.0, 2.0, 453.0],
    [2.0, 17.0, 1087.0],
    [-10.0, 3.0, -67.0],
    [1.0, 8.0, 431.0],
    [3.0, 6.0, 354.0],
    [-5.0, -2.0, -151.0],
    [-12.0, 4.0, 81.0],
    [-4.0, -8.0, -328.0],
    [-8.0, 3.0, -9.0],
    [2.0, -6.0, -133.0],
    [-4.0, -19.0, -475.0],
    [-4.0, 2.0, -56.0],
    [-7.0, -4.0, -218.0],
    [-2.0, -11.0, -152.0],
    [-2.0, -7.0, -124.0],
    [13.0, 2.0, 581.0],
    [-4.0, -18.0, -493.0],
    [-4.0, -5.0, -311.0],
    [15.0, -10.0, 645.0],
    [1.0, 3.0, 163.0],
];

impl LpProblem {
    #[inline]
    pub fn new(objective: Vector2<f64>, constraints: Vec<Hs2>) -> Self {
        Self {
            objective,
            constraints,
        }
    }

    /// From `[c1, c2]` and `[a, b, c]` rows.
    pub fn from_rows(objective: [f64; 2], rows: &[[f64; 3]]) -> Self {
        Self::new(
            Vector2::new(objective[0], objective[1]),
            rows.iter().map(|&r| Hs2::from(r)).collect(),
        )
    }

    /// Maximize `3x1 + 2x2` over a 25-sided region that excludes the origin.
    pub fn demo() -> Self {
        Self::from_rows([3.0, 2.0], &DEMO_CONSTRAINTS)
    }

    /// Split into solver inputs `(c, A, b)`.
    pub fn to_standard(&self) -> (Vec<f64>, Vec<Vec<f64>>, Vec<f64>) {
        let c = vec![self.objective.x, self.objective.y];
        let a = self
            .constraints
            .iter()
            .map(|h| vec![h.n.x, h.n.y])
            .collect();
        let b = self.constraints.iter().map(|h| h.c).collect();
        (c, a, b)
    }

    pub fn solve(&self, cfg: SolveCfg) -> Result<Solution, SolveError> {
        let (c, a, b) = self.to_standard();
        simplex::solve(&c, &a, &b, cfg)
    }

    /// Constraints plus the implicit `x1 >= 0`, `x2 >= 0`.
    pub fn with_nonnegativity(&self) -> Vec<Hs2> {
        let mut hs = self.constraints.clone();
        hs.push(Hs2::from_abc(-1.0, 0.0, 0.0));
        hs.push(Hs2::from_abc(0.0, -1.0, 0.0));
        hs
    }

    /// Vertices of the region the solver optimizes over, in rotational order.
    pub fn feasible_polygon(&self) -> Vec<Vector2<f64>> {
        hull_from_halfplanes(&self.with_nonnegativity())
    }

    #[inline]
    pub fn objective_at(&self, p: Vector2<f64>) -> f64 {
        self.objective.dot(&p)
    }

    /// Membership in the solver's region (including non-negativity).
    pub fn is_feasible(&self, p: Vector2<f64>, eps: f64) -> bool {
        p.x >= -eps && p.y >= -eps && self.constraints.iter().all(|h| h.satisfies_eps(p, eps))
    }

    /// Best polygon vertex by objective value. Only meaningful for bounded regions.
    pub fn best_vertex(&self) -> Option<(Vector2<f64>, f64)> {
        self.feasible_polygon()
            .into_iter()
            .map(|p| (p, self.objective_at(p)))
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    }
}
