//! Basic 2D types and tolerances for feasible-region geometry.
//!
//! - `GeomCfg`: centralizes epsilons for parallel-line, feasibility and
//!   vertex-merge checks.
//! - `Hs2`: closed half-plane `n·x <= c`, i.e. the triple `(a, b, c)` of
//!   `a·x + b·y <= c`.

use nalgebra::Vector2;

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug)]
pub struct GeomCfg {
    /// Boundary lines with `|det| < eps_det` are treated as parallel.
    pub eps_det: f64,
    /// Allowed constraint violation for a point to count as feasible.
    pub eps_feas: f64,
    /// Vertices closer than `eps_merge · (1 + |p|)` are the same vertex.
    pub eps_merge: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_det: 1e-9,
            eps_feas: 1e-9,
            eps_merge: 1e-9,
        }
    }
}

/// Closed half‑plane `n · x <= c` (no normalization required here).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hs2 {
    pub n: Vector2<f64>,
    pub c: f64,
}

impl Hs2 {
    #[inline]
    pub fn new(n: Vector2<f64>, c: f64) -> Self {
        Self { n, c }
    }
    /// `a·x + b·y <= c`
    #[inline]
    pub fn from_abc(a: f64, b: f64, c: f64) -> Self {
        Self::new(Vector2::new(a, b), c)
    }
    #[inline]
    pub fn abc(&self) -> [f64; 3] {
        [self.n.x, self.n.y, self.c]
    }
    /// Signed violation `n·p - c` (positive outside).
    #[inline]
    pub fn violation(&self, p: Vector2<f64>) -> f64 {
        self.n.dot(&p) - self.c
    }
    #[inline]
    pub fn satisfies_eps(&self, p: Vector2<f64>, eps: f64) -> bool {
        self.n.dot(&p) <= self.c + eps
    }
}

impl From<[f64; 3]> for Hs2 {
    #[inline]
    fn from([a, b, c]: [f64; 3]) -> Self {
        Hs2::from_abc(a, b, c)
    }
}

/// Intersection of the boundary lines of two half-planes (Cramer's rule).
///
/// `None` for (near-)parallel lines or a non-finite result.
pub fn line_intersection(h1: Hs2, h2: Hs2, eps_det: f64) -> Option<Vector2<f64>> {
    let det = h1.n.x * h2.n.y - h2.n.x * h1.n.y;
    if det.abs() < eps_det {
        return None;
    }
    let x = (h1.c * h2.n.y - h2.c * h1.n.y) / det;
    let y = (h1.n.x * h2.c - h2.n.x * h1.c) / det;
    let p = Vector2::new(x, y);
    if p.x.is_finite() && p.y.is_finite() {
        Some(p)
    } else {
        None
    }
}
