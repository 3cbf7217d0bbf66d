//! Feasible-region vertices from half-planes.
//!
//! Every pair of boundary lines is intersected; points violating any
//! half-plane are discarded and the survivors are ordered by angle around
//! their centroid. For a bounded, non-empty region this is exactly the vertex
//! cycle. An empty region, or an unbounded one whose boundary lines never meet
//! inside it, yields no vertices.

use nalgebra::Vector2;

use super::types::{line_intersection, GeomCfg, Hs2};

/// Shorthand for `hull_from_halfplanes_cfg(constraints, GeomCfg::default())`.
#[inline]
pub fn hull_from_halfplanes(constraints: &[Hs2]) -> Vec<Vector2<f64>> {
    hull_from_halfplanes_cfg(constraints, GeomCfg::default())
}

/// Vertices of `{x : h.n·x <= h.c for all h}` in rotational order.
pub fn hull_from_halfplanes_cfg(constraints: &[Hs2], cfg: GeomCfg) -> Vec<Vector2<f64>> {
    let mut pts: Vec<Vector2<f64>> = Vec::new();
    for (i, &h1) in constraints.iter().enumerate() {
        for &h2 in &constraints[i + 1..] {
            let Some(p) = line_intersection(h1, h2, cfg.eps_det) else {
                continue;
            };
            if !constraints.iter().all(|h| h.satisfies_eps(p, cfg.eps_feas)) {
                continue;
            }
            // three or more lines through one vertex
            let merge = cfg.eps_merge * (1.0 + p.norm());
            if pts.iter().any(|q| (q - p).norm() < merge) {
                continue;
            }
            pts.push(p);
        }
    }
    order_by_centroid_angle(&mut pts);
    pts
}

/// Sort points by `atan2` around their centroid (stable; ties keep input order).
pub fn order_by_centroid_angle(pts: &mut [Vector2<f64>]) {
    if pts.is_empty() {
        return;
    }
    let centroid = centroid(pts);
    pts.sort_by(|p, q| {
        let ap = (p.y - centroid.y).atan2(p.x - centroid.x);
        let aq = (q.y - centroid.y).atan2(q.x - centroid.x);
        ap.partial_cmp(&aq).unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Arithmetic mean of the points (origin for an empty slice).
pub fn centroid(pts: &[Vector2<f64>]) -> Vector2<f64> {
    if pts.is_empty() {
        return Vector2::zeros();
    }
    pts.iter().fold(Vector2::zeros(), |acc, p| acc + p) / pts.len() as f64
}

/// Signed shoelace area; positive for counterclockwise order.
pub fn polygon_area(pts: &[Vector2<f64>]) -> f64 {
    let m = pts.len();
    if m < 3 {
        return 0.0;
    }
    let twice: f64 = (0..m)
        .map(|k| {
            let p = pts[k];
            let q = pts[(k + 1) % m];
            p.x * q.y - p.y * q.x
        })
        .sum();
    0.5 * twice
}
