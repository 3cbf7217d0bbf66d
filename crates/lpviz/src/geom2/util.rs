use nalgebra::Vector2;

use super::hull::centroid;
use super::types::Hs2;

/// One half-plane per polygon edge, oriented so the vertex centroid is inside.
///
/// Edges with coincident endpoints are skipped (their normal would be zero).
pub fn halfplanes_from_polygon(vertices: &[Vector2<f64>]) -> Vec<Hs2> {
    let m = vertices.len();
    if m < 3 {
        return Vec::new();
    }
    let center = centroid(vertices);
    let mut hs = Vec::with_capacity(m);
    for k in 0..m {
        let p = vertices[k];
        let q = vertices[(k + 1) % m];
        let edge = q - p;
        let n = Vector2::new(edge.y, -edge.x);
        if n.norm() <= 0.0 {
            continue;
        }
        let c = n.dot(&p);
        // flip so that n·center <= c
        if n.dot(&center) < c {
            hs.push(Hs2::new(n, c));
        } else {
            hs.push(Hs2::new(-n, -c));
        }
    }
    hs
}
