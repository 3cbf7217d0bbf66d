//! Fit a point set into a fixed-size screen rectangle.
//!
//! Screen coordinates have `y` pointing down; the returned map flips the
//! vertical axis so that geometric "up" stays up on screen.

use nalgebra::Vector2;

/// Uniform scale plus screen position of the geometric origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub origin: Vector2<f64>,
}

impl Viewport {
    /// Geometry → screen: `(origin.x + x·s, origin.y − y·s)`.
    #[inline]
    pub fn to_screen(&self, p: Vector2<f64>) -> Vector2<f64> {
        Vector2::new(self.origin.x + p.x * self.scale, self.origin.y - p.y * self.scale)
    }

    /// Screen → geometry; inverse of `to_screen`.
    #[inline]
    pub fn to_geometry(&self, q: Vector2<f64>) -> Vector2<f64> {
        Vector2::new(
            (q.x - self.origin.x) / self.scale,
            (self.origin.y - q.y) / self.scale,
        )
    }
}

/// Scale and offset mapping the bounding box of `points` into
/// `[padding, width - padding] × [padding, height - padding]`.
///
/// The box's minimum corner lands at `(padding, height - padding)`. A zero
/// extent on either axis is replaced by 1. An empty slice fits the origin.
pub fn fit_to_viewport(points: &[Vector2<f64>], width: f64, height: f64, padding: f64) -> Viewport {
    let origin_only = [Vector2::zeros()];
    let pts = if points.is_empty() {
        &origin_only[..]
    } else {
        points
    };
    let (min, max) = pts.iter().fold(
        (
            Vector2::new(f64::INFINITY, f64::INFINITY),
            Vector2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        ),
        |(lo, hi), p| (lo.inf(p), hi.sup(p)),
    );
    let extent = max - min;
    let box_w = if extent.x > 0.0 { extent.x } else { 1.0 };
    let box_h = if extent.y > 0.0 { extent.y } else { 1.0 };
    let scale = ((width - 2.0 * padding) / box_w).min((height - 2.0 * padding) / box_h);
    Viewport {
        scale,
        origin: Vector2::new(padding - min.x * scale, height - padding + min.y * scale),
    }
}
