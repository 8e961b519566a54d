//! Mathematical utilities and geometry helpers shared by the extractors

use nalgebra::Vector3;

/// Mathematical constants
pub const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;
pub const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;

/// Extension trait for Vector3 operations
pub trait Vector3Ext {
    /// Euclidean distance to another point
    fn distance(&self, other: &Vector3<f32>) -> f32;

    /// Distance to another point using only the X and Y components
    fn planar_distance(&self, other: &Vector3<f32>) -> f32;

    /// Normalize the vector, returning zero vector if magnitude is zero
    fn safe_normalize(&self) -> Vector3<f32>;
}

impl Vector3Ext for Vector3<f32> {
    fn distance(&self, other: &Vector3<f32>) -> f32 {
        (self - other).norm()
    }

    fn planar_distance(&self, other: &Vector3<f32>) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    fn safe_normalize(&self) -> Vector3<f32> {
        let magnitude = self.norm();
        if magnitude > 0.0 {
            *self / magnitude
        } else {
            Vector3::zeros()
        }
    }
}

/// Radius of the circle through a triangle's vertices, from its side lengths
///
/// Uses `abc / (4 · area)` with Heron's formula for the area. Collinear
/// triangles give an infinite radius and coincident vertices give NaN; callers
/// treat both as degenerate.
pub fn circumradius(a: f32, b: f32, c: f32) -> f32 {
    let s = (a + b + c) * 0.5;
    let area = (s * (s - a) * (s - b) * (s - c)).sqrt();
    (a * b * c) / (4.0 * area)
}

/// Angle in radians subtended by a chord on a circle of the given radius
///
/// The `asin` argument is clamped to `[-1, 1]` so rounding error on a
/// diameter chord cannot produce NaN. A NaN input stays NaN.
pub fn inscribed_angle(chord: f32, radius: f32) -> f32 {
    let ratio = chord / (2.0 * radius);
    if ratio.is_nan() {
        return f32::NAN;
    }
    2.0 * ratio.clamp(-1.0, 1.0).asin()
}

/// Reverse an angle in degrees and wrap it into `[0, 360)`
pub fn wrap_reverse_degrees(angle: f32) -> f32 {
    let wrapped = (360.0 - angle).rem_euclid(360.0);
    // rem_euclid may round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Replace NaN and infinities with zero
#[inline]
pub fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}
