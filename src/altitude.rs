//! Altitude (pitch) extraction
//!
//! The projected bottom pole, the screen origin and the reticle form a
//! triangle. The angle its pole-to-reticle chord subtends on the triangle's
//! circumcircle gives the elevation of the pointing direction.

use crate::math::{RAD_TO_DEG, Vector3Ext, circumradius, finite_or_zero, inscribed_angle};
use crate::sphere::{ReferenceSphere, origin_point, reticle_point};

/// Altitude in degrees, `[-90, 90]`, from a projected sphere
///
/// Positive when the reticle is nearer the top pole than the bottom pole.
/// Degenerate triangles (device held exactly flat) yield 0.
pub fn extract_altitude(sphere: &ReferenceSphere) -> f32 {
    let reticle = reticle_point();
    let origin = origin_point();
    let bottom = sphere.bottom();

    let to_bottom = reticle.distance(&bottom);
    let to_top = reticle.distance(&sphere.top());

    let origin_to_bottom = origin.distance(&bottom);
    let origin_to_reticle = origin.distance(&reticle);
    let radius = circumradius(origin_to_bottom, origin_to_reticle, to_bottom);

    let mut altitude = RAD_TO_DEG * inscribed_angle(to_bottom, radius) - 90.0;
    if to_bottom > to_top {
        altitude = -altitude;
    }

    finite_or_zero(altitude).clamp(-90.0, 90.0)
}
