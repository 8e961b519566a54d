//! Roll extraction
//!
//! A fixed roll marker above (or below) the screen centre is compared with the
//! projected opposite pole. The angle at the screen origin between the two is
//! the roll about the pointing axis.

use nalgebra::Vector3;

use crate::bearing::POLE_BRANCH_ALTITUDE;
use crate::math::{RAD_TO_DEG, Vector3Ext, finite_or_zero, wrap_reverse_degrees};
use crate::sphere::{ReferenceSphere, SCREEN_RESOLUTION, origin_point};

/// Roll within this many degrees of level is reported as exactly zero
pub const ROLL_DEAD_ZONE: f32 = 3.0;
/// Roll is reported in multiples of this many degrees
pub const ROLL_RESOLUTION: f32 = 0.5;

/// Roll in degrees, `[0, 360)`, from a projected sphere
///
/// Only meaningful near the horizon; returns 0 when `|altitude|` reaches the
/// pole branch threshold or the marker, origin and pole are collinear.
pub fn extract_roll(sphere: &ReferenceSphere, altitude: f32) -> f32 {
    if altitude.abs() >= POLE_BRANCH_ALTITUDE {
        return 0.0;
    }

    let width = SCREEN_RESOLUTION;
    let origin = origin_point();
    let looking_up = altitude >= 0.0;
    let (marker, pole) = if looking_up {
        (Vector3::new(0.5 * width, 0.2 * width, 0.0), sphere.bottom())
    } else {
        (Vector3::new(0.5 * width, 0.8 * width, 0.0), sphere.top())
    };

    let marker_to_origin = marker.planar_distance(&origin);
    let marker_to_pole = marker.planar_distance(&pole);
    let origin_to_pole = origin.planar_distance(&pole);

    let cosine = (marker_to_origin * marker_to_origin + origin_to_pole * origin_to_pole
        - marker_to_pole * marker_to_pole)
        / (2.0 * marker_to_origin * origin_to_pole);
    if !(cosine < 1.0) {
        return 0.0;
    }

    let mut roll = cosine.acos() * RAD_TO_DEG;
    let offset = marker.x - pole.x;
    if (looking_up && offset < 0.0) || (!looking_up && offset > 0.0) {
        roll = -roll;
    }

    finite_or_zero(snap_roll(wrap_reverse_degrees(roll)))
}

/// Zero out jitter around level and quantize to [`ROLL_RESOLUTION`]
fn snap_roll(roll: f32) -> f32 {
    if roll <= ROLL_DEAD_ZONE || roll >= 360.0 - ROLL_DEAD_ZONE {
        0.0
    } else {
        ROLL_RESOLUTION * (roll / ROLL_RESOLUTION).round()
    }
}
