//! Bearing (azimuth) extraction
//!
//! Near the horizon the bearing comes from the sphere ring point closest to
//! the reticle, refined by interpolating towards its nearer ring neighbour.
//! Close to the zenith or nadir the rings collapse, so the projected north
//! reference is compared against fixed compass markers instead.

use nalgebra::Vector3;

use crate::math::{RAD_TO_DEG, Vector3Ext, circumradius, finite_or_zero, inscribed_angle, wrap_reverse_degrees};
use crate::search::{NearestPoint, PointLocator};
use crate::sphere::{
    AZIMUTH_STEP, POINTS_PER_SEGMENT, ReferenceSphere, SCREEN_RESOLUTION, origin_point, reticle_point,
};

/// Absolute altitude at and above which the pole branch is used
pub const POLE_BRANCH_ALTITUDE: f32 = 75.0;

/// Ring point closest to the reticle and the neighbour it is interpolated against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingBracket {
    /// Index of the closest point
    pub closest: usize,
    /// Index of the nearer of its two ring neighbours
    pub neighbor: usize,
    /// Whichever of `closest` and `neighbor` sits at the lower azimuth
    pub left: usize,
    /// Distance from the target to the left point
    pub left_distance: f32,
    /// Distance from the target to the other point
    pub right_distance: f32,
}

/// Bearing in degrees, `[0, 360)`, from a projected sphere
pub fn extract_bearing<L: PointLocator + ?Sized>(sphere: &ReferenceSphere, altitude: f32, locator: &L) -> f32 {
    let bearing = if altitude.abs() < POLE_BRANCH_ALTITUDE {
        horizon_bearing(sphere, locator)
    } else {
        pole_bearing(sphere, altitude)
    };
    finite_or_zero(bearing)
}

/// The two ring neighbours of a point, wrapping within its own segment
///
/// The second candidate is the wrap-around neighbour for the first and last
/// point of a segment.
pub fn ring_neighbors(index: usize) -> (usize, usize) {
    let position = index % POINTS_PER_SEGMENT;
    if position == 0 {
        (index + 1, index + POINTS_PER_SEGMENT - 1)
    } else if position == POINTS_PER_SEGMENT - 1 {
        (index - 1, index + 1 - POINTS_PER_SEGMENT)
    } else {
        (index + 1, index - 1)
    }
}

/// Pair the closest point with its nearer ring neighbour and order them by azimuth
///
/// Returns `None` when the closest index or one of its neighbours lies outside `points`.
pub fn bracket_nearest(
    points: &[Vector3<f32>],
    target: &Vector3<f32>,
    nearest: NearestPoint,
) -> Option<RingBracket> {
    let closest = nearest.index;
    points.get(closest)?;
    let position = closest % POINTS_PER_SEGMENT;
    let (next, wrap_or_previous) = ring_neighbors(closest);

    let next_distance = target.distance(points.get(next)?);
    let other_distance = target.distance(points.get(wrap_or_previous)?);
    let (neighbor, neighbor_distance) = if next_distance < other_distance {
        (next, next_distance)
    } else {
        (wrap_or_previous, other_distance)
    };

    // Across the wrap seam the index order no longer matches azimuth order:
    // the last point of a ring sits left of the first one.
    let closest_is_left = if neighbor < closest {
        position == POINTS_PER_SEGMENT - 1 && neighbor == wrap_or_previous
    } else {
        !(position == 0 && neighbor == wrap_or_previous)
    };

    let bracket = if closest_is_left {
        RingBracket {
            closest,
            neighbor,
            left: closest,
            left_distance: nearest.distance,
            right_distance: neighbor_distance,
        }
    } else {
        RingBracket {
            closest,
            neighbor,
            left: neighbor,
            left_distance: neighbor_distance,
            right_distance: nearest.distance,
        }
    };
    Some(bracket)
}

fn horizon_bearing<L: PointLocator + ?Sized>(sphere: &ReferenceSphere, locator: &L) -> f32 {
    let reticle = reticle_point();
    let Some(nearest) = locator.nearest_front_facing(sphere.points(), &reticle) else {
        tracing::debug!("no front-facing sphere points, bearing defaults to 0");
        return 0.0;
    };

    let Some(bracket) = bracket_nearest(sphere.points(), &reticle, nearest) else {
        tracing::debug!(index = nearest.index, "nearest point is not on the sphere, bearing defaults to 0");
        return 0.0;
    };
    let chord = sphere.point(bracket.closest).distance(&sphere.point(bracket.neighbor));
    let radius = circumradius(bracket.left_distance, bracket.right_distance, chord);
    let fraction = inscribed_angle(bracket.right_distance, radius).cos() * bracket.left_distance / chord;

    let azimuth = (bracket.left % POINTS_PER_SEGMENT) as f32 * AZIMUTH_STEP;
    wrap_reverse_degrees(azimuth + AZIMUTH_STEP * fraction - 180.0)
}

fn pole_bearing(sphere: &ReferenceSphere, altitude: f32) -> f32 {
    let width = SCREEN_RESOLUTION;
    let north = Vector3::new(0.5 * width, 0.2 * width, 0.0);
    let south = Vector3::new(0.5 * width, 0.8 * width, 0.0);
    let west = Vector3::new(0.2 * width, 0.5 * width, 0.0);
    let east = Vector3::new(0.8 * width, 0.5 * width, 0.0);

    let reference = sphere.north_reference();
    let origin = origin_point();

    let to_north = reference.distance(&north);
    let to_south = reference.distance(&south);
    let to_west = reference.distance(&west);
    let to_east = reference.distance(&east);

    let radius = circumradius(origin.distance(&reference), origin.distance(&north), to_north);
    let mut bearing = -RAD_TO_DEG * inscribed_angle(to_north, radius);

    if to_north < to_south {
        if to_west < to_east {
            bearing = 360.0 - bearing;
        }
    } else if to_west < to_east {
        bearing += 180.0;
    } else {
        bearing = 180.0 - bearing;
    }

    if altitude > 0.0 {
        bearing = 180.0 - bearing;
    }
    wrap_reverse_degrees(bearing)
}
