//! Nearest-point search over projected sphere points
//!
//! The bearing extractor only needs "which front-facing point is closest to
//! the reticle". That question sits behind [`PointLocator`] so the linear scan
//! can be swapped for a spatial index without touching the extractors.

use nalgebra::Vector3;

use crate::math::Vector3Ext;

/// Closest point found by a [`PointLocator`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestPoint {
    /// Index into the searched point slice
    pub index: usize,
    /// Euclidean distance to the target
    pub distance: f32,
}

/// Finds the front-facing point closest to a target
pub trait PointLocator {
    /// Return the point with negative Z closest to `target`, or `None` if no
    /// point faces the viewer. Ties resolve to the lowest index.
    ///
    /// The returned index must address `points`; the bearing extractor
    /// reports 0 for an index outside the slice.
    fn nearest_front_facing(&self, points: &[Vector3<f32>], target: &Vector3<f32>) -> Option<NearestPoint>;
}

/// Brute-force scan over every point
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearScan;

impl PointLocator for LinearScan {
    fn nearest_front_facing(&self, points: &[Vector3<f32>], target: &Vector3<f32>) -> Option<NearestPoint> {
        let mut nearest: Option<NearestPoint> = None;
        for (index, point) in points.iter().enumerate() {
            if point.z >= 0.0 {
                continue;
            }
            let distance = target.distance(point);
            if nearest.is_none_or(|best| distance < best.distance) {
                nearest = Some(NearestPoint { index, distance });
            }
        }
        nearest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_back_facing_points() {
        let points = [
            Vector3::new(0.0, 0.0, 1.0),  // back-facing, closest
            Vector3::new(5.0, 0.0, -1.0),
            Vector3::new(2.0, 0.0, -1.0),
            Vector3::new(9.0, 0.0, -1.0),
        ];
        let target = Vector3::new(0.0, 0.0, -1.0);

        let nearest = LinearScan.nearest_front_facing(&points, &target).unwrap();
        assert_eq!(nearest.index, 2);
        assert!((nearest.distance - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_ties_keep_first_point() {
        let points = [
            Vector3::new(1.0, 0.0, -1.0),
            Vector3::new(-1.0, 0.0, -1.0),
        ];
        let nearest = LinearScan
            .nearest_front_facing(&points, &Vector3::new(0.0, 0.0, -1.0))
            .unwrap();
        assert_eq!(nearest.index, 0);
    }

    #[test]
    fn test_no_front_facing_points() {
        let points = [Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 3.0)];
        assert!(LinearScan.nearest_front_facing(&points, &Vector3::zeros()).is_none());
        assert!(LinearScan.nearest_front_facing(&[], &Vector3::zeros()).is_none());
    }
}
