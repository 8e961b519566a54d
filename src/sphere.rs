//! Reference sphere model and orthographic projector
//!
//! A fixed grid of points on the unit sphere is regenerated every cycle,
//! rotated into the device frame and projected into a square screen space.
//! The extractors then measure distances between the projected points and a
//! handful of fixed screen landmarks.

use nalgebra::{Matrix4, Vector3, Vector4};

use crate::math::DEG_TO_RAD;
use crate::types::{RotationMatrix, ScreenRotation};

/// Points on each latitude ring
pub const POINTS_PER_SEGMENT: usize = 72;
/// Number of latitude rings, from -75° to +75° in 15° steps
pub const NUM_SEGMENTS: usize = 11;
/// Total number of ring points
pub const NUM_POINTS: usize = POINTS_PER_SEGMENT * NUM_SEGMENTS;
/// Index of the equatorial ring
pub const EQUATOR_SEGMENT: usize = 5;

/// Angular spacing between ring points, in degrees
pub const AZIMUTH_STEP: f32 = 360.0 / POINTS_PER_SEGMENT as f32;
/// Angular spacing between rings, in degrees
pub const ELEVATION_STEP: f32 = 15.0;

/// Width and height of the projected screen space
pub const SCREEN_RESOLUTION: f32 = 1000.0;

/// Fixed point the device is aimed through: screen centre, pushed back by one sphere radius
pub fn reticle_point() -> Vector3<f32> {
    Vector3::new(0.5 * SCREEN_RESOLUTION, 0.5 * SCREEN_RESOLUTION, -SCREEN_RESOLUTION)
}

/// Screen centre on the projection plane
pub fn origin_point() -> Vector3<f32> {
    Vector3::new(0.5 * SCREEN_RESOLUTION, 0.5 * SCREEN_RESOLUTION, 0.0)
}

/// Projected point in screen space (x, y in `[0, 1000]`, z in `[-1000, 1000]`)
pub type ProjectedPoint = Vector3<f32>;

/// Reference grid of sphere points plus poles and the north reference
///
/// Holds model coordinates after [`reset`](Self::reset) and screen
/// coordinates after [`project`](Self::project).
#[derive(Debug, Clone)]
pub struct ReferenceSphere {
    points: [Vector3<f32>; NUM_POINTS],
    top: Vector3<f32>,
    bottom: Vector3<f32>,
    north_reference: Vector3<f32>,
}

impl ReferenceSphere {
    /// Create a sphere holding model coordinates
    pub fn new() -> Self {
        let mut sphere = Self {
            points: [Vector3::zeros(); NUM_POINTS],
            top: Vector3::zeros(),
            bottom: Vector3::zeros(),
            north_reference: Vector3::zeros(),
        };
        sphere.reset();
        sphere
    }

    /// Recompute every point from scratch in model coordinates
    pub fn reset(&mut self) {
        self.top = Vector3::new(0.0, 0.0, 1.0);
        self.bottom = Vector3::new(0.0, 0.0, -1.0);

        for segment in 0..NUM_SEGMENTS {
            let offset = segment as i32 - EQUATOR_SEGMENT as i32;
            let elevation = DEG_TO_RAD * (offset as f32 * ELEVATION_STEP);
            let (elevation_sin, elevation_cos) = elevation.sin_cos();

            for index in 0..POINTS_PER_SEGMENT {
                let azimuth = DEG_TO_RAD * (index as f32 * AZIMUTH_STEP);
                let (azimuth_sin, azimuth_cos) = azimuth.sin_cos();
                self.points[segment * POINTS_PER_SEGMENT + index] = Vector3::new(
                    azimuth_sin * elevation_cos,
                    -azimuth_cos * elevation_cos,
                    elevation_sin,
                );
            }
        }

        self.north_reference = self.points[EQUATOR_SEGMENT * POINTS_PER_SEGMENT];
    }

    /// Regenerate the sphere and project it for the given orientation
    ///
    /// The model-view matrix is the orthographic projection applied after the
    /// world-to-device rotation (the transpose of `rotation`). At 180° screen
    /// rotation the projected X and Y are reflected, since the axis remapper
    /// leaves the half turn alone.
    pub fn project(&mut self, rotation: &RotationMatrix, screen_rotation: ScreenRotation) {
        self.reset();

        let model_view = orthographic_projection() * rotation.transpose();
        let reflect = screen_rotation == ScreenRotation::Rotation180;

        for point in self.points.iter_mut() {
            *point = project_point(&model_view, point, reflect);
        }
        self.top = project_point(&model_view, &self.top, reflect);
        self.bottom = project_point(&model_view, &self.bottom, reflect);
        self.north_reference = project_point(&model_view, &self.north_reference, reflect);
    }

    /// All ring points, segment by segment
    pub fn points(&self) -> &[Vector3<f32>] {
        &self.points
    }

    /// Point at a ring index
    pub fn point(&self, index: usize) -> Vector3<f32> {
        self.points[index]
    }

    /// The +Z pole
    pub fn top(&self) -> Vector3<f32> {
        self.top
    }

    /// The -Z pole
    pub fn bottom(&self) -> Vector3<f32> {
        self.bottom
    }

    /// The equatorial point at azimuth 0
    pub fn north_reference(&self) -> Vector3<f32> {
        self.north_reference
    }
}

impl Default for ReferenceSphere {
    fn default() -> Self {
        Self::new()
    }
}

/// Orthographic projection onto a unit square with the Y axis pointing down
fn orthographic_projection() -> Matrix4<f32> {
    Matrix4::new_orthographic(0.0, 1.0, 0.0, -1.0, 0.0, 1.0)
}

fn project_point(model_view: &Matrix4<f32>, point: &Vector3<f32>, reflect: bool) -> ProjectedPoint {
    let projected = model_view * Vector4::new(point.x, -point.y, -point.z, 0.0);
    let (x, y) = if reflect {
        (-projected.x, -projected.y)
    } else {
        (projected.x, projected.y)
    };

    let width = SCREEN_RESOLUTION;
    let height = SCREEN_RESOLUTION;
    Vector3::new(
        x * 0.5 * width + width / 2.0,
        y * 0.5 * width + width / 2.0 + (height - width) / 2.0,
        projected.z * 0.5 * width,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Rotation3;

    const EPSILON: f32 = 1e-3;

    #[test]
    fn test_point_layout() {
        let sphere = ReferenceSphere::new();
        assert_eq!(sphere.points().len(), 792);

        for point in sphere.points() {
            assert!((point.norm() - 1.0).abs() < 1e-5);
        }

        // Lowest ring sits at -75°, highest at +75°
        assert!((sphere.point(0).z - (-75.0f32).to_radians().sin()).abs() < 1e-6);
        assert!((sphere.point(NUM_POINTS - 1).z - 75.0f32.to_radians().sin()).abs() < 1e-6);

        // Azimuth 0 on each ring points along -Y
        let first = sphere.point(0);
        assert!(first.x.abs() < 1e-6 && first.y < 0.0);
    }

    #[test]
    fn test_poles_and_north_reference() {
        let sphere = ReferenceSphere::new();
        assert_eq!(sphere.top(), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(sphere.bottom(), Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(sphere.north_reference(), sphere.point(360));
        assert!((sphere.north_reference() - Vector3::new(0.0, -1.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn test_identity_projection() {
        let mut sphere = ReferenceSphere::new();
        sphere.project(&RotationMatrix::identity(), ScreenRotation::Rotation0);

        assert!((sphere.top() - Vector3::new(500.0, 500.0, 1000.0)).norm() < EPSILON);
        assert!((sphere.bottom() - Vector3::new(500.0, 500.0, -1000.0)).norm() < EPSILON);
        assert!((sphere.north_reference() - Vector3::new(500.0, -500.0, 0.0)).norm() < EPSILON);

        // The bottom pole lands exactly on the reticle when held flat
        assert_eq!(sphere.bottom(), reticle_point());
    }

    #[test]
    fn test_projection_preserves_distances() {
        let rotation = Rotation3::from_euler_angles(0.7f32, -0.4, 2.1).to_homogeneous();
        let mut sphere = ReferenceSphere::new();
        sphere.project(&rotation, ScreenRotation::Rotation0);

        let origin = origin_point();
        for point in sphere.points().iter().step_by(37) {
            assert!(((point - origin).norm() - SCREEN_RESOLUTION).abs() < 0.1);
        }
        assert!(((sphere.top() - sphere.bottom()).norm() - 2.0 * SCREEN_RESOLUTION).abs() < 0.1);
    }

    #[test]
    fn test_projection_is_deterministic() {
        let rotation = Rotation3::from_euler_angles(0.2f32, 1.0, -0.5).to_homogeneous();

        let mut first = ReferenceSphere::new();
        first.project(&rotation, ScreenRotation::Rotation90);
        let mut second = ReferenceSphere::new();
        second.project(&RotationMatrix::identity(), ScreenRotation::Rotation0);
        second.project(&rotation, ScreenRotation::Rotation90);

        assert_eq!(first.points(), second.points());
        assert_eq!(first.top(), second.top());
        assert_eq!(first.bottom(), second.bottom());
        assert_eq!(first.north_reference(), second.north_reference());
    }

    #[test]
    fn test_half_turn_reflects_through_screen_centre() {
        let rotation = Rotation3::from_euler_angles(0.3f32, 0.6, 1.4).to_homogeneous();

        let mut upright = ReferenceSphere::new();
        upright.project(&rotation, ScreenRotation::Rotation0);
        let mut flipped = ReferenceSphere::new();
        flipped.project(&rotation, ScreenRotation::Rotation180);

        for (a, b) in upright.points().iter().zip(flipped.points()) {
            assert!((a.x + b.x - SCREEN_RESOLUTION).abs() < EPSILON);
            assert!((a.y + b.y - SCREEN_RESOLUTION).abs() < EPSILON);
            assert_eq!(a.z, b.z);
        }
    }
}
