//! Rotation matrix remapping for display rotation
//!
//! When the display is rotated a quarter turn, the device axes no longer line
//! up with the screen axes. Remapping the rotation matrix keeps "up" on screen
//! consistent with the physical device.
//!
//! # Example
//! ```
//! use nalgebra::Vector3;
//! use sky_pointer::{AxesAlignment, axes_swap};
//!
//! let row = Vector3::new(1.0, 2.0, 3.0);
//!
//! // Quarter turn: new X = -old Y, new Y = old X
//! let remapped = axes_swap(row, AxesAlignment::NyPxPz);
//!
//! assert_eq!(remapped.x, -2.0);
//! assert_eq!(remapped.y, 1.0);
//! assert_eq!(remapped.z, 3.0);
//! ```

use nalgebra::Vector3;

use crate::types::{RotationMatrix, ScreenRotation};

/// Axes alignment describing where each output axis is taken from.
///
/// The three letter-pairs specify the source for output X, Y, Z respectively:
/// `P` = positive, `N` = negative, followed by the source axis.
///
/// Only the alignments produced by screen rotation are represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxesAlignment {
    /// +X+Y+Z (identity - no remapping)
    #[default]
    PxPyPz,
    /// -Y+X+Z
    NyPxPz,
    /// +Y-X+Z
    PyNxPz,
}

impl AxesAlignment {
    /// Alignment that corrects a rotation matrix for the given display rotation
    ///
    /// The half turn is left to the projection step, which reflects the
    /// projected points instead.
    pub fn for_screen(rotation: ScreenRotation) -> Self {
        match rotation {
            ScreenRotation::Rotation0 | ScreenRotation::Rotation180 => AxesAlignment::PxPyPz,
            ScreenRotation::Rotation90 => AxesAlignment::NyPxPz,
            ScreenRotation::Rotation270 => AxesAlignment::PyNxPz,
        }
    }
}

/// Swaps vector components according to the alignment.
#[inline]
pub fn axes_swap(vector: Vector3<f32>, alignment: AxesAlignment) -> Vector3<f32> {
    match alignment {
        AxesAlignment::PxPyPz => vector,
        AxesAlignment::NyPxPz => Vector3::new(-vector.y, vector.x, vector.z),
        AxesAlignment::PyNxPz => Vector3::new(vector.y, -vector.x, vector.z),
    }
}

/// Remaps a rotation matrix for the current display rotation.
///
/// At 90° the device Y axis becomes screen X and device -X becomes screen Y;
/// at 270° device -Y becomes screen X and device X becomes screen Y. Each row
/// of the 3×3 rotation block has its components swapped; the homogeneous row
/// and column are reset to identity.
pub fn remap_for_screen(matrix: &RotationMatrix, rotation: ScreenRotation) -> RotationMatrix {
    let alignment = AxesAlignment::for_screen(rotation);
    if alignment == AxesAlignment::PxPyPz {
        return *matrix;
    }

    let mut remapped = RotationMatrix::identity();
    for row in 0..3 {
        let source = Vector3::new(matrix[(row, 0)], matrix[(row, 1)], matrix[(row, 2)]);
        let target = axes_swap(source, alignment);
        remapped[(row, 0)] = target.x;
        remapped[(row, 1)] = target.y;
        remapped[(row, 2)] = target.z;
    }
    remapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Rotation3, Vector3};

    #[test]
    fn test_identity_alignment() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(axes_swap(v, AxesAlignment::PxPyPz), v);
    }

    #[test]
    fn test_quarter_turn_alignments_are_inverses() {
        let test_vectors = [
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(-5.0, 0.0, 7.0),
            Vector3::new(0.1, -0.2, 0.3),
        ];

        for &v in &test_vectors {
            let there = axes_swap(v, AxesAlignment::NyPxPz);
            let back = axes_swap(there, AxesAlignment::PyNxPz);
            assert!((back - v).norm() < 1e-6);
            assert!((there.norm() - v.norm()).abs() < 1e-5);
        }
    }

    #[test]
    fn test_half_turn_passes_through() {
        let matrix = Rotation3::from_euler_angles(0.3f32, -0.2, 1.1).to_homogeneous();
        assert_eq!(remap_for_screen(&matrix, ScreenRotation::Rotation0), matrix);
        assert_eq!(remap_for_screen(&matrix, ScreenRotation::Rotation180), matrix);
    }

    #[test]
    fn test_quarter_turn_remap_swaps_columns() {
        let matrix = Rotation3::from_euler_angles(0.3f32, -0.2, 1.1).to_homogeneous();

        let r90 = remap_for_screen(&matrix, ScreenRotation::Rotation90);
        let r270 = remap_for_screen(&matrix, ScreenRotation::Rotation270);
        for row in 0..3 {
            assert_eq!(r90[(row, 0)], -matrix[(row, 1)]);
            assert_eq!(r90[(row, 1)], matrix[(row, 0)]);
            assert_eq!(r90[(row, 2)], matrix[(row, 2)]);

            assert_eq!(r270[(row, 0)], matrix[(row, 1)]);
            assert_eq!(r270[(row, 1)], -matrix[(row, 0)]);
            assert_eq!(r270[(row, 2)], matrix[(row, 2)]);
        }
        assert_eq!(r90[(3, 3)], 1.0);
        assert_eq!(r90[(0, 3)], 0.0);
    }

    #[test]
    fn test_remap_undoes_device_quarter_turn() {
        // Turning the device a quarter turn about its screen normal and then
        // remapping recovers the original orientation.
        let base = Rotation3::from_euler_angles(0.4f32, 0.1, -0.7);
        let quarter = Rotation3::from_axis_angle(&Vector3::z_axis(), core::f32::consts::FRAC_PI_2);

        let turned = (base * quarter).to_homogeneous();
        let remapped = remap_for_screen(&turned, ScreenRotation::Rotation90);
        assert!((remapped - base.to_homogeneous()).norm() < 1e-5);

        let turned = (base * quarter.inverse()).to_homogeneous();
        let remapped = remap_for_screen(&turned, ScreenRotation::Rotation270);
        assert!((remapped - base.to_homogeneous()).norm() < 1e-5);
    }

    #[test]
    fn test_remap_preserves_rotation() {
        let matrix = Rotation3::from_euler_angles(-1.0f32, 0.5, 2.0).to_homogeneous();
        for rotation in [ScreenRotation::Rotation90, ScreenRotation::Rotation270] {
            let remapped = remap_for_screen(&matrix, rotation);
            let block = remapped.fixed_view::<3, 3>(0, 0).into_owned();
            assert!((block.determinant() - 1.0).abs() < 1e-5);
            assert!((block * block.transpose() - nalgebra::Matrix3::identity()).norm() < 1e-5);
        }
    }
}
