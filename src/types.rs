//! Core types and configuration for the orientation engine

use nalgebra::Matrix4;

use crate::error::{OrientationError, Result};

/// Homogeneous device-to-world rotation matrix.
///
/// Element `(row, col)` matches the platform's row-major rotation matrix, so
/// multiplying a device-frame vector yields East-North-Up world coordinates.
pub type RotationMatrix = Matrix4<f32>;

/// Kind of raw sensor sample delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    /// Accelerometer reading in m/s² (device frame, includes gravity)
    Accelerometer,
    /// Magnetic field reading in µT (device frame)
    MagneticField,
    /// Fused rotation vector `axis · sin(θ/2)` (x, y, z components)
    RotationVector,
}

/// Rotation of the display relative to the device's natural orientation
///
/// Only the four right-angle rotations exist. Converting from raw values fails
/// with an [`OrientationError`] instead of silently defaulting.
///
/// # Example
/// ```
/// use sky_pointer::ScreenRotation;
///
/// assert_eq!(ScreenRotation::from_degrees(90), Ok(ScreenRotation::Rotation90));
/// assert!(ScreenRotation::from_degrees(45).is_err());
/// assert_eq!(ScreenRotation::from_surface_index(3), Ok(ScreenRotation::Rotation270));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "i32", into = "i32"))]
pub enum ScreenRotation {
    /// Natural orientation
    #[default]
    Rotation0,
    /// Rotated a quarter turn
    Rotation90,
    /// Upside down
    Rotation180,
    /// Rotated three quarter turns
    Rotation270,
}

impl ScreenRotation {
    /// Parse a rotation expressed in degrees
    pub fn from_degrees(degrees: i32) -> Result<Self> {
        match degrees {
            0 => Ok(Self::Rotation0),
            90 => Ok(Self::Rotation90),
            180 => Ok(Self::Rotation180),
            270 => Ok(Self::Rotation270),
            other => Err(OrientationError::InvalidScreenRotation(other)),
        }
    }

    /// Parse a display surface rotation index (0 = natural, 1 = 90°, 2 = 180°, 3 = 270°)
    pub fn from_surface_index(index: i32) -> Result<Self> {
        match index {
            0 => Ok(Self::Rotation0),
            1 => Ok(Self::Rotation90),
            2 => Ok(Self::Rotation180),
            3 => Ok(Self::Rotation270),
            other => Err(OrientationError::InvalidSurfaceIndex(other)),
        }
    }

    /// Rotation in degrees
    pub fn degrees(self) -> i32 {
        match self {
            Self::Rotation0 => 0,
            Self::Rotation90 => 90,
            Self::Rotation180 => 180,
            Self::Rotation270 => 270,
        }
    }
}

impl TryFrom<i32> for ScreenRotation {
    type Error = OrientationError;

    fn try_from(degrees: i32) -> Result<Self> {
        Self::from_degrees(degrees)
    }
}

impl From<ScreenRotation> for i32 {
    fn from(rotation: ScreenRotation) -> Self {
        rotation.degrees()
    }
}

/// Engine settings
///
/// Both fields can be changed later through the engine.
///
/// # Example
/// ```
/// use sky_pointer::{EngineSettings, OrientationEngine, ScreenRotation};
///
/// let settings = EngineSettings {
///     use_vector_strategy: false,           // accelerometer + magnetometer
///     screen_rotation: ScreenRotation::Rotation90,
/// };
/// let engine = OrientationEngine::with_settings(settings);
/// assert_eq!(engine.settings(), settings);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineSettings {
    /// Use the fused rotation-vector sensor instead of accelerometer + magnetometer
    ///
    /// The rotation vector is preferred whenever the platform provides one.
    pub use_vector_strategy: bool,
    /// Current display rotation
    pub screen_rotation: ScreenRotation,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            use_vector_strategy: true,
            screen_rotation: ScreenRotation::default(),
        }
    }
}

/// Orientation angles produced by one completed fusion cycle
///
/// All angles are in degrees and always finite.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrientationResult {
    /// Compass bearing, `[0, 360)`, 0° = north
    pub bearing: f32,
    /// Elevation above (positive) or below (negative) the horizon, `[-90, 90]`
    pub altitude: f32,
    /// Rotation about the pointing axis, `[0, 360)`, snapped to 0.5°
    pub roll: f32,
}
