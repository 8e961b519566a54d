//! Sensor fusion: turns raw sensor samples into a rotation matrix
//!
//! Two strategies are available and one is chosen when the engine is built:
//! the fused rotation-vector sensor is trusted as-is, while the
//! accelerometer + magnetometer fallback smooths both streams with an
//! exponential moving average and only emits a matrix when a magnetic-field
//! sample arrives.

use nalgebra::{Quaternion, UnitQuaternion, Vector3};

use crate::math::Vector3Ext;
use crate::types::{RotationMatrix, SensorKind};

/// Smoothing factor applied to accelerometer and magnetometer samples
pub const SMOOTHING_FACTOR: f32 = 0.1;

/// Smallest usable `|field × gravity|`; below this the vectors are treated as parallel
const MIN_EAST_MAGNITUDE: f32 = 0.1;

const ROTATION_VECTOR_SENSORS: &[SensorKind] = &[SensorKind::RotationVector];
const ACCEL_MAG_SENSORS: &[SensorKind] = &[SensorKind::Accelerometer, SensorKind::MagneticField];

/// Exponentially smoothed 3-vector
///
/// `value = alpha * sample + (1 - alpha) * value`, starting from zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothedSample {
    alpha: f32,
    value: Vector3<f32>,
}

impl SmoothedSample {
    /// Create a smoothed sample with the given smoothing factor
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha,
            value: Vector3::zeros(),
        }
    }

    /// Fold a raw sample into the average and return the new value
    ///
    /// Samples with a NaN or infinite component are dropped and leave the
    /// average unchanged.
    pub fn update(&mut self, sample: Vector3<f32>) -> Vector3<f32> {
        if !sample.iter().all(|component| component.is_finite()) {
            tracing::trace!(x = sample.x, y = sample.y, z = sample.z, "non-finite sample dropped");
            return self.value;
        }
        self.value = sample * self.alpha + self.value * (1.0 - self.alpha);
        self.value
    }

    /// Current smoothed value
    pub fn value(&self) -> Vector3<f32> {
        self.value
    }

    /// Forget all history
    pub fn reset(&mut self) {
        self.value = Vector3::zeros();
    }
}

impl Default for SmoothedSample {
    fn default() -> Self {
        Self::new(SMOOTHING_FACTOR)
    }
}

/// Fusion strategy turning raw samples into rotation matrices
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FusionFilter {
    /// Fused rotation-vector sensor, used without further smoothing
    RotationVector,
    /// Smoothed accelerometer and magnetometer, gated on magnetometer samples
    AccelMag {
        acceleration: SmoothedSample,
        magnetic_field: SmoothedSample,
    },
}

impl FusionFilter {
    /// Create the filter for the selected strategy
    pub fn new(use_rotation_vector: bool) -> Self {
        if use_rotation_vector {
            FusionFilter::RotationVector
        } else {
            FusionFilter::AccelMag {
                acceleration: SmoothedSample::default(),
                magnetic_field: SmoothedSample::default(),
            }
        }
    }

    /// Feed one raw sample
    ///
    /// Returns a rotation matrix when the sample completes a fusion cycle:
    /// every rotation-vector sample for [`FusionFilter::RotationVector`], and
    /// every magnetic-field sample for [`FusionFilter::AccelMag`]. Samples of a
    /// kind the strategy does not consume are ignored.
    pub fn update(&mut self, kind: SensorKind, sample: Vector3<f32>) -> Option<RotationMatrix> {
        match (self, kind) {
            (FusionFilter::RotationVector, SensorKind::RotationVector) => {
                Some(rotation_matrix_from_vector(sample))
            }
            (FusionFilter::AccelMag { acceleration, .. }, SensorKind::Accelerometer) => {
                acceleration.update(sample);
                None
            }
            (
                FusionFilter::AccelMag {
                    acceleration,
                    magnetic_field,
                },
                SensorKind::MagneticField,
            ) => {
                let field = magnetic_field.update(sample);
                let matrix = rotation_matrix_from_gravity(acceleration.value(), field)
                    .unwrap_or_else(|| {
                        tracing::debug!(
                            gravity_x = acceleration.value().x,
                            gravity_y = acceleration.value().y,
                            gravity_z = acceleration.value().z,
                            "gravity and magnetic field are parallel, using identity rotation"
                        );
                        RotationMatrix::identity()
                    });
                Some(matrix)
            }
            (_, kind) => {
                tracing::trace!(?kind, "sample not consumed by active fusion strategy");
                None
            }
        }
    }

    /// Sensor kinds this strategy consumes
    pub fn required_sensors(&self) -> &'static [SensorKind] {
        match self {
            FusionFilter::RotationVector => ROTATION_VECTOR_SENSORS,
            FusionFilter::AccelMag { .. } => ACCEL_MAG_SENSORS,
        }
    }

    /// Whether this is the rotation-vector strategy
    pub fn uses_rotation_vector(&self) -> bool {
        matches!(self, FusionFilter::RotationVector)
    }

    /// Clear any smoothing state
    pub fn reset(&mut self) {
        if let FusionFilter::AccelMag {
            acceleration,
            magnetic_field,
        } = self
        {
            acceleration.reset();
            magnetic_field.reset();
        }
    }
}

/// Convert a rotation-vector sample into a device-to-world rotation matrix
///
/// The sample holds the vector part of a unit quaternion, `axis · sin(θ/2)`.
/// The scalar part is recovered as `sqrt(1 - |v|²)`, clamped at zero.
pub fn rotation_matrix_from_vector(rotation_vector: Vector3<f32>) -> RotationMatrix {
    let w_squared = 1.0 - rotation_vector.norm_squared();
    let w = if w_squared > 0.0 { w_squared.sqrt() } else { 0.0 };

    let quaternion = Quaternion::new(w, rotation_vector.x, rotation_vector.y, rotation_vector.z);
    if quaternion.norm_squared() == 0.0 || !quaternion.norm_squared().is_finite() {
        return RotationMatrix::identity();
    }

    UnitQuaternion::from_quaternion(quaternion).to_homogeneous()
}

/// Build a device-to-world rotation matrix from gravity and magnetic field
///
/// Rows of the result are the east, north and up axes expressed in device
/// coordinates: `east = field × gravity`, `north = gravity × east`. Returns
/// `None` when the two vectors are (nearly) parallel or missing.
pub fn rotation_matrix_from_gravity(
    gravity: Vector3<f32>,
    magnetic_field: Vector3<f32>,
) -> Option<RotationMatrix> {
    let east = magnetic_field.cross(&gravity);
    if !(east.norm() >= MIN_EAST_MAGNITUDE) {
        return None;
    }

    let east = east.safe_normalize();
    let up = gravity.safe_normalize();
    let north = up.cross(&east);

    let mut matrix = RotationMatrix::identity();
    for (row, axis) in [east, north, up].iter().enumerate() {
        matrix[(row, 0)] = axis.x;
        matrix[(row, 1)] = axis.y;
        matrix[(row, 2)] = axis.z;
    }
    Some(matrix)
}
