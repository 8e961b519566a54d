//! Sky Pointer - turns raw motion-sensor samples into where a handheld device is pointing
//!
//! The engine fuses either a rotation-vector sensor or an accelerometer +
//! magnetometer pair into a device rotation, projects a reference sphere
//! through that rotation and reads back three angles:
//!
//! - **bearing**: compass heading of the pointing direction, `[0, 360)`, 0° = north
//! - **altitude**: elevation above or below the horizon, `[-90, 90]`
//! - **roll**: rotation about the pointing axis, `[0, 360)`, snapped to 0.5°
//!
//! # Features
//!
//! - Rotation-vector fusion, or accelerometer + magnetometer with exponential smoothing
//! - Screen rotation compensation for 0°, 90°, 180° and 270° displays
//! - Pluggable nearest-point search for the bearing extractor
//! - Optional `serde` support for [`EngineSettings`]
//!
//! # Quick Start
//!
//! ```rust
//! use nalgebra::Vector3;
//! use sky_pointer::{EngineSettings, OrientationEngine, ScreenRotation, SensorKind};
//!
//! let settings = EngineSettings {
//!     use_vector_strategy: false,
//!     screen_rotation: ScreenRotation::from_degrees(0).unwrap(),
//! };
//! let mut engine = OrientationEngine::with_settings(settings);
//!
//! // Accelerometer samples only update the smoothed gravity estimate
//! assert!(engine.process(Vector3::new(0.0, 4.9, 8.5), SensorKind::Accelerometer).is_none());
//!
//! // Each magnetic field sample completes a fusion cycle
//! let result = engine
//!     .process(Vector3::new(0.0, 22.0, -40.0), SensorKind::MagneticField)
//!     .unwrap();
//!
//! println!(
//!     "bearing {:.1}°, altitude {:.1}°, roll {:.1}°",
//!     result.bearing, result.altitude, result.roll
//! );
//! ```
//!
//! The library emits `tracing` events but never installs a subscriber.

pub mod altitude;
pub mod axes;
pub mod bearing;
mod engine;
mod error;
pub mod fusion;
mod math;
pub mod roll;
pub mod search;
pub mod sphere;
mod types;

// Re-export the public surface
pub use altitude::extract_altitude;
pub use axes::{AxesAlignment, axes_swap, remap_for_screen};
pub use bearing::extract_bearing;
pub use engine::OrientationEngine;
pub use error::{OrientationError, Result};
pub use fusion::{FusionFilter, SmoothedSample};
pub use math::{DEG_TO_RAD, RAD_TO_DEG, Vector3Ext, circumradius, finite_or_zero, inscribed_angle, wrap_reverse_degrees};
pub use roll::extract_roll;
pub use search::{LinearScan, NearestPoint, PointLocator};
pub use sphere::ReferenceSphere;
pub use types::*;
