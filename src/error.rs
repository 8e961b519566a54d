//! Error types for the orientation engine
//!
//! Geometry and numeric problems inside the pipeline are recovered locally and
//! never surface here. Only caller mistakes made while configuring the engine do.

use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = core::result::Result<T, OrientationError>;

/// Errors raised while configuring an [`OrientationEngine`](crate::OrientationEngine)
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrientationError {
    /// Screen rotation given in degrees was not one of 0, 90, 180 or 270
    #[error("invalid screen rotation: {0} degrees (expected 0, 90, 180 or 270)")]
    InvalidScreenRotation(i32),

    /// Display surface rotation index was outside 0..=3
    #[error("invalid display surface rotation index: {0} (expected 0..=3)")]
    InvalidSurfaceIndex(i32),
}
