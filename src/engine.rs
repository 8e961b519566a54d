//! Orientation engine tying fusion, projection and extraction together

use nalgebra::Vector3;

use crate::altitude::extract_altitude;
use crate::axes::remap_for_screen;
use crate::bearing::extract_bearing;
use crate::fusion::FusionFilter;
use crate::roll::extract_roll;
use crate::search::{LinearScan, PointLocator};
use crate::sphere::ReferenceSphere;
use crate::types::{EngineSettings, OrientationResult, RotationMatrix, ScreenRotation, SensorKind};

/// Sensor-to-sky orientation engine
///
/// Feed it raw sensor samples as they arrive; whenever a sample completes a
/// fusion cycle the engine remaps the rotation for the current screen
/// rotation, projects the reference sphere and reports bearing, altitude and
/// roll.
///
/// The nearest-point search used for the bearing is pluggable through
/// [`PointLocator`]; [`LinearScan`] is used by default.
#[derive(Debug, Clone)]
pub struct OrientationEngine<L: PointLocator = LinearScan> {
    /// Engine settings
    settings: EngineSettings,
    /// Active fusion strategy and its smoothing state
    filter: FusionFilter,
    /// Sphere buffer, regenerated every cycle
    sphere: ReferenceSphere,
    /// Nearest-point search for the bearing extractor
    locator: L,
    /// Last published result
    latest: Option<OrientationResult>,
}

impl OrientationEngine<LinearScan> {
    /// Create an engine with default settings
    pub fn new() -> Self {
        Self::with_settings(EngineSettings::default())
    }

    /// Create an engine with the given settings
    pub fn with_settings(settings: EngineSettings) -> Self {
        Self::with_locator(settings, LinearScan)
    }
}

impl Default for OrientationEngine<LinearScan> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: PointLocator> OrientationEngine<L> {
    /// Create an engine using a custom nearest-point search
    pub fn with_locator(settings: EngineSettings, locator: L) -> Self {
        tracing::debug!(
            use_vector_strategy = settings.use_vector_strategy,
            screen_rotation = settings.screen_rotation.degrees(),
            "orientation engine configured"
        );

        Self {
            settings,
            filter: FusionFilter::new(settings.use_vector_strategy),
            sphere: ReferenceSphere::new(),
            locator,
            latest: None,
        }
    }

    /// Process one raw sensor sample
    ///
    /// Returns `Some` only when the sample completes a fusion cycle: every
    /// rotation-vector sample with the vector strategy, every magnetic-field
    /// sample otherwise.
    ///
    /// # Example
    /// ```
    /// use nalgebra::Vector3;
    /// use sky_pointer::{OrientationEngine, SensorKind};
    ///
    /// let mut engine = OrientationEngine::new();
    /// let result = engine
    ///     .process(Vector3::new(0.3, 0.1, 0.2), SensorKind::RotationVector)
    ///     .unwrap();
    /// assert!((0.0..360.0).contains(&result.bearing));
    ///
    /// // The vector strategy ignores raw accelerometer samples
    /// assert!(engine.process(Vector3::new(0.0, 0.0, 9.81), SensorKind::Accelerometer).is_none());
    /// ```
    pub fn process(&mut self, sample: Vector3<f32>, kind: SensorKind) -> Option<OrientationResult> {
        let matrix = self.filter.update(kind, sample)?;
        Some(self.orientation_from_matrix(&matrix))
    }

    /// Run remap, projection and extraction on a device-to-world rotation matrix
    ///
    /// The result is published as the latest result.
    pub fn orientation_from_matrix(&mut self, matrix: &RotationMatrix) -> OrientationResult {
        let screen_rotation = self.settings.screen_rotation;
        let remapped = remap_for_screen(matrix, screen_rotation);
        self.sphere.project(&remapped, screen_rotation);

        let altitude = extract_altitude(&self.sphere);
        let bearing = extract_bearing(&self.sphere, altitude, &self.locator);
        let roll = extract_roll(&self.sphere, altitude);

        let result = OrientationResult {
            bearing,
            altitude,
            roll,
        };
        tracing::trace!(bearing, altitude, roll, "orientation updated");

        self.latest = Some(result);
        result
    }

    /// Last published result, if any cycle has completed
    pub fn latest(&self) -> Option<OrientationResult> {
        self.latest
    }

    /// Last bearing in degrees, 0 before the first cycle
    pub fn bearing(&self) -> f32 {
        self.latest.map_or(0.0, |result| result.bearing)
    }

    /// Last altitude in degrees, 0 before the first cycle
    pub fn altitude(&self) -> f32 {
        self.latest.map_or(0.0, |result| result.altitude)
    }

    /// Last roll in degrees, 0 before the first cycle
    pub fn roll(&self) -> f32 {
        self.latest.map_or(0.0, |result| result.roll)
    }

    /// Update the display rotation used by subsequent cycles
    pub fn set_screen_rotation(&mut self, screen_rotation: ScreenRotation) {
        if screen_rotation != self.settings.screen_rotation {
            tracing::debug!(
                from = self.settings.screen_rotation.degrees(),
                to = screen_rotation.degrees(),
                "screen rotation changed"
            );
        }
        self.settings.screen_rotation = screen_rotation;
    }

    /// Switch fusion strategy, discarding any smoothing state
    pub fn set_strategy(&mut self, use_vector_strategy: bool) {
        tracing::debug!(use_vector_strategy, "fusion strategy selected");
        self.settings.use_vector_strategy = use_vector_strategy;
        self.filter = FusionFilter::new(use_vector_strategy);
    }

    /// Sensor kinds the host should subscribe to for the active strategy
    pub fn required_sensors(&self) -> &'static [SensorKind] {
        self.filter.required_sensors()
    }

    /// Clear smoothing state and the latest result
    pub fn reset(&mut self) {
        self.filter.reset();
        self.latest = None;
    }

    /// Current settings
    pub fn settings(&self) -> EngineSettings {
        self.settings
    }

    /// Sphere as projected by the last cycle
    pub fn sphere(&self) -> &ReferenceSphere {
        &self.sphere
    }
}
