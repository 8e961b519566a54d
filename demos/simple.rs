use nalgebra::{UnitQuaternion, Vector3};
use sky_pointer::{OrientationEngine, SensorKind};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "sky_pointer=debug".into()),
        )
        .init();

    let mut engine = OrientationEngine::new();

    for step in 0..12 {
        // replace this with actual rotation vector sensor data
        let heading = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), (step as f32 * 30.0).to_radians());
        let raise = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 60.0f32.to_radians());
        let rotation_vector = (heading * raise).imag();

        if let Some(result) = engine.process(rotation_vector, SensorKind::RotationVector) {
            println!(
                "Bearing: {:.2}, Altitude: {:.2}, Roll: {:.1}",
                result.bearing, result.altitude, result.roll
            );
        }
    }
}
