use nalgebra::{Rotation3, Vector3};
use sky_pointer::{EngineSettings, OrientationEngine, ScreenRotation, SensorKind};

const GRAVITY: f32 = 9.81; // m/s²

fn main() -> sky_pointer::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "sky_pointer=debug".into()),
        )
        .init();

    // Device without a rotation vector sensor, held in landscape
    let settings = EngineSettings {
        use_vector_strategy: false,
        screen_rotation: ScreenRotation::from_surface_index(1)?,
    };
    let mut engine = OrientationEngine::with_settings(settings);
    println!("Subscribe to: {:?}", engine.required_sensors());

    // Pointing 40° above the horizon, towards the north-east, rotated for landscape
    let pointing = Rotation3::from_axis_angle(&Vector3::z_axis(), 45.0f32.to_radians())
        * Rotation3::from_axis_angle(&Vector3::x_axis(), 65.0f32.to_radians())
        * Rotation3::from_axis_angle(&Vector3::z_axis(), 90.0f32.to_radians());
    let to_device = pointing.transpose();

    for _ in 0..40 {
        // replace these with actual sensor data; both are in the device frame
        let accelerometer = to_device * Vector3::new(0.0, 0.0, GRAVITY);
        let magnetic_field = to_device * Vector3::new(0.0, 22.0, -40.0); // µT

        // accelerometer samples only refresh the smoothed gravity estimate
        engine.process(accelerometer, SensorKind::Accelerometer);

        if let Some(result) = engine.process(magnetic_field, SensorKind::MagneticField) {
            println!(
                "Bearing: {:.2}, Altitude: {:.2}, Roll: {:.1}",
                result.bearing, result.altitude, result.roll
            );
        }
    }

    // Display rotated back to portrait
    engine.set_screen_rotation(ScreenRotation::Rotation0);
    engine.process(to_device * Vector3::new(0.0, 0.0, GRAVITY), SensorKind::Accelerometer);
    if let Some(result) = engine.process(to_device * Vector3::new(0.0, 22.0, -40.0), SensorKind::MagneticField) {
        println!("Portrait roll: {:.1}", result.roll);
    }

    Ok(())
}
