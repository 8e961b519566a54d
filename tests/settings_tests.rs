use sky_pointer::{EngineSettings, OrientationError, ScreenRotation};

#[test]
fn test_screen_rotation_conversions() {
    for (degrees, index, rotation) in [
        (0, 0, ScreenRotation::Rotation0),
        (90, 1, ScreenRotation::Rotation90),
        (180, 2, ScreenRotation::Rotation180),
        (270, 3, ScreenRotation::Rotation270),
    ] {
        assert_eq!(ScreenRotation::from_degrees(degrees), Ok(rotation));
        assert_eq!(ScreenRotation::from_surface_index(index), Ok(rotation));
        assert_eq!(rotation.degrees(), degrees);
        assert_eq!(i32::from(rotation), degrees);
        assert_eq!(ScreenRotation::try_from(degrees), Ok(rotation));
    }
}

#[test]
fn test_invalid_screen_rotation_fails() {
    for degrees in [-90, 45, 360, 1] {
        assert_eq!(
            ScreenRotation::from_degrees(degrees),
            Err(OrientationError::InvalidScreenRotation(degrees))
        );
    }
    for index in [-1, 4, 90] {
        assert_eq!(
            ScreenRotation::from_surface_index(index),
            Err(OrientationError::InvalidSurfaceIndex(index))
        );
    }
}

#[test]
fn test_error_messages_name_the_value() {
    let message = OrientationError::InvalidScreenRotation(45).to_string();
    assert!(message.contains("45"), "{}", message);
    let message = OrientationError::InvalidSurfaceIndex(7).to_string();
    assert!(message.contains('7'), "{}", message);
}

#[test]
fn test_default_settings_prefer_rotation_vector() {
    let settings = EngineSettings::default();
    assert!(settings.use_vector_strategy);
    assert_eq!(settings.screen_rotation, ScreenRotation::Rotation0);
}

fn landscape_settings(surface_index: i32) -> sky_pointer::Result<EngineSettings> {
    Ok(EngineSettings {
        use_vector_strategy: false,
        screen_rotation: ScreenRotation::from_surface_index(surface_index)?,
    })
}

#[test]
fn test_bad_surface_index_propagates() {
    let settings = landscape_settings(1).unwrap();
    assert_eq!(settings.screen_rotation, ScreenRotation::Rotation90);

    let error = landscape_settings(5).unwrap_err();
    assert_eq!(error, OrientationError::InvalidSurfaceIndex(5));
}

#[cfg(feature = "serde")]
mod serde_settings {
    use super::*;

    #[test]
    fn test_settings_from_toml() {
        let settings: EngineSettings = toml::from_str(
            r#"
            use_vector_strategy = false
            screen_rotation = 270
            "#,
        )
        .unwrap();

        assert_eq!(
            settings,
            EngineSettings {
                use_vector_strategy: false,
                screen_rotation: ScreenRotation::Rotation270,
            }
        );
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: EngineSettings = toml::from_str("screen_rotation = 90").unwrap();
        assert!(settings.use_vector_strategy);
        assert_eq!(settings.screen_rotation, ScreenRotation::Rotation90);

        let settings: EngineSettings = toml::from_str("").unwrap();
        assert_eq!(settings, EngineSettings::default());
    }

    #[test]
    fn test_invalid_rotation_fails_at_load() {
        let result: Result<EngineSettings, _> = toml::from_str("screen_rotation = 45");
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_round_trip() {
        let settings = EngineSettings {
            use_vector_strategy: false,
            screen_rotation: ScreenRotation::Rotation180,
        };
        let text = toml::to_string(&settings).unwrap();
        assert!(text.contains("screen_rotation = 180"), "{}", text);

        let parsed: EngineSettings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }
}
