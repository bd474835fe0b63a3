//! Game settings
//!
//! Tuning values loaded from a RON file. A missing or invalid file falls
//! back to the built-in defaults with a logged warning; the prototypes never
//! refuse to start over a settings problem.

use std::fs;
use std::path::Path;

use macroquad::prelude::warn;
use serde::{Deserialize, Serialize};

/// Error type for settings loading
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(ron::error::SpannedError),
    Validation(String),
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SettingsError {
    fn from(e: ron::error::SpannedError) -> Self {
        SettingsError::Parse(e)
    }
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "IO error: {}", e),
            SettingsError::Parse(e) => write!(f, "Parse error: {}", e),
            SettingsError::Validation(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Player tuning for the shooter prototype.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Move speed in world units per frame
    pub speed: f32,
    /// Gun volleys per second
    pub fire_rate: f32,
    /// Bullet speed in world units per frame
    pub bullet_speed: f32,
    /// Bullet lifetime in frames
    pub bullet_lifetime: u32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            speed: 0.1,
            fire_rate: 5.0,
            bullet_speed: 0.3,
            bullet_lifetime: 60,
        }
    }
}

/// Arena tuning for the rock-paper-scissors prototype.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    /// Number of entities spawned at start
    pub entity_count: usize,
    /// Per-axis chase factor range
    pub speed_min: f32,
    pub speed_max: f32,
    /// Spawn positions are drawn from [-extent, extent] on both axes
    pub spawn_extent: f32,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            entity_count: 10,
            speed_min: 0.001,
            speed_max: 0.003,
            spawn_extent: 15.0,
        }
    }
}

/// All tuning values for both prototypes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub camera_scale: CameraScale,
    pub player: PlayerSettings,
    pub arena: ArenaSettings,
}

/// Pixels per world unit, newtyped so the default is not 0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CameraScale(pub f32);

impl Default for CameraScale {
    fn default() -> Self {
        CameraScale(32.0)
    }
}

impl Settings {
    /// Parse and validate settings from a RON file.
    pub fn read(path: impl AsRef<Path>) -> Result<Settings, SettingsError> {
        let text = fs::read_to_string(path)?;
        let settings: Settings = ron::from_str(&text)?;
        validate_settings(&settings)?;
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any problem.
    pub fn load(path: impl AsRef<Path>) -> Settings {
        match Self::read(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(
                    "Failed to load settings from {}: {}, using defaults",
                    path.as_ref().display(),
                    e
                );
                Settings::default()
            }
        }
    }
}

fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    let err = |msg: String| Err(SettingsError::Validation(msg));

    if settings.camera_scale.0 <= 0.0 {
        return err(format!(
            "camera_scale must be positive, got {}",
            settings.camera_scale.0
        ));
    }
    // A non-positive fire rate would make the gun's catch-up loop diverge
    if settings.player.fire_rate <= 0.0 {
        return err(format!(
            "fire_rate must be positive, got {}",
            settings.player.fire_rate
        ));
    }
    if settings.arena.speed_min > settings.arena.speed_max {
        return err(format!(
            "speed_min {} exceeds speed_max {}",
            settings.arena.speed_min, settings.arena.speed_max
        ));
    }
    if settings.arena.spawn_extent < 0.0 {
        return err(format!(
            "spawn_extent must be non-negative, got {}",
            settings.arena.spawn_extent
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_ron_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"(
                camera_scale: 16.0,
                player: (speed: 0.2, fire_rate: 8.0, bullet_speed: 0.5, bullet_lifetime: 30),
                arena: (entity_count: 25, speed_min: 0.002, speed_max: 0.004, spawn_extent: 10.0),
            )"#,
        )
        .unwrap();

        let settings = Settings::read(file.path()).unwrap();
        assert_eq!(settings.camera_scale.0, 16.0);
        assert_eq!(settings.player.fire_rate, 8.0);
        assert_eq!(settings.arena.entity_count, 25);
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"(player: (speed: 0.5))"#).unwrap();

        let settings = Settings::read(file.path()).unwrap();
        assert_eq!(settings.player.speed, 0.5);
        // Untouched fields fall back to defaults
        assert_eq!(settings.player.fire_rate, 5.0);
        assert_eq!(settings.camera_scale.0, 32.0);
    }

    #[test]
    fn load_falls_back_on_missing_file() {
        let settings = Settings::load("does/not/exist.ron");
        assert_eq!(settings.arena.entity_count, 10);
    }

    #[test]
    fn load_falls_back_on_bad_ron() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"(((").unwrap();
        let settings = Settings::load(file.path());
        assert_eq!(settings.player.bullet_lifetime, 60);
    }

    #[test]
    fn rejects_non_positive_fire_rate() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"(player: (fire_rate: -5.0))"#).unwrap();

        let err = Settings::read(file.path()).unwrap_err();
        assert!(matches!(err, SettingsError::Validation(_)), "got {err}");
    }

    #[test]
    fn rejects_inverted_speed_range() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"(arena: (speed_min: 0.5, speed_max: 0.1))"#)
            .unwrap();

        let err = Settings::read(file.path()).unwrap_err();
        assert!(matches!(err, SettingsError::Validation(_)), "got {err}");
    }

    #[test]
    fn rejects_negative_spawn_extent() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"(arena: (spawn_extent: -1.0))"#).unwrap();

        let err = Settings::read(file.path()).unwrap_err();
        assert!(matches!(err, SettingsError::Validation(_)), "got {err}");
    }

    #[test]
    fn rejects_zero_camera_scale() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"(camera_scale: 0.0)"#).unwrap();

        let err = Settings::read(file.path()).unwrap_err();
        assert!(matches!(err, SettingsError::Validation(_)), "got {err}");
    }

    #[test]
    fn load_falls_back_on_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"(player: (fire_rate: 0.0))"#).unwrap();

        let settings = Settings::load(file.path());
        assert_eq!(settings.player.fire_rate, 5.0);
    }
}
