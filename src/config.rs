//! Game settings
//!
//! Settings come from an optional RON file. Every field has a default, so a
//! config only needs the values it changes and a missing file means
//! "all defaults".

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use macroquad::math::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default config location, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config.ron";

/// Error type for config loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// How the shoot key drives the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShootMode {
    /// Key-down toggles the firing pose and fires one bullet
    #[default]
    Fire,
    /// Key-down and key-up both toggle the pose; no bullets
    ToggleBothEdges,
    /// Key-down raises the pose and fires one bullet, key-up lowers it
    Hold,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: i32,
    pub height: i32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            title: "tilehop".to_string(),
        }
    }
}

/// Size of the low-res surface the game draws into
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: f32,
    pub height: f32,
}

impl DisplayConfig {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { width: 320.0, height: 240.0 }
    }
}

/// Per-tick movement constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Added to vertical velocity every tick
    pub gravity: f32,
    /// Fall speed cap
    pub terminal_velocity: f32,
    /// Vertical velocity set by a jump
    pub jump_velocity: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.1,
            terminal_velocity: 5.0,
            jump_velocity: -3.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub size: (f32, f32),
    /// Hitbox in the shoot pose
    pub shoot_size: (f32, f32),
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            size: (10.0, 11.0),
            shoot_size: (10.0, 10.0),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub size: (f32, f32),
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self { size: (8.0, 15.0) }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    /// Horizontal distance per tick
    pub speed: f32,
    pub size: (f32, f32),
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self { speed: 3.0, size: (4.0, 2.0) }
    }
}

/// Top-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub display: DisplayConfig,
    /// Target ticks per second
    pub fps: u32,
    /// Map file to play
    pub level: String,
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub bullet: BulletConfig,
    /// Falling below this y respawns the player
    pub death_y: f32,
    /// Number of background clouds
    pub clouds: usize,
    pub shoot_mode: ShootMode,
    /// Camera closes 1/n of the distance to its target per tick
    pub camera_smoothing: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            display: DisplayConfig::default(),
            fps: 60,
            level: "assets/maps/map.json".to_string(),
            physics: PhysicsConfig::default(),
            player: PlayerConfig::default(),
            enemy: EnemyConfig::default(),
            bullet: BulletConfig::default(),
            death_y: 400.0,
            clouds: 16,
            shoot_mode: ShootMode::default(),
            camera_smoothing: 30.0,
        }
    }
}

impl GameConfig {
    /// Parse from RON text
    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(s)?)
    }

    /// Load from a file, falling back to defaults if it doesn't exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => {
                let config = Self::from_ron_str(&contents)?;
                tracing::info!(path = %path.display(), "loaded config");
                Ok(config)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Target seconds per tick (None when unlimited)
    pub fn frame_time(&self) -> Option<f64> {
        (self.fps > 0).then(|| 1.0 / self.fps as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_tuning() {
        let config = GameConfig::default();
        assert_eq!(config.physics.gravity, 0.1);
        assert_eq!(config.physics.terminal_velocity, 5.0);
        assert_eq!(config.physics.jump_velocity, -3.0);
        assert_eq!(config.bullet.speed, 3.0);
        assert_eq!(config.fps, 60);
        assert_eq!(config.shoot_mode, ShootMode::Fire);
    }

    #[test]
    fn test_partial_ron_keeps_other_defaults() {
        let config = GameConfig::from_ron_str(
            "(fps: 30, physics: (gravity: 0.2), shoot_mode: ToggleBothEdges)",
        )
        .unwrap();
        assert_eq!(config.fps, 30);
        assert_eq!(config.physics.gravity, 0.2);
        assert_eq!(config.physics.terminal_velocity, 5.0);
        assert_eq!(config.shoot_mode, ShootMode::ToggleBothEdges);
        assert_eq!(config.display.width, 320.0);
    }

    #[test]
    fn test_invalid_ron_is_an_error() {
        assert!(matches!(
            GameConfig::from_ron_str("(fps: \"fast\")"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GameConfig::load_or_default(dir.path().join("nope.ron")).unwrap();
        assert_eq!(config.level, "assets/maps/map.json");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ron");
        std::fs::write(&path, "(death_y: 250.0, clouds: 4)").unwrap();
        let config = GameConfig::load_or_default(&path).unwrap();
        assert_eq!(config.death_y, 250.0);
        assert_eq!(config.clouds, 4);
    }

    #[test]
    fn test_frame_time() {
        let mut config = GameConfig::default();
        assert_eq!(config.frame_time(), Some(1.0 / 60.0));
        config.fps = 0;
        assert_eq!(config.frame_time(), None);
    }
}
