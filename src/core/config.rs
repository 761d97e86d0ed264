//! Gameplay tuning loaded from an external RON file.
//!
//! Every value has a default, so a partial file (or no file at all) still
//! produces a playable configuration.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::error::ConfigError;

/// Location of the tuning file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/data/game_config.ron";

/// All gameplay tuning, grouped by owning module.
#[derive(Resource, Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerConfig,
    pub abilities: AbilityConfig,
    pub enemies: EnemyConfig,
    pub projectiles: ProjectileConfig,
    pub books: BookConfig,
    pub world: WorldConfig,
}

/// Player movement and camera tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Horizontal speed in units per second
    pub move_speed: f32,
    /// Vertical velocity applied on jump
    pub jump_velocity: f32,
    /// Downward acceleration in units per second squared
    pub gravity: f32,
    /// Distance above the ground that still counts as standing on it
    pub ground_snap: f32,
    pub blink_distance: f32,
    /// Degrees of rotation per pixel of mouse motion
    pub mouse_sensitivity: f32,
    pub eye_height: f32,
    /// Drop height above the terrain at session start
    pub spawn_height: f32,
    pub start_health: i32,
    /// Maximum distance at which a book can be read
    pub interact_reach: f32,
    /// Pitch clamp in degrees
    pub pitch_limit: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 15.0,
            jump_velocity: 12.0,
            gravity: 30.0,
            ground_snap: 0.1,
            blink_distance: 15.0,
            mouse_sensitivity: 0.2,
            eye_height: 0.6,
            spawn_height: 5.0,
            start_health: 100,
            interact_reach: 6.0,
            pitch_limit: 89.0,
        }
    }
}

/// Cooldown and effect duration of a triggered ability, in seconds.
///
/// A field left out of the file is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ActiveTuning {
    pub cooldown: f32,
    pub duration: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AbilityConfig {
    pub blink: ActiveTuning,
    pub shield: ActiveTuning,
    /// Seconds into a session before the first movement ability wakes up
    pub awakening_delay: f32,
}

impl Default for AbilityConfig {
    fn default() -> Self {
        Self {
            blink: ActiveTuning {
                cooldown: 10.0,
                duration: 0.0,
            },
            shield: ActiveTuning {
                cooldown: 20.0,
                duration: 5.0,
            },
            awakening_delay: 5.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub base_speed: f32,
    /// Speed multiplier applied to newly spawned enemies
    pub difficulty: f32,
    pub chase_radius: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    pub damage: i32,
    /// Height of the body center above the terrain
    pub hover_height: f32,
    /// Cosmetic hop on every strike
    pub attack_pop: f32,
    pub max_enemies: usize,
    pub spawn_interval: f32,
    pub spawn_distance_min: f32,
    pub spawn_distance_max: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            base_speed: 4.0,
            difficulty: 1.0,
            chase_radius: 40.0,
            attack_range: 2.0,
            attack_cooldown: 1.5,
            damage: 15,
            hover_height: 1.0,
            attack_pop: 0.5,
            max_enemies: 15,
            spawn_interval: 3.0,
            spawn_distance_min: 30.0,
            spawn_distance_max: 80.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub speed: f32,
    pub lifetime: f32,
    pub hit_radius: f32,
    /// Spawn distance in front of the camera
    pub muzzle_offset: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            speed: 40.0,
            lifetime: 3.0,
            hit_radius: 1.5,
            muzzle_offset: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    pub max_books: usize,
    pub respawn_interval: f32,
    /// Books laid out in front of the spawn point at session start
    pub starter_row: usize,
    pub starter_row_distance: f32,
    pub starter_row_spacing: f32,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            max_books: 30,
            respawn_interval: 10.0,
            starter_row: 8,
            starter_row_distance: 10.0,
            starter_row_spacing: 2.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Playable area is [-half, half] on both horizontal axes
    pub map_half_extent: f32,
    /// Height samples per side of the terrain grid
    pub terrain_size: usize,
    /// World units between samples
    pub terrain_scale: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            map_half_extent: 120.0,
            terrain_size: 256,
            terrain_scale: 2.0,
        }
    }
}

impl GameConfig {
    /// Parse a configuration from RON text. `origin` is only used in errors.
    pub fn from_ron(contents: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(contents).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            details: e.to_string(),
        })?;
        Ok(config.clamped())
    }

    /// Pull values that timers and random ranges cannot take back into range.
    pub fn clamped(mut self) -> Self {
        self.abilities.awakening_delay = self.abilities.awakening_delay.max(0.0);

        let enemies = &mut self.enemies;
        enemies.spawn_distance_min = enemies.spawn_distance_min.max(0.0);
        enemies.spawn_distance_max = enemies.spawn_distance_max.max(enemies.spawn_distance_min);

        self.world.map_half_extent = self.world.map_half_extent.max(0.0);
        self
    }

    /// Load the configuration from a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        if !path.exists() {
            return Err(ConfigError::NotFound(display));
        }
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: display.clone(),
            details: e.to_string(),
        })?;
        Self::from_ron(&contents, &display)
    }
}

/// System to load the tuning file at startup, falling back to defaults.
pub fn load_game_config(mut commands: Commands) {
    let config = match GameConfig::load(CONFIG_PATH) {
        Ok(config) => {
            info!("Loaded game config from {}", CONFIG_PATH);
            config
        }
        Err(e @ ConfigError::NotFound(_)) => {
            warn!("{}. Using defaults.", e);
            GameConfig::default()
        }
        Err(e) => {
            error!("{}. Using defaults.", e);
            GameConfig::default()
        }
    };
    commands.insert_resource(config);
}
