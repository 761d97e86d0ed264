//! Player-related components.

use bevy::prelude::*;

use crate::abilities::{AbilityId, AbilityRegistry};
use crate::core::PlayerConfig;

/// Lowest selectable mouse sensitivity, in degrees per pixel.
pub const MIN_SENSITIVITY: f32 = 0.05;
/// Highest selectable mouse sensitivity, in degrees per pixel.
pub const MAX_SENSITIVITY: f32 = 1.0;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Player's core statistics.
#[derive(Component, Debug, Clone)]
pub struct PlayerStats {
    /// Hit points. May drop below zero; death is checked once per frame.
    pub health: i32,
    pub move_speed: f32,
    /// Degrees of rotation per pixel of mouse motion
    pub mouse_sensitivity: f32,
}

impl PlayerStats {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            health: config.start_health,
            move_speed: config.move_speed,
            mouse_sensitivity: config
                .mouse_sensitivity
                .clamp(MIN_SENSITIVITY, MAX_SENSITIVITY),
        }
    }

    /// Take a hit unless the shield is up. Returns true if health was lost.
    pub fn take_damage(&mut self, abilities: &mut AbilityRegistry, now: f32, amount: i32) -> bool {
        if abilities.is_active(AbilityId::Shield, now) {
            return false;
        }
        self.health -= amount;
        true
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Nudge mouse sensitivity, staying within the selectable range.
    pub fn adjust_sensitivity(&mut self, delta: f32) {
        self.mouse_sensitivity =
            (self.mouse_sensitivity + delta).clamp(MIN_SENSITIVITY, MAX_SENSITIVITY);
    }
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self::new(&PlayerConfig::default())
    }
}

/// Tracks player movement state for physics.
#[derive(Component, Debug, Default, Clone, PartialEq)]
pub struct MovementState {
    pub is_grounded: bool,
    pub vertical_velocity: f32,
}

/// The player's camera; pitch lives here, yaw on the player body.
#[derive(Component, Default)]
pub struct PlayerCamera {
    /// Current pitch in degrees (looking up/down)
    pub pitch: f32,
}

/// The book currently under the crosshair, refreshed every frame.
#[derive(Resource, Default, Debug)]
pub struct HoveredBook(pub Option<Entity>);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AbilityConfig, ActiveTuning};

    fn shielded() -> AbilityRegistry {
        let config = AbilityConfig {
            shield: ActiveTuning {
                cooldown: 20.0,
                duration: 5.0,
            },
            ..AbilityConfig::default()
        };
        let mut registry = AbilityRegistry::new(&config);
        registry.unlock(AbilityId::Shield);
        registry
    }

    #[test]
    fn shield_blocks_damage_only_while_active() {
        let mut abilities = shielded();
        let mut stats = PlayerStats::default();

        assert!(abilities.use_ability(AbilityId::Shield, 0.0));
        assert!(abilities.is_active(AbilityId::Shield, 0.0));

        assert!(!stats.take_damage(&mut abilities, 3.0, 50));
        assert_eq!(stats.health, 100);

        assert!(!abilities.is_active(AbilityId::Shield, 6.0));
        assert!(stats.take_damage(&mut abilities, 6.0, 50));
        assert_eq!(stats.health, 50);
    }

    #[test]
    fn health_can_go_negative() {
        let mut abilities = shielded();
        let mut stats = PlayerStats::default();

        assert!(stats.take_damage(&mut abilities, 0.0, 90));
        assert!(!stats.is_dead());
        assert!(stats.take_damage(&mut abilities, 0.0, 15));
        assert_eq!(stats.health, -5);
        assert!(stats.is_dead());
    }

    #[test]
    fn sensitivity_is_clamped() {
        let mut stats = PlayerStats::default();
        stats.adjust_sensitivity(5.0);
        assert_eq!(stats.mouse_sensitivity, MAX_SENSITIVITY);
        stats.adjust_sensitivity(-5.0);
        assert_eq!(stats.mouse_sensitivity, MIN_SENSITIVITY);
    }
}
