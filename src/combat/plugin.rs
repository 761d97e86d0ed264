//! Combat plugin - projectiles and damage.

use bevy::prelude::*;

use super::damage;
use super::projectile;
use crate::core::{GameState, GameplaySet};

/// Combat plugin - resolves projectiles, enemy strikes, and player death.
///
/// Runs while the spellbook is open too: the world does not pause.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::InGame), projectile::setup_projectile_assets)
            .add_systems(
                Update,
                (
                    projectile::update_projectiles,
                    damage::apply_player_damage,
                    damage::check_player_death,
                )
                    .chain()
                    .in_set(GameplaySet::Combat),
            );
    }
}
