//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;

use super::ai;
use super::components::EnemyRoster;
use super::spawning;
use crate::core::{GameState, GameplaySet};

/// Enemy plugin - handles enemy spawning and AI.
///
/// Enemies keep acting while the spellbook is open.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EnemyRoster>()
            .add_systems(OnEnter(GameState::InGame), spawning::setup_enemy_spawning)
            .add_systems(OnExit(GameState::InGame), spawning::clear_roster)
            .add_systems(
                Update,
                (spawning::spawn_enemies, ai::enemy_ai)
                    .chain()
                    .in_set(GameplaySet::World),
            );
    }
}
