//! Ability plugin - progression timers.

use bevy::prelude::*;

use super::progression;
use crate::core::{GameState, GameplaySet};

/// Ability plugin - the awakening timer. Registries live on the player.
pub struct AbilityPlugin;

impl Plugin for AbilityPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::InGame), progression::start_awakening_timer)
            .add_systems(
                Update,
                progression::tick_awakening.in_set(GameplaySet::World),
            );
    }
}
