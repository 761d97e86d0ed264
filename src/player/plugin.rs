//! Player plugin - movement, camera, actions and book targeting.

use bevy::prelude::*;

use super::actions::{activate_shield, blink, read_book, shoot};
use super::components::HoveredBook;
use super::interaction::{reset_hovered_book, update_hovered_book};
use super::movement::{grab_cursor, mouse_look, player_movement, release_cursor, spawn_player};
use crate::core::{GameState, GameplaySet, PlayState};

/// Player plugin - handles player spawning, movement, and camera.
///
/// Everything the player does is skipped while the spellbook is open.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<HoveredBook>()
            .add_systems(
                OnEnter(GameState::InGame),
                (spawn_player, reset_hovered_book, grab_cursor),
            )
            .add_systems(OnExit(GameState::InGame), release_cursor)
            .add_systems(OnEnter(PlayState::Spellbook), release_cursor)
            .add_systems(OnExit(PlayState::Spellbook), grab_cursor)
            .add_systems(
                Update,
                (shoot, blink, activate_shield, read_book)
                    .in_set(GameplaySet::Input)
                    .run_if(in_state(PlayState::Exploring)),
            )
            .add_systems(
                Update,
                (mouse_look, player_movement, update_hovered_book)
                    .chain()
                    .in_set(GameplaySet::Movement)
                    .run_if(in_state(PlayState::Exploring)),
            );
    }
}
