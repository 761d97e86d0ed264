//! Core plugin that sets up game states, events, and system ordering.

use bevy::prelude::*;

use super::config::{load_game_config, GameConfig};
use super::events::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, MainMenu, InGame, GameOver) and the play sub-state
/// - Global events (PlayerDamageEvent, Notify, etc.)
/// - Per-frame ordering of gameplay system sets
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()
            .add_sub_state::<PlayState>()

            // Defaults until the tuning file is read
            .init_resource::<GameConfig>()

            // Register global events
            .add_event::<PlayerDamageEvent>()
            .add_event::<Notify>()
            .add_event::<DamageFlash>()

            // Frame ordering: input, then movement, world simulation, combat resolution, feedback
            .configure_sets(
                Update,
                (
                    GameplaySet::Input,
                    GameplaySet::Movement,
                    GameplaySet::World,
                    GameplaySet::Combat,
                    GameplaySet::Feedback,
                )
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )

            // Loading state - read tuning, then show the title screen
            .add_systems(
                OnEnter(GameState::Loading),
                (load_game_config, transition_to_main_menu).chain(),
            )

            // Open/close the spellbook with Escape
            .add_systems(
                Update,
                toggle_spellbook.in_set(GameplaySet::Input),
            )
            .add_systems(OnExit(GameState::InGame), despawn_session);
    }
}

/// Ordering of gameplay systems within a frame. Only runs in `GameState::InGame`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameplaySet {
    /// Discrete key presses: menu toggle, ability triggers, interaction
    Input,
    /// Player look and locomotion
    Movement,
    /// Spawners, enemy AI, timers
    World,
    /// Projectiles, damage intake, death checks
    Combat,
    /// HUD and notifications
    Feedback,
}

/// Marker for every entity that belongs to a play session.
///
/// Everything carrying it is despawned when the session ends.
#[derive(Component)]
pub struct SessionEntity;

fn transition_to_main_menu(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::MainMenu);
}

/// Handle Escape key to open/close the spellbook.
fn toggle_spellbook(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<PlayState>>,
    mut next_state: ResMut<NextState<PlayState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            PlayState::Exploring => next_state.set(PlayState::Spellbook),
            PlayState::Spellbook => next_state.set(PlayState::Exploring),
        }
    }
}

/// Tear down the session world in one pass.
fn despawn_session(mut commands: Commands, query: Query<Entity, With<SessionEntity>>) {
    let mut count = 0;
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
        count += 1;
    }
    info!("Session ended, despawned {} entities", count);
}
