//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. For example,
//! player movement only runs while exploring, while enemies keep hunting
//! even when the spellbook is open.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` while the tuning file is read
/// - Move to `MainMenu` when loading completes
/// - Enter `InGame` when the player starts a session
/// - `GameOver` when the player dies
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files
    #[default]
    Loading,
    /// Title screen
    MainMenu,
    /// Active session
    InGame,
    /// Player has died
    GameOver,
}

/// Sub-states for gameplay - only active when GameState::InGame.
///
/// The spellbook is a blocking menu for the player only: the world keeps
/// running underneath it.
#[derive(SubStates, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[source(GameState = GameState::InGame)]
pub enum PlayState {
    /// Normal gameplay - movement, combat, exploration
    #[default]
    Exploring,
    /// Spellbook menu is open
    Spellbook,
}
