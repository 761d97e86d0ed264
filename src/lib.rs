//! The Void of Ignorance - a first-person survival game where you start
//! knowing nothing.
//!
//! Every action, even walking forward, is an ability that has to be learned
//! by reading books scattered over the terrain, while red spheres hunt you.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, tuning, frame ordering
//! - **Abilities**: Ability registry, cooldowns, unlock progression
//! - **Player**: Gated movement, camera, ability triggers, book targeting
//! - **Enemies**: Spawner, roster, idle/pursue/attack AI
//! - **Combat**: Projectiles, damage intake, death
//! - **World**: Terrain, atmosphere, book pickups
//! - **UI**: Menus, HUD, spellbook

pub mod abilities;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod player;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct VoidPlugin;

impl Plugin for VoidPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)
            .add_plugins(abilities::AbilityPlugin)
            .add_plugins(player::PlayerPlugin)
            .add_plugins(enemies::EnemyPlugin)
            .add_plugins(combat::CombatPlugin)
            .add_plugins(world::WorldPlugin)
            .add_plugins(ui::UiPlugin);
    }
}
