//! The Void of Ignorance - Entry Point
//!
//! Controls (once learned):
//! - WASD: Move
//! - Space: Jump
//! - Mouse: Look around
//! - Left click: Void Bolt
//! - Shift: Blink
//! - Q: Divine Shield
//! - E: Read book
//! - Escape: Spellbook

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "The Void of Ignorance".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))
        // Physics: used for ground probes and book picking
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        .add_plugins(void_of_ignorance::VoidPlugin)
        .run();
}
