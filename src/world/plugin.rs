//! World plugin - terrain, atmosphere, and pickups.

use bevy::prelude::*;

use crate::core::{GameConfig, GameState, GameplaySet};

use super::books::{respawn_books, setup_books};
use super::terrain::{spawn_atmosphere, spawn_terrain, Terrain};

/// World plugin - builds the session world and keeps pickups stocked.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Terrain>()
            .insert_resource(ClearColor(Color::srgb(0.1, 0.1, 0.15)))
            .add_systems(OnEnter(GameState::InGame), (setup_world, setup_books))
            .add_systems(Update, respawn_books.in_set(GameplaySet::World));
    }
}

/// Build the terrain and lighting for a new session.
pub fn setup_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    terrain: Res<Terrain>,
    config: Res<GameConfig>,
) {
    info!("Building world");
    spawn_terrain(&mut commands, &mut meshes, &mut materials, &terrain, &config.world);
    spawn_atmosphere(&mut commands);
}
