//! Enemy spawner: keeps a ring of enemies appearing around the player.

use std::f32::consts::TAU;

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use rand::Rng;

use super::components::{AiState, AttackTimer, Enemy, EnemyRoster, EnemyStats};
use crate::core::{EnemyConfig, GameConfig, SessionEntity};
use crate::player::Player;
use crate::world::{HeightSource, Terrain};

/// Spawn pacing and the speed handed to new enemies.
#[derive(Resource, Debug, Clone)]
pub struct EnemySpawner {
    /// Seconds since the last spawn
    pub timer: f32,
    pub base_speed: f32,
    pub current_speed: f32,
}

impl EnemySpawner {
    pub fn new(config: &EnemyConfig) -> Self {
        let mut spawner = Self {
            timer: 0.0,
            base_speed: config.base_speed,
            current_speed: config.base_speed,
        };
        spawner.set_difficulty(config.difficulty);
        spawner
    }

    /// Scale the speed of enemies spawned from now on.
    pub fn set_difficulty(&mut self, speed_multiplier: f32) {
        self.current_speed = self.base_speed * speed_multiplier;
    }

    /// Advance the timer. Returns true when an enemy should spawn.
    ///
    /// The timer keeps running at the ceiling, so the first tick after an
    /// enemy dies may spawn a replacement straight away.
    pub fn tick(&mut self, live: usize, config: &EnemyConfig, dt: f32) -> bool {
        self.timer += dt;
        if self.timer > config.spawn_interval && live < config.max_enemies {
            self.timer = 0.0;
            return true;
        }
        false
    }
}

/// Shared mesh and material for enemies.
#[derive(Resource)]
pub struct EnemyAssets {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

/// Pick a horizontal spawn point on a ring around `center`, clamped to the map.
pub fn spawn_point<R: Rng>(rng: &mut R, center: Vec3, config: &EnemyConfig, half_extent: f32) -> Vec2 {
    let angle = rng.gen_range(0.0..TAU);
    let distance = rng.gen_range(config.spawn_distance_min..=config.spawn_distance_max);
    Vec2::new(
        (center.x + angle.cos() * distance).clamp(-half_extent, half_extent),
        (center.z + angle.sin() * distance).clamp(-half_extent, half_extent),
    )
}

/// Reset spawning state for a new session.
pub fn setup_enemy_spawning(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut roster: ResMut<EnemyRoster>,
    config: Res<GameConfig>,
) {
    roster.clear();
    commands.insert_resource(EnemySpawner::new(&config.enemies));
    commands.insert_resource(EnemyAssets {
        mesh: meshes.add(Sphere::new(1.0)),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.0, 0.0),
            ..default()
        }),
    });
}

/// Spawn a new enemy on the timer while under the population ceiling.
pub fn spawn_enemies(
    mut commands: Commands,
    time: Res<Time>,
    mut spawner: ResMut<EnemySpawner>,
    mut roster: ResMut<EnemyRoster>,
    assets: Res<EnemyAssets>,
    terrain: Res<Terrain>,
    config: Res<GameConfig>,
    player_query: Query<&Transform, With<Player>>,
) {
    if !spawner.tick(roster.len(), &config.enemies, time.delta_secs()) {
        return;
    }
    let Ok(player_transform) = player_query.get_single() else {
        return;
    };

    let point = spawn_point(
        &mut rand::thread_rng(),
        player_transform.translation,
        &config.enemies,
        config.world.map_half_extent,
    );
    let y = terrain.height(point.x, point.y) + config.enemies.hover_height;

    let id = roster.allocate();
    let entity = commands
        .spawn((
            Enemy,
            id,
            AiState::default(),
            EnemyStats::from_config(&config.enemies, spawner.current_speed),
            AttackTimer::default(),
            Mesh3d(assets.mesh.clone()),
            MeshMaterial3d(assets.material.clone()),
            Transform::from_xyz(point.x, y, point.y),
            RigidBody::KinematicPositionBased,
            Collider::ball(1.2),
            SessionEntity,
        ))
        .id();
    roster.insert(id, entity);

    debug!("Spawned enemy {:?} at ({:.1}, {:.1})", id, point.x, point.y);
}

/// Forget the roster when the session ends.
pub fn clear_roster(mut roster: ResMut<EnemyRoster>) {
    roster.clear();
}

/// Remove an enemy from play: out of the roster, then despawned.
pub fn kill_enemy(commands: &mut Commands, roster: &mut EnemyRoster, entity: Entity) -> bool {
    let Some(id) = roster.remove(entity) else {
        return false;
    };
    commands.entity(entity).despawn_recursive();
    info!("Enemy {:?} destroyed", id);
    true
}
