//! Straight-line projectiles with a finite lifetime.

use bevy::prelude::*;

use crate::core::{GameConfig, ProjectileConfig, SessionEntity};
use crate::enemies::{kill_enemy, Enemy, EnemyRoster};

/// A bolt in flight.
#[derive(Component, Debug, Clone)]
pub struct Projectile {
    /// Unit direction, fixed at spawn
    pub direction: Vec3,
    pub speed: f32,
    /// Seconds left before the bolt fizzles
    pub lifetime: f32,
}

impl Projectile {
    pub fn new(direction: Vec3, config: &ProjectileConfig) -> Self {
        Self {
            direction: direction.normalize_or_zero(),
            speed: config.speed,
            lifetime: config.lifetime,
        }
    }

    /// Burn lifetime and move. Returns false, without moving, once expired.
    pub fn advance(&mut self, position: &mut Vec3, dt: f32) -> bool {
        self.lifetime -= dt;
        if self.lifetime <= 0.0 {
            return false;
        }
        *position += self.direction * self.speed * dt;
        true
    }
}

/// What happened to a projectile this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileFate {
    Alive,
    Expired,
    /// Struck this enemy; both are done
    Hit(Entity),
}

/// First target, in the given order, strictly closer than `radius`.
///
/// Order matters: this is not a nearest-target search.
pub fn first_hit(
    position: Vec3,
    targets: impl IntoIterator<Item = (Entity, Vec3)>,
    radius: f32,
) -> Option<Entity> {
    targets
        .into_iter()
        .find(|(_, target)| target.distance(position) < radius)
        .map(|(entity, _)| entity)
}

/// Advance one projectile and resolve at most one hit.
pub fn step_projectile(
    projectile: &mut Projectile,
    position: &mut Vec3,
    targets: &[(Entity, Vec3)],
    hit_radius: f32,
    dt: f32,
) -> ProjectileFate {
    if !projectile.advance(position, dt) {
        return ProjectileFate::Expired;
    }
    match first_hit(*position, targets.iter().copied(), hit_radius) {
        Some(enemy) => ProjectileFate::Hit(enemy),
        None => ProjectileFate::Alive,
    }
}

/// Shared mesh and material for projectiles.
#[derive(Resource)]
pub struct ProjectileAssets {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

pub fn setup_projectile_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(ProjectileAssets {
        mesh: meshes.add(Sphere::new(0.2)),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.0, 1.0, 1.0),
            emissive: LinearRgba::rgb(0.0, 2.0, 2.0),
            ..default()
        }),
    });
}

/// Spawn a bolt at `origin` flying along `direction`.
pub fn spawn_projectile(
    commands: &mut Commands,
    assets: &ProjectileAssets,
    origin: Vec3,
    direction: Vec3,
    config: &ProjectileConfig,
) -> Entity {
    commands
        .spawn((
            Projectile::new(direction, config),
            Mesh3d(assets.mesh.clone()),
            MeshMaterial3d(assets.material.clone()),
            Transform::from_translation(origin),
            SessionEntity,
        ))
        .id()
}

/// Move every projectile, resolve hits against enemies, then drop the dead
/// in one pass.
pub fn update_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<GameConfig>,
    mut roster: ResMut<EnemyRoster>,
    mut projectile_query: Query<(Entity, &mut Transform, &mut Projectile), Without<Enemy>>,
    enemy_query: Query<&Transform, (With<Enemy>, Without<Projectile>)>,
) {
    let dt = time.delta_secs();

    // Snapshot in roster order; enemies killed this tick drop out of it.
    let mut targets: Vec<(Entity, Vec3)> = roster
        .iter()
        .filter_map(|(_, entity)| enemy_query.get(entity).ok().map(|t| (entity, t.translation)))
        .collect();

    let mut spent = Vec::new();
    let mut kills = Vec::new();
    for (entity, mut transform, mut projectile) in projectile_query.iter_mut() {
        match step_projectile(
            &mut projectile,
            &mut transform.translation,
            &targets,
            config.projectiles.hit_radius,
            dt,
        ) {
            ProjectileFate::Alive => {}
            ProjectileFate::Expired => spent.push(entity),
            ProjectileFate::Hit(enemy) => {
                spent.push(entity);
                targets.retain(|(e, _)| *e != enemy);
                kills.push(enemy);
            }
        }
    }

    for entity in spent {
        commands.entity(entity).despawn_recursive();
    }
    for enemy in kills {
        kill_enemy(&mut commands, &mut roster, enemy);
    }
}
