//! Book pickups: reading one teaches a random ability.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use rand::Rng;

use super::terrain::{HeightSource, Terrain};
use crate::core::{BookConfig, GameConfig, SessionEntity};

/// Marker for a readable book lying in the world.
#[derive(Component)]
pub struct Book;

/// Shared mesh and material for every book in a session.
#[derive(Resource)]
pub struct BookAssets {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

/// Accumulates time toward the next book while under the ceiling.
#[derive(Resource, Default)]
pub struct BookSpawner {
    pub timer: f32,
}

impl BookSpawner {
    /// Advance the respawn timer. Returns true when a book should appear.
    ///
    /// At the ceiling the timer is held at zero, so a freshly read book is
    /// replaced a full interval later.
    pub fn tick(&mut self, book_count: usize, config: &BookConfig, dt: f32) -> bool {
        if book_count >= config.max_books {
            self.timer = 0.0;
            return false;
        }
        self.timer += dt;
        if self.timer > config.respawn_interval {
            self.timer = 0.0;
            return true;
        }
        false
    }
}

/// Horizontal positions of the starter row laid out ahead of the spawn point.
pub fn starter_row(config: &BookConfig) -> Vec<Vec2> {
    (0..config.starter_row)
        .map(|i| {
            let x = (i as f32 - 2.5) * config.starter_row_spacing;
            Vec2::new(x, -config.starter_row_distance)
        })
        .collect()
}

/// A uniformly random position inside the map.
pub fn random_book_position<R: Rng>(rng: &mut R, half_extent: f32) -> Vec2 {
    Vec2::new(
        rng.gen_range(-half_extent..=half_extent),
        rng.gen_range(-half_extent..=half_extent),
    )
}

/// Spawn one book resting on the terrain at the given horizontal position.
pub fn spawn_book<R: Rng>(
    commands: &mut Commands,
    assets: &BookAssets,
    terrain: &Terrain,
    position: Vec2,
    rng: &mut R,
) -> Entity {
    let y = terrain.height(position.x, position.y) + 0.2;
    let rotation = Quat::from_euler(
        EulerRot::YXZ,
        rng.gen_range(0.0..360.0_f32).to_radians(),
        rng.gen_range(-5.0..5.0_f32).to_radians(),
        0.0,
    );

    commands
        .spawn((
            Book,
            Mesh3d(assets.mesh.clone()),
            MeshMaterial3d(assets.material.clone()),
            Transform::from_xyz(position.x, y, position.y).with_rotation(rotation),
            Collider::cuboid(0.5, 0.5, 0.5),
            Sensor,
            SessionEntity,
        ))
        .id()
}

/// Lay out the starter row, then scatter books up to the ceiling.
pub fn setup_books(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    terrain: Res<Terrain>,
    config: Res<GameConfig>,
) {
    let assets = BookAssets {
        mesh: meshes.add(Cuboid::new(0.4, 0.1, 0.5)),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.8, 0.7, 0.3),
            ..default()
        }),
    };
    let mut rng = rand::thread_rng();

    let mut count = 0;
    for position in starter_row(&config.books) {
        spawn_book(&mut commands, &assets, &terrain, position, &mut rng);
        count += 1;
    }
    while count < config.books.max_books {
        let position = random_book_position(&mut rng, config.world.map_half_extent);
        spawn_book(&mut commands, &assets, &terrain, position, &mut rng);
        count += 1;
    }
    info!("Spawned {} books", count);

    commands.insert_resource(assets);
    commands.insert_resource(BookSpawner::default());
}

/// Top the world back up with books over time.
pub fn respawn_books(
    mut commands: Commands,
    time: Res<Time>,
    mut spawner: ResMut<BookSpawner>,
    assets: Res<BookAssets>,
    terrain: Res<Terrain>,
    config: Res<GameConfig>,
    book_query: Query<(), With<Book>>,
) {
    if spawner.tick(book_query.iter().count(), &config.books, time.delta_secs()) {
        let mut rng = rand::thread_rng();
        let position = random_book_position(&mut rng, config.world.map_half_extent);
        spawn_book(&mut commands, &assets, &terrain, position, &mut rng);
        debug!("Respawned a book at ({:.1}, {:.1})", position.x, position.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn starter_row_is_ahead_of_spawn() {
        let row = starter_row(&BookConfig::default());
        assert_eq!(row.len(), 8);
        assert_eq!(row[0], Vec2::new(-5.0, -10.0));
        assert_eq!(row[7], Vec2::new(9.0, -10.0));
    }

    #[test]
    fn respawn_waits_a_full_interval() {
        let config = BookConfig::default();
        let mut spawner = BookSpawner::default();

        assert!(!spawner.tick(29, &config, 6.0));
        assert!(!spawner.tick(29, &config, 4.0));
        assert!(spawner.tick(29, &config, 0.5));
        assert_eq!(spawner.timer, 0.0);
    }

    #[test]
    fn respawn_timer_is_held_at_the_ceiling() {
        let config = BookConfig::default();
        let mut spawner = BookSpawner::default();

        assert!(!spawner.tick(29, &config, 9.0));
        assert!(!spawner.tick(30, &config, 9.0));
        assert_eq!(spawner.timer, 0.0);
        assert!(!spawner.tick(29, &config, 9.0));
    }

    #[test]
    fn random_positions_stay_on_the_map() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let p = random_book_position(&mut rng, 120.0);
            assert!(p.x.abs() <= 120.0 && p.y.abs() <= 120.0);
        }
    }
}
