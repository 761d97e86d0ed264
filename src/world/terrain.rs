//! Terrain height field and the terrain entity.

use bevy::prelude::*;
use bevy::render::mesh::VertexAttributeValues;
use bevy_rapier3d::prelude::*;

use crate::core::{SessionEntity, WorldConfig};

/// Anything that can answer "how high is the ground here?".
///
/// Gameplay code only depends on this, never on the terrain mesh.
pub trait HeightSource {
    /// Ground height at horizontal position (x, z).
    fn height(&self, x: f32, z: f32) -> f32;
}

/// Rolling hills with a flattened clearing around the origin.
#[derive(Resource, Debug, Clone, Copy)]
pub struct Terrain {
    /// Radius of the clearing around the spawn point
    pub clearing_radius: f32,
}

impl Default for Terrain {
    fn default() -> Self {
        Self {
            clearing_radius: 10.0,
        }
    }
}

impl HeightSource for Terrain {
    fn height(&self, x: f32, z: f32) -> f32 {
        let mut h = 6.0 * (x / 15.0).sin() * (z / 15.0).cos();
        h += 2.0 * (x / 5.0 + z / 5.0).sin();

        let dist_sq = x * x + z * z;
        let clearing_sq = self.clearing_radius * self.clearing_radius;
        if dist_sq < clearing_sq {
            h *= dist_sq / clearing_sq;
        }
        h
    }
}

/// Marker for the terrain entity.
#[derive(Component)]
pub struct TerrainMesh;

/// Sample coordinates along one side of the grid, centered on the origin.
fn sample_coords(config: &WorldConfig) -> Vec<f32> {
    let n = config.terrain_size.max(2);
    let extent = (n - 1) as f32 * config.terrain_scale;
    (0..n)
        .map(|i| i as f32 * config.terrain_scale - extent / 2.0)
        .collect()
}

/// Spawn the terrain: a displaced plane for rendering and a matching
/// height-field collider for ground probes.
pub fn spawn_terrain(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    terrain: &Terrain,
    config: &WorldConfig,
) {
    let coords = sample_coords(config);
    let n = coords.len();
    let extent = (n - 1) as f32 * config.terrain_scale;

    let mut mesh = Mesh::from(
        Plane3d::default()
            .mesh()
            .size(extent, extent)
            .subdivisions(n as u32 - 2),
    );
    if let Some(VertexAttributeValues::Float32x3(positions)) =
        mesh.attribute_mut(Mesh::ATTRIBUTE_POSITION)
    {
        for position in positions.iter_mut() {
            position[1] = terrain.height(position[0], position[2]);
        }
    }
    mesh.compute_smooth_normals();

    // Column-major: rows run along z, columns along x.
    let mut heights = Vec::with_capacity(n * n);
    for &x in &coords {
        for &z in &coords {
            heights.push(terrain.height(x, z));
        }
    }

    commands.spawn((
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.3, 0.5, 0.3),
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::default(),
        Collider::heightfield(heights, n, n, Vec3::new(extent, 1.0, extent)),
        TerrainMesh,
        SessionEntity,
    ));

    info!("Spawned terrain: {}x{} samples, {:.0} units wide", n, n, extent);
}

/// Spawn the session lights.
pub fn spawn_atmosphere(commands: &mut Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.4, 0.4, 0.5),
        brightness: 300.0,
    });

    commands.spawn((
        DirectionalLight {
            color: Color::srgb(0.8, 0.8, 0.7),
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::YXZ,
            45_f32.to_radians(),
            -60_f32.to_radians(),
            0.0,
        )),
        SessionEntity,
    ));
}

/// Constant-height ground for tests.
#[cfg(test)]
pub(crate) struct FlatGround(pub f32);

#[cfg(test)]
impl HeightSource for FlatGround {
    fn height(&self, _x: f32, _z: f32) -> f32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_point_is_flat() {
        let terrain = Terrain::default();
        assert_eq!(terrain.height(0.0, 0.0), 0.0);
        assert!(terrain.height(1.0, 1.0).abs() < 0.2);
    }

    #[test]
    fn hills_outside_the_clearing() {
        let terrain = Terrain::default();
        let expected = 6.0 * (2.0_f32).sin() * (1.0_f32).cos() + 2.0 * (9.0_f32).sin();
        assert!((terrain.height(30.0, 15.0) - expected).abs() < 1e-4);
    }

    #[test]
    fn samples_are_centered() {
        let config = WorldConfig {
            terrain_size: 5,
            terrain_scale: 2.0,
            ..default()
        };
        assert_eq!(sample_coords(&config), vec![-4.0, -2.0, 0.0, 2.0, 4.0]);
    }
}
