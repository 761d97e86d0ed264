//! Discrete ability triggers: shoot, blink, shield and reading books.
//!
//! Each system reacts to a single key press. Locked or cooling-down
//! abilities are silent no-ops.

use bevy::prelude::*;

use super::components::{HoveredBook, Player, PlayerCamera};
use crate::abilities::{unlock_message, unlock_random, AbilityId, AbilityRegistry};
use crate::combat::{spawn_projectile, ProjectileAssets};
use crate::core::{GameConfig, Notify};
use crate::world::{Book, HeightSource, Terrain};

/// Where a blink from `position` along `forward` lands, feet on the terrain.
pub fn blink_destination(
    position: Vec3,
    forward: Vec3,
    distance: f32,
    terrain: &impl HeightSource,
) -> Vec3 {
    let mut target = position + forward * distance;
    target.y = terrain.height(target.x, target.z);
    target
}

/// Fire a bolt from just in front of the camera.
pub fn shoot(
    mut commands: Commands,
    mouse: Res<ButtonInput<MouseButton>>,
    config: Res<GameConfig>,
    assets: Res<ProjectileAssets>,
    player_query: Query<&AbilityRegistry, With<Player>>,
    camera_query: Query<&GlobalTransform, With<PlayerCamera>>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(abilities) = player_query.get_single() else {
        return;
    };
    if !abilities.is_unlocked(AbilityId::Shoot) {
        return;
    }
    let Ok(camera) = camera_query.get_single() else {
        return;
    };

    let forward = *camera.forward();
    let origin = camera.translation() + forward * config.projectiles.muzzle_offset;
    spawn_projectile(&mut commands, &assets, origin, forward, &config.projectiles);
}

/// Teleport forward along the body's heading.
pub fn blink(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    config: Res<GameConfig>,
    terrain: Res<Terrain>,
    mut player_query: Query<(&mut Transform, &mut AbilityRegistry), With<Player>>,
) {
    if !keyboard.just_pressed(KeyCode::ShiftLeft) {
        return;
    }
    let Ok((mut transform, mut abilities)) = player_query.get_single_mut() else {
        return;
    };
    if !abilities.use_ability(AbilityId::Blink, time.elapsed_secs()) {
        return;
    }

    let forward = *transform.forward();
    transform.translation = blink_destination(
        transform.translation,
        forward,
        config.player.blink_distance,
        &*terrain,
    );
    debug!("Blinked to {:?}", transform.translation);
}

/// Raise the shield. The damage system checks it on every hit.
pub fn activate_shield(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut player_query: Query<&mut AbilityRegistry, With<Player>>,
    mut notify: EventWriter<Notify>,
) {
    if !keyboard.just_pressed(KeyCode::KeyQ) {
        return;
    }
    let Ok(mut abilities) = player_query.get_single_mut() else {
        return;
    };
    if abilities.use_ability(AbilityId::Shield, time.elapsed_secs()) {
        notify.send(Notify::new("Shield Activated!"));
    }
}

/// Read the book under the crosshair: learn something, then the book is gone.
pub fn read_book(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut hovered: ResMut<HoveredBook>,
    book_query: Query<(), With<Book>>,
    mut player_query: Query<&mut AbilityRegistry, With<Player>>,
    mut notify: EventWriter<Notify>,
) {
    if !keyboard.just_pressed(KeyCode::KeyE) {
        return;
    }
    let Some(book) = hovered.0 else {
        return;
    };
    if book_query.get(book).is_err() {
        hovered.0 = None;
        return;
    }
    let Ok(mut abilities) = player_query.get_single_mut() else {
        return;
    };

    let learned = unlock_random(&mut abilities, &mut rand::thread_rng());
    notify.send(Notify(unlock_message(learned)));
    commands.entity(book).despawn_recursive();
    hovered.0 = None;
    info!("Book read");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::FlatGround;

    #[test]
    fn blink_lands_on_the_terrain_ahead() {
        let start = Vec3::new(1.0, 7.0, 2.0);
        let target = blink_destination(start, Vec3::NEG_Z, 15.0, &FlatGround(3.5));
        assert_eq!(target, Vec3::new(1.0, 3.5, -13.0));
    }

    #[test]
    fn blink_from_the_air_drops_to_the_ground() {
        let start = Vec3::new(0.0, 40.0, 0.0);
        let heading = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2) * Vec3::NEG_Z;
        let target = blink_destination(start, heading, 10.0, &FlatGround(-2.0));
        assert!((target.x + 10.0).abs() < 1e-4);
        assert!(target.z.abs() < 1e-4);
        assert_eq!(target.y, -2.0);
    }
}
