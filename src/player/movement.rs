//! First-person player movement and camera control.

use bevy::input::mouse::MouseMotion;
use bevy::pbr::FogFalloff;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use bevy_rapier3d::prelude::*;

use super::components::*;
use crate::abilities::{AbilityId, AbilityRegistry};
use crate::core::{GameConfig, PlayerConfig, SessionEntity};
use crate::world::{HeightSource, Terrain};

/// Vertical nudge applied on take-off so the next ground probe misses.
const JUMP_LIFT: f32 = 0.1;
/// Height above the player's feet the ground probe starts from.
const PROBE_LIFT: f32 = 0.5;
const PROBE_REACH: f32 = 1000.0;

/// Field of view of a freshly spawned camera, in degrees.
pub const DEFAULT_FOV: f32 = 75.0;

/// Raw state of the movement keys this frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveKeys {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl MoveKeys {
    pub fn read(keyboard: &ButtonInput<KeyCode>) -> Self {
        Self {
            forward: keyboard.pressed(KeyCode::KeyW),
            backward: keyboard.pressed(KeyCode::KeyS),
            left: keyboard.pressed(KeyCode::KeyA),
            right: keyboard.pressed(KeyCode::KeyD),
            jump: keyboard.pressed(KeyCode::Space),
        }
    }
}

/// Movement the player is allowed to make this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveIntent {
    /// Unnormalized input direction; local to the body until rotated
    pub direction: Vec3,
    pub speed: f32,
    pub jump: bool,
}

impl MoveIntent {
    /// Express the direction in world space.
    pub fn rotated(self, rotation: Quat) -> Self {
        Self {
            direction: rotation * self.direction,
            ..self
        }
    }
}

/// Gate each key by its ability. A locked direction contributes nothing.
///
/// Opposite keys do not cancel: the later check wins, so backward beats
/// forward and right beats left.
pub fn move_intent(keys: &MoveKeys, abilities: &AbilityRegistry, speed: f32) -> MoveIntent {
    let mut direction = Vec3::ZERO;
    if keys.forward && abilities.is_unlocked(AbilityId::MoveForward) {
        direction.z = -1.0;
    }
    if keys.backward && abilities.is_unlocked(AbilityId::MoveBackward) {
        direction.z = 1.0;
    }
    if keys.left && abilities.is_unlocked(AbilityId::MoveLeft) {
        direction.x = -1.0;
    }
    if keys.right && abilities.is_unlocked(AbilityId::MoveRight) {
        direction.x = 1.0;
    }
    MoveIntent {
        direction,
        speed,
        jump: keys.jump && abilities.is_unlocked(AbilityId::Jump),
    }
}

/// Closest surface below the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundHit {
    pub point: Vec3,
    pub normal: Vec3,
}

/// Advance the player body by one tick.
///
/// Order: snap to the probed ground, walk along the ground plane, jump,
/// then fall under gravity with the terrain as a hard floor.
pub fn step_motion(
    position: &mut Vec3,
    state: &mut MovementState,
    intent: MoveIntent,
    ground: Option<GroundHit>,
    terrain: &impl HeightSource,
    config: &PlayerConfig,
    dt: f32,
) {
    state.is_grounded = false;
    let mut normal = Vec3::Y;
    if let Some(hit) = ground {
        normal = hit.normal;
        if position.y - hit.point.y < config.ground_snap {
            state.is_grounded = true;
            position.y = hit.point.y;
            state.vertical_velocity = 0.0;
        }
    }

    if intent.direction != Vec3::ZERO {
        let mut motion = intent.direction.normalize();
        if state.is_grounded {
            motion = (motion - normal * motion.dot(normal)).normalize_or_zero();
        }
        *position += motion * intent.speed * dt;
    }

    if state.is_grounded && intent.jump {
        state.vertical_velocity = config.jump_velocity;
        state.is_grounded = false;
        position.y += JUMP_LIFT;
    }

    if !state.is_grounded {
        state.vertical_velocity -= config.gravity * dt;
        position.y += state.vertical_velocity * dt;

        let floor = terrain.height(position.x, position.z);
        if position.y < floor {
            position.y = floor;
            state.vertical_velocity = 0.0;
            state.is_grounded = true;
        }
    }
}

/// Turn accumulated mouse motion into a yaw step (radians) and a new pitch
/// (degrees, clamped).
pub fn look_delta(pitch: f32, delta: Vec2, sensitivity: f32, pitch_limit: f32) -> (f32, f32) {
    let yaw = (-delta.x * sensitivity).to_radians();
    let pitch = (pitch - delta.y * sensitivity).clamp(-pitch_limit, pitch_limit);
    (yaw, pitch)
}

/// Grab and hide cursor while exploring.
pub fn grab_cursor(mut window_query: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
    }
}

/// Release cursor for menus.
pub fn release_cursor(mut window_query: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
    }
}

/// Handle mouse movement for looking around.
///
/// Rotates the player entity horizontally (yaw) and the camera vertically (pitch).
/// The camera is a child of the player, so horizontal rotation affects both.
pub fn mouse_look(
    mut mouse_motion: EventReader<MouseMotion>,
    config: Res<GameConfig>,
    mut player_query: Query<(&mut Transform, &PlayerStats), With<Player>>,
    mut camera_query: Query<(&mut Transform, &mut PlayerCamera), Without<Player>>,
) {
    let mut delta = Vec2::ZERO;
    for event in mouse_motion.read() {
        delta += event.delta;
    }

    if delta == Vec2::ZERO {
        return;
    }

    let Ok((mut player_transform, stats)) = player_query.get_single_mut() else {
        return;
    };
    let Ok((mut camera_transform, mut camera)) = camera_query.get_single_mut() else {
        return;
    };

    let (yaw, pitch) = look_delta(
        camera.pitch,
        delta,
        stats.mouse_sensitivity,
        config.player.pitch_limit,
    );
    player_transform.rotate_y(yaw);
    camera.pitch = pitch;
    camera_transform.rotation = Quat::from_rotation_x(pitch.to_radians());
}

/// Ability-gated walking, jumping and gravity.
///
/// Ground contact comes from a downward ray against fixed colliders only,
/// so books and enemies are never stood on. Without a physics context the
/// terrain function stands in for the probe.
pub fn player_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    config: Res<GameConfig>,
    terrain: Res<Terrain>,
    rapier_context: Query<&RapierContext>,
    mut player_query: Query<(&mut Transform, &mut MovementState, &PlayerStats, &AbilityRegistry), With<Player>>,
) {
    let Ok((mut transform, mut movement_state, stats, abilities)) = player_query.get_single_mut() else {
        return;
    };

    let position = transform.translation;
    let ground = match rapier_context.get_single() {
        Ok(context) => context
            .cast_ray_and_get_normal(
                position + Vec3::Y * PROBE_LIFT,
                Vec3::NEG_Y,
                PROBE_REACH,
                true,
                QueryFilter::only_fixed().exclude_sensors(),
            )
            .map(|(_, hit)| GroundHit {
                point: hit.point,
                normal: hit.normal,
            }),
        Err(_) => Some(GroundHit {
            point: Vec3::new(position.x, terrain.height(position.x, position.z), position.z),
            normal: Vec3::Y,
        }),
    };

    // Only yaw lives on the body, so its rotation is already level
    let intent = move_intent(&MoveKeys::read(&keyboard), abilities, stats.move_speed)
        .rotated(transform.rotation);

    let mut translation = transform.translation;
    step_motion(
        &mut translation,
        &mut movement_state,
        intent,
        ground,
        &*terrain,
        &config.player,
        time.delta_secs(),
    );
    transform.translation = translation;
}

/// Spawn the player entity with camera, above the terrain at the origin.
pub fn spawn_player(mut commands: Commands, config: Res<GameConfig>, terrain: Res<Terrain>) {
    let player_config = &config.player;
    let position = Vec3::new(0.0, terrain.height(0.0, 0.0) + player_config.spawn_height, 0.0);

    let player = commands
        .spawn((
            Player,
            PlayerStats::new(player_config),
            MovementState::default(),
            AbilityRegistry::new(&config.abilities),
            Transform::from_translation(position),
            Visibility::default(),
            SessionEntity,
        ))
        .id();

    commands.entity(player).with_children(|parent| {
        parent.spawn((
            Camera3d::default(),
            Projection::Perspective(PerspectiveProjection {
                fov: DEFAULT_FOV.to_radians(),
                ..default()
            }),
            DistanceFog {
                color: Color::srgb(0.1, 0.1, 0.15),
                falloff: FogFalloff::Exponential { density: 0.01 },
                ..default()
            },
            PlayerCamera::default(),
            // Position camera at "eye level" relative to player
            Transform::from_xyz(0.0, player_config.eye_height, 0.0),
        ));
    });

    info!("Player spawned at {:?}", position);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AbilityConfig;
    use crate::world::FlatGround;

    const DT: f32 = 0.1;

    fn registry() -> AbilityRegistry {
        AbilityRegistry::new(&AbilityConfig::default())
    }

    fn standing() -> (Vec3, MovementState, Option<GroundHit>) {
        let ground = GroundHit {
            point: Vec3::ZERO,
            normal: Vec3::Y,
        };
        (Vec3::ZERO, MovementState::default(), Some(ground))
    }

    fn forward() -> MoveKeys {
        MoveKeys {
            forward: true,
            ..default()
        }
    }

    #[test]
    fn locked_forward_goes_nowhere_until_learned() {
        let config = PlayerConfig::default();
        let mut abilities = registry();

        let (mut position, mut state, ground) = standing();
        let intent = move_intent(&forward(), &abilities, config.move_speed);
        step_motion(&mut position, &mut state, intent, ground, &FlatGround(0.0), &config, DT);
        assert_eq!(position, Vec3::ZERO);

        abilities.unlock(AbilityId::MoveForward);
        let intent = move_intent(&forward(), &abilities, config.move_speed);
        step_motion(&mut position, &mut state, intent, ground, &FlatGround(0.0), &config, DT);
        assert!((position.z + 1.5).abs() < 1e-5);
        assert_eq!(position.x, 0.0);
        assert!(state.is_grounded);
    }

    #[test]
    fn each_axis_is_gated_independently() {
        let mut abilities = registry();
        abilities.unlock(AbilityId::MoveRight);
        let keys = MoveKeys {
            forward: true,
            right: true,
            ..default()
        };
        let intent = move_intent(&keys, &abilities, 15.0);
        assert_eq!(intent.direction, Vec3::X);
    }

    #[test]
    fn later_key_wins_on_the_same_axis() {
        let mut abilities = registry();
        for id in AbilityId::MOVEMENT {
            abilities.unlock(id);
        }
        let keys = MoveKeys {
            forward: true,
            backward: true,
            left: true,
            right: true,
            jump: false,
        };
        assert_eq!(move_intent(&keys, &abilities, 1.0).direction, Vec3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn diagonal_speed_is_normalized() {
        let config = PlayerConfig::default();
        let (mut position, mut state, ground) = standing();
        let intent = MoveIntent {
            direction: Vec3::new(1.0, 0.0, -1.0),
            speed: 10.0,
            jump: false,
        };
        step_motion(&mut position, &mut state, intent, ground, &FlatGround(0.0), &config, 1.0);
        assert!((position.length() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn walking_follows_the_slope() {
        let config = PlayerConfig::default();
        let (mut position, mut state, _) = standing();
        let normal = Vec3::new(0.0, 1.0, 1.0).normalize();
        let ground = Some(GroundHit {
            point: Vec3::ZERO,
            normal,
        });
        let intent = MoveIntent {
            direction: Vec3::NEG_Z,
            speed: 1.0,
            jump: false,
        };
        step_motion(&mut position, &mut state, intent, ground, &FlatGround(-10.0), &config, 1.0);

        assert!(state.is_grounded);
        assert!(position.y > 0.5);
        assert!(position.dot(normal).abs() < 1e-5);
        assert!((position.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn jump_needs_the_ability() {
        let config = PlayerConfig::default();
        let mut abilities = registry();
        let keys = MoveKeys {
            jump: true,
            ..default()
        };

        let (mut position, mut state, ground) = standing();
        let intent = move_intent(&keys, &abilities, config.move_speed);
        step_motion(&mut position, &mut state, intent, ground, &FlatGround(0.0), &config, DT);
        assert_eq!(position.y, 0.0);
        assert!(state.is_grounded);

        abilities.unlock(AbilityId::Jump);
        let intent = move_intent(&keys, &abilities, config.move_speed);
        step_motion(&mut position, &mut state, intent, ground, &FlatGround(0.0), &config, DT);
        assert!(!state.is_grounded);
        // Launch at 12, one gravity step, plus the take-off lift
        assert!((state.vertical_velocity - 9.0).abs() < 1e-5);
        assert!((position.y - (0.1 + 0.9)).abs() < 1e-5);
    }

    #[test]
    fn falls_under_gravity_and_lands_on_the_terrain() {
        let config = PlayerConfig::default();
        let mut position = Vec3::new(0.0, 5.0, 0.0);
        let mut state = MovementState::default();
        let ground = Some(GroundHit {
            point: Vec3::ZERO,
            normal: Vec3::Y,
        });
        let idle = MoveIntent {
            direction: Vec3::ZERO,
            speed: 0.0,
            jump: false,
        };

        step_motion(&mut position, &mut state, idle, ground, &FlatGround(0.0), &config, DT);
        assert!(!state.is_grounded);
        assert!((state.vertical_velocity + 3.0).abs() < 1e-5);
        assert!((position.y - 4.7).abs() < 1e-5);

        for _ in 0..20 {
            step_motion(&mut position, &mut state, idle, ground, &FlatGround(0.0), &config, DT);
        }
        assert_eq!(position.y, 0.0);
        assert!(state.is_grounded);
        assert_eq!(state.vertical_velocity, 0.0);
    }

    #[test]
    fn missing_probe_still_lands_on_the_terrain() {
        let config = PlayerConfig::default();
        let mut position = Vec3::new(0.0, -3.0, 0.0);
        let mut state = MovementState::default();
        let idle = MoveIntent {
            direction: Vec3::ZERO,
            speed: 0.0,
            jump: false,
        };
        step_motion(&mut position, &mut state, idle, None, &FlatGround(2.0), &config, DT);
        assert_eq!(position.y, 2.0);
        assert!(state.is_grounded);
    }

    #[test]
    fn pitch_is_clamped_and_yaw_follows_sensitivity() {
        let (yaw, pitch) = look_delta(0.0, Vec2::new(100.0, -1000.0), 0.2, 89.0);
        assert!((yaw + 20f32.to_radians()).abs() < 1e-6);
        assert_eq!(pitch, 89.0);

        let (_, pitch) = look_delta(10.0, Vec2::new(0.0, 25.0), 0.2, 89.0);
        assert!((pitch - 5.0).abs() < 1e-5);
    }
}
