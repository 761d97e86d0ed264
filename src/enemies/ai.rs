//! Enemy AI: idle / pursue / attack, re-evaluated every tick from distance.

use bevy::prelude::*;

use super::components::{AiState, AttackTimer, Enemy, EnemyStats};
use crate::core::PlayerDamageEvent;
use crate::player::Player;
use crate::world::{HeightSource, Terrain};

/// Result of one AI tick for a single enemy.
#[derive(Debug, Clone, PartialEq)]
pub struct AiStep {
    pub state: AiState,
    pub position: Vec3,
    /// Point to turn toward (yaw only), if any
    pub face: Option<Vec3>,
    /// The enemy landed a hit this tick
    pub strike: bool,
}

/// Advance one enemy by `dt`.
///
/// The attack timer decays every tick whatever the state. Pursuit moves
/// along the ground-projected direction and re-seats the enemy on the
/// terrain. A strike resets the timer and pops the enemy upward.
pub fn step_enemy(
    position: Vec3,
    player: Vec3,
    stats: &EnemyStats,
    timer: &mut AttackTimer,
    terrain: &impl HeightSource,
    dt: f32,
) -> AiStep {
    if timer.0 > 0.0 {
        timer.0 -= dt;
    }

    let distance = position.distance(player);
    if distance > stats.chase_radius {
        return AiStep {
            state: AiState::Idle,
            position,
            face: None,
            strike: false,
        };
    }

    let flat = Vec3::new(player.x - position.x, 0.0, player.z - position.z);
    let face = (flat.length() > 0.001).then(|| Vec3::new(player.x, position.y, player.z));

    if distance > stats.attack_range {
        let mut next = position + flat.normalize_or_zero() * stats.speed * dt;
        next.y = terrain.height(next.x, next.z) + stats.hover_height;
        return AiStep {
            state: AiState::Pursuing,
            position: next,
            face,
            strike: false,
        };
    }

    let strike = timer.0 <= 0.0;
    let mut position = position;
    if strike {
        timer.0 = stats.attack_cooldown;
        position.y += stats.attack_pop;
    }
    AiStep {
        state: AiState::Attacking,
        position,
        face,
        strike,
    }
}

/// Drive every enemy toward the player and report strikes as damage events.
pub fn enemy_ai(
    time: Res<Time>,
    terrain: Res<Terrain>,
    player_query: Query<&Transform, (With<Player>, Without<Enemy>)>,
    mut enemy_query: Query<
        (Entity, &mut Transform, &EnemyStats, &mut AiState, &mut AttackTimer),
        (With<Enemy>, Without<Player>),
    >,
    mut damage_events: EventWriter<PlayerDamageEvent>,
) {
    let Ok(player_transform) = player_query.get_single() else {
        return;
    };
    let dt = time.delta_secs();

    for (entity, mut transform, stats, mut ai_state, mut timer) in enemy_query.iter_mut() {
        let step = step_enemy(
            transform.translation,
            player_transform.translation,
            stats,
            &mut timer,
            &*terrain,
            dt,
        );

        transform.translation = step.position;
        if let Some(target) = step.face {
            // Level with the enemy so only yaw changes
            let target = Vec3::new(target.x, transform.translation.y, target.z);
            transform.look_at(target, Vec3::Y);
        }
        if *ai_state != step.state {
            *ai_state = step.state;
        }
        if step.strike {
            damage_events.send(PlayerDamageEvent {
                source: entity,
                amount: stats.damage,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::FlatGround;

    const DT: f32 = 0.1;

    fn stats() -> EnemyStats {
        EnemyStats::default()
    }

    fn at_distance(d: f32) -> (Vec3, Vec3) {
        (Vec3::new(0.0, 1.0, 0.0), Vec3::new(d, 1.0, 0.0))
    }

    #[test]
    fn idle_beyond_chase_radius() {
        let (enemy, player) = at_distance(40.5);
        let mut timer = AttackTimer(0.0);
        let step = step_enemy(enemy, player, &stats(), &mut timer, &FlatGround(0.0), DT);

        assert_eq!(step.state, AiState::Idle);
        assert_eq!(step.position, enemy);
        assert_eq!(step.face, None);
        assert!(!step.strike);
    }

    #[test]
    fn pursues_inside_chase_radius() {
        let (enemy, player) = at_distance(40.0);
        let mut timer = AttackTimer(0.0);
        let step = step_enemy(enemy, player, &stats(), &mut timer, &FlatGround(0.0), DT);

        assert_eq!(step.state, AiState::Pursuing);
        assert!((step.position.x - 0.4).abs() < 1e-5);
        assert_eq!(step.position.z, 0.0);
        assert!(!step.strike);
    }

    #[test]
    fn pursuit_is_ground_projected_and_reseated_on_terrain() {
        let enemy = Vec3::new(0.0, 1.0, 0.0);
        let player = Vec3::new(0.0, 21.0, 10.0);
        let mut timer = AttackTimer(0.0);
        let step = step_enemy(enemy, player, &stats(), &mut timer, &FlatGround(3.0), 1.0);

        assert_eq!(step.state, AiState::Pursuing);
        assert!((step.position.z - 4.0).abs() < 1e-5);
        assert_eq!(step.position.y, 4.0);
        assert_eq!(step.face, Some(Vec3::new(0.0, 1.0, 10.0)));
    }

    #[test]
    fn strikes_in_range_when_timer_is_ready() {
        let (enemy, player) = at_distance(2.0);
        let mut timer = AttackTimer(0.0);
        let step = step_enemy(enemy, player, &stats(), &mut timer, &FlatGround(0.0), DT);

        assert_eq!(step.state, AiState::Attacking);
        assert!(step.strike);
        assert_eq!(timer.0, 1.5);
        assert_eq!(step.position.x, enemy.x);
        assert_eq!(step.position.y, enemy.y + 0.5);
    }

    #[test]
    fn waits_for_the_attack_cooldown() {
        let (enemy, player) = at_distance(1.0);
        let mut timer = AttackTimer(0.0);
        let mut strikes = 0;

        // 3 seconds of ticks: strikes at t=0, t=1.5 and t=3.0
        for _ in 0..=30 {
            let step = step_enemy(enemy, player, &stats(), &mut timer, &FlatGround(0.0), DT);
            assert_eq!(step.state, AiState::Attacking);
            if step.strike {
                strikes += 1;
            }
        }
        assert!((2..=3).contains(&strikes));
    }

    #[test]
    fn timer_decays_outside_attack_range() {
        let (enemy, player) = at_distance(50.0);
        let mut timer = AttackTimer(1.5);
        for _ in 0..15 {
            step_enemy(enemy, player, &stats(), &mut timer, &FlatGround(0.0), DT);
        }
        assert!(timer.0 <= 1e-4);

        let (enemy, player) = at_distance(1.0);
        let step = step_enemy(enemy, player, &stats(), &mut timer, &FlatGround(0.0), DT);
        assert!(step.strike);
    }

    #[test]
    fn no_facing_when_player_is_directly_above() {
        let enemy = Vec3::new(0.0, 1.0, 0.0);
        let player = Vec3::new(0.0, 2.5, 0.0);
        let mut timer = AttackTimer(1.0);
        let step = step_enemy(enemy, player, &stats(), &mut timer, &FlatGround(0.0), DT);

        assert_eq!(step.state, AiState::Attacking);
        assert_eq!(step.face, None);
        assert!(!step.strike);
    }
}
