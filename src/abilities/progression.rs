//! Unlock progression: random draws from the locked pool.

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use super::components::AbilityId;
use super::registry::AbilityRegistry;
use crate::core::{GameConfig, Notify};
use crate::player::Player;

/// Shown when a book is read after every ability has been learned.
pub const NOTHING_LEFT: &str = "Nothing (All Learned)";

/// Unlock one locked ability chosen uniformly at random.
///
/// Returns `None` when everything is already learned.
pub fn unlock_random<R: Rng>(registry: &mut AbilityRegistry, rng: &mut R) -> Option<AbilityId> {
    let locked = registry.locked();
    let id = *locked.choose(rng)?;
    registry.unlock(id);
    info!("Unlocked ability: {}", id.key());
    Some(id)
}

/// Unlock one of the four directional abilities at random, whether or not
/// it (or any other) is already learned.
pub fn awaken<R: Rng>(registry: &mut AbilityRegistry, rng: &mut R) -> AbilityId {
    let id = AbilityId::MOVEMENT[rng.gen_range(0..AbilityId::MOVEMENT.len())];
    registry.unlock(id);
    id
}

/// Player-facing text for the outcome of a book pickup.
pub fn unlock_message(outcome: Option<AbilityId>) -> String {
    let name = outcome.map_or(NOTHING_LEFT, AbilityId::name);
    format!("Unlocked: {}", name)
}

/// One-shot delay before the first movement ability wakes up.
#[derive(Resource)]
pub struct AwakeningTimer(pub Timer);

impl AwakeningTimer {
    pub fn new(delay: f32) -> Self {
        Self(Timer::from_seconds(delay.max(0.0), TimerMode::Once))
    }
}

/// Reset the awakening timer for a new session.
pub fn start_awakening_timer(mut commands: Commands, config: Res<GameConfig>) {
    commands.insert_resource(AwakeningTimer::new(config.abilities.awakening_delay));
}

/// Fire the awakening exactly once per session.
pub fn tick_awakening(
    time: Res<Time>,
    mut timer: ResMut<AwakeningTimer>,
    mut player_query: Query<&mut AbilityRegistry, With<Player>>,
    mut notify: EventWriter<Notify>,
) {
    if timer.0.finished() {
        return;
    }
    timer.0.tick(time.delta());
    if !timer.0.just_finished() {
        return;
    }

    let Ok(mut registry) = player_query.get_single_mut() else {
        warn!("Awakening fired without a player");
        return;
    };

    let id = awaken(&mut registry, &mut rand::thread_rng());
    info!("Awakening unlocked {}", id.key());
    notify.send(Notify(format!("SUDDENLY: You can {}!", id.name())));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AbilityConfig;
    use bevy::ecs::system::RunSystemOnce;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    #[test]
    fn unlock_random_never_repeats_and_drains_the_pool() {
        let mut registry = AbilityRegistry::new(&AbilityConfig::default());
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = Vec::new();

        for _ in 0..AbilityId::ALL.len() {
            let before = registry.locked();
            let id = unlock_random(&mut registry, &mut rng).unwrap();
            assert!(before.contains(&id));
            assert!(!seen.contains(&id));
            assert!(registry.is_unlocked(id));
            seen.push(id);
        }

        assert!(registry.locked().is_empty());
        assert_eq!(unlock_random(&mut registry, &mut rng), None);
        assert_eq!(unlock_random(&mut registry, &mut rng), None);
    }

    #[test]
    fn unlock_random_picks_the_only_locked_ability() {
        let mut registry = AbilityRegistry::new(&AbilityConfig::default());
        for id in AbilityId::ALL {
            if id != AbilityId::Shield {
                registry.unlock(id);
            }
        }
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(unlock_random(&mut registry, &mut rng), Some(AbilityId::Shield));
    }

    #[test]
    fn awaken_only_draws_directional_movement() {
        for seed in 0..32 {
            let mut registry = AbilityRegistry::new(&AbilityConfig::default());
            let mut rng = StdRng::seed_from_u64(seed);
            let id = awaken(&mut registry, &mut rng);

            assert!(AbilityId::MOVEMENT.contains(&id));
            assert!(registry.is_unlocked(id));
            assert_eq!(registry.unlocked().len(), 1);
        }
    }

    #[test]
    fn awaken_ignores_what_is_already_learned() {
        let mut registry = AbilityRegistry::new(&AbilityConfig::default());
        for id in AbilityId::MOVEMENT {
            registry.unlock(id);
        }
        let mut rng = StdRng::seed_from_u64(3);
        let id = awaken(&mut registry, &mut rng);
        assert!(registry.is_unlocked(id));
        assert_eq!(registry.unlocked().len(), 4);
    }

    #[test]
    fn messages_name_the_ability_or_the_sentinel() {
        assert_eq!(unlock_message(Some(AbilityId::Shoot)), "Unlocked: Void Bolt");
        assert_eq!(unlock_message(None), "Unlocked: Nothing (All Learned)");
    }

    fn advance_and_tick(world: &mut World, seconds: f32) {
        world
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(seconds));
        world.run_system_once(tick_awakening).unwrap();
    }

    fn learned(world: &mut World) -> Vec<AbilityId> {
        world
            .query_filtered::<&AbilityRegistry, With<Player>>()
            .single(world)
            .unlocked()
            .iter()
            .map(|ability| ability.id)
            .collect()
    }

    #[test]
    fn awakening_fires_once_after_the_delay() {
        let mut world = World::new();
        world.insert_resource(Time::<()>::default());
        world.init_resource::<Events<Notify>>();
        world.insert_resource(AwakeningTimer::new(5.0));
        world.spawn((Player, AbilityRegistry::new(&AbilityConfig::default())));

        advance_and_tick(&mut world, 3.0);
        assert!(learned(&mut world).is_empty());

        advance_and_tick(&mut world, 3.0);
        let first = learned(&mut world);
        assert_eq!(first.len(), 1);
        assert!(AbilityId::MOVEMENT.contains(&first[0]));

        advance_and_tick(&mut world, 10.0);
        advance_and_tick(&mut world, 10.0);
        assert_eq!(learned(&mut world), first);
        assert_eq!(world.resource::<Events<Notify>>().len(), 1);
    }

    #[test]
    fn negative_delay_wakes_on_the_first_tick() {
        assert!(AwakeningTimer::new(-1.0).0.duration().is_zero());
    }
}
