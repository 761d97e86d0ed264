//! Player damage intake and death detection.

use bevy::prelude::*;

use crate::abilities::AbilityRegistry;
use crate::core::{DamageFlash, GameState, PlayerDamageEvent};
use crate::player::{Player, PlayerStats};

/// Apply queued hits to the player. Shielded hits are swallowed silently.
pub fn apply_player_damage(
    time: Res<Time>,
    mut damage_events: EventReader<PlayerDamageEvent>,
    mut player_query: Query<(&mut PlayerStats, &mut AbilityRegistry), With<Player>>,
    mut flash: EventWriter<DamageFlash>,
) {
    let Ok((mut stats, mut abilities)) = player_query.get_single_mut() else {
        damage_events.clear();
        return;
    };
    let now = time.elapsed_secs();

    for event in damage_events.read() {
        if stats.take_damage(&mut abilities, now, event.amount) {
            debug!("Player hit by {:?} for {}, health {}", event.source, event.amount, stats.health);
            flash.send(DamageFlash);
        }
    }
}

/// End the session once health is gone.
pub fn check_player_death(
    player_query: Query<&PlayerStats, With<Player>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Ok(stats) = player_query.get_single() else {
        return;
    };
    if stats.is_dead() {
        info!("Player died! Transitioning to Game Over...");
        next_state.set(GameState::GameOver);
    }
}
