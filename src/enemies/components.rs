//! Enemy-related components and the live enemy table.

use bevy::prelude::*;

use crate::core::EnemyConfig;

/// Marker component for all enemies.
#[derive(Component)]
pub struct Enemy;

/// Stable enemy identifier. Allocated in spawn order and never reused.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EnemyId(pub u64);

/// AI state, re-derived every tick from the distance to the player.
#[derive(Component, Default, PartialEq, Eq, Clone, Copy, Debug)]
pub enum AiState {
    /// Player is outside the chase radius.
    #[default]
    Idle,
    /// Closing in on the player.
    Pursuing,
    /// In melee range, striking whenever the attack timer allows.
    Attacking,
}

/// Per-enemy tuning, fixed at spawn.
#[derive(Component, Clone, Debug)]
pub struct EnemyStats {
    pub speed: f32,
    pub chase_radius: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    pub damage: i32,
    pub hover_height: f32,
    pub attack_pop: f32,
}

impl EnemyStats {
    /// Stats for a new enemy moving at `speed`.
    pub fn from_config(config: &EnemyConfig, speed: f32) -> Self {
        Self {
            speed,
            chase_radius: config.chase_radius,
            attack_range: config.attack_range,
            attack_cooldown: config.attack_cooldown,
            damage: config.damage,
            hover_height: config.hover_height,
            attack_pop: config.attack_pop,
        }
    }
}

impl Default for EnemyStats {
    fn default() -> Self {
        let config = EnemyConfig::default();
        Self::from_config(&config, config.base_speed)
    }
}

/// Seconds until the next strike is allowed. Counts down while positive.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct AttackTimer(pub f32);

/// Live enemies in spawn order.
///
/// Projectile hit scans walk this table, so "first match" means "oldest
/// enemy in range".
#[derive(Resource, Debug, Default)]
pub struct EnemyRoster {
    entries: Vec<(EnemyId, Entity)>,
    next_id: u64,
}

impl EnemyRoster {
    /// Reserve the next identifier.
    pub fn allocate(&mut self) -> EnemyId {
        let id = EnemyId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn insert(&mut self, id: EnemyId, entity: Entity) {
        self.entries.push((id, entity));
    }

    /// Drop an enemy from the table. Returns its id if it was live.
    pub fn remove(&mut self, entity: Entity) -> Option<EnemyId> {
        let index = self.entries.iter().position(|(_, e)| *e == entity)?;
        Some(self.entries.remove(index).0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EnemyId, Entity)> + '_ {
        self.entries.iter().copied()
    }

    /// Forget every live enemy. Identifiers keep counting up.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_keeps_spawn_order_and_never_reuses_ids() {
        let mut roster = EnemyRoster::default();
        let a = Entity::from_raw(10);
        let b = Entity::from_raw(11);
        let c = Entity::from_raw(12);

        for entity in [a, b, c] {
            let id = roster.allocate();
            roster.insert(id, entity);
        }
        assert_eq!(roster.remove(b), Some(EnemyId(1)));
        assert_eq!(roster.remove(b), None);

        let d = Entity::from_raw(13);
        let id = roster.allocate();
        roster.insert(id, d);

        let order: Vec<_> = roster.iter().collect();
        assert_eq!(order, vec![(EnemyId(0), a), (EnemyId(2), c), (EnemyId(3), d)]);

        roster.clear();
        assert!(roster.is_empty());
        assert_eq!(roster.allocate(), EnemyId(4));
    }
}
