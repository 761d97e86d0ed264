//! Per-player ability registry: unlock gating, cooldowns and effect windows.
//!
//! All timing is evaluated lazily against the clock reading passed in by the
//! caller. There is no background timer, so every query is safe to poll
//! once per frame.

use std::collections::BTreeMap;

use bevy::prelude::*;

use super::components::{Ability, AbilityId, AbilityKind};
use crate::core::AbilityConfig;

/// All abilities of one player, keyed by id.
///
/// Lives on the player entity and is dropped with it.
#[derive(Component, Debug, Clone)]
pub struct AbilityRegistry {
    abilities: BTreeMap<AbilityId, Ability>,
}

impl AbilityRegistry {
    /// Build a registry with every ability locked.
    pub fn new(config: &AbilityConfig) -> Self {
        let abilities = AbilityId::ALL
            .into_iter()
            .map(|id| {
                let ability = match id {
                    AbilityId::Blink => Ability::active(id, config.blink),
                    AbilityId::Shield => Ability::active(id, config.shield),
                    _ => Ability::passive(id),
                };
                (id, ability)
            })
            .collect();
        Self { abilities }
    }

    pub fn get(&self, id: AbilityId) -> Option<&Ability> {
        self.abilities.get(&id)
    }

    pub fn is_unlocked(&self, id: AbilityId) -> bool {
        self.abilities.get(&id).is_some_and(|a| a.unlocked)
    }

    /// Whether the ability may be used right now.
    ///
    /// Passive abilities only check the unlock; active ones also need their
    /// cooldown to have elapsed.
    pub fn can_use(&self, id: AbilityId, now: f32) -> bool {
        let Some(ability) = self.abilities.get(&id) else {
            return false;
        };
        if !ability.unlocked {
            return false;
        }
        match &ability.kind {
            AbilityKind::Passive => true,
            AbilityKind::Active(timing) => timing.ready(now),
        }
    }

    /// Try to trigger an ability. Returns false, without touching any state,
    /// if it cannot be used.
    pub fn use_ability(&mut self, id: AbilityId, now: f32) -> bool {
        if !self.can_use(id, now) {
            return false;
        }
        if let Some(Ability {
            kind: AbilityKind::Active(timing),
            ..
        }) = self.abilities.get_mut(&id)
        {
            timing.last_used = Some(now);
            if timing.duration > 0.0 {
                timing.active = true;
            }
        }
        true
    }

    /// Whether the ability's effect is in force.
    ///
    /// The window is `[last_used, last_used + duration)`. The cached flag is
    /// cleared the first time it is queried after the window closes.
    pub fn is_active(&mut self, id: AbilityId, now: f32) -> bool {
        let Some(Ability {
            kind: AbilityKind::Active(timing),
            ..
        }) = self.abilities.get_mut(&id)
        else {
            return false;
        };
        if !timing.active {
            return false;
        }
        let Some(last) = timing.last_used else {
            timing.active = false;
            return false;
        };
        if now - last >= timing.duration {
            timing.active = false;
            return false;
        }
        true
    }

    /// Mark an ability as learned. Idempotent; nothing ever locks it again.
    pub fn unlock(&mut self, id: AbilityId) {
        if let Some(ability) = self.abilities.get_mut(&id) {
            ability.unlocked = true;
        }
    }

    /// Ids that are still locked, in declaration order.
    pub fn locked(&self) -> Vec<AbilityId> {
        self.abilities
            .values()
            .filter(|a| !a.unlocked)
            .map(|a| a.id)
            .collect()
    }

    /// Learned abilities, in declaration order.
    pub fn unlocked(&self) -> Vec<&Ability> {
        self.abilities.values().filter(|a| a.unlocked).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ActiveTuning;

    fn registry() -> AbilityRegistry {
        AbilityRegistry::new(&AbilityConfig::default())
    }

    #[test]
    fn everything_starts_locked() {
        let registry = registry();
        for id in AbilityId::ALL {
            assert!(!registry.is_unlocked(id));
            assert!(!registry.can_use(id, 100.0));
        }
        assert_eq!(registry.locked().len(), AbilityId::ALL.len());
        assert!(registry.unlocked().is_empty());
    }

    #[test]
    fn unlock_is_monotonic_and_idempotent() {
        let mut registry = registry();
        registry.unlock(AbilityId::Jump);
        registry.unlock(AbilityId::Jump);
        assert!(registry.is_unlocked(AbilityId::Jump));

        registry.use_ability(AbilityId::Jump, 1.0);
        registry.unlock(AbilityId::Shoot);
        assert!(registry.is_unlocked(AbilityId::Jump));
        assert_eq!(registry.locked().len(), AbilityId::ALL.len() - 2);
    }

    #[test]
    fn passive_abilities_are_pure_gates() {
        let mut registry = registry();
        assert!(!registry.use_ability(AbilityId::Shoot, 0.0));

        registry.unlock(AbilityId::Shoot);
        assert!(registry.can_use(AbilityId::Shoot, 0.0));
        assert!(registry.use_ability(AbilityId::Shoot, 0.0));
        assert!(registry.use_ability(AbilityId::Shoot, 0.0));
        assert!(!registry.is_active(AbilityId::Shoot, 0.0));
    }

    #[test]
    fn locked_active_ability_cannot_be_used() {
        let mut registry = registry();
        assert!(!registry.use_ability(AbilityId::Shield, 0.0));
        assert!(!registry.is_active(AbilityId::Shield, 0.0));
    }

    #[test]
    fn never_used_active_ability_is_ready_at_session_start() {
        let mut registry = registry();
        registry.unlock(AbilityId::Blink);
        assert!(registry.can_use(AbilityId::Blink, 0.0));
    }

    #[test]
    fn cooldown_allows_one_use_per_window() {
        let mut registry = registry();
        registry.unlock(AbilityId::Blink);

        assert!(registry.use_ability(AbilityId::Blink, 2.0));
        assert!(!registry.use_ability(AbilityId::Blink, 2.5));
        assert!(!registry.use_ability(AbilityId::Blink, 11.9));
        assert!(!registry.can_use(AbilityId::Blink, 7.0));
        assert!(registry.use_ability(AbilityId::Blink, 12.0));
        assert!(!registry.can_use(AbilityId::Blink, 12.0));
    }

    #[test]
    fn failed_use_leaves_state_untouched() {
        let mut registry = registry();
        registry.unlock(AbilityId::Shield);
        assert!(registry.use_ability(AbilityId::Shield, 0.0));
        let before = registry.get(AbilityId::Shield).cloned();

        assert!(!registry.use_ability(AbilityId::Shield, 1.0));
        assert_eq!(registry.get(AbilityId::Shield).cloned(), before);
    }

    #[test]
    fn instantaneous_ability_never_becomes_active() {
        let mut registry = registry();
        registry.unlock(AbilityId::Blink);
        assert!(registry.use_ability(AbilityId::Blink, 0.0));
        assert!(!registry.is_active(AbilityId::Blink, 0.0));
    }

    #[test]
    fn effect_window_is_half_open() {
        let config = AbilityConfig {
            shield: ActiveTuning {
                cooldown: 20.0,
                duration: 5.0,
            },
            ..AbilityConfig::default()
        };
        let mut registry = AbilityRegistry::new(&config);
        registry.unlock(AbilityId::Shield);

        assert!(registry.use_ability(AbilityId::Shield, 10.0));
        assert!(registry.is_active(AbilityId::Shield, 10.0));
        assert!(registry.is_active(AbilityId::Shield, 14.99));
        assert!(!registry.is_active(AbilityId::Shield, 15.0));
        // Lazily cleared: stays off even if asked about an earlier time.
        assert!(!registry.is_active(AbilityId::Shield, 12.0));
    }

    #[test]
    fn reactivation_after_cooldown_opens_a_new_window() {
        let mut registry = registry();
        registry.unlock(AbilityId::Shield);

        assert!(registry.use_ability(AbilityId::Shield, 0.0));
        assert!(!registry.is_active(AbilityId::Shield, 6.0));
        assert!(registry.use_ability(AbilityId::Shield, 20.0));
        assert!(registry.is_active(AbilityId::Shield, 21.0));
    }

    #[test]
    fn unlocked_lists_in_declaration_order() {
        let mut registry = registry();
        registry.unlock(AbilityId::Shield);
        registry.unlock(AbilityId::MoveLeft);
        let names: Vec<_> = registry.unlocked().iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["Step Left", "Divine Shield"]);
    }
}
