//! Global events used for cross-system communication.
//!
//! The gameplay core never talks to the UI directly. It fires these
//! events and the UI plugin renders them.

use bevy::prelude::*;

/// Sent when something hits the player.
///
/// The damage system applies it through the shield check, so a sender
/// never needs to know whether the hit lands.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerDamageEvent {
    /// Enemy that struck
    pub source: Entity,
    pub amount: i32,
}

/// A short message for the player (unlocks, shield activation).
#[derive(Event, Debug, Clone)]
pub struct Notify(pub String);

impl Notify {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

/// Red screen flash after the player actually lost health.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct DamageFlash;
