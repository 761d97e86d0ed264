//! Abilities module - learnable capabilities, cooldowns, and unlock progression.

mod components;
mod plugin;
mod progression;
mod registry;

pub use components::*;
pub use plugin::AbilityPlugin;
pub use progression::{awaken, unlock_message, unlock_random, AwakeningTimer, NOTHING_LEFT};
pub use registry::AbilityRegistry;
