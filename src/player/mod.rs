//! Player module - player entity, movement, camera control and actions.

mod actions;
mod components;
mod interaction;
mod movement;
mod plugin;

pub use actions::blink_destination;
pub use components::*;
pub use movement::{move_intent, step_motion, GroundHit, MoveIntent, MoveKeys, DEFAULT_FOV};
pub use plugin::PlayerPlugin;
