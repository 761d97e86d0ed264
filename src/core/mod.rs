//! Core game module - states, events, configuration, and system ordering.
//!
//! This module provides the foundation that all other game systems build upon.

mod config;
mod error;
mod events;
mod plugin;
mod states;

pub use config::*;
pub use error::ConfigError;
pub use events::*;
pub use plugin::{CorePlugin, GameplaySet, SessionEntity};
pub use states::*;
