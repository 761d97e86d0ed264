//! UI module - menus, HUD and the spellbook.

mod hud;
mod plugin;
mod spellbook;

pub use plugin::UiPlugin;
pub use spellbook::{SpellbookTab, SpellbookView};
