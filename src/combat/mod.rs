//! Combat module - projectiles, damage intake, and death.

mod damage;
mod plugin;
mod projectile;

pub use plugin::CombatPlugin;
pub use projectile::{
    first_hit, spawn_projectile, step_projectile, Projectile, ProjectileAssets, ProjectileFate,
};
