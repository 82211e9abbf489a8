//! Projectiles module - homing shots fired by enemies.

mod components;
mod plugin;
mod systems;

pub use components::*;
pub use plugin::ProjectilePlugin;
pub use systems::{spawn_projectile, ProjectileSpawn};
