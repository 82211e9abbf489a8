//! Enemies module - enemy entities, behaviour and spawning.

mod ai;
mod components;
pub mod data;
mod plugin;
mod spawning;

pub use components::*;
pub use data::EnemyRegistry;
pub use plugin::EnemyPlugin;
pub use spawning::{spawn_enemy, EnemySpawn};
