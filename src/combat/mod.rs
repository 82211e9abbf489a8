//! Combat module - health, hit flashes and death policies.

mod components;
mod plugin;
mod systems;

pub use components::*;
pub use plugin::CombatPlugin;
