//! Player module - avatar entity, movement controller and melee attack.

mod components;
mod movement;
mod plugin;

pub use components::*;
pub use movement::{jump_velocity, spawn_avatar, step_velocity, turn_towards, AvatarSpawn};
pub use plugin::PlayerPlugin;
