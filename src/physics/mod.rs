//! Physics module - velocity integration, play-plane pinning and the
//! bridge to the rapier backend for contacts and overlap queries.

mod bridge;
mod motion;
mod plugin;

pub use bridge::*;
pub use motion::*;
pub use plugin::PhysicsPlugin;
