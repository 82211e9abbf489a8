//! World module - the scene collaborator that builds levels from data.

mod builder;
mod data;
mod materials;
mod plugin;

pub use builder::LevelEntity;
pub use data::{CurrentLevel, LevelDefinition, LevelRegistry};
pub use plugin::WorldPlugin;
