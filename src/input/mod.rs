//! Input module - normalized per-frame input snapshot.

mod plugin;
mod sampler;

pub use plugin::InputSamplingPlugin;
pub use sampler::*;
