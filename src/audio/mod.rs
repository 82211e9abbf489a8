//! Audio module - the audio collaborator.

mod library;
mod plugin;

pub use library::SoundLibrary;
pub use plugin::AudioBridgePlugin;
