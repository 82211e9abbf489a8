//! UI module - the UI collaborator: HUD and overlays.

mod hud;
mod plugin;

pub use plugin::UiPlugin;
