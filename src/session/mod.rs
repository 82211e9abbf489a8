//! Session module - score, the single game session, game over and restart.

mod pickups;
mod plugin;
mod state;

pub use pickups::{ScorePickup, PICKUP_SOUND};
pub use plugin::SessionPlugin;
pub use state::*;
