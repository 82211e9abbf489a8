//! Application states that gate the simulation.
//!
//! Gameplay systems only run in `InGame`. A session restart passes through
//! `Reloading` so that level entities are torn down and rebuilt while
//! process-wide resources such as the score survive.

use bevy::prelude::*;

/// Top-level application state.
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Config and level data are being read
    #[default]
    Loading,
    /// Active simulation
    InGame,
    /// Level is being torn down before re-entering `InGame`
    Reloading,
}
