//! Core module - states, events, phase ordering, timers and config.
//!
//! This module provides the foundation that all other simulation systems build upon.

mod config;
mod error;
mod events;
mod label;
mod plugin;
mod schedule;
mod states;

pub use config::*;
pub use error::ConfigError;
pub use events::*;
pub use label::display_name;
pub use plugin::{CorePlugin, ResolveSet, SimSet};
pub use schedule::*;
pub use states::*;
