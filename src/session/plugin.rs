//! Session plugin - installs the single game session.

use bevy::prelude::*;

use super::pickups::collect_score_pickups;
use super::state::{request_scene_reload, start_new_session, GameSession};
use crate::core::{fire_due_timers, ResolveSet, SimSet, SimulationConfig};

/// Session plugin - owns score, pickups and the game-over restart.
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        let scene = app
            .world()
            .get_resource::<SimulationConfig>()
            .map(|config| config.scene.clone())
            .unwrap_or_else(|| SimulationConfig::default().scene);
        GameSession::install(app.world_mut(), scene);

        app.add_systems(Update, start_new_session.in_set(SimSet::Act))
            .add_systems(Update, collect_score_pickups.in_set(ResolveSet::Contacts))
            .add_systems(
                Update,
                request_scene_reload
                    .in_set(SimSet::Timers)
                    .after(fire_due_timers),
            );
    }
}
