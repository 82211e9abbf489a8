//! Camera plugin - orbit and follow rigs.

use bevy::prelude::*;
use bevy::transform::TransformSystem;

use super::{follow, orbit};
use crate::core::GameState;

/// Camera plugin - runs after gameplay so rigs read this frame's target poses.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PostUpdate,
            (orbit::orbit_camera, follow::follow_camera)
                .before(TransformSystem::TransformPropagate)
                .run_if(in_state(GameState::InGame)),
        );
    }
}
