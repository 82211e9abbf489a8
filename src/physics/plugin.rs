//! Physics plugin - integration, plane pinning and rapier bridging.

use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;

use super::bridge::*;
use super::motion::*;
use crate::core::{ResolveSet, SimSet};

/// Physics plugin - the discrete physics primitives the simulation relies on.
///
/// The rapier plugin itself is added by the application; this plugin only
/// reads from it when present.
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<CollisionEvent>()
            .add_systems(
                Update,
                (synthesize_probe_anchors, detect_ground)
                    .chain()
                    .in_set(SimSet::Input),
            )
            .add_systems(
                Update,
                (integrate_motion, pin_to_plane)
                    .chain()
                    .in_set(SimSet::Integrate),
            )
            .add_systems(
                Update,
                forward_collision_events.in_set(ResolveSet::Forward),
            );
    }
}
