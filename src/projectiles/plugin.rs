//! Projectile plugin - homing, flight and hits.

use bevy::prelude::*;

use super::systems::*;
use crate::core::{ResolveSet, SimSet};

/// Projectile plugin - moves enemy shots and resolves their hits.
pub struct ProjectilePlugin;

impl Plugin for ProjectilePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (latch_targets, steer_projectiles)
                .chain()
                .in_set(SimSet::Act),
        )
        .add_systems(
            Update,
            (fly_projectiles, expire_projectiles)
                .chain()
                .in_set(SimSet::Integrate),
        )
        .add_systems(
            Update,
            resolve_projectile_contacts.in_set(ResolveSet::Contacts),
        );
    }
}
