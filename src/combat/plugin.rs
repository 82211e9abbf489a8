//! Combat plugin - health, damage and death resolution.

use bevy::prelude::*;

use super::systems;
use crate::core::{fire_due_timers, ResolveSet, SimSet};

/// Combat plugin - the health model for every damageable actor.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, systems::apply_damage.in_set(ResolveSet::Damage))
            .add_systems(Update, systems::resolve_deaths.in_set(ResolveSet::Deaths))
            .add_systems(
                Update,
                systems::revert_flashes
                    .in_set(SimSet::Timers)
                    .after(fire_due_timers),
            );
    }
}
