//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;

use super::ai;
use super::data::{load_enemy_definitions, EnemyRegistry};
use crate::core::{ResolveSet, SimSet};
use crate::physics::integrate_motion;

/// Enemy plugin - handles turret aim, patrol, chase, fire and touch damage.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EnemyRegistry>()
            .add_systems(Startup, load_enemy_definitions)
            .add_systems(Update, ai::resolve_turrets.in_set(SimSet::Input))
            .add_systems(
                Update,
                (
                    ai::aim_turrets,
                    ai::sync_turret_visuals,
                    ai::patrol_enemies,
                    ai::chase_avatar,
                    ai::fire_projectiles,
                )
                    .chain()
                    .in_set(SimSet::Act),
            )
            .add_systems(
                Update,
                ai::confine_patrols
                    .in_set(SimSet::Integrate)
                    .after(integrate_motion),
            )
            .add_systems(Update, ai::apply_contact_damage.in_set(ResolveSet::Contacts));
    }
}
