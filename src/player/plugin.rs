//! Player plugin - avatar movement and melee.

use bevy::prelude::*;

use super::movement;
use crate::core::{ResolveSet, SimSet};

/// Player plugin - the movement controller for the avatar.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, movement::drive_avatar.in_set(SimSet::Act))
            .add_systems(Update, movement::melee_attack.in_set(ResolveSet::Contacts));
    }
}
