//! Score pickups: blocks that award score when the avatar touches them.

use bevy::prelude::*;

use super::state::{GameSession, ScoreValue};
use crate::core::{ContactEvent, PlaySound};
use crate::player::Avatar;

/// Clip requested when a pickup is collected.
pub const PICKUP_SOUND: &str = "Explosion";

/// Marker for a collectible that awards its `ScoreValue` once.
#[derive(Component, Debug, Default)]
pub struct ScorePickup;

pub fn collect_score_pickups(
    mut commands: Commands,
    mut contacts: EventReader<ContactEvent>,
    avatars: Query<(), With<Avatar>>,
    pickups: Query<(&Transform, Option<&ScoreValue>), With<ScorePickup>>,
    mut session: ResMut<GameSession>,
    mut sounds: EventWriter<PlaySound>,
) {
    let mut collected = Vec::new();

    for contact in contacts.read() {
        for (pickup, other) in [(contact.a, contact.b), (contact.b, contact.a)] {
            if collected.contains(&pickup) || !avatars.contains(other) {
                continue;
            }
            let Ok((transform, value)) = pickups.get(pickup) else {
                continue;
            };

            session.add_score(value.copied().unwrap_or_default().0);
            sounds.send(PlaySound {
                clip: PICKUP_SOUND.to_string(),
                position: transform.translation,
            });
            commands.entity(pickup).despawn_recursive();
            collected.push(pickup);
        }
    }
}
