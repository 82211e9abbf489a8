//! Cross-system events.
//!
//! Entities never mutate each other directly. Damage, contacts, sounds and
//! session requests travel as events and are consumed in the `Resolve` phase.

use bevy::prelude::*;

/// Request to apply damage to an entity carrying `Health`.
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that caused the damage
    pub source: Entity,
    pub amount: f32,
}

/// Sent exactly once when an entity's health reaches zero.
#[derive(Event, Debug, Clone, Copy)]
pub struct DeathEvent {
    pub entity: Entity,
    pub killed_by: Option<Entity>,
}

/// Health-change notification for observers such as a health bar.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct HealthChanged {
    pub entity: Entity,
    /// Current health as a fraction of max, in `[0, 1]`
    pub fraction: f32,
}

/// Sent after an entity was reset to its spawn anchor.
#[derive(Event, Debug, Clone, Copy)]
pub struct Respawned {
    pub entity: Entity,
}

/// Overlap between two trigger volumes, in no particular order.
///
/// Produced from the physics backend's collision events, or written
/// directly by a driver that resolves overlaps itself.
#[derive(Event, Debug, Clone, Copy)]
pub struct ContactEvent {
    pub a: Entity,
    pub b: Entity,
}

impl ContactEvent {
    /// Returns the other participant if `entity` is one side of the contact.
    pub fn other(&self, entity: Entity) -> Option<Entity> {
        if self.a == entity {
            Some(self.b)
        } else if self.b == entity {
            Some(self.a)
        } else {
            None
        }
    }
}

/// Fire-and-forget request for the audio collaborator.
#[derive(Event, Debug, Clone)]
pub struct PlaySound {
    pub clip: String,
    pub position: Vec3,
}

/// Request for the scene collaborator to reload a scene by name.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct ReloadSession {
    pub scene: String,
}
