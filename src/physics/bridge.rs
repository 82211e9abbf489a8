//! Discrete queries backed by rapier when a physics context exists.
//!
//! Without a rapier context (headless drivers, tests) contacts are expected
//! as `ContactEvent`s from the driver, overlap queries fall back to sphere
//! tests against `Hurtbox`es, and ground contact is left as supplied.
//! The avatar's own movement goes through rapier's character controller
//! whenever a context is present (see `integrate_motion`).

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::core::{display_name, ContactEvent};

/// Radius used by fallback overlap queries.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Hurtbox {
    pub radius: f32,
}

impl Default for Hurtbox {
    fn default() -> Self {
        Self { radius: 0.5 }
    }
}

/// Half extent of an actor's body along Y.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct BodyExtents {
    pub half_height: f32,
}

/// Whether the actor is standing on something this frame.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroundContact {
    pub grounded: bool,
}

/// Small sphere below the body used to detect ground.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct GroundProbe {
    /// Offset from the body origin; synthesized when absent
    pub anchor: Option<Vec3>,
    pub radius: f32,
}

impl Default for GroundProbe {
    fn default() -> Self {
        Self {
            anchor: None,
            radius: 0.2,
        }
    }
}

/// Turn rapier's collision starts into simulation contacts.
pub fn forward_collision_events(
    mut collisions: EventReader<CollisionEvent>,
    mut contacts: EventWriter<ContactEvent>,
) {
    for event in collisions.read() {
        if let CollisionEvent::Started(a, b, _) = event {
            contacts.send(ContactEvent { a: *a, b: *b });
        }
    }
}

/// Give anchorless ground probes an anchor just below the body.
pub fn synthesize_probe_anchors(
    mut query: Query<(Entity, Option<&Name>, &mut GroundProbe, Option<&BodyExtents>)>,
) {
    for (entity, name, mut probe, extents) in query.iter_mut() {
        if probe.anchor.is_some() {
            continue;
        }
        let depth = extents.map_or(1.0, |e| e.half_height);
        probe.anchor = Some(Vec3::new(0.0, -depth, 0.0));
        warn!(
            "{} has no ground probe anchor, using one {} below its origin",
            display_name(entity, name),
            depth
        );
    }
}

/// Refresh `GroundContact` from rapier.
///
/// Character controllers report grounding from their last move; other
/// bodies use a sphere overlap at the probe anchor.
pub fn detect_ground(
    rapier_context: Query<&RapierContext>,
    mut query: Query<(
        Entity,
        &Transform,
        &GroundProbe,
        &mut GroundContact,
        Option<&KinematicCharacterControllerOutput>,
    )>,
) {
    // Without physics the driver supplies ground contact.
    let Ok(context) = rapier_context.get_single() else {
        return;
    };

    for (entity, transform, probe, mut contact, output) in query.iter_mut() {
        let grounded = if let Some(output) = output {
            output.grounded
        } else {
            let Some(anchor) = probe.anchor else {
                continue;
            };
            let mut hit = false;
            context.intersections_with_shape(
                transform.translation + anchor,
                Quat::IDENTITY,
                &Collider::ball(probe.radius),
                QueryFilter::default()
                    .exclude_collider(entity)
                    .exclude_sensors(),
                |_| {
                    hit = true;
                    false
                },
            );
            hit
        };
        if contact.grounded != grounded {
            contact.grounded = grounded;
        }
    }
}

/// Sphere overlap query over damageable bodies.
#[derive(SystemParam)]
pub struct Overlaps<'w, 's> {
    rapier_context: Query<'w, 's, &'static RapierContext>,
    hurtboxes: Query<'w, 's, (Entity, &'static Transform, &'static Hurtbox)>,
}

impl Overlaps<'_, '_> {
    /// Every entity whose body intersects the sphere, except `exclude`.
    pub fn sphere(&self, center: Vec3, radius: f32, exclude: Entity) -> Vec<Entity> {
        let mut hits = Vec::new();

        if let Ok(context) = self.rapier_context.get_single() {
            context.intersections_with_shape(
                center,
                Quat::IDENTITY,
                &Collider::ball(radius),
                QueryFilter::default().exclude_collider(exclude),
                |hit| {
                    hits.push(hit);
                    true
                },
            );
            return hits;
        }

        for (entity, transform, hurtbox) in self.hurtboxes.iter() {
            if entity == exclude {
                continue;
            }
            if transform.translation.distance(center) <= radius + hurtbox.radius {
                hits.push(entity);
            }
        }
        hits
    }
}
