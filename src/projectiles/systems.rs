//! Projectile spawning, homing, flight and hit resolution.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use crate::core::{ContactEvent, DamageEvent};
use crate::player::Avatar;

/// Everything needed to launch a projectile.
#[derive(Debug, Clone)]
pub struct ProjectileSpawn {
    pub position: Vec3,
    pub heading_degrees: f32,
    pub damage: f32,
    pub owner: Entity,
    pub template: ProjectileTemplate,
    pub lifetime: Option<f32>,
}

/// Spawn a projectile. The homing target is latched on its first frame.
pub fn spawn_projectile(commands: &mut Commands, spawn: ProjectileSpawn) -> Entity {
    let projectile = Projectile {
        speed: spawn.template.speed,
        rotate_speed: spawn.template.rotate_speed,
        damage: spawn.damage,
        owner: spawn.owner,
        target: None,
        heading_degrees: spawn.heading_degrees,
    };
    let transform = Transform::from_translation(spawn.position).with_rotation(projectile.rotation());

    let mut entity = commands.spawn((
        Name::new("Projectile"),
        projectile,
        spawn.template.clone(),
        transform,
        Visibility::default(),
        RigidBody::KinematicPositionBased,
        Collider::ball(spawn.template.radius),
        Sensor,
        ActiveEvents::COLLISION_EVENTS,
        ActiveCollisionTypes::all(),
    ));
    if let Some(remaining) = spawn.lifetime {
        entity.insert(Lifetime { remaining });
    }
    entity.id()
}

/// Latch the avatar as the homing target of newly spawned projectiles.
pub fn latch_targets(
    avatar: Query<Entity, With<Avatar>>,
    mut projectiles: Query<&mut Projectile, Added<Projectile>>,
) {
    let target = avatar.get_single().ok();
    for mut projectile in projectiles.iter_mut() {
        projectile.target = target;
    }
}

/// Turn homing projectiles toward their target's current position.
pub fn steer_projectiles(
    time: Res<Time>,
    targets: Query<&Transform, Without<Projectile>>,
    mut projectiles: Query<(&mut Transform, &mut Projectile)>,
) {
    let dt = time.delta_secs();
    for (mut transform, mut projectile) in projectiles.iter_mut() {
        let Some(target) = projectile.target else {
            continue;
        };
        // A despawned target leaves the projectile flying straight
        let Ok(target) = targets.get(target) else {
            continue;
        };
        projectile.steer(transform.translation, target.translation, dt);
        transform.rotation = projectile.rotation();
    }
}

/// Fly every projectile forward along its heading.
pub fn fly_projectiles(time: Res<Time>, mut projectiles: Query<(&mut Transform, &Projectile)>) {
    let dt = time.delta_secs();
    for (mut transform, projectile) in projectiles.iter_mut() {
        transform.translation = projectile.advance(transform.translation, dt);
    }
}

/// Remove projectiles whose lifetime ran out.
pub fn expire_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    mut projectiles: Query<(Entity, &mut Lifetime), With<Projectile>>,
) {
    let dt = time.delta_secs();
    for (entity, mut lifetime) in projectiles.iter_mut() {
        lifetime.remaining -= dt;
        if lifetime.remaining <= 0.0 {
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Damage the avatar on contact and remove the projectile.
///
/// The owner is ignored. Contact with anything that is not the avatar,
/// terrain included, leaves the projectile flying.
pub fn resolve_projectile_contacts(
    mut commands: Commands,
    mut contacts: EventReader<ContactEvent>,
    projectiles: Query<&Projectile>,
    avatar: Query<(), With<Avatar>>,
    mut damage: EventWriter<DamageEvent>,
) {
    let mut spent: Vec<Entity> = Vec::new();

    for contact in contacts.read() {
        for (shot, other) in [(contact.a, contact.b), (contact.b, contact.a)] {
            let Ok(projectile) = projectiles.get(shot) else {
                continue;
            };
            if spent.contains(&shot) || other == projectile.owner {
                continue;
            }
            if avatar.get(other).is_ok() {
                damage.send(DamageEvent {
                    target: other,
                    source: projectile.owner,
                    amount: projectile.damage,
                });
                commands.entity(shot).despawn_recursive();
                spent.push(shot);
            }
        }
    }
}
