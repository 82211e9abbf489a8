//! Enemy behaviour systems: aim, patrol, chase, fire and touch damage.

use bevy::prelude::*;

use super::components::*;
use crate::core::{display_name, ContactEvent, DamageEvent, SimulationConfig};
use crate::physics::{move_towards, Motion, PlayPlane};
use crate::player::Avatar;
use crate::projectiles::{spawn_projectile, ProjectileSpawn, ProjectileTemplate};

/// Give shooting enemies without an explicit turret the child named `Turret`.
///
/// Runs once per new enemy; a missing turret is reported here and aiming is
/// skipped for that enemy from then on.
#[allow(clippy::type_complexity)]
pub fn resolve_turrets(
    mut commands: Commands,
    enemies: Query<
        (Entity, Option<&Children>, Option<&Name>),
        (Added<Enemy>, With<FireControl>, Without<Turret>),
    >,
    parts: Query<(&Name, &Transform)>,
) {
    for (entity, children, name) in enemies.iter() {
        let found = children.and_then(|children| {
            children.iter().find_map(|&child| {
                parts
                    .get(child)
                    .ok()
                    .filter(|(part, _)| part.as_str() == "Turret")
                    .map(|(_, transform)| (child, transform.translation))
            })
        });

        match found {
            Some((child, offset)) => {
                let mut turret = Turret::new(offset);
                turret.visual = Some(child);
                commands.entity(entity).insert(turret);
            }
            None => warn!("Enemy turret not found on {}!", display_name(entity, name)),
        }
    }
}

/// Snap each turret to face the avatar.
pub fn aim_turrets(
    avatar: Query<&Transform, (With<Avatar>, Without<Enemy>)>,
    mut enemies: Query<(&Transform, &mut Turret), With<Enemy>>,
) {
    let Ok(avatar) = avatar.get_single() else {
        return;
    };

    for (body, mut turret) in enemies.iter_mut() {
        turret.aim_degrees = aim_angle(turret.world_position(body), avatar.translation);
    }
}

/// Keep turret visuals in line with the aim.
pub fn sync_turret_visuals(
    enemies: Query<(&Transform, &Turret), With<Enemy>>,
    mut visuals: Query<&mut Transform, (Without<Enemy>, Without<Avatar>)>,
) {
    for (body, turret) in enemies.iter() {
        let Some(visual) = turret.visual else {
            continue;
        };
        if let Ok(mut transform) = visuals.get_mut(visual) {
            transform.translation = turret.local_offset;
            transform.rotation = turret.local_rotation(body);
        }
    }
}

/// Drive patrol velocity, flipping at the corridor ends.
pub fn patrol_enemies(mut enemies: Query<(&Transform, &mut Patrol, &mut Motion), With<Enemy>>) {
    for (transform, mut patrol, mut motion) in enemies.iter_mut() {
        if patrol.speed <= 0.0 {
            motion.velocity = Vec3::ZERO;
            continue;
        }
        motion.velocity.x = patrol.step(transform.translation.x);
    }
}

/// Keep patrolling enemies inside their corridor after integration.
pub fn confine_patrols(mut enemies: Query<(&mut Transform, &Patrol)>) {
    for (mut transform, patrol) in enemies.iter_mut() {
        let x = patrol.confine(transform.translation.x);
        if x != transform.translation.x {
            transform.translation.x = x;
        }
    }
}

/// Move chasers toward the avatar on their plane.
pub fn chase_avatar(
    time: Res<Time>,
    avatar: Query<&Transform, (With<Avatar>, Without<Enemy>)>,
    mut enemies: Query<(&mut Transform, &Chase, Option<&PlayPlane>), With<Enemy>>,
) {
    let Ok(avatar) = avatar.get_single() else {
        return;
    };
    let dt = time.delta_secs();

    for (mut transform, chase, plane) in enemies.iter_mut() {
        let mut target = avatar.translation;
        target.z = plane.map_or(transform.translation.z, |plane| plane.z);
        transform.translation = move_towards(transform.translation, target, chase.speed * dt);
    }
}

/// Count down fire timers and launch projectiles at the avatar.
pub fn fire_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<SimulationConfig>,
    avatar: Query<&Transform, (With<Avatar>, Without<Enemy>)>,
    mut enemies: Query<
        (Entity, &Transform, &mut FireControl, &ProjectileTemplate, Option<&Turret>),
        With<Enemy>,
    >,
) {
    let dt = time.delta_secs();
    let avatar = avatar.get_single().ok();
    let lifetime = config.rules().projectile_lifetime;

    for (entity, body, mut fire, template, turret) in enemies.iter_mut() {
        if !fire.tick(dt) {
            continue;
        }
        // Nothing to shoot at; the timer still rearms
        let Some(avatar) = avatar else {
            continue;
        };

        let (position, heading) = match turret {
            Some(turret) => (turret.world_position(body), turret.aim_degrees),
            None => (
                body.translation,
                aim_angle(body.translation, avatar.translation),
            ),
        };

        spawn_projectile(
            &mut commands,
            ProjectileSpawn {
                position,
                heading_degrees: heading,
                damage: fire.damage,
                owner: entity,
                template: template.clone(),
                lifetime,
            },
        );
    }
}

/// Hurt the avatar when an enemy with contact damage touches it.
pub fn apply_contact_damage(
    config: Res<SimulationConfig>,
    mut contacts: EventReader<ContactEvent>,
    avatar: Query<Entity, With<Avatar>>,
    enemies: Query<&ContactDamage, With<Enemy>>,
    mut damage: EventWriter<DamageEvent>,
) {
    if !config.rules().enemy_contact_damage {
        contacts.clear();
        return;
    }

    for contact in contacts.read() {
        for (enemy, other) in [(contact.a, contact.b), (contact.b, contact.a)] {
            let Ok(touch) = enemies.get(enemy) else {
                continue;
            };
            if avatar.get(other).is_ok() {
                damage.send(DamageEvent {
                    target: other,
                    source: enemy,
                    amount: touch.amount,
                });
            }
        }
    }
}
