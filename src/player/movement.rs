//! Avatar movement controller and melee attack.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use crate::combat::{DeathPolicy, Health, HitFlash, SpawnAnchor};
use crate::core::DamageEvent;
use crate::enemies::Enemy;
use crate::input::FrameInput;
use crate::physics::{BodyExtents, GroundContact, GroundProbe, Hurtbox, Motion, Overlaps, PlayPlane};

/// Initial vertical speed that reaches `jump_height` under `gravity`.
pub fn jump_velocity(jump_height: f32, gravity: f32) -> f32 {
    (jump_height * -2.0 * gravity).max(0.0).sqrt()
}

/// New velocity for one frame of input.
pub fn step_velocity(
    tuning: &MovementTuning,
    input: &FrameInput,
    grounded: bool,
    velocity: Vec3,
    dt: f32,
) -> Vec3 {
    let mut vertical = velocity.y;
    if grounded {
        // Landed: stop falling but keep any upward motion
        if vertical < 0.0 {
            vertical = 0.0;
        }
        if input.jump_pressed {
            vertical = jump_velocity(tuning.jump_height, tuning.gravity);
        }
    } else {
        vertical += tuning.gravity * dt;
    }

    let next = match tuning.locomotion {
        Locomotion::Planar2d => Vec3::new(input.movement.x * tuning.speed, vertical, 0.0),
        Locomotion::Free3d => {
            let planar = input.movement.clamp_length_max(1.0) * tuning.speed;
            // Forward input maps to -z
            Vec3::new(planar.x, vertical, -planar.y)
        }
    };

    next.clamp_length_max(tuning.max_speed)
}

/// Rotate `current` toward `target` by at most `max_angle` radians.
pub fn turn_towards(current: Quat, target: Quat, max_angle: f32) -> Quat {
    let angle = current.angle_between(target);
    if angle <= max_angle || angle <= f32::EPSILON {
        target
    } else {
        current.slerp(target, max_angle / angle)
    }
}

/// Drive every avatar from this frame's input.
pub fn drive_avatar(
    time: Res<Time>,
    input: Res<FrameInput>,
    mut query: Query<
        (
            &MovementTuning,
            &GroundContact,
            &mut Motion,
            &mut Facing,
            &mut Transform,
        ),
        With<Avatar>,
    >,
) {
    let dt = time.delta_secs();

    for (tuning, ground, mut motion, mut facing, mut transform) in query.iter_mut() {
        motion.velocity = step_velocity(tuning, &input, ground.grounded, motion.velocity, dt);

        match tuning.locomotion {
            Locomotion::Planar2d => facing.update(input.movement.x),
            Locomotion::Free3d => {
                let travel = Vec3::new(motion.velocity.x, 0.0, motion.velocity.z);
                if travel.length_squared() > f32::EPSILON {
                    let target = Transform::IDENTITY.looking_to(travel, Vec3::Y).rotation;
                    transform.rotation =
                        turn_towards(transform.rotation, target, tuning.turn_rate.to_radians() * dt);
                }
            }
        }
    }
}

/// On an attack press, damage every enemy overlapping the strike sphere.
///
/// There is no cooldown; only the press edge limits the rate.
pub fn melee_attack(
    input: Res<FrameInput>,
    overlaps: Overlaps,
    attackers: Query<(Entity, &Transform, &MeleeAttack, &MovementTuning, Option<&Facing>), With<Avatar>>,
    enemies: Query<(), (With<Enemy>, With<Health>)>,
    mut damage: EventWriter<DamageEvent>,
) {
    if !input.attack_pressed {
        return;
    }

    for (entity, transform, attack, tuning, facing) in attackers.iter() {
        let ahead = match (tuning.locomotion, facing) {
            (Locomotion::Planar2d, Some(facing)) => facing.direction(),
            _ => transform.forward().as_vec3(),
        };
        let center = transform.translation + ahead * attack.reach;

        let mut hits = 0;
        for hit in overlaps.sphere(center, attack.radius, entity) {
            if enemies.get(hit).is_ok() {
                hits += 1;
                damage.send(DamageEvent {
                    target: hit,
                    source: entity,
                    amount: attack.damage,
                });
            }
        }
        debug!("Attack hit {} enemies", hits);
    }
}

/// Initial avatar configuration supplied by the scene.
#[derive(Debug, Clone)]
pub struct AvatarSpawn {
    pub position: Vec3,
    pub tuning: MovementTuning,
    pub max_health: f32,
    pub death_policy: DeathPolicy,
    pub attack: MeleeAttack,
    pub color: Color,
    pub half_height: f32,
}

impl Default for AvatarSpawn {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            tuning: MovementTuning::default(),
            max_health: 100.0,
            death_policy: DeathPolicy::RespawnInPlace,
            attack: MeleeAttack::default(),
            color: Color::srgb(0.2, 0.6, 1.0),
            half_height: 0.5,
        }
    }
}

/// Spawn the avatar with everything the simulation needs.
pub fn spawn_avatar(commands: &mut Commands, spawn: AvatarSpawn) -> Entity {
    let planar = spawn.tuning.locomotion == Locomotion::Planar2d;
    let mut avatar = commands.spawn((
        (
            Avatar,
            Name::new("Player"),
            spawn.tuning,
            Facing::default(),
            spawn.attack,
            Motion::default(),
            GroundContact::default(),
        ),
        GroundProbe {
            anchor: Some(Vec3::new(0.0, -spawn.half_height, 0.0)),
            ..default()
        },
        BodyExtents {
            half_height: spawn.half_height,
        },
        Health::new(spawn.max_health),
        spawn.death_policy,
        SpawnAnchor(spawn.position),
        HitFlash::new(spawn.color, Color::srgb(1.0, 0.0, 0.0)),
        Hurtbox {
            radius: spawn.half_height,
        },
        Transform::from_translation(spawn.position),
        Visibility::default(),
    ));

    avatar.insert((
        RigidBody::KinematicPositionBased,
        Collider::capsule_y(spawn.half_height * 0.5, spawn.half_height * 0.5),
        KinematicCharacterController {
            offset: CharacterLength::Absolute(0.01),
            autostep: Some(CharacterAutostep {
                max_height: CharacterLength::Absolute(0.3),
                min_width: CharacterLength::Absolute(0.2),
                include_dynamic_bodies: false,
            }),
            max_slope_climb_angle: 45_f32.to_radians(),
            min_slope_slide_angle: 30_f32.to_radians(),
            snap_to_ground: Some(CharacterLength::Absolute(0.2)),
            ..default()
        },
        ActiveEvents::COLLISION_EVENTS,
        ActiveCollisionTypes::all(),
    ));

    if planar {
        avatar.insert(PlayPlane {
            z: spawn.position.z,
        });
    }

    avatar.id()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn planar() -> MovementTuning {
        MovementTuning::default()
    }

    #[test]
    fn jump_reaches_requested_height() {
        let v = jump_velocity(3.75, -30.0);
        assert_relative_eq!(v, 15.0);
        // Apex of v^2 / (2g)
        assert_relative_eq!(v * v / 60.0, 3.75);
    }

    #[test]
    fn horizontal_velocity_follows_input() {
        let input = FrameInput {
            movement: Vec2::new(-1.0, 0.0),
            ..default()
        };
        let v = step_velocity(&planar(), &input, true, Vec3::ZERO, 0.1);
        assert_eq!(v, Vec3::new(-5.0, 0.0, 0.0));
    }

    #[test]
    fn gravity_accumulates_while_airborne_and_resets_on_landing() {
        let input = FrameInput::default();
        let falling = step_velocity(&planar(), &input, false, Vec3::ZERO, 0.1);
        assert_relative_eq!(falling.y, -3.0);
        let falling = step_velocity(&planar(), &input, false, falling, 0.1);
        assert_relative_eq!(falling.y, -6.0);

        let landed = step_velocity(&planar(), &input, true, falling, 0.1);
        assert_eq!(landed.y, 0.0);
    }

    #[test]
    fn jump_only_fires_when_grounded() {
        let input = FrameInput {
            jump_pressed: true,
            ..default()
        };
        let grounded = step_velocity(&planar(), &input, true, Vec3::ZERO, 0.1);
        assert_relative_eq!(grounded.y, 15.0);

        let airborne = step_velocity(&planar(), &input, false, Vec3::ZERO, 0.1);
        assert_relative_eq!(airborne.y, -3.0);
    }

    #[test]
    fn velocity_is_capped() {
        let tuning = MovementTuning {
            speed: 80.0,
            ..planar()
        };
        let input = FrameInput {
            movement: Vec2::X,
            ..default()
        };
        let v = step_velocity(&tuning, &input, true, Vec3::ZERO, 0.1);
        assert_relative_eq!(v.length(), 50.0);
    }

    #[test]
    fn free_movement_maps_forward_to_negative_z() {
        let tuning = MovementTuning {
            locomotion: Locomotion::Free3d,
            ..planar()
        };
        let input = FrameInput {
            movement: Vec2::new(1.0, 1.0),
            ..default()
        };
        let v = step_velocity(&tuning, &input, true, Vec3::ZERO, 0.1);
        assert_relative_eq!(Vec2::new(v.x, v.z).length(), 5.0, epsilon = 1e-5);
        assert!(v.x > 0.0 && v.z < 0.0);
    }

    #[test]
    fn facing_keeps_last_direction_on_idle() {
        let mut facing = Facing::default();
        facing.update(-1.0);
        assert!(facing.flip_x);
        facing.update(0.0);
        assert!(facing.flip_x);
        facing.update(1.0);
        assert!(!facing.flip_x);
    }

    #[test]
    fn turning_is_rate_limited() {
        let start = Quat::IDENTITY;
        let target = Quat::from_rotation_y(std::f32::consts::PI / 2.0);
        let step = turn_towards(start, target, 0.25);
        assert_relative_eq!(start.angle_between(step), 0.25, epsilon = 1e-4);
        assert_eq!(turn_towards(start, target, 4.0), target);
    }
}
