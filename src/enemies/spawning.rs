//! Enemy spawning from a resolved configuration.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use crate::combat::{DeathPolicy, Health, HitFlash};
use crate::physics::{Hurtbox, Motion, PlayPlane};
use crate::projectiles::ProjectileTemplate;
use crate::session::ScoreValue;

/// Initial enemy configuration supplied by the scene.
#[derive(Debug, Clone)]
pub struct EnemySpawn {
    pub name: String,
    pub position: Vec3,
    pub move_speed: f32,
    pub patrol_range: f32,
    /// Seconds between shots; `None` for enemies that do not shoot
    pub fire_interval: Option<f32>,
    pub damage: f32,
    /// Body-relative turret position; a shooter without one looks for a
    /// `Turret` child instead
    pub turret_offset: Option<Vec3>,
    pub chase_speed: Option<f32>,
    pub contact_damage: Option<f32>,
    /// `None` makes the enemy invulnerable
    pub max_health: Option<f32>,
    pub score_value: u32,
    pub projectile: ProjectileTemplate,
    pub color: Color,
    pub radius: f32,
}

impl Default for EnemySpawn {
    fn default() -> Self {
        Self {
            name: "Enemy".to_string(),
            position: Vec3::ZERO,
            move_speed: 2.0,
            patrol_range: 5.0,
            fire_interval: Some(0.1),
            damage: 20.0,
            turret_offset: Some(Vec3::new(0.0, 0.5, 0.0)),
            chase_speed: None,
            contact_damage: None,
            max_health: None,
            score_value: 10,
            projectile: ProjectileTemplate::default(),
            color: Color::srgb(1.0, 0.0, 0.0),
            radius: 0.5,
        }
    }
}

/// Spawn an enemy on the play plane through `position`.
pub fn spawn_enemy(commands: &mut Commands, spawn: EnemySpawn) -> Entity {
    let mut enemy = commands.spawn((
        Enemy,
        Name::new(spawn.name.clone()),
        Motion::default(),
        PlayPlane {
            z: spawn.position.z,
        },
        Hurtbox {
            radius: spawn.radius,
        },
        Transform::from_translation(spawn.position),
        Visibility::default(),
        RigidBody::KinematicPositionBased,
        Collider::cuboid(spawn.radius, spawn.radius, spawn.radius),
        ActiveEvents::COLLISION_EVENTS,
        ActiveCollisionTypes::all(),
    ));

    if spawn.chase_speed.is_none() {
        enemy.insert(Patrol::new(spawn.position, spawn.patrol_range, spawn.move_speed));
    }
    if let Some(speed) = spawn.chase_speed {
        enemy.insert(Chase { speed });
    }
    if let Some(amount) = spawn.contact_damage {
        enemy.insert(ContactDamage { amount });
    }
    if let Some(interval) = spawn.fire_interval {
        enemy.insert((FireControl::new(interval, spawn.damage), spawn.projectile.clone()));
    }
    if let Some(max) = spawn.max_health {
        enemy.insert((
            Health::new(max),
            DeathPolicy::Defeat,
            ScoreValue(spawn.score_value),
            HitFlash::new(spawn.color, Color::WHITE),
        ));
    }

    let entity = enemy.id();

    if let Some(offset) = spawn.turret_offset {
        if spawn.fire_interval.is_some() {
            let visual = commands
                .spawn((
                    Name::new("Turret"),
                    Transform::from_translation(offset),
                    Visibility::default(),
                ))
                .id();
            commands.entity(entity).add_child(visual);
            let mut turret = Turret::new(offset);
            turret.visual = Some(visual);
            commands.entity(entity).insert(turret);
        }
    }

    entity
}
