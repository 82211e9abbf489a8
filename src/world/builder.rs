//! Level construction from a `LevelDefinition`.

use bevy::prelude::*;
use bevy_kira_audio::prelude::AudioReceiver;
use bevy_rapier3d::prelude::*;

use super::data::{CameraDefinition, LevelDefinition};
use super::materials::flat_material;
use crate::camera::{FollowCamera2d, OrbitCamera};
use crate::core::ProfileRules;
use crate::enemies::{spawn_enemy, EnemyRegistry};
use crate::player::{spawn_avatar, AvatarSpawn, MovementTuning};
use crate::session::{ScorePickup, ScoreValue};

/// Marker for everything that belongs to the loaded level.
#[derive(Component, Debug, Default)]
pub struct LevelEntity;

/// Cameras already in the world, re-targeted instead of respawned.
pub struct ExistingCameras {
    pub orbit: Option<Entity>,
    pub follow: Option<Entity>,
}

/// Spawn a level and return the avatar entity.
#[allow(clippy::too_many_arguments)]
pub fn build_level(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    level: &LevelDefinition,
    enemy_registry: &EnemyRegistry,
    rules: ProfileRules,
    cameras: ExistingCameras,
) -> Entity {
    let ground = &level.ground;
    let half = ground.half_extents();
    commands.spawn((
        LevelEntity,
        Name::new("Ground"),
        Mesh3d(meshes.add(Cuboid::new(half.x * 2.0, half.y * 2.0, half.z * 2.0))),
        MeshMaterial3d(flat_material(materials, Color::srgb(0.3, 0.5, 0.3))),
        Transform::from_translation(ground.center()),
        RigidBody::Fixed,
        Collider::cuboid(half.x, half.y, half.z),
    ));

    commands.spawn((
        LevelEntity,
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let definition = &level.avatar;
    let mut tuning = MovementTuning {
        locomotion: definition.locomotion,
        ..default()
    };
    if let Some(speed) = definition.speed {
        tuning.speed = speed;
    }
    let spawn = AvatarSpawn {
        position: definition.position(),
        tuning,
        max_health: definition.max_health.unwrap_or(100.0),
        death_policy: rules.avatar_death,
        ..default()
    };
    let color = spawn.color;
    let half_height = spawn.half_height;
    let avatar = spawn_avatar(commands, spawn);
    commands.entity(avatar).insert((
        LevelEntity,
        Mesh3d(meshes.add(Capsule3d::new(half_height * 0.5, half_height))),
        MeshMaterial3d(flat_material(materials, color)),
    ));

    for placement in &level.enemies {
        let Some(definition) = enemy_registry.get(&placement.kind) else {
            warn!("Unknown enemy type '{}', skipping", placement.kind);
            continue;
        };
        let spawn = definition.to_spawn(placement.position());
        let size = spawn.radius * 2.0;
        let color = spawn.color;
        let enemy = spawn_enemy(commands, spawn);
        commands.entity(enemy).insert((
            LevelEntity,
            Mesh3d(meshes.add(Cuboid::new(size, size, size))),
            MeshMaterial3d(flat_material(materials, color)),
        ));
    }

    for placement in &level.pickups {
        commands.spawn((
            LevelEntity,
            ScorePickup,
            placement.score.map(ScoreValue).unwrap_or_default(),
            Name::new("Target"),
            Mesh3d(meshes.add(Cuboid::new(0.8, 0.8, 0.8))),
            MeshMaterial3d(flat_material(materials, Color::srgb(1.0, 0.8, 0.1))),
            Transform::from_translation(placement.position()),
            Collider::cuboid(0.4, 0.4, 0.4),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            ActiveCollisionTypes::all(),
        ));
    }

    place_camera(commands, &level.camera, avatar, definition.position(), cameras);

    info!(
        "Built level '{}' with {} enemies and {} pickups",
        level.name,
        level.enemies.len(),
        level.pickups.len()
    );
    avatar
}

fn place_camera(
    commands: &mut Commands,
    camera: &CameraDefinition,
    avatar: Entity,
    avatar_position: Vec3,
    existing: ExistingCameras,
) {
    match camera {
        CameraDefinition::Follow {
            offset,
            smooth_time,
        } => {
            if let Some(entity) = existing.follow {
                commands.entity(entity).insert(FollowCamera2d {
                    offset: Vec3::new(offset.0, offset.1, offset.2),
                    smooth_time: *smooth_time,
                    ..default()
                });
                return;
            }
            let rig = FollowCamera2d {
                offset: Vec3::new(offset.0, offset.1, offset.2),
                smooth_time: *smooth_time,
                ..default()
            };
            let start = rig.desired(avatar_position);
            commands.spawn((
                Name::new("Follow Camera"),
                Camera3d::default(),
                Transform::from_translation(start),
                rig,
                AudioReceiver,
            ));
        }
        CameraDefinition::Orbit { position, distance } => {
            let from = Vec3::new(position.0, position.1, position.2);
            let look = Transform::from_translation(from).looking_at(avatar_position, Vec3::Y);
            let rig = OrbitCamera::from_rotation(avatar, *distance, look.rotation);
            if let Some(entity) = existing.orbit {
                commands.entity(entity).insert(rig);
                return;
            }
            commands.spawn((
                Name::new("Orbit Camera"),
                Camera3d::default(),
                look,
                rig,
                AudioReceiver,
            ));
        }
    }
}
