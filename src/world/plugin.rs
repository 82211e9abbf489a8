//! World plugin - level loading, reloads and visuals.

use bevy::prelude::*;

use crate::camera::{FollowCamera2d, OrbitCamera};
use crate::core::{GameState, ReloadSession, SimSet, SimulationConfig};
use crate::enemies::EnemyRegistry;
use crate::projectiles::Projectile;

use super::builder::{build_level, ExistingCameras, LevelEntity};
use super::data::{load_level_definitions, CurrentLevel, LevelRegistry};
use super::materials::{dress_turrets, sync_flash_tint};

/// World plugin - builds levels and answers reload requests.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        let scene = app
            .world()
            .get_resource::<SimulationConfig>()
            .map(|config| config.scene.clone())
            .unwrap_or_else(|| SimulationConfig::default().scene);

        app.init_resource::<LevelRegistry>()
            .insert_resource(CurrentLevel { name: scene })
            .add_systems(Startup, load_level_definitions)
            .add_systems(OnEnter(GameState::InGame), setup_level)
            .add_systems(OnExit(GameState::InGame), cleanup_level)
            .add_systems(
                Update,
                (handle_reload_requests, dress_turrets, sync_flash_tint)
                    .after(SimSet::Timers)
                    .run_if(in_state(GameState::InGame)),
            );
    }
}

/// Set up the current level from data.
#[allow(clippy::too_many_arguments)]
pub fn setup_level(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    level_registry: Res<LevelRegistry>,
    current_level: Res<CurrentLevel>,
    enemy_registry: Res<EnemyRegistry>,
    config: Res<SimulationConfig>,
    orbit_cameras: Query<Entity, With<OrbitCamera>>,
    follow_cameras: Query<Entity, With<FollowCamera2d>>,
) {
    let Some(level) = level_registry.get(&current_level.name) else {
        error!("Level '{}' not found in registry!", current_level.name);
        return;
    };

    info!("Building level: {}", level.name);

    build_level(
        &mut commands,
        &mut meshes,
        &mut materials,
        level,
        &enemy_registry,
        config.rules(),
        ExistingCameras {
            orbit: orbit_cameras.iter().next(),
            follow: follow_cameras.iter().next(),
        },
    );
}

/// Despawn the level and any shots still in flight.
fn cleanup_level(
    mut commands: Commands,
    level_query: Query<Entity, Or<(With<LevelEntity>, With<Projectile>)>>,
) {
    for entity in level_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

/// Leave `InGame` for a reload of the requested scene.
fn handle_reload_requests(
    mut reloads: EventReader<ReloadSession>,
    mut current_level: ResMut<CurrentLevel>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Some(request) = reloads.read().last() else {
        return;
    };
    info!("Reloading level '{}'", request.scene);
    current_level.name = request.scene.clone();
    next_state.set(GameState::Reloading);
}
