//! Level data structures and RON loading.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::core::load_ron;
use crate::player::Locomotion;

type Vec3Def = (f32, f32, f32);

fn vec3((x, y, z): Vec3Def) -> Vec3 {
    Vec3::new(x, y, z)
}

/// Static ground slab.
#[derive(Debug, Clone, Deserialize)]
pub struct GroundDefinition {
    pub center: Vec3Def,
    pub half_extents: Vec3Def,
}

impl Default for GroundDefinition {
    fn default() -> Self {
        Self {
            center: (0.0, -0.5, 0.0),
            half_extents: (30.0, 0.5, 5.0),
        }
    }
}

impl GroundDefinition {
    pub fn center(&self) -> Vec3 {
        vec3(self.center)
    }

    pub fn half_extents(&self) -> Vec3 {
        vec3(self.half_extents)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvatarDefinition {
    pub position: Vec3Def,
    #[serde(default)]
    pub locomotion: Locomotion,
    #[serde(default)]
    pub max_health: Option<f32>,
    #[serde(default)]
    pub speed: Option<f32>,
}

impl AvatarDefinition {
    pub fn position(&self) -> Vec3 {
        vec3(self.position)
    }
}

/// An enemy archetype placed in the level.
#[derive(Debug, Clone, Deserialize)]
pub struct EnemyPlacement {
    /// Key into the enemy registry
    pub kind: String,
    pub position: Vec3Def,
}

impl EnemyPlacement {
    pub fn position(&self) -> Vec3 {
        vec3(self.position)
    }
}

/// A score block placed in the level.
#[derive(Debug, Clone, Deserialize)]
pub struct PickupPlacement {
    pub position: Vec3Def,
    #[serde(default)]
    pub score: Option<u32>,
}

impl PickupPlacement {
    pub fn position(&self) -> Vec3 {
        vec3(self.position)
    }
}

/// Which camera rig the level uses.
#[derive(Debug, Clone, Deserialize)]
pub enum CameraDefinition {
    /// Side view that trails the avatar
    Follow { offset: Vec3Def, smooth_time: f32 },
    /// Orbit rig; initial angles are taken from looking at the avatar from `position`
    Orbit { position: Vec3Def, distance: f32 },
}

impl Default for CameraDefinition {
    fn default() -> Self {
        CameraDefinition::Follow {
            offset: (0.0, 1.0, 10.0),
            smooth_time: 0.3,
        }
    }
}

/// Complete level definition loaded from a RON file.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelDefinition {
    pub name: String,
    #[serde(default)]
    pub ground: GroundDefinition,
    pub avatar: AvatarDefinition,
    #[serde(default)]
    pub enemies: Vec<EnemyPlacement>,
    #[serde(default)]
    pub pickups: Vec<PickupPlacement>,
    #[serde(default)]
    pub camera: CameraDefinition,
}

/// Level used when no file defines one.
fn builtin_level() -> LevelDefinition {
    LevelDefinition {
        name: "default".to_string(),
        ground: GroundDefinition::default(),
        avatar: AvatarDefinition {
            position: (0.0, 1.0, 0.0),
            locomotion: Locomotion::Planar2d,
            max_health: None,
            speed: None,
        },
        enemies: vec![
            EnemyPlacement {
                kind: "patroller".to_string(),
                position: (8.0, 0.5, 0.0),
            },
            EnemyPlacement {
                kind: "turret".to_string(),
                position: (-10.0, 0.5, 0.0),
            },
        ],
        pickups: vec![
            PickupPlacement {
                position: (4.0, 1.5, 0.0),
                score: None,
            },
            PickupPlacement {
                position: (-4.0, 1.5, 0.0),
                score: None,
            },
        ],
        camera: CameraDefinition::default(),
    }
}

/// Resource holding all known levels by name.
#[derive(Resource)]
pub struct LevelRegistry {
    pub levels: HashMap<String, LevelDefinition>,
}

impl Default for LevelRegistry {
    fn default() -> Self {
        let level = builtin_level();
        let mut levels = HashMap::new();
        levels.insert(level.name.clone(), level);
        Self { levels }
    }
}

impl LevelRegistry {
    pub fn get(&self, name: &str) -> Option<&LevelDefinition> {
        self.levels.get(name)
    }
}

/// Name of the level that is (or will be) loaded.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct CurrentLevel {
    pub name: String,
}

/// Load level definitions from the assets/data/levels/ directory.
pub fn load_level_definitions(mut registry: ResMut<LevelRegistry>) {
    let levels_dir = Path::new("assets/data/levels");

    if !levels_dir.exists() {
        warn!("Levels directory not found: {:?}", levels_dir);
        return;
    }

    let Ok(entries) = fs::read_dir(levels_dir) else {
        error!("Failed to read levels directory");
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == "ron") {
            continue;
        }
        let Some(level_name) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
            continue;
        };

        match load_ron::<LevelDefinition>(&path) {
            Ok(level) => {
                info!("Loaded level: {} ({})", level.name, level_name);
                registry.levels.insert(level_name, level);
            }
            Err(e) => error!("{}", e),
        }
    }
}
