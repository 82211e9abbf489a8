//! Enemy archetype definitions loaded from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::spawning::EnemySpawn;
use crate::core::load_ron;
use crate::projectiles::ProjectileTemplate;

/// Projectile parameters in an enemy definition.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ProjectileDefinition {
    pub speed: f32,
    pub rotate_speed: f32,
    pub radius: f32,
}

impl Default for ProjectileDefinition {
    fn default() -> Self {
        Self {
            speed: 4.0,
            rotate_speed: 200.0,
            radius: 0.25,
        }
    }
}

/// Enemy archetype loaded from a RON file.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct EnemyDefinition {
    pub name: String,
    #[serde(default)]
    pub move_speed: f32,
    #[serde(default)]
    pub patrol_range: f32,
    #[serde(default)]
    pub fire_interval: Option<f32>,
    #[serde(default)]
    pub damage: f32,
    #[serde(default)]
    pub turret_offset: Option<(f32, f32, f32)>,
    #[serde(default)]
    pub chase_speed: Option<f32>,
    #[serde(default)]
    pub contact_damage: Option<f32>,
    #[serde(default)]
    pub max_health: Option<f32>,
    #[serde(default)]
    pub score_value: u32,
    #[serde(default)]
    pub projectile: ProjectileDefinition,
}

impl EnemyDefinition {
    /// Resolve into a spawn configuration at `position`.
    pub fn to_spawn(&self, position: Vec3) -> EnemySpawn {
        EnemySpawn {
            name: self.name.clone(),
            position,
            move_speed: self.move_speed,
            patrol_range: self.patrol_range,
            fire_interval: self.fire_interval,
            damage: self.damage,
            turret_offset: self.turret_offset.map(|(x, y, z)| Vec3::new(x, y, z)),
            chase_speed: self.chase_speed,
            contact_damage: self.contact_damage,
            max_health: self.max_health,
            score_value: self.score_value,
            projectile: ProjectileTemplate {
                speed: self.projectile.speed,
                rotate_speed: self.projectile.rotate_speed,
                radius: self.projectile.radius,
                ..default()
            },
            ..default()
        }
    }
}

/// Resource holding all known enemy archetypes.
#[derive(Resource)]
pub struct EnemyRegistry {
    pub definitions: HashMap<String, EnemyDefinition>,
}

impl Default for EnemyRegistry {
    fn default() -> Self {
        let mut definitions = HashMap::new();
        for definition in builtin_definitions() {
            definitions.insert(definition.name.to_lowercase(), definition);
        }
        Self { definitions }
    }
}

impl EnemyRegistry {
    /// Get an enemy definition by type name.
    pub fn get(&self, enemy_type: &str) -> Option<&EnemyDefinition> {
        self.definitions.get(&enemy_type.to_lowercase())
    }
}

/// Archetypes available without any data files.
fn builtin_definitions() -> Vec<EnemyDefinition> {
    vec![
        EnemyDefinition {
            name: "Patroller".to_string(),
            move_speed: 2.0,
            patrol_range: 5.0,
            fire_interval: Some(0.1),
            damage: 20.0,
            turret_offset: Some((0.0, 0.5, 0.0)),
            chase_speed: None,
            contact_damage: None,
            max_health: None,
            score_value: 10,
            projectile: ProjectileDefinition::default(),
        },
        EnemyDefinition {
            name: "Turret".to_string(),
            move_speed: 0.0,
            patrol_range: 0.0,
            fire_interval: Some(1.0),
            damage: 20.0,
            turret_offset: Some((0.0, 0.5, 0.0)),
            chase_speed: None,
            contact_damage: None,
            max_health: None,
            score_value: 10,
            projectile: ProjectileDefinition::default(),
        },
        EnemyDefinition {
            name: "Chaser".to_string(),
            move_speed: 0.0,
            patrol_range: 0.0,
            fire_interval: None,
            damage: 0.0,
            turret_offset: None,
            chase_speed: Some(3.0),
            contact_damage: Some(10.0),
            max_health: Some(3.0),
            score_value: 10,
            projectile: ProjectileDefinition::default(),
        },
    ]
}

/// Load enemy definitions from the assets/data/enemies/ directory.
pub fn load_enemy_definitions(mut registry: ResMut<EnemyRegistry>) {
    let enemies_dir = Path::new("assets/data/enemies");

    if !enemies_dir.exists() {
        debug!("No enemy definitions directory at {:?}, using built-ins", enemies_dir);
        return;
    }

    let Ok(entries) = fs::read_dir(enemies_dir) else {
        warn!("Failed to read enemy definitions directory");
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == "ron") {
            continue;
        }
        let Some(enemy_type) = path.file_stem().and_then(|s| s.to_str()).map(str::to_lowercase)
        else {
            continue;
        };

        match load_ron::<EnemyDefinition>(&path) {
            Ok(definition) => {
                info!("Loaded enemy definition: {} ({})", definition.name, enemy_type);
                registry.definitions.insert(enemy_type, definition);
            }
            Err(e) => error!("{}", e),
        }
    }

    info!("{} enemy definitions available", registry.definitions.len());
}
