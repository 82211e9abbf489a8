//! Simulation configuration and behaviour profiles.

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::ConfigError;
use crate::combat::DeathPolicy;

/// Default location of the simulation config file.
pub const DEFAULT_CONFIG_PATH: &str = "assets/data/simulation.ron";

/// Named behaviour presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum SimulationProfile {
    /// Side-scrolling turret shooter: enemies only hurt through projectiles,
    /// projectiles live until they hit the avatar, the avatar respawns.
    #[default]
    SimpleRpg,
    /// Chaser arcade: enemies hurt on touch, projectiles expire, the avatar's
    /// death ends the session.
    Arcade,
}

/// Concrete rules a profile resolves to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileRules {
    pub enemy_contact_damage: bool,
    /// Seconds before an unspent projectile despawns (`None` = never)
    pub projectile_lifetime: Option<f32>,
    pub avatar_death: DeathPolicy,
}

impl SimulationProfile {
    pub fn rules(self) -> ProfileRules {
        match self {
            SimulationProfile::SimpleRpg => ProfileRules {
                enemy_contact_damage: false,
                projectile_lifetime: None,
                avatar_death: DeathPolicy::RespawnInPlace,
            },
            SimulationProfile::Arcade => ProfileRules {
                enemy_contact_damage: true,
                projectile_lifetime: Some(5.0),
                avatar_death: DeathPolicy::GameOver,
            },
        }
    }
}

/// Process-wide simulation settings.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub profile: SimulationProfile,
    /// Scene reloaded on game over
    pub scene: String,
    /// Seconds between game over and scene reload
    pub restart_delay: f32,
    /// Seconds a hit flash stays visible
    pub flash_duration: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            profile: SimulationProfile::SimpleRpg,
            scene: "default".to_string(),
            restart_delay: 0.5,
            flash_duration: 0.2,
        }
    }
}

impl SimulationConfig {
    pub fn rules(&self) -> ProfileRules {
        self.profile.rules()
    }
}

/// Where the simulation plugin takes its config from.
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// Read a RON file, falling back to defaults if it is missing or invalid
    File(PathBuf),
    /// Use the given config as is
    Inline(SimulationConfig),
}

impl Default for ConfigSource {
    fn default() -> Self {
        ConfigSource::File(PathBuf::from(DEFAULT_CONFIG_PATH))
    }
}

impl ConfigSource {
    /// Resolve to a config, logging and defaulting on load failure.
    pub fn resolve(&self) -> SimulationConfig {
        match self {
            ConfigSource::Inline(config) => config.clone(),
            ConfigSource::File(path) => match load_ron::<SimulationConfig>(path) {
                Ok(config) => {
                    info!("Loaded simulation config ({:?} profile)", config.profile);
                    config
                }
                Err(ConfigError::FileNotFound(path)) => {
                    warn!("Simulation config not found at {}, using defaults", path);
                    SimulationConfig::default()
                }
                Err(e) => {
                    error!("{}; using default simulation config", e);
                    SimulationConfig::default()
                }
            },
        }
    }
}

/// Read and parse a RON data file.
pub fn load_ron<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let display = path.display().to_string();
    if !path.exists() {
        return Err(ConfigError::FileNotFound(display));
    }
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;
    ron::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: display,
        details: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_keep_their_documented_differences() {
        let rpg = SimulationProfile::SimpleRpg.rules();
        assert!(!rpg.enemy_contact_damage);
        assert_eq!(rpg.projectile_lifetime, None);
        assert_eq!(rpg.avatar_death, DeathPolicy::RespawnInPlace);

        let arcade = SimulationProfile::Arcade.rules();
        assert!(arcade.enemy_contact_damage);
        assert_eq!(arcade.projectile_lifetime, Some(5.0));
        assert_eq!(arcade.avatar_death, DeathPolicy::GameOver);
    }

    #[test]
    fn partial_ron_fills_in_defaults() {
        let config: SimulationConfig =
            ron::from_str("(profile: Arcade, scene: \"arena\")").expect("valid ron");
        assert_eq!(config.profile, SimulationProfile::Arcade);
        assert_eq!(config.scene, "arena");
        assert_eq!(config.restart_delay, 0.5);
    }

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let result = load_ron::<SimulationConfig>(Path::new("does/not/exist.ron"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn missing_file_source_resolves_to_defaults() {
        let source = ConfigSource::File(PathBuf::from("does/not/exist.ron"));
        assert_eq!(source.resolve(), SimulationConfig::default());
    }
}
