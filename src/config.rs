// Configuration module for reading Engine.toml
// Every tunable of the search lives here; the engine itself holds no constants

use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default configuration file, resolved against the working directory
pub const DEFAULT_CONFIG_PATH: &str = "Engine.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub search: SearchConfig,
    pub spawn: SpawnConfig,
}

/// Search shape and the merge-cap game rule
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SearchConfig {
    /// Plies explored per decision, the root move included
    pub search_depth: u8,
    /// Tiles at or above this value never merge further
    pub merge_cap: u32,
    /// Evaluate the root moves on the rayon pool
    pub parallel_root: bool,
}

/// Tile spawn odds used by chance nodes and by simulated games
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SpawnConfig {
    pub small_value: u32,
    pub large_value: u32,
    pub large_probability: f64,
}

impl SpawnConfig {
    /// (value, probability) pairs of one spawn event, small tile first
    pub fn outcomes(&self) -> [(u32, f64); 2] {
        [
            (self.small_value, 1.0 - self.large_probability),
            (self.large_value, self.large_probability),
        ]
    }
}

impl Config {
    /// Loads configuration from a TOML file and validates it
    ///
    /// # Arguments
    /// * `path` - Path to the Engine.toml configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads default configuration from Engine.toml in the project root
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::from_file(DEFAULT_CONFIG_PATH)
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the values in Engine.toml
    pub fn default_hardcoded() -> Self {
        Config {
            search: SearchConfig {
                search_depth: 3,
                merge_cap: 1024,
                parallel_root: true,
            },
            spawn: SpawnConfig {
                small_value: 2,
                large_value: 4,
                large_probability: 0.1,
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            warn!(
                "Could not load {} ({}), using hardcoded defaults",
                DEFAULT_CONFIG_PATH, e
            );
            Self::default_hardcoded()
        })
    }

    /// Copy of this configuration with a different search depth
    pub fn with_search_depth(mut self, search_depth: u8) -> Self {
        self.search.search_depth = search_depth;
        self
    }

    /// Rejects values the search cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.search_depth == 0 {
            return Err(ConfigError::Invalid(
                "search.search_depth must be at least 1".to_string(),
            ));
        }
        if !is_tile_value(self.search.merge_cap) {
            return Err(ConfigError::Invalid(format!(
                "search.merge_cap must be a power of two >= 2, got {}",
                self.search.merge_cap
            )));
        }
        for value in [self.spawn.small_value, self.spawn.large_value] {
            if !is_tile_value(value) {
                return Err(ConfigError::Invalid(format!(
                    "spawn values must be powers of two >= 2, got {}",
                    value
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.spawn.large_probability) {
            return Err(ConfigError::Invalid(format!(
                "spawn.large_probability must lie in [0, 1], got {}",
                self.spawn.large_probability
            )));
        }
        Ok(())
    }
}

fn is_tile_value(value: u32) -> bool {
    value >= 2 && value.is_power_of_two()
}
