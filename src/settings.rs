//! Simulation configuration
//!
//! Plain data supplied at construction time. Defaults reproduce the classic
//! setup: 900x900 canvas, 50 rocks at speed 2, 5x5 boxes, 10 ms ticks.

use std::fmt;

use glam::UVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{Canvas, RockConfig};

/// Why a configuration was rejected
#[derive(Debug)]
pub enum ConfigError {
    /// Malformed JSON
    Parse(serde_json::Error),
    /// Config file could not be read
    Io(std::io::Error),
    /// Well-formed but unusable value
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "invalid config JSON: {}", e),
            ConfigError::Io(e) => write!(f, "could not read config: {}", e),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Io(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

/// Canvas, ship and rock parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Canvas ===
    pub canvas_width: u32,
    pub canvas_height: u32,

    // === Ship ===
    pub ship_width: u32,
    pub ship_height: u32,
    /// Tick period in milliseconds
    pub ship_speed_ms: u32,

    // === Rocks ===
    /// Live rock target
    pub rocks_amount: usize,
    /// Distance per tick
    pub rock_speed: f32,
    pub rock_width: u32,
    pub rock_height: u32,

    /// RNG seed for spawn positions. Unset means the caller picks one.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            ship_width: SHIP_WIDTH,
            ship_height: SHIP_HEIGHT,
            ship_speed_ms: SHIP_SPEED_MS,

            rocks_amount: ROCKS_AMOUNT,
            rock_speed: ROCK_SPEED,
            rock_width: ROCK_WIDTH,
            rock_height: ROCK_HEIGHT,

            seed: None,
        }
    }
}

impl SimConfig {
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.canvas_width, self.canvas_height)
    }

    pub fn rock_config(&self) -> RockConfig {
        RockConfig {
            rocks_amount: self.rocks_amount,
            rock_speed: self.rock_speed,
            size: UVec2::new(self.rock_width, self.rock_height),
        }
    }

    /// Same config with a different seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Use `fallback` only if no seed is configured
    pub fn seed_or(mut self, fallback: u64) -> Self {
        self.seed.get_or_insert(fallback);
        self
    }

    /// Seed the RNG will start from
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dimension_ok = |d: u32| (1..=MAX_DIMENSION).contains(&d);
        if !dimension_ok(self.canvas_width) || !dimension_ok(self.canvas_height) {
            return Err(ConfigError::Invalid("canvas width and height must be in 1..=2^24"));
        }
        if !dimension_ok(self.ship_width) || !dimension_ok(self.ship_height) {
            return Err(ConfigError::Invalid("ship width and height must be in 1..=2^24"));
        }
        if !dimension_ok(self.rock_width) || !dimension_ok(self.rock_height) {
            return Err(ConfigError::Invalid("rock width and height must be in 1..=2^24"));
        }
        if !(1..=MAX_TICK_PERIOD_MS).contains(&self.ship_speed_ms) {
            return Err(ConfigError::Invalid("tick period must be between 1 ms and i32::MAX ms"));
        }
        if !self.rock_speed.is_finite() || self.rock_speed < 0.0 {
            return Err(ConfigError::Invalid("rock speed must be finite and non-negative"));
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "rock_dodge_config";

    /// Environment variable naming a JSON config file (native only)
    #[allow(dead_code)]
    const CONFIG_ENV: &'static str = "ROCK_DODGE_CONFIG";

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Load config from the file named by `ROCK_DODGE_CONFIG`, if set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::CONFIG_ENV) else {
            log::info!("Using default config");
            return Self::default();
        };

        match Self::load_file(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path);
                config
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path, e);
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
