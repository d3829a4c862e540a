//! Configuration file support for Liftplan.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/liftplan/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub selector: SelectorConfig,

    #[serde(default)]
    pub filters: FilterConfig,

    #[serde(default)]
    pub engine: EngineConfig,
}

/// Defaults used for profile fields the caller left out
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SelectorConfig {
    #[serde(default = "default_phase")]
    pub phase: String,

    #[serde(default = "default_experience")]
    pub experience: String,

    #[serde(default = "default_fatigue")]
    pub fatigue: f64,

    #[serde(default = "default_time_available")]
    pub time_available: u32,

    #[serde(default = "default_equipment")]
    pub equipment: Vec<String>,

    #[serde(default = "default_sport")]
    pub sport: String,

    #[serde(default = "default_rpe_tolerance")]
    pub rpe_tolerance: f64,

    #[serde(default = "default_age")]
    pub age: u32,

    #[serde(default = "default_weight")]
    pub weight: f64,

    #[serde(default = "default_session_type")]
    pub session_type: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            phase: default_phase(),
            experience: default_experience(),
            fatigue: default_fatigue(),
            time_available: default_time_available(),
            equipment: default_equipment(),
            sport: default_sport(),
            rpe_tolerance: default_rpe_tolerance(),
            age: default_age(),
            weight: default_weight(),
            session_type: default_session_type(),
        }
    }
}

/// Context filter thresholds
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Athletes strictly older than this lose the high-intensity methods
    #[serde(default = "default_age_limit")]
    pub age_limit: u32,

    /// Body weight (kg) above which high-impact methods are penalised
    #[serde(default = "default_heavy_weight_kg")]
    pub heavy_weight_kg: f64,

    #[serde(default = "default_weight_penalty")]
    pub weight_penalty: f64,

    #[serde(default = "default_recency_penalty")]
    pub recency_penalty: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            age_limit: default_age_limit(),
            heavy_weight_kg: default_heavy_weight_kg(),
            weight_penalty: default_weight_penalty(),
            recency_penalty: default_recency_penalty(),
        }
    }
}

/// Orchestrator limits
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_min_main_exercises")]
    pub min_main_exercises: usize,

    #[serde(default = "default_max_methods")]
    pub max_methods: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_main_exercises: default_min_main_exercises(),
            max_methods: default_max_methods(),
        }
    }
}

// Default value functions
fn default_phase() -> String {
    "accumulation".into()
}

fn default_experience() -> String {
    "intermediate".into()
}

fn default_fatigue() -> f64 {
    5.0
}

fn default_time_available() -> u32 {
    60
}

fn default_equipment() -> Vec<String> {
    vec![
        "barbell".into(),
        "dumbbells".into(),
        "cables".into(),
        "machines".into(),
        "bodyweight".into(),
    ]
}

fn default_sport() -> String {
    "gym".into()
}

fn default_rpe_tolerance() -> f64 {
    7.0
}

fn default_age() -> u32 {
    30
}

fn default_weight() -> f64 {
    75.0
}

fn default_session_type() -> String {
    "strength".into()
}

fn default_age_limit() -> u32 {
    50
}

fn default_heavy_weight_kg() -> f64 {
    100.0
}

fn default_weight_penalty() -> f64 {
    0.7
}

fn default_recency_penalty() -> f64 {
    0.5
}

fn default_min_main_exercises() -> usize {
    4
}

fn default_max_methods() -> usize {
    2
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .ok_or_else(|| Error::Config("Unable to determine config directory".into()))?;
        Ok(base.join("liftplan").join("config.toml"))
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Reject penalty factors that would raise scores or flip their sign
    pub fn validate(&self) -> Result<()> {
        for (name, factor) in [
            ("weight_penalty", self.filters.weight_penalty),
            ("recency_penalty", self.filters.recency_penalty),
        ] {
            if !(0.0..1.0).contains(&factor) {
                return Err(Error::Config(format!(
                    "filters.{} must be in [0, 1), got {}",
                    name, factor
                )));
            }
        }

        if self.engine.max_methods == 0 || self.engine.max_methods > 2 {
            return Err(Error::Config(format!(
                "engine.max_methods must be 1 or 2, got {}",
                self.engine.max_methods
            )));
        }

        Ok(())
    }
}
