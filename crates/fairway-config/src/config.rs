//! Configuration structs with sensible defaults and RON persistence.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const APP_NAME: &str = "fairway";
const CONFIG_FILE: &str = "config.ron";

/// Simulation rate used when the configured one is zero.
pub const DEFAULT_FIXED_HZ: u32 = 60;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Swing feel.
    pub swing: SwingConfig,
    /// Rest detection thresholds.
    pub rest: RestConfig,
    /// Out-of-bounds and penalty timing.
    pub ball: BallConfig,
    pub audio: AudioConfig,
    pub input: InputConfig,
    /// Headless simulation settings.
    pub sim: SimConfig,
    pub debug: DebugConfig,
}

/// Swing timing and force.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SwingConfig {
    /// Force at full backswing.
    pub max_force: f32,
    /// Force gained per second of backswing.
    pub force_rate: f32,
    /// Club wind-up rate in degrees per second.
    pub backswing_degrees_per_second: f32,
    /// Downswing length in seconds.
    pub downswing_seconds: f32,
    /// Swings at or below this force do not count.
    pub min_effective_force: f32,
    /// Seconds the swing may be held at max force before it is abandoned.
    pub max_hold_seconds: f32,
    /// Force to impulse conversion.
    pub impulse_scale: f32,
    /// Degrees turned per rotate press.
    pub rotate_step_degrees: f32,
}

/// Ball rest thresholds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RestConfig {
    /// Linear speed (m/s) under which the ball may be at rest.
    pub sleep_velocity: f32,
    /// Angular speed (rad/s) under which the ball may be at rest.
    pub sleep_angular_velocity: f32,
    /// Cooldown after a strike before rest is considered.
    pub min_sleep_seconds: f32,
    /// How long the rest conditions must hold.
    pub grace_seconds: f32,
}

/// Ball penalties.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BallConfig {
    /// Seconds off legal ground before the shot is reset.
    pub out_of_bounds_seconds: f32,
    /// Delay of the bad-shot cue after a penalty.
    pub penalty_cue_delay: f32,
}

/// Audio configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    /// Master volume (0.0 - 1.0).
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0).
    pub sfx_volume: f32,
}

/// Input configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Keybinding overrides (action name -> key or mouse button name).
    pub keybindings: HashMap<String, String>,
}

/// Headless simulation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed simulation rate in Hz.
    pub fixed_hz: u32,
    /// Simulated seconds before the run gives up.
    pub max_sim_seconds: f32,
    /// Number of holes to play.
    pub holes: u32,
    /// How long the scripted golfer holds the swing.
    pub swing_hold_seconds: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for SwingConfig {
    fn default() -> Self {
        Self {
            max_force: 300.0,
            force_rate: 200.0,
            backswing_degrees_per_second: 40.0,
            downswing_seconds: 0.35,
            min_effective_force: 35.0,
            max_hold_seconds: 1.0,
            impulse_scale: 0.02,
            rotate_step_degrees: 2.0,
        }
    }
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            sleep_velocity: 0.5,
            sleep_angular_velocity: 3.5,
            min_sleep_seconds: 0.5,
            grace_seconds: 0.25,
        }
    }
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            out_of_bounds_seconds: 3.0,
            penalty_cue_delay: 0.2,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            sfx_volume: 1.0,
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fixed_hz: DEFAULT_FIXED_HZ,
            max_sim_seconds: 180.0,
            holes: 2,
            swing_hold_seconds: 0.9,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl SimConfig {
    /// Fixed simulation rate. Zero falls back to [`DEFAULT_FIXED_HZ`].
    pub fn effective_hz(&self) -> u32 {
        if self.fixed_hz == 0 {
            DEFAULT_FIXED_HZ
        } else {
            self.fixed_hz
        }
    }

    /// Fixed step length in seconds at [`SimConfig::effective_hz`].
    pub fn fixed_dt(&self) -> f32 {
        1.0 / self.effective_hz() as f32
    }
}

/// Per-user config directory, e.g. `~/.config/fairway` on Linux.
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|d| d.join(APP_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

// --- Load / Save ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }
}
