use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::playback::{PlaybackSettings, SettingsError};
use crate::simulation::SimulationRequest;
use crate::util::paths::config_path;

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/api/simulate";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("Invalid playback settings: {0}")]
    Playback(#[from] SettingsError),

    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
}

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Simulation backend connection
    pub backend: BackendConfig,
    /// Animation and pause timing
    pub playback: PlaybackSettings,
    /// Request sent on each run
    pub request: SimulationRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// URL the simulation request is POSTed to
    pub endpoint: String,
    /// Give up on the backend after this long
    pub timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            playback: PlaybackSettings::default(),
            request: SimulationRequest::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlBackendConfig {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlPlaybackConfig {
    pub pipe_travel_distance: Option<u32>,
    pub pipe_step_increment: Option<u32>,
    pub frame_delay_ms: Option<u64>,
    pub inter_step_pause_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlRequestConfig {
    pub message: Option<String>,
    pub auth_token: Option<String>,
    pub use_encryption: Option<bool>,
    /// Accepts `enc_key = 3` as well as `enc_key = "3"`
    pub enc_key: Option<toml::Value>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub backend: Option<TomlBackendConfig>,
    pub playback: Option<TomlPlaybackConfig>,
    pub request: Option<TomlRequestConfig>,
}

impl Config {
    /// Load configuration from the default location, merging with defaults.
    ///
    /// A missing file is created from the bundled example. An unreadable or
    /// invalid file is reported and the defaults are used.
    pub fn load() -> Self {
        let config_file = config_path();

        if !config_file.exists() {
            Self::create_default_config(&config_file);
        }

        Self::load_from(&config_file)
    }

    /// Load configuration from `path`, falling back to defaults on error.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Config::default();
        }

        match Self::try_load_from(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring config file");
                Config::default()
            }
        }
    }

    pub fn try_load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse a config file body and merge it over the defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let toml_config: TomlConfig = toml::from_str(contents)?;
        let mut config = Config::default();

        if let Some(backend) = toml_config.backend {
            if let Some(endpoint) = backend.endpoint {
                config.backend.endpoint = endpoint;
            }
            if let Some(timeout_secs) = backend.timeout_secs {
                config.backend.timeout = Duration::from_secs(timeout_secs);
            }
        }

        if let Some(playback) = toml_config.playback {
            if let Some(distance) = playback.pipe_travel_distance {
                config.playback.pipe_travel_distance = distance;
            }
            if let Some(increment) = playback.pipe_step_increment {
                config.playback.pipe_step_increment = increment;
            }
            if let Some(frame_delay_ms) = playback.frame_delay_ms {
                config.playback.frame_delay_ms = frame_delay_ms;
            }
            if let Some(pause_ms) = playback.inter_step_pause_ms {
                config.playback.inter_step_pause_ms = pause_ms;
            }
        }

        if let Some(request) = toml_config.request {
            if let Some(message) = request.message {
                config.request.message = message;
            }
            if let Some(auth_token) = request.auth_token {
                config.request.auth_token = auth_token;
            }
            if let Some(use_encryption) = request.use_encryption {
                config.request.use_encryption = use_encryption;
            }
            if let Some(enc_key) = request.enc_key {
                config.request.enc_key = match enc_key {
                    toml::Value::String(s) => s,
                    toml::Value::Integer(n) => n.to_string(),
                    other => {
                        return Err(ConfigError::Invalid(format!(
                            "request.enc_key must be a string or integer, got {}",
                            other.type_str()
                        )))
                    }
                };
            }
        }

        config.playback.validate()?;

        Ok(config)
    }

    /// Create the default config file from the bundled example
    fn create_default_config(path: &PathBuf) {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                if let Err(e) = fs::create_dir_all(parent) {
                    tracing::warn!(error = %e, "Failed to create config directory");
                    return;
                }
            }
        }

        if let Err(e) = fs::write(path, EXAMPLE_CONFIG) {
            tracing::warn!(error = %e, "Failed to write default config");
        }
    }

    pub fn with_playback(mut self, playback: PlaybackSettings) -> Self {
        self.playback = playback;
        self
    }
}
