mod settings;

pub use settings::{
    BackendConfig, Config, ConfigError, TomlConfig, DEFAULT_ENDPOINT, EXAMPLE_CONFIG,
};
