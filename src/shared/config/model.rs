use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub volume: VolumeConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VolumeConfig {
    /// Bound of upstream response channels created with the default capacity
    pub upstream_capacity: usize,
    /// Timestamp column used when tools render a rounding clause
    pub time_column: String,
}

/// Loads settings from the file named by `LOGS_VOLUME_CONFIG` (default `config`,
/// optional) layered over built-in defaults and `LOGS_VOLUME__*` env overrides.
pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var("LOGS_VOLUME_CONFIG").unwrap_or_else(|_| "config".to_string());
    load_settings_from(&config_path)
}

pub fn load_settings_from(config_path: &str) -> Result<Settings, config::ConfigError> {
    let settings: Settings = config::Config::builder()
        .set_default("logging.log_dir", "logs")?
        .set_default("logging.stdout_level", "info")?
        .set_default("logging.file_level", "debug")?
        .set_default("volume.upstream_capacity", 16_i64)?
        .set_default("volume.time_column", "timestamp")?
        .add_source(config::File::with_name(config_path).required(false))
        .add_source(config::Environment::with_prefix("LOGS_VOLUME").separator("__"))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
