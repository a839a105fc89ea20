use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub merge: MergeSettings,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct MergeSettings {
    /// Root of the table store; output segments land under
    /// `<store_dir>/<database>/<table>/Fact/...`
    pub store_dir: String,
    #[serde(default = "default_rows_per_blocklet")]
    pub rows_per_blocklet: usize,
    #[serde(default)]
    pub task_no: u32,
}

fn default_rows_per_blocklet() -> usize {
    32_000
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
}

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var("SEG_MERGE_CONFIG").unwrap_or_else(|_| "config".to_string());
    load_settings_from(&config_path)
}

pub fn load_settings_from(config_path: &str) -> Result<Settings, config::ConfigError> {
    let settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(config_path))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
