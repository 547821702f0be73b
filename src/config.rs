use std::fs;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;

#[derive(Deserialize)]
pub struct ApiParameters {
    pub key: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Deserialize)]
pub struct FetchParameters {
    /// Cities fetched in parallel per batch
    pub chunk_size: usize,
    /// Forecast days requested per city
    pub days: u32,
}

#[derive(Deserialize)]
pub struct Files {
    pub cities_file: String,
    pub weather_file: String,
    pub catalog_file: String,
    pub condition_types_file: String,
    pub close_enough_file: String,
    pub matching_file: String,
    pub results_file: String,
    pub samples_dir: String,
}

#[derive(Deserialize)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

#[derive(Deserialize)]
pub struct Config {
    pub api: ApiParameters,
    pub fetch: FetchParameters,
    pub files: Files,
    pub general: General,
}

/// Loads the configuration file and returns a struct with all configuration items
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {

    let toml = fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&toml)?;

    if config.fetch.chunk_size == 0 {
        return Err(ConfigError::from("fetch.chunk_size must be at least 1"))
    }

    Ok(config)
}
