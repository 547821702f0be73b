use std::env;
use log::info;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use crate::config::{load_config, Config, General};
use crate::errors::ConfigError;
use crate::manager_weatherapi::WeatherApi;
use crate::matcher::{Matcher, Thresholds};

/// Managers used by the pipeline commands
pub struct Mgr {
    pub api: WeatherApi,
    pub matcher: Matcher,
}

/// Loads configuration, starts logging and returns the managers.
///
/// The configuration path is taken from WEATHERFIT_CONFIG and falls back
/// to weatherfit.toml in the working directory.
pub fn init() -> Result<(Config, Mgr), ConfigError> {
    let config_path = env::var("WEATHERFIT_CONFIG").unwrap_or("weatherfit.toml".to_string());
    let config = load_config(&config_path)?;

    init_logging(&config.general)?;

    info!("weatherfit version: {}", env!("CARGO_PKG_VERSION"));

    let api = WeatherApi::new(&config.api, config.fetch.days);
    let matcher = Matcher::new(Thresholds::standard());

    Ok((config, Mgr { api, matcher }))
}

/// Configures log4rs with a file appender and optionally a console appender
///
/// # Arguments
///
/// * 'general' - general section of the configuration
fn init_logging(general: &General) -> Result<(), ConfigError> {
    let pattern = "{d(%Y-%m-%d %H:%M:%S)} {h({l})} {t} - {m}{n}";

    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build(&general.log_path)?;

    let mut builder = log4rs::Config::builder()
        .appender(Appender::builder().build("file", Box::new(file)));
    let mut root = Root::builder().appender("file");

    if general.log_to_stdout {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(pattern)))
            .build();
        builder = builder.appender(Appender::builder().build("stdout", Box::new(stdout)));
        root = root.appender("stdout");
    }

    let log_config = builder
        .build(root.build(general.log_level))
        .map_err(|e| ConfigError(e.to_string()))?;

    log4rs::init_config(log_config).map_err(|e| ConfigError(e.to_string()))?;

    Ok(())
}
