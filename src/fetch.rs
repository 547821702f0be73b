use std::collections::HashMap;
use std::fs;
use std::fs::OpenOptions;
use std::io::Write;
use std::thread;
use anyhow::{Context, Result};
use log::{info, warn};
use crate::config::Config;
use crate::manager_weatherapi::WeatherApi;
use crate::models::daily_weather::DailyWeather;

/// Fetches forecasts for every city in the cities file and appends them to
/// the weather cache.
///
/// Cities are processed in chunks: each chunk fans out one fetch per city,
/// the whole chunk is joined before the next one starts, and every chunk is
/// appended as one JSON line mapping city name to its daily records. Cities
/// that fail or that WeatherAPI does not know are dropped, not retried.
pub fn run(config: &Config, api: &WeatherApi) -> Result<()> {
    let list = fs::read_to_string(&config.files.cities_file)
        .with_context(|| format!("reading cities file {}", config.files.cities_file))?;
    let cities: Vec<&str> = list.lines()
        .map(str::trim)
        .filter(|city| !city.is_empty())
        .collect();

    let mut cache = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.files.weather_file)
        .with_context(|| format!("opening weather cache {}", config.files.weather_file))?;

    let chunk_size = config.fetch.chunk_size;
    let total_chunks = cities.len().div_ceil(chunk_size);
    let mut fetched = 0;
    let mut dropped = 0;

    for (index, chunk) in cities.chunks(chunk_size).enumerate() {
        let results = thread::scope(|scope| {
            let handles: Vec<_> = chunk.iter()
                .map(|city| scope.spawn(move || (*city, api.forecast(city))))
                .collect();
            handles.into_iter().map(|handle| handle.join()).collect::<Vec<_>>()
        });

        let mut batch: HashMap<&str, Vec<DailyWeather>> = HashMap::new();
        for joined in results {
            let Ok((city, result)) = joined else {
                dropped += 1;
                continue;
            };
            match result {
                Ok(Some(days)) => {
                    fetched += 1;
                    batch.insert(city, days);
                }
                Ok(None) => {
                    dropped += 1;
                    warn!("dropping \"{}\", unknown to WeatherAPI", city);
                }
                Err(e) => {
                    dropped += 1;
                    warn!("dropping \"{}\": {}", city, e);
                }
            }
        }

        if !batch.is_empty() {
            let line = serde_json::to_string(&batch)?;
            writeln!(cache, "{}", line)
                .with_context(|| format!("appending to {}", config.files.weather_file))?;
        }

        info!("processed chunk {}/{} ({} cities)", index + 1, total_chunks, chunk.len());
    }

    info!("fetched {} cities, dropped {}", fetched, dropped);
    Ok(())
}
