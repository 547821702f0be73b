use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use anyhow::{anyhow, Context, Result};
use log::info;
use crate::config::Config;
use crate::matcher::{Descriptor, Matcher};
use crate::models::catalog::CatalogEntry;
use crate::models::daily_weather::DailyWeather;

/// Matches every cached day of weather against the descriptor catalog and
/// writes the accumulated matches file.
///
/// Every catalog descriptor gets an accumulator up front so descriptors
/// without matches still appear in the output. The cache is streamed line by
/// line since one line per fetched chunk can be large.
pub fn run(config: &Config, matcher: &Matcher) -> Result<()> {
    let catalog = load_catalog(&config.files.catalog_file)?;
    let close_enough = load_close_enough(&config.files.close_enough_file)?;

    let mut matches: BTreeMap<Descriptor, Vec<DailyWeather>> = catalog.iter()
        .cloned()
        .map(|descriptor| (descriptor, Vec::new()))
        .collect();

    info!("matching weather against {} catalog descriptors", catalog.len());

    let mut cities_read = 0;
    let mut cities_dropped = 0;

    for_each_city(&config.files.weather_file, |city, days| {
        match days {
            None => cities_dropped += 1,
            Some(days) => {
                cities_read += 1;
                for day in days {
                    matcher.match_catalog(&mut matches, day, &catalog, &close_enough, city)?;
                }
            }
        }
        Ok(())
    })?;

    info!("read {} cities, dropped {}", cities_read, cities_dropped);
    for (descriptor, days) in &matches {
        info!("{} ({} matches)", descriptor, days.len());
    }

    let json = serde_json::to_string_pretty(&matches)?;
    fs::write(&config.files.matching_file, json)
        .with_context(|| format!("writing {}", config.files.matching_file))?;

    Ok(())
}

/// Prints per descriptor match counts from the matches file
pub fn count(config: &Config) -> Result<()> {
    let matches = load_matching(&config.files.matching_file)?;
    for (descriptor, days) in &matches {
        println!("{} ({} matches)", descriptor, days.len());
    }
    Ok(())
}

/// Loads the descriptor catalog, dropping each entry's season
pub fn load_catalog(path: &str) -> Result<Vec<Descriptor>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading catalog {}", path))?;
    let entries: Vec<CatalogEntry> = serde_json::from_str(&json)
        .with_context(|| format!("parsing catalog {}", path))?;

    entries.iter()
        .map(|entry| entry.descriptor().map_err(|e| anyhow!("in catalog {}: {}", path, e)))
        .collect()
}

/// Loads the close enough mapping. A missing file means no descriptor has
/// alternates, which is not an error.
pub fn load_close_enough(path: &str) -> Result<HashMap<Descriptor, Vec<Descriptor>>> {
    if !Path::new(path).exists() {
        info!("no close enough mapping at {}, matching without alternates", path);
        return Ok(HashMap::new());
    }

    let json = fs::read_to_string(path)
        .with_context(|| format!("reading close enough mapping {}", path))?;
    let mapping: HashMap<Descriptor, Vec<Descriptor>> = serde_json::from_str(&json)
        .with_context(|| format!("parsing close enough mapping {}", path))?;

    Ok(mapping)
}

/// Loads the matches file written by [`run`]
pub fn load_matching(path: &str) -> Result<BTreeMap<Descriptor, Vec<DailyWeather>>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading matches {}", path))?;
    let matches = serde_json::from_str(&json)
        .with_context(|| format!("parsing matches {}", path))?;

    Ok(matches)
}

/// Streams the weather cache line by line and calls the closure once per
/// city entry. Blank lines are skipped, a null entry is passed through as
/// None so the caller can count dropped cities.
pub fn for_each_city<F>(path: &str, mut f: F) -> Result<()>
where
    F: FnMut(&str, Option<&Vec<DailyWeather>>) -> Result<()>,
{
    let file = File::open(path)
        .with_context(|| format!("opening weather cache {}", path))?;

    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let batch: HashMap<String, Option<Vec<DailyWeather>>> = serde_json::from_str(&line)
            .with_context(|| format!("parsing weather cache line in {}", path))?;

        for (city, days) in &batch {
            f(city, days.as_ref())?;
        }
    }

    Ok(())
}
