use std::collections::BTreeMap;
use std::fs;
use anyhow::{Context, Result};
use log::info;
use crate::config::Config;
use crate::matcher::{Descriptor, Matcher};
use crate::matching::for_each_city;

/// Deduces the best fitting descriptor for every cached day of weather and
/// writes the per descriptor frequency file.
///
/// Days without a deducible descriptor (no hour resolved to a complete one)
/// are skipped.
pub fn run(config: &Config, matcher: &Matcher) -> Result<()> {
    let mut counts: BTreeMap<Descriptor, usize> = BTreeMap::new();
    let mut days_read = 0;

    for_each_city(&config.files.weather_file, |_, days| {
        let Some(days) = days else {
            return Ok(());
        };
        for day in days {
            days_read += 1;
            if let Some(descriptor) = matcher.deduce_day(day) {
                *counts.entry(descriptor).or_insert(0) += 1;
            }
        }
        Ok(())
    })?;

    info!("deduced descriptors for {} days, {} distinct", days_read, counts.len());
    for (descriptor, count) in &counts {
        info!("{}: {}", descriptor, count);
    }

    let json = serde_json::to_string_pretty(&counts)?;
    fs::write(&config.files.condition_types_file, json)
        .with_context(|| format!("writing {}", config.files.condition_types_file))?;

    Ok(())
}
