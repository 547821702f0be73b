use std::collections::BTreeMap;
use std::fs;
use anyhow::{Context, Result};
use log::info;
use crate::config::Config;
use crate::matcher::Descriptor;
use crate::matching::load_catalog;

/// Builds the close enough mapping: for every catalog descriptor, the
/// deduced descriptors that differ in at most one of the five fields.
///
/// The deduced side comes from the condition types file written by the
/// deduce command, so run that first.
pub fn run(config: &Config) -> Result<()> {
    let catalog = load_catalog(&config.files.catalog_file)?;

    let json = fs::read_to_string(&config.files.condition_types_file)
        .with_context(|| format!("reading condition types {}", config.files.condition_types_file))?;
    let deduced: BTreeMap<Descriptor, usize> = serde_json::from_str(&json)
        .with_context(|| format!("parsing condition types {}", config.files.condition_types_file))?;

    let mut mapping: BTreeMap<Descriptor, Vec<Descriptor>> = BTreeMap::new();
    for descriptor in &catalog {
        let close = close_descriptors(descriptor, deduced.keys());
        info!("{}: {} close enough descriptors", descriptor, close.len());
        mapping.insert(descriptor.clone(), close);
    }

    let json = serde_json::to_string_pretty(&mapping)?;
    fs::write(&config.files.close_enough_file, json)
        .with_context(|| format!("writing {}", config.files.close_enough_file))?;

    Ok(())
}

/// Keeps candidates that agree with the descriptor on at least four of the
/// five fields
fn close_descriptors<'a, I>(descriptor: &Descriptor, candidates: I) -> Vec<Descriptor>
where
    I: Iterator<Item = &'a Descriptor>,
{
    candidates
        .filter(|candidate| descriptor.matching_fields(candidate) >= 4)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_descriptors_one_field_difference() {
        let descriptor: Descriptor = "Cold | Dry | No Precipitation | Calm | Clear".parse().unwrap();
        let candidates: Vec<Descriptor> = vec![
            "Cold | Dry | No Precipitation | Calm | Clear".parse().unwrap(),
            "Cold | Dry | No Precipitation | Calm | Overcast".parse().unwrap(),
            "Cold | Humid | No Precipitation | Breezy | Clear".parse().unwrap(),
        ];

        let close = close_descriptors(&descriptor, candidates.iter());

        // the identical and the one field off candidates qualify, the two
        // field off candidate does not
        assert_eq!(close.len(), 2);
        assert!(close.contains(&candidates[0]));
        assert!(close.contains(&candidates[1]));
    }
}
