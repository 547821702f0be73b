use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use anyhow::{anyhow, Context, Result};
use log::{info, warn};
use crate::config::Config;
use crate::matcher::Descriptor;
use crate::matching::load_matching;
use crate::models::daily_weather::DailyWeather;
use crate::models::outfit::{LabeledOutfit, TrainingSample};

/// Joins labeled outfits with their matched weather days into training
/// samples.
///
/// For each outfit every day matched by one of its own descriptors becomes
/// a positive sample, and an equal number of days is drawn round robin from
/// descriptors that are not close (more than one field away) to any of its
/// own as negative samples. Samples are written per outfit under
/// `<samples_dir>/pos` and `<samples_dir>/neg`.
pub fn run(config: &Config) -> Result<()> {
    let json = fs::read_to_string(&config.files.results_file)
        .with_context(|| format!("reading labeled outfits {}", config.files.results_file))?;
    let outfits: Vec<LabeledOutfit> = serde_json::from_str(&json)
        .with_context(|| format!("parsing labeled outfits {}", config.files.results_file))?;

    let matching = load_matching(&config.files.matching_file)?;

    let samples_dir = Path::new(&config.files.samples_dir);
    let pos_dir = samples_dir.join("pos");
    let neg_dir = samples_dir.join("neg");
    fs::create_dir_all(&pos_dir)?;
    fs::create_dir_all(&neg_dir)?;

    let mut positives_total = 0;
    let mut negatives_total = 0;

    for outfit in &outfits {
        let wanted: Vec<Descriptor> = outfit.weather_config.iter()
            .map(|s| s.parse().map_err(|e| anyhow!("in outfit \"{}\": {}", outfit.outfit, e)))
            .collect::<Result<_>>()?;

        let positives = positive_samples(outfit, &wanted, &matching);
        if positives.is_empty() {
            warn!("outfit \"{}\" has no matched weather days, skipping", outfit.outfit);
            continue;
        }
        let negatives = negative_samples(outfit, &wanted, &matching, positives.len());

        positives_total += positives.len();
        negatives_total += negatives.len();

        let file_name = format!("{}.json", outfit.outfit);
        fs::write(pos_dir.join(&file_name), serde_json::to_string_pretty(&positives)?)?;
        fs::write(neg_dir.join(&file_name), serde_json::to_string_pretty(&negatives)?)?;
    }

    info!("assembled {} positive and {} negative samples for {} outfits",
          positives_total, negatives_total, outfits.len());

    Ok(())
}

fn sample(outfit: &LabeledOutfit, day: &DailyWeather) -> TrainingSample {
    TrainingSample {
        outfit: outfit.outfit.clone(),
        types: outfit.types.clone(),
        tags: outfit.tags.clone(),
        weather: day.clone(),
    }
}

/// One sample per day matched by any of the outfit's own descriptors
fn positive_samples(
    outfit: &LabeledOutfit,
    wanted: &[Descriptor],
    matching: &BTreeMap<Descriptor, Vec<DailyWeather>>,
) -> Vec<TrainingSample> {
    wanted.iter()
        .filter_map(|descriptor| matching.get(descriptor))
        .flatten()
        .map(|day| sample(outfit, day))
        .collect()
}

/// Draws up to `wanted_count` samples round robin from descriptors more than
/// one field away from all of the outfit's own descriptors, so the negative
/// set is balanced against the positives and spread over many conditions
fn negative_samples(
    outfit: &LabeledOutfit,
    wanted: &[Descriptor],
    matching: &BTreeMap<Descriptor, Vec<DailyWeather>>,
    wanted_count: usize,
) -> Vec<TrainingSample> {
    let candidates: Vec<&Vec<DailyWeather>> = matching.iter()
        .filter(|&(descriptor, days)| {
            !days.is_empty() && wanted.iter().all(|own| own.matching_fields(descriptor) < 4)
        })
        .map(|(_, days)| days)
        .collect();

    let mut negatives = Vec::with_capacity(wanted_count);
    let mut index = 0;
    while negatives.len() < wanted_count {
        let mut advanced = false;
        for days in &candidates {
            if let Some(day) = days.get(index) {
                negatives.push(sample(outfit, day));
                advanced = true;
                if negatives.len() == wanted_count {
                    break;
                }
            }
        }
        if !advanced {
            break;
        }
        index += 1;
    }

    negatives
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use super::*;

    fn outfit(descriptors: &[&str]) -> LabeledOutfit {
        LabeledOutfit {
            outfit: "outfit_001".to_string(),
            types: HashMap::from([("torso".to_string(), "shirt".to_string())]),
            tags: HashMap::new(),
            weather_config: descriptors.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn day(temp: f64) -> DailyWeather {
        DailyWeather { temp_c: vec![temp; 24], ..Default::default() }
    }

    fn matching() -> BTreeMap<Descriptor, Vec<DailyWeather>> {
        BTreeMap::from([
            ("Cold | Dry | No Precipitation | Calm | Clear".parse().unwrap(),
             vec![day(5.0), day(6.0)]),
            ("Cold | Dry | No Precipitation | Calm | Overcast".parse().unwrap(),
             vec![day(4.0)]),
            ("Hot | Muggy | Thunderstorm | Gale | Overcast".parse().unwrap(),
             vec![day(30.0), day(31.0), day(32.0)]),
        ])
    }

    #[test]
    fn test_positive_samples_follow_weather_config() {
        let outfit = outfit(&["Cold | Dry | No Precipitation | Calm | Clear"]);
        let wanted: Vec<Descriptor> = vec![outfit.weather_config[0].parse().unwrap()];

        let positives = positive_samples(&outfit, &wanted, &matching());
        assert_eq!(positives.len(), 2);
        assert_eq!(positives[0].weather.temp_c[0], 5.0);
    }

    #[test]
    fn test_negative_samples_balanced_and_far() {
        let outfit = outfit(&["Cold | Dry | No Precipitation | Calm | Clear"]);
        let wanted: Vec<Descriptor> = vec![outfit.weather_config[0].parse().unwrap()];

        // only the hot descriptor is far enough, the overcast one differs in
        // a single field
        let negatives = negative_samples(&outfit, &wanted, &matching(), 2);
        assert_eq!(negatives.len(), 2);
        assert!(negatives.iter().all(|s| s.weather.temp_c[0] >= 30.0));
    }

    #[test]
    fn test_negative_samples_stop_when_exhausted() {
        let outfit = outfit(&["Cold | Dry | No Precipitation | Calm | Clear"]);
        let wanted: Vec<Descriptor> = vec![outfit.weather_config[0].parse().unwrap()];

        let negatives = negative_samples(&outfit, &wanted, &matching(), 10);
        assert_eq!(negatives.len(), 3);
    }
}
