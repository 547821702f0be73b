use std::collections::{BTreeMap, HashMap};
use log::debug;
use crate::models::daily_weather::DailyWeather;

mod descriptor;
mod errors;
mod thresholds;

pub use descriptor::{
    Descriptor, Humidity, ParseDescriptorError, ParseLabelError, Precipitation, Sky, Temperature,
    Wind,
};
pub use errors::MatchError;
pub use thresholds::{Category, Interval, Thresholds};

/// Result of matching one day against one descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayMatch {
    /// Number of hours whose five category values all satisfied the descriptor
    pub matched: usize,
    /// True unless some daylight hour failed to fully match. Night hour
    /// failures do not clear it.
    pub day_is_matched: bool,
}

/// Derives the precipitation type from the two precipitation measurements.
/// The buckets are mutually exclusive and checked in order, snow first.
pub fn precipitation_from_values(precip_mm: f64, snow_cm: f64) -> Precipitation {
    if snow_cm > 0.0 {
        if snow_cm < 5.0 { Precipitation::Snow } else { Precipitation::HeavySnow }
    } else if precip_mm == 0.0 {
        Precipitation::NoPrecipitation
    } else if precip_mm <= 2.0 {
        Precipitation::Drizzle
    } else if precip_mm <= 10.0 {
        Precipitation::Rain
    } else if precip_mm < 50.0 {
        Precipitation::HeavyRain
    } else {
        Precipitation::Thunderstorm
    }
}

/// Exact equality against the derived precipitation type, no tolerance
pub fn matches_precipitation(precip_mm: f64, snow_cm: f64, target: Precipitation) -> bool {
    precipitation_from_values(precip_mm, snow_cm) == target
}

/// Classifies hourly weather measurements against qualitative descriptors.
/// Owns the threshold catalog, built once at startup and immutable after.
pub struct Matcher {
    thresholds: Thresholds,
}

impl Matcher {
    pub fn new(thresholds: Thresholds) -> Matcher {
        Matcher { thresholds }
    }

    pub fn matches_temperature(&self, value: f64, target: Temperature) -> Result<bool, MatchError> {
        if target == Temperature::Indoor {
            return Ok(true);
        }
        thresholds::matches_in_table(&self.thresholds.temperature, target, value, Category::Temperature)
    }

    pub fn matches_humidity(&self, value: f64, target: Humidity) -> Result<bool, MatchError> {
        if target == Humidity::Indoor {
            return Ok(true);
        }
        thresholds::matches_in_table(&self.thresholds.humidity, target, value, Category::Humidity)
    }

    pub fn matches_wind(&self, value: f64, target: Wind) -> Result<bool, MatchError> {
        if target == Wind::Indoor {
            return Ok(true);
        }
        thresholds::matches_in_table(&self.thresholds.wind, target, value, Category::Wind)
    }

    /// Foggy has no thresholds of its own, it is evaluated as Overcast
    pub fn matches_sky(&self, value: f64, target: Sky) -> Result<bool, MatchError> {
        match target {
            Sky::Indoor => Ok(true),
            Sky::Foggy => self.matches_sky(value, Sky::Overcast),
            _ => thresholds::matches_in_table(&self.thresholds.sky, target, value, Category::Sky),
        }
    }

    /// Evaluates every hour of a day against one descriptor.
    ///
    /// An hour counts as matched only if all five category checks pass.
    /// `day_is_matched` starts true and is cleared the first time an hour
    /// with `is_day == 1` fails, after which it stays false. Failing night
    /// hours are ignored. An empty record yields zero matches.
    pub fn match_day(&self, day: &DailyWeather, descriptor: &Descriptor) -> Result<DayMatch, MatchError> {
        let mut matched = 0;
        let mut day_is_matched = true;

        for hour in 0..day.hours() {
            let temp_ok = self.matches_temperature(day.temp_c[hour], descriptor.temperature)?;
            let humidity_ok = self.matches_humidity(day.humidity[hour], descriptor.humidity)?;
            let precip_ok = matches_precipitation(day.precip_mm[hour], day.snow_cm[hour], descriptor.precipitation);
            let wind_ok = self.matches_wind(day.wind_kph[hour], descriptor.wind)?;
            let sky_ok = self.matches_sky(day.cloud[hour], descriptor.sky)?;

            if temp_ok && humidity_ok && precip_ok && wind_ok && sky_ok {
                matched += 1;
            } else if day.is_day[hour] == 1 {
                day_is_matched = false;
            }
        }

        Ok(DayMatch { matched, day_is_matched })
    }

    /// Runs one day against the full catalog and appends it to the
    /// accumulator of every descriptor it satisfies.
    ///
    /// A descriptor is satisfied when the day matches it directly, or when
    /// the day matches one of its close enough alternates. Either way the
    /// record is credited to the catalog descriptor, and at most once per
    /// descriptor. A descriptor without an entry in `close_enough` simply has
    /// no alternates.
    pub fn match_catalog(
        &self,
        matches: &mut BTreeMap<Descriptor, Vec<DailyWeather>>,
        day: &DailyWeather,
        catalog: &[Descriptor],
        close_enough: &HashMap<Descriptor, Vec<Descriptor>>,
        city: &str,
    ) -> Result<(), MatchError> {
        for descriptor in catalog {
            let result = self.match_day(day, descriptor)?;
            if result.day_is_matched && result.matched > 0 {
                debug!("{}: matched \"{}\" for {} hours", city, descriptor, result.matched);
                matches.entry(descriptor.clone()).or_default().push(day.clone());
                continue;
            }

            let Some(alternates) = close_enough.get(descriptor) else {
                continue;
            };
            for alternate in alternates {
                let result = self.match_day(day, alternate)?;
                if result.day_is_matched && result.matched > 0 {
                    debug!("{}: matched \"{}\" via close enough \"{}\"", city, descriptor, alternate);
                    matches.entry(descriptor.clone()).or_default().push(day.clone());
                    break;
                }
            }
        }

        Ok(())
    }

    /// Deduces the single best fitting descriptor for a day without a
    /// catalog.
    ///
    /// Each hour is turned into an exact descriptor through reverse interval
    /// lookup. Hours where some measurement falls outside every bucket have
    /// no complete descriptor and are skipped. The most frequent hourly
    /// descriptor wins, ties go to the one that reached the top count first
    /// in hour order. `None` when no hour produced a descriptor.
    pub fn deduce_day(&self, day: &DailyWeather) -> Option<Descriptor> {
        let mut frequency: HashMap<Descriptor, usize> = HashMap::new();
        let mut best: Option<(Descriptor, usize)> = None;

        for hour in 0..day.hours() {
            let Some(descriptor) = self.hour_descriptor(day, hour) else {
                continue;
            };

            let count = frequency.entry(descriptor.clone()).or_insert(0);
            *count += 1;

            let is_better = match &best {
                None => true,
                Some((_, best_count)) => *count > *best_count,
            };
            if is_better {
                best = Some((descriptor, *count));
            }
        }

        best.map(|(descriptor, _)| descriptor)
    }

    fn hour_descriptor(&self, day: &DailyWeather, hour: usize) -> Option<Descriptor> {
        Some(Descriptor {
            temperature: thresholds::label_for_value(&self.thresholds.temperature, day.temp_c[hour])?,
            humidity: thresholds::label_for_value(&self.thresholds.humidity, day.humidity[hour])?,
            precipitation: precipitation_from_values(day.precip_mm[hour], day.snow_cm[hour]),
            wind: thresholds::label_for_value(&self.thresholds.wind, day.wind_kph[hour])?,
            sky: thresholds::label_for_value(&self.thresholds.sky, day.cloud[hour])?,
        })
    }
}
