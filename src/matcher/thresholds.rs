use std::fmt;
use std::fmt::Formatter;
use crate::matcher::descriptor::{Humidity, Sky, Temperature, Wind};
use crate::matcher::errors::MatchError;

/// Weather categories that have a threshold table. Precipitation is
/// classified by derivation from two measurements instead, see
/// [`crate::matcher::precipitation_from_values`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Temperature,
    Humidity,
    Wind,
    Sky,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Category::Temperature => write!(f, "temperature"),
            Category::Humidity => write!(f, "humidity"),
            Category::Wind => write!(f, "wind"),
            Category::Sky => write!(f, "sky"),
        }
    }
}

/// A closed numeric interval, boundaries included
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub const fn new(min: f64, max: f64) -> Interval {
        Interval { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// Per category tables of (label, interval) rows, ordered ascending by the
/// underlying measurement. Row order carries meaning: the boundary tolerance
/// rule looks at the previous and next row of the target label. A `None`
/// interval is the "Indoor" sentinel which matches any measurement.
pub struct Thresholds {
    pub(super) temperature: Vec<(Temperature, Option<Interval>)>,
    pub(super) humidity: Vec<(Humidity, Option<Interval>)>,
    pub(super) wind: Vec<(Wind, Option<Interval>)>,
    pub(super) sky: Vec<(Sky, Option<Interval>)>,
}

impl Thresholds {
    /// The standard bucket tables used throughout the pipeline
    pub fn standard() -> Thresholds {
        Thresholds {
            temperature: vec![
                (Temperature::Freezing, Some(Interval::new(-50.0, 0.0))),
                (Temperature::Cold, Some(Interval::new(0.0, 10.0))),
                (Temperature::Cool, Some(Interval::new(10.0, 15.0))),
                (Temperature::Mild, Some(Interval::new(15.0, 20.0))),
                (Temperature::Warm, Some(Interval::new(20.0, 25.0))),
                (Temperature::Hot, Some(Interval::new(25.0, 30.0))),
                (Temperature::VeryHot, Some(Interval::new(30.0, 50.0))),
            ],
            humidity: vec![
                (Humidity::Dry, Some(Interval::new(0.0, 40.0))),
                (Humidity::Moderate, Some(Interval::new(40.0, 60.0))),
                (Humidity::Humid, Some(Interval::new(60.0, 75.0))),
                (Humidity::Muggy, Some(Interval::new(75.0, 100.0))),
            ],
            wind: vec![
                (Wind::NoWind, Some(Interval::new(0.0, 0.0))),
                (Wind::Calm, Some(Interval::new(0.1, 10.0))),
                (Wind::Breezy, Some(Interval::new(10.0, 20.0))),
                (Wind::Windy, Some(Interval::new(20.0, 30.0))),
                (Wind::Gale, Some(Interval::new(30.0, 100.0))),
            ],
            sky: vec![
                (Sky::Clear, Some(Interval::new(0.0, 10.0))),
                (Sky::PartlyCloudy, Some(Interval::new(10.0, 30.0))),
                (Sky::MostlyCloudy, Some(Interval::new(30.0, 70.0))),
                (Sky::Overcast, Some(Interval::new(70.0, 100.0))),
                (Sky::Indoor, None),
            ],
        }
    }
}

/// Tests a value against the table row for the target label, with boundary
/// tolerance against the neighbouring rows:
/// * inside the row's own interval (inclusive) matches
/// * inside the upper half of the previous row's interval matches
/// * inside the lower half of the next row's interval matches, unless the
///   next row is a sentinel which ends the search
///
/// The asymmetry (previous upper half, next lower half) is deliberate, the
/// tolerance window always sits on the shared boundary with the target row.
///
/// A label without a row in the table is a configuration error.
pub(super) fn matches_in_table<L>(
    table: &[(L, Option<Interval>)],
    target: L,
    value: f64,
    category: Category,
) -> Result<bool, MatchError>
where
    L: PartialEq + Copy + fmt::Display,
{
    let index = table
        .iter()
        .position(|(label, _)| *label == target)
        .ok_or_else(|| MatchError { label: target.to_string(), category })?;

    let Some(interval) = table[index].1 else {
        return Ok(true);
    };

    if interval.contains(value) {
        return Ok(true);
    }

    if index > 0 {
        if let Some(prev) = table[index - 1].1 {
            if value >= prev.midpoint() && value <= prev.max {
                return Ok(true);
            }
        }
    }

    if index + 1 < table.len() {
        match table[index + 1].1 {
            None => return Ok(false),
            Some(next) => {
                if value >= next.min && value <= next.midpoint() {
                    return Ok(true);
                }
            }
        }
    }

    Ok(false)
}

/// Returns the first label whose interval contains the value, in table
/// order, without any boundary tolerance. Sentinel rows never match.
/// `None` when the value falls outside every interval.
pub(super) fn label_for_value<L: Copy>(table: &[(L, Option<Interval>)], value: f64) -> Option<L> {
    table.iter().find_map(|&(label, interval)| {
        interval.filter(|i| i.contains(value)).map(|_| label)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_are_inclusive() {
        let t = Thresholds::standard();
        assert!(matches_in_table(&t.temperature, Temperature::Cold, 0.0, Category::Temperature).unwrap());
        assert!(matches_in_table(&t.temperature, Temperature::Cold, 10.0, Category::Temperature).unwrap());
        assert!(!matches_in_table(&t.temperature, Temperature::Cold, 13.0, Category::Temperature).unwrap());
    }

    #[test]
    fn test_midpoint_accepted_by_both_neighbours() {
        let t = Thresholds::standard();

        // 10 lies inside Cold [0, 10], and inside the upper half [5, 10] of
        // Cold as seen from Cool, so both buckets accept it
        assert!(matches_in_table(&t.temperature, Temperature::Cold, 10.0, Category::Temperature).unwrap());
        assert!(matches_in_table(&t.temperature, Temperature::Cool, 10.0, Category::Temperature).unwrap());
    }

    #[test]
    fn test_tolerance_previous_upper_half() {
        let t = Thresholds::standard();

        // Cool [10, 15] tolerates the upper half of Cold [0, 10]
        assert!(matches_in_table(&t.temperature, Temperature::Cool, 7.0, Category::Temperature).unwrap());
        assert!(!matches_in_table(&t.temperature, Temperature::Cool, 4.0, Category::Temperature).unwrap());
    }

    #[test]
    fn test_tolerance_next_lower_half() {
        let t = Thresholds::standard();

        // Cool [10, 15] tolerates the lower half of Mild [15, 20]
        assert!(matches_in_table(&t.temperature, Temperature::Cool, 17.0, Category::Temperature).unwrap());
        assert!(!matches_in_table(&t.temperature, Temperature::Cool, 19.0, Category::Temperature).unwrap());
    }

    #[test]
    fn test_sentinel_next_row_stops_tolerance() {
        let t = Thresholds::standard();

        // Overcast is followed by the Indoor sentinel, values above 100 fail
        assert!(!matches_in_table(&t.sky, Sky::Overcast, 110.0, Category::Sky).unwrap());
    }

    #[test]
    fn test_sentinel_row_matches_anything() {
        let t = Thresholds::standard();
        assert!(matches_in_table(&t.sky, Sky::Indoor, -3000.0, Category::Sky).unwrap());
    }

    #[test]
    fn test_unknown_label_is_an_error() {
        let t = Thresholds::standard();

        // Foggy has no row of its own, reaching the table with it must fail
        // fast instead of silently defaulting
        let err = matches_in_table(&t.sky, Sky::Foggy, 80.0, Category::Sky).unwrap_err();
        assert_eq!(err.category, Category::Sky);
    }

    #[test]
    fn test_reverse_lookup_exact_containment_only() {
        let t = Thresholds::standard();
        assert_eq!(label_for_value(&t.temperature, 12.0), Some(Temperature::Cool));
        assert_eq!(label_for_value(&t.temperature, 10.0), Some(Temperature::Cold));
        assert_eq!(label_for_value(&t.humidity, 105.0), None);
        assert_eq!(label_for_value(&t.sky, 101.0), None);
    }
}
