use serde::{Deserialize, Serialize};

/// One day of hourly weather, stored as parallel per channel sequences with
/// one entry per hour (conventionally 24). All sequences of a well formed
/// record have equal length; consumers clamp to the shortest channel so a
/// ragged or empty record degrades to fewer hours instead of a panic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyWeather {
    #[serde(default)]
    pub temp_c: Vec<f64>,
    #[serde(default)]
    pub is_day: Vec<u8>,
    #[serde(default)]
    pub wind_kph: Vec<f64>,
    #[serde(default)]
    pub precip_mm: Vec<f64>,
    #[serde(default)]
    pub snow_cm: Vec<f64>,
    #[serde(default)]
    pub humidity: Vec<f64>,
    #[serde(default)]
    pub cloud: Vec<f64>,
    #[serde(default)]
    pub windchill_c: Vec<f64>,
    #[serde(default)]
    pub heatindex_c: Vec<f64>,
    #[serde(default)]
    pub will_it_rain: Vec<u8>,
    #[serde(default)]
    pub chance_of_rain: Vec<f64>,
    #[serde(default)]
    pub will_it_snow: Vec<u8>,
    #[serde(default)]
    pub chance_of_snow: Vec<f64>,
}

impl DailyWeather {
    /// Number of hours that can safely be read from every channel the
    /// matcher uses
    pub fn hours(&self) -> usize {
        [
            self.temp_c.len(),
            self.is_day.len(),
            self.wind_kph.len(),
            self.precip_mm.len(),
            self.snow_cm.len(),
            self.humidity.len(),
            self.cloud.len(),
        ]
        .into_iter()
        .min()
        .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hours_clamps_to_shortest_channel() {
        let mut day = DailyWeather::default();
        assert_eq!(day.hours(), 0);

        day.temp_c = vec![1.0; 24];
        day.is_day = vec![1; 24];
        day.wind_kph = vec![5.0; 24];
        day.precip_mm = vec![0.0; 24];
        day.snow_cm = vec![0.0; 24];
        day.humidity = vec![50.0; 24];
        day.cloud = vec![10.0; 24];
        assert_eq!(day.hours(), 24);

        day.cloud.truncate(20);
        assert_eq!(day.hours(), 20);
    }

    #[test]
    fn test_missing_channels_deserialize_empty() {
        let day: DailyWeather = serde_json::from_str(r#"{"temp_c": [1.0, 2.0]}"#).unwrap();
        assert_eq!(day.temp_c.len(), 2);
        assert!(day.humidity.is_empty());
        assert_eq!(day.hours(), 0);
    }
}
