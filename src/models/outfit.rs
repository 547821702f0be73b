use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::models::daily_weather::DailyWeather;

/// One outfit labeled through the web labeling tool: per garment type and
/// tag annotations plus the weather descriptors the outfit suits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledOutfit {
    pub outfit: String,
    pub types: HashMap<String, String>,
    pub tags: HashMap<String, Vec<String>>,
    #[serde(rename = "weatherConfig")]
    pub weather_config: Vec<String>,
}

/// A single (outfit, weather day) training tuple. Whether it is a positive
/// or negative sample is carried by the directory it is written to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSample {
    pub outfit: String,
    pub types: HashMap<String, String>,
    pub tags: HashMap<String, Vec<String>>,
    pub weather: DailyWeather,
}
