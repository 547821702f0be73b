use serde::Deserialize;
use crate::matcher::{Descriptor, ParseLabelError};

/// One entry of the descriptor catalog file. The season only guides the
/// labeling UI, matching drops it.
#[derive(Deserialize)]
pub struct CatalogEntry {
    pub season: String,
    pub temperature: String,
    pub humidity: String,
    pub precipitation: String,
    pub wind: String,
    pub sky: String,
}

impl CatalogEntry {
    pub fn descriptor(&self) -> Result<Descriptor, ParseLabelError> {
        Ok(Descriptor {
            temperature: self.temperature.parse()?,
            humidity: self.humidity.parse()?,
            precipitation: self.precipitation.parse()?,
            wind: self.wind.parse()?,
            sky: self.sky.parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_entry_drops_season() {
        let json = r#"{
            "season": "Winter",
            "temperature": "Cold",
            "humidity": "Dry",
            "precipitation": "Snow",
            "wind": "Breezy",
            "sky": "Overcast"
        }"#;

        let entry: CatalogEntry = serde_json::from_str(json).unwrap();
        let descriptor = entry.descriptor().unwrap();
        assert_eq!(descriptor.to_string(), "Cold | Dry | Snow | Breezy | Overcast");
    }

    #[test]
    fn test_unknown_catalog_label_fails_fast() {
        let entry = CatalogEntry {
            season: "Summer".to_string(),
            temperature: "Scorching".to_string(),
            humidity: "Dry".to_string(),
            precipitation: "No Precipitation".to_string(),
            wind: "Calm".to_string(),
            sky: "Clear".to_string(),
        };
        assert!(entry.descriptor().is_err());
    }
}
