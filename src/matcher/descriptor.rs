use std::fmt;
use std::fmt::Formatter;
use std::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Separator used in the serialized form of a descriptor
pub const FIELD_SEPARATOR: &str = " | ";

#[derive(Error, Debug)]
#[error("unknown weather descriptor label: \"{0}\"")]
pub struct ParseLabelError(pub String);

#[derive(Error, Debug)]
pub enum ParseDescriptorError {
    #[error("descriptor must have five \" | \" separated fields: \"{0}\"")]
    FieldCount(String),
    #[error(transparent)]
    Label(#[from] ParseLabelError),
}

macro_rules! labels {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut Formatter) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseLabelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(ParseLabelError(s.to_string())),
                }
            }
        }
    };
}

labels!(Temperature {
    Freezing => "Freezing",
    Cold => "Cold",
    Cool => "Cool",
    Mild => "Mild",
    Warm => "Warm",
    Hot => "Hot",
    VeryHot => "Very Hot",
    Indoor => "Indoor",
});

labels!(Humidity {
    Dry => "Dry",
    Moderate => "Moderate Humidity",
    Humid => "Humid",
    Muggy => "Muggy",
    Indoor => "Indoor",
});

labels!(Precipitation {
    NoPrecipitation => "No Precipitation",
    Drizzle => "Drizzle",
    Rain => "Rain",
    HeavyRain => "Heavy Rain",
    Thunderstorm => "Thunderstorm",
    Snow => "Snow",
    HeavySnow => "Heavy Snow",
    Sleet => "Sleet",
    Indoor => "Indoor",
});

labels!(Wind {
    NoWind => "No Wind",
    Calm => "Calm",
    Breezy => "Breezy",
    Windy => "Windy",
    Gale => "Gale",
    Indoor => "Indoor",
});

labels!(Sky {
    Clear => "Clear",
    PartlyCloudy => "Partly Cloudy",
    MostlyCloudy => "Mostly Cloudy",
    Overcast => "Overcast",
    Foggy => "Foggy",
    Indoor => "Indoor",
});

/// A qualitative description of one day of weather, one label per measured
/// category. Serializes as `"Cold | Dry | No Precipitation | Calm | Clear"`
/// which is also the key format used in all JSON files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Descriptor {
    pub temperature: Temperature,
    pub humidity: Humidity,
    pub precipitation: Precipitation,
    pub wind: Wind,
    pub sky: Sky,
}

impl Descriptor {
    /// Returns the number of fields (0..=5) that are equal between the two descriptors
    pub fn matching_fields(&self, other: &Descriptor) -> usize {
        let mut matches = 0;
        if self.temperature == other.temperature { matches += 1; }
        if self.humidity == other.humidity { matches += 1; }
        if self.precipitation == other.precipitation { matches += 1; }
        if self.wind == other.wind { matches += 1; }
        if self.sky == other.sky { matches += 1; }
        matches
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}{sep}{}{sep}{}{sep}{}{sep}{}",
               self.temperature, self.humidity, self.precipitation, self.wind, self.sky,
               sep = FIELD_SEPARATOR)
    }
}

impl FromStr for Descriptor {
    type Err = ParseDescriptorError;

    /// Parses the five field form. A six field form carries a season token in
    /// the second slot which matching ignores, so it is dropped here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts: Vec<&str> = s.split(FIELD_SEPARATOR).collect();
        if parts.len() == 6 {
            parts.remove(1);
        }
        if parts.len() != 5 {
            return Err(ParseDescriptorError::FieldCount(s.to_string()));
        }

        Ok(Descriptor {
            temperature: parts[0].parse()?,
            humidity: parts[1].parse()?,
            precipitation: parts[2].parse()?,
            wind: parts[3].parse()?,
            sky: parts[4].parse()?,
        })
    }
}

impl Serialize for Descriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Descriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
