use chrono::NaiveDate;
use serde::Deserialize;
use crate::models::daily_weather::DailyWeather;

/// Raw WeatherAPI forecast document. An invalid location comes back as a
/// JSON body with an `error` member instead of an HTTP level failure worth
/// retrying, so both members are optional.
#[derive(Deserialize)]
pub struct ForecastResponse {
    pub error: Option<ApiError>,
    pub forecast: Option<Forecast>,
}

#[derive(Deserialize)]
pub struct ApiError {
    pub code: i64,
    pub message: String,
}

#[derive(Deserialize)]
pub struct Forecast {
    pub forecastday: Vec<ForecastDay>,
}

#[derive(Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub hour: Vec<HourValues>,
}

/// The hourly channels kept from the much wider WeatherAPI hour object,
/// unknown members are dropped on deserialization
#[derive(Deserialize)]
pub struct HourValues {
    pub temp_c: f64,
    pub is_day: u8,
    pub wind_kph: f64,
    pub precip_mm: f64,
    pub snow_cm: f64,
    pub humidity: f64,
    pub cloud: f64,
    pub windchill_c: f64,
    pub heatindex_c: f64,
    pub will_it_rain: u8,
    pub chance_of_rain: f64,
    pub will_it_snow: u8,
    pub chance_of_snow: f64,
}

impl From<&ForecastDay> for DailyWeather {
    /// Pivots a day of hour objects into per channel sequences
    fn from(day: &ForecastDay) -> DailyWeather {
        let mut weather = DailyWeather::default();
        for hour in &day.hour {
            weather.temp_c.push(hour.temp_c);
            weather.is_day.push(hour.is_day);
            weather.wind_kph.push(hour.wind_kph);
            weather.precip_mm.push(hour.precip_mm);
            weather.snow_cm.push(hour.snow_cm);
            weather.humidity.push(hour.humidity);
            weather.cloud.push(hour.cloud);
            weather.windchill_c.push(hour.windchill_c);
            weather.heatindex_c.push(hour.heatindex_c);
            weather.will_it_rain.push(hour.will_it_rain);
            weather.chance_of_rain.push(hour.chance_of_rain);
            weather.will_it_snow.push(hour.will_it_snow);
            weather.chance_of_snow.push(hour.chance_of_snow);
        }
        weather
    }
}
