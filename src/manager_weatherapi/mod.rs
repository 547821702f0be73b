use std::time::Duration;
use log::debug;
use ureq::Agent;
use crate::config::ApiParameters;
use crate::models::daily_weather::DailyWeather;
use crate::models::forecast::ForecastResponse;

mod errors;

pub use errors::WeatherApiError;

/// Struct for managing hourly forecasts produced by WeatherAPI
pub struct WeatherApi {
    agent: Agent,
    api_key: String,
    base_url: String,
    days: u32,
}

impl WeatherApi {
    /// Returns a WeatherApi struct ready for fetching forecasts.
    ///
    /// Non 2xx statuses are not turned into transport errors since WeatherAPI
    /// reports an unknown location as a 400 with a JSON error body, which is
    /// handled as a dropped city rather than a failure.
    ///
    /// # Arguments
    ///
    /// * 'api' - api section of the configuration
    /// * 'days' - number of forecast days to request per city
    pub fn new(api: &ApiParameters, days: u32) -> WeatherApi {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(api.timeout_secs)))
            .http_status_as_error(false)
            .build();

        WeatherApi {
            agent: config.into(),
            api_key: api.key.to_string(),
            base_url: api.base_url.to_string(),
            days,
        }
    }

    /// Retrieves the hourly forecast for one city and returns one
    /// DailyWeather per forecast day.
    ///
    /// Returns Ok(None) when WeatherAPI does not know the location, the
    /// caller drops such cities without retrying.
    ///
    /// # Arguments
    ///
    /// * 'city' - city name as listed in the cities file
    pub fn forecast(&self, city: &str) -> Result<Option<Vec<DailyWeather>>, WeatherApiError> {
        let url = format!("{}/forecast.json", self.base_url);

        let json = self.agent
            .get(url)
            .query("key", &self.api_key)
            .query("q", city)
            .query("days", &self.days.to_string())
            .query("aqi", "no")
            .query("alerts", "no")
            .call()?
            .body_mut()
            .read_to_string()?;

        let response: ForecastResponse = serde_json::from_str(&json)?;

        if let Some(error) = response.error {
            debug!("WeatherAPI rejected \"{}\": {} ({})", city, error.message, error.code);
            return Ok(None);
        }

        let Some(forecast) = response.forecast else {
            return Err(WeatherApiError(format!("no forecast member in response for \"{}\"", city)));
        };

        Ok(Some(forecast.forecastday.iter().map(DailyWeather::from).collect()))
    }
}
