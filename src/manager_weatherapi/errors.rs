use thiserror::Error;

#[derive(Error, Debug)]
#[error("error in communication with WeatherAPI: {0}")]
pub struct WeatherApiError(pub String);
impl From<ureq::Error> for WeatherApiError {
    fn from(e: ureq::Error) -> WeatherApiError {
        WeatherApiError(format!("http request error: {}", e.to_string()))
    }
}
impl From<serde_json::Error> for WeatherApiError {
    fn from(e: serde_json::Error) -> WeatherApiError {
        WeatherApiError(format!("json document error: {}", e.to_string()))
    }
}
