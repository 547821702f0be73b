pub mod catalog;
pub mod daily_weather;
pub mod forecast;
pub mod outfit;
