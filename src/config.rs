use serde::Deserialize;

/// OpenWeatherMap access settings, read from `NIMBUS_*` environment variables.
/// Only the API key is mandatory; the endpoint URLs default to the public
/// ones and exist as settings so tests and proxies can redirect them.
#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    pub api_key: String,
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    #[serde(default = "default_weather_url")]
    pub weather_url: String,
}

fn default_geocoding_url() -> String {
    "http://api.openweathermap.org/geo/1.0/direct".to_string()
}

fn default_weather_url() -> String {
    "https://api.openweathermap.org/data/2.5/weather".to_string()
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed("NIMBUS_").from_env()
    }
}
