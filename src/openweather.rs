//! OpenWeatherMap client: direct geocoding plus current conditions.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::collector::WeatherApi;
use crate::config::ApiConfig;
use crate::models::{Coordinate, Location, WeatherObservation};

/// Current-weather payload, reduced to the fields that feed a
/// [`WeatherObservation`]. Everything else in the response is ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct CurrentWeather {
    pub sys: SystemInfo,
    pub main: Measurements,
    pub weather: Vec<Condition>,
    pub rain: Option<Precipitation>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SystemInfo {
    pub country: String,
}

/// Temperatures arrive in Kelvin; no unit conversion is applied before
/// storage.
#[derive(Clone, Debug, Deserialize)]
pub struct Measurements {
    pub temp: f64,
    pub humidity: f64,
    pub pressure: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Condition {
    pub description: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Precipitation {
    #[serde(rename = "1h")]
    pub one_hour: Option<f64>,
}

impl CurrentWeather {
    /// Flattens the payload into an observation for `city_name`.
    ///
    /// A missing `rain` group, or a group without the one-hour field, counts
    /// as 0.0 mm. Any other missing field is an error.
    pub fn into_observation(self, city_name: &str) -> Result<WeatherObservation> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("weather payload for {city_name} has no condition entry"))?;

        Ok(WeatherObservation {
            country_name: self.sys.country,
            city_name: city_name.to_string(),
            temperature: self.main.temp,
            humidity: self.main.humidity,
            pressure: self.main.pressure,
            rain: self.rain.and_then(|r| r.one_hour).unwrap_or(0.0),
            description: condition.description,
        })
    }
}

/// One hit from the direct-geocoding endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct GeocodingHit {
    pub lat: f64,
    pub lon: f64,
}

pub struct OpenWeather {
    client: reqwest::Client,
    api_key: String,
    geocoding_url: String,
    weather_url: String,
}

impl OpenWeather {
    pub fn new(config: &ApiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key: config.api_key.clone(),
            geocoding_url: config.geocoding_url.clone(),
            weather_url: config.weather_url.clone(),
        }
    }

    async fn geocode(&self, city: &str, country: &str) -> Result<Vec<GeocodingHit>> {
        let response = self
            .client
            .get(&self.geocoding_url)
            .query(&[
                ("q", format!("{city},{country}")),
                ("limit", "1".to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await
            .context("geocoding request failed")?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("geocoding request returned status {status}"));
        }

        let hits = response.json().await.context("invalid geocoding payload")?;
        Ok(hits)
    }
}

#[async_trait]
impl WeatherApi for OpenWeather {
    async fn coordinates(&self, location: &Location) -> Result<Coordinate> {
        let hits = self
            .geocode(&location.city_name, &location.country_name)
            .await?;
        let hit = hits.into_iter().next().ok_or_else(|| {
            anyhow!(
                "no geocoding match for {}, {}",
                location.city_name,
                location.country_name
            )
        })?;

        Ok(Coordinate {
            latitude: hit.lat,
            longitude: hit.lon,
        })
    }

    async fn current_weather(&self, coordinate: Coordinate) -> Result<CurrentWeather> {
        let response = self
            .client
            .get(&self.weather_url)
            .query(&[
                ("lat", coordinate.latitude.to_string()),
                ("lon", coordinate.longitude.to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await
            .context("weather request failed")?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("weather request returned status {status}"));
        }

        let payload = response.json().await.context("invalid weather payload")?;
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn london_payload() -> serde_json::Value {
        json!({
            "coord": {"lon": -0.1257, "lat": 51.5085},
            "weather": [{"id": 500, "main": "Rain", "description": "light rain"}],
            "main": {"temp": 280.1, "humidity": 70, "pressure": 1012},
            "rain": {"1h": 0.25},
            "sys": {"country": "GB"},
            "name": "London"
        })
    }

    #[test]
    fn maps_every_field_from_the_payload() {
        let payload: CurrentWeather = serde_json::from_value(london_payload()).unwrap();
        let observation = payload.into_observation("London").unwrap();

        assert_eq!(observation.country_name, "GB");
        assert_eq!(observation.city_name, "London");
        assert_eq!(observation.temperature, 280.1);
        assert_eq!(observation.humidity, 70.0);
        assert_eq!(observation.pressure, 1012.0);
        assert_eq!(observation.rain, 0.25);
        assert_eq!(observation.description, "light rain");
    }

    #[test]
    fn missing_rain_group_defaults_to_zero() {
        let mut value = london_payload();
        value.as_object_mut().unwrap().remove("rain");

        let payload: CurrentWeather = serde_json::from_value(value).unwrap();
        let observation = payload.into_observation("London").unwrap();
        assert_eq!(observation.rain, 0.0);
    }

    #[test]
    fn rain_group_without_hourly_field_defaults_to_zero() {
        let mut value = london_payload();
        value["rain"] = json!({});

        let payload: CurrentWeather = serde_json::from_value(value).unwrap();
        let observation = payload.into_observation("London").unwrap();
        assert_eq!(observation.rain, 0.0);
    }

    #[test]
    fn empty_condition_list_is_an_error() {
        let mut value = london_payload();
        value["weather"] = json!([]);

        let payload: CurrentWeather = serde_json::from_value(value).unwrap();
        assert!(payload.into_observation("London").is_err());
    }

    #[test]
    fn missing_country_fails_to_parse() {
        let mut value = london_payload();
        value.as_object_mut().unwrap().remove("sys");

        assert!(serde_json::from_value::<CurrentWeather>(value).is_err());
    }

    #[test]
    fn integer_measurements_parse_as_floats() {
        let mut value = london_payload();
        value["main"] = json!({"temp": 280, "humidity": 70, "pressure": 1012});

        let payload: CurrentWeather = serde_json::from_value(value).unwrap();
        assert_eq!(payload.main.temp, 280.0);
    }

    #[test]
    fn geocoding_hits_parse_from_the_response_array() {
        let hits: Vec<GeocodingHit> = serde_json::from_value(json!([
            {"name": "London", "lat": 51.5073, "lon": -0.1277, "country": "GB"}
        ]))
        .unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].lat, 51.5073);
        assert_eq!(hits[0].lon, -0.1277);
    }
}
