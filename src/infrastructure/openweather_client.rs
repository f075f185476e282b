// OpenWeatherMap adapter for the weather port
use crate::application::provider_error::{ProviderError, ProviderResult};
use crate::application::weather_provider::WeatherProvider;
use crate::domain::weather::Weather;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

const PROVIDER: &str = "OpenWeatherMap";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    coord: Coord,
    weather: Vec<Condition>,
    main: MainReadings,
    #[serde(default)]
    wind: Option<Wind>,
}

#[derive(Debug, Deserialize)]
struct Coord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct Wind {
    speed: f64,
}

impl OpenWeatherClient {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.trim().to_string(),
        })
    }

    fn into_weather(data: CurrentWeatherResponse) -> ProviderResult<Weather> {
        let condition = data.weather.into_iter().next().ok_or_else(|| ProviderError::Decode {
            provider: PROVIDER,
            message: "no weather conditions in response".to_string(),
        })?;

        Ok(Weather {
            description: capitalize(&condition.description),
            temperature_celsius: data.main.temp,
            humidity: data.main.humidity,
            wind_speed: data.wind.map(|w| w.speed).unwrap_or_default(),
            icon: condition.icon,
            lat: data.coord.lat,
            lon: data.coord.lon,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current_weather(&self, city: &str) -> ProviderResult<Weather> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        tracing::debug!("Fetching weather for {}", city);

        let response = self
            .client
            .get(&url)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(|e| ProviderError::Network {
                provider: PROVIDER,
                message: e.to_string(),
            })?;

        match response.status() {
            StatusCode::OK => {
                let data = response
                    .json::<CurrentWeatherResponse>()
                    .await
                    .map_err(|e| ProviderError::Decode {
                        provider: PROVIDER,
                        message: e.to_string(),
                    })?;
                Self::into_weather(data)
            }
            StatusCode::UNAUTHORIZED => Err(ProviderError::Unauthorized { provider: PROVIDER }),
            StatusCode::NOT_FOUND => Err(ProviderError::NotFound(format!(
                "City '{}' not found. Please check spelling.",
                city
            ))),
            status => Err(ProviderError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
            }),
        }
    }
}

/// Upper-case the first character, lower-case the rest.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
