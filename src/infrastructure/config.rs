use crate::application::briefing_service::NewsSelection;
use crate::domain::city_name::{CityDirectory, DEFAULT_KNOWN_CITIES, DEFAULT_MATCH_CUTOFF};
use crate::domain::city_tier::{CityTierTable, DEFAULT_MAJOR_CITIES, DEFAULT_MEDIUM_CITIES};
use crate::domain::delivery_window::{ThresholdPolicy, DEFAULT_CUTOFF};
use crate::domain::error::EstimatorError;
use crate::domain::local_time::{TimezoneTable, DEFAULT_CITY_TIMEZONES, DEFAULT_TIMEZONE};
use crate::domain::news::DEFAULT_KEYWORDS;
use crate::domain::route::Coordinates;
use crate::domain::traffic::{TrafficEstimator, DEFAULT_NOISE_STD_DEV};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub api_keys: ApiKeys,
    pub endpoints: EndpointSettings,
    pub traffic: TrafficSettings,
    pub news: NewsSettings,
    pub routing: RoutingSettings,
    pub briefing: BriefingSettings,
    pub zones: ZoneSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ApiKeys {
    pub weather_api_key: String,
    pub news_api_key: String,
    pub routing_api_key: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EndpointSettings {
    pub weather_base_url: String,
    pub news_base_url: String,
    pub routing_base_url: String,
    pub timeout_secs: u64,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            weather_base_url: "https://api.openweathermap.org".to_string(),
            news_base_url: "https://newsapi.org".to_string(),
            routing_base_url: "https://api.tomtom.com".to_string(),
            timeout_secs: 10,
        }
    }
}

impl EndpointSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TrafficSettings {
    pub cutoff: f64,
    /// Select hours at or below this quantile instead of using `cutoff`.
    pub percentile: Option<f64>,
    pub noise_std_dev: f64,
    pub default_seed: u64,
    pub major_cities: Vec<String>,
    pub medium_cities: Vec<String>,
}

impl Default for TrafficSettings {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
            percentile: None,
            noise_std_dev: DEFAULT_NOISE_STD_DEV,
            default_seed: 42,
            major_cities: DEFAULT_MAJOR_CITIES.iter().map(|c| c.to_string()).collect(),
            medium_cities: DEFAULT_MEDIUM_CITIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl TrafficSettings {
    pub fn estimator(&self) -> Result<TrafficEstimator, EstimatorError> {
        let tiers = CityTierTable::new(&self.major_cities, &self.medium_cities);
        TrafficEstimator::new(tiers, self.noise_std_dev)
    }

    pub fn policy(&self) -> ThresholdPolicy {
        match self.percentile {
            Some(q) => ThresholdPolicy::Percentile(q),
            None => ThresholdPolicy::Fixed(self.cutoff),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct NewsSettings {
    pub keywords: Vec<String>,
    pub max_items: usize,
}

impl Default for NewsSettings {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            max_items: 5,
        }
    }
}

impl NewsSettings {
    pub fn selection(&self) -> NewsSelection {
        NewsSelection {
            keywords: self.keywords.clone(),
            max_items: self.max_items,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RoutingSettings {
    pub fallback_lat: f64,
    pub fallback_lon: f64,
}

impl Default for RoutingSettings {
    fn default() -> Self {
        // Central Barcelona
        Self {
            fallback_lat: 41.3851,
            fallback_lon: 2.1734,
        }
    }
}

impl RoutingSettings {
    pub fn fallback_center(&self) -> Coordinates {
        Coordinates::new(self.fallback_lat, self.fallback_lon)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BriefingSettings {
    pub output_path: String,
}

impl Default for BriefingSettings {
    fn default() -> Self {
        Self {
            output_path: "last_briefing.json".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ZoneSettings {
    pub known_cities: Vec<String>,
    pub match_cutoff: f64,
    pub default_timezone: String,
    /// Lowercase city name to IANA timezone.
    pub timezones: HashMap<String, String>,
}

impl Default for ZoneSettings {
    fn default() -> Self {
        Self {
            known_cities: DEFAULT_KNOWN_CITIES.iter().map(|c| c.to_string()).collect(),
            match_cutoff: DEFAULT_MATCH_CUTOFF,
            default_timezone: DEFAULT_TIMEZONE.to_string(),
            timezones: DEFAULT_CITY_TIMEZONES
                .iter()
                .map(|(city, tz)| (city.to_string(), tz.to_string()))
                .collect(),
        }
    }
}

impl ZoneSettings {
    /// Known cities plus every city named in the tier table.
    pub fn directory(&self, traffic: &TrafficSettings) -> CityDirectory {
        let cities = self
            .known_cities
            .iter()
            .chain(&traffic.major_cities)
            .chain(&traffic.medium_cities);
        CityDirectory::new(cities, self.match_cutoff)
    }

    pub fn timezone_table(&self) -> Result<TimezoneTable, EstimatorError> {
        TimezoneTable::new(&self.timezones, &self.default_timezone)
    }
}

/// Load `config/app.*` (optional) overlaid with `COURIER_*` environment
/// variables, e.g. `COURIER_API_KEYS__WEATHER_API_KEY`.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/app").required(false))
        .add_source(
            config::Environment::with_prefix("COURIER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
