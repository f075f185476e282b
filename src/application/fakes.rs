// In-memory providers for service tests
use crate::application::briefing_store::BriefingStore;
use crate::application::news_provider::NewsProvider;
use crate::application::provider_error::{ProviderError, ProviderResult};
use crate::application::routing_provider::RoutingProvider;
use crate::application::weather_provider::WeatherProvider;
use crate::domain::briefing::BriefingRecord;
use crate::domain::news::NewsItem;
use crate::domain::route::{Coordinates, NearbyResource, ResourceKind, RouteSummary, VehicleKind};
use crate::domain::weather::Weather;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

pub fn sample_weather(description: &str, temperature_celsius: f64) -> Weather {
    Weather {
        description: description.to_string(),
        temperature_celsius,
        humidity: 70.0,
        wind_speed: 4.1,
        icon: "10d".to_string(),
        lat: 41.3851,
        lon: 2.1734,
    }
}

pub struct FakeWeather {
    result: ProviderResult<Weather>,
    cities: Arc<Mutex<Vec<String>>>,
}

impl FakeWeather {
    pub fn ok(weather: Weather) -> Self {
        Self::with_result(Ok(weather))
    }

    pub fn err(error: ProviderError) -> Self {
        Self::with_result(Err(error))
    }

    fn with_result(result: ProviderResult<Weather>) -> Self {
        Self {
            result,
            cities: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Cities requested so far, shared with the fake.
    pub fn cities(&self) -> Arc<Mutex<Vec<String>>> {
        self.cities.clone()
    }
}

#[async_trait]
impl WeatherProvider for FakeWeather {
    async fn current_weather(&self, city: &str) -> ProviderResult<Weather> {
        self.cities.lock().unwrap().push(city.to_string());
        self.result.clone()
    }
}

pub struct FakeNews(ProviderResult<Vec<NewsItem>>);

impl FakeNews {
    pub fn ok(titles: &[&str]) -> Self {
        Self(Ok(titles
            .iter()
            .map(|t| NewsItem {
                title: t.to_string(),
                url: "https://news.example/item".to_string(),
                source: "Example".to_string(),
            })
            .collect()))
    }

    pub fn err(error: ProviderError) -> Self {
        Self(Err(error))
    }
}

#[async_trait]
impl NewsProvider for FakeNews {
    async fn headlines(&self, _country_code: &str, _city: &str) -> ProviderResult<Vec<NewsItem>> {
        self.0.clone()
    }
}

#[derive(Default)]
pub struct RecordingStore {
    records: Mutex<Vec<BriefingRecord>>,
}

impl RecordingStore {
    pub fn records(&self) -> Vec<BriefingRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl BriefingStore for RecordingStore {
    async fn save(&self, record: &BriefingRecord) -> anyhow::Result<()> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// Geocodes known addresses; routes succeed unless `route` is an error.
/// Nearby searches return `nearby` with the requested kind stamped on.
pub struct FakeRouting {
    pub known: Vec<(String, Coordinates)>,
    pub route: ProviderResult<RouteSummary>,
    pub nearby: ProviderResult<Vec<NearbyResource>>,
}

impl FakeRouting {
    pub fn new(known: Vec<(String, Coordinates)>, route: ProviderResult<RouteSummary>) -> Self {
        Self {
            known,
            route,
            nearby: Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl RoutingProvider for FakeRouting {
    async fn geocode(&self, address: &str) -> ProviderResult<Coordinates> {
        self.known
            .iter()
            .find(|(name, _)| name == address)
            .map(|(_, coords)| *coords)
            .ok_or_else(|| ProviderError::NotFound(format!("Could not geocode address: {}", address)))
    }

    async fn route(
        &self,
        _start: Coordinates,
        _end: Coordinates,
        _vehicle: VehicleKind,
    ) -> ProviderResult<RouteSummary> {
        self.route.clone()
    }

    async fn nearby(
        &self,
        _center: Coordinates,
        kind: ResourceKind,
        _radius_m: u32,
    ) -> ProviderResult<Vec<NearbyResource>> {
        self.nearby.clone().map(|found| {
            found
                .into_iter()
                .map(|resource| NearbyResource { kind, ..resource })
                .collect()
        })
    }
}
