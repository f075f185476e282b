// Port for current weather lookups
use crate::application::provider_error::ProviderResult;
use crate::domain::weather::Weather;
use async_trait::async_trait;

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions for a city, metric units
    async fn current_weather(&self, city: &str) -> ProviderResult<Weather>;
}
