// Port for local news headlines
use crate::application::provider_error::ProviderResult;
use crate::domain::news::NewsItem;
use async_trait::async_trait;

#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Top headlines for a country, narrowed to a city when the provider has any.
    ///
    /// Falls back to the country's general headlines when the city query is
    /// empty, and to canned city items when that second query fails. An error
    /// means the provider could not be used at all.
    async fn headlines(&self, country_code: &str, city: &str) -> ProviderResult<Vec<NewsItem>>;
}
