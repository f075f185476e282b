// NewsAPI adapter for the news port
use crate::application::news_provider::NewsProvider;
use crate::application::provider_error::{ProviderError, ProviderResult};
use crate::domain::news::NewsItem;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

const PROVIDER: &str = "NewsAPI";

#[derive(Debug, Clone)]
pub struct NewsApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct HeadlinesResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    source: Option<ArticleSource>,
}

#[derive(Debug, Deserialize)]
struct ArticleSource {
    #[serde(default)]
    name: Option<String>,
}

impl From<Article> for NewsItem {
    fn from(article: Article) -> Self {
        NewsItem {
            title: article.title.unwrap_or_else(|| "No title available".to_string()),
            url: article.url.unwrap_or_else(|| "#".to_string()),
            source: article
                .source
                .and_then(|s| s.name)
                .unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

impl NewsApiClient {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.trim().to_string(),
        })
    }

    async fn top_headlines(&self, params: &[(&str, &str)]) -> ProviderResult<Vec<Article>> {
        let url = format!("{}/v2/top-headlines", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| ProviderError::Network {
                provider: PROVIDER,
                message: e.to_string(),
            })?;

        match response.status() {
            StatusCode::OK => response
                .json::<HeadlinesResponse>()
                .await
                .map(|r| r.articles)
                .map_err(|e| ProviderError::Decode {
                    provider: PROVIDER,
                    message: e.to_string(),
                }),
            StatusCode::UNAUTHORIZED => Err(ProviderError::Unauthorized { provider: PROVIDER }),
            StatusCode::TOO_MANY_REQUESTS => Err(ProviderError::RateLimited),
            status => Err(ProviderError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
            }),
        }
    }
}

#[async_trait]
impl NewsProvider for NewsApiClient {
    async fn headlines(&self, country_code: &str, city: &str) -> ProviderResult<Vec<NewsItem>> {
        let mut articles = self
            .top_headlines(&[("country", country_code), ("q", city)])
            .await?;

        if articles.is_empty() {
            tracing::debug!("No headlines for {}, falling back to general news", city);
            match self
                .top_headlines(&[("country", country_code), ("category", "general")])
                .await
            {
                Ok(general) => articles = general,
                Err(e) => {
                    tracing::warn!("General news fallback failed: {}. Using simulated news", e);
                    return Ok(NewsItem::simulated(city));
                }
            }
        }

        Ok(articles.into_iter().map(NewsItem::from).collect())
    }
}
