// Briefing service - Use case for assembling and saving zone briefings
use crate::application::briefing_store::BriefingStore;
use crate::application::news_provider::NewsProvider;
use crate::application::traffic_service::TrafficService;
use crate::application::weather_provider::WeatherProvider;
use crate::domain::briefing::{Briefing, BriefingRecord};
use crate::domain::error::EstimatorError;
use crate::domain::news::{select_relevant, NewsItem};
use crate::domain::weather::{safety_tips, Weather};
use crate::domain::zone::{DeliveryLoad, GasStationOutlook};
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct NewsSelection {
    pub keywords: Vec<String>,
    pub max_items: usize,
}

#[derive(Clone)]
pub struct BriefingService {
    weather: Arc<dyn WeatherProvider>,
    news: Arc<dyn NewsProvider>,
    store: Arc<dyn BriefingStore>,
    traffic: TrafficService,
    selection: NewsSelection,
    refresh_counter: Arc<AtomicU64>,
}

impl BriefingService {
    pub fn new(
        weather: Arc<dyn WeatherProvider>,
        news: Arc<dyn NewsProvider>,
        store: Arc<dyn BriefingStore>,
        traffic: TrafficService,
        selection: NewsSelection,
    ) -> Self {
        Self {
            weather,
            news,
            store,
            traffic,
            selection,
            refresh_counter: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn traffic(&self) -> &TrafficService {
        &self.traffic
    }

    pub async fn generate(
        &self,
        zone: &str,
        country: &str,
        current_hour: u32,
        seed: u64,
    ) -> Result<Briefing, EstimatorError> {
        // Reject a bad hour before touching any provider
        let forecast = self.traffic.forecast(zone, current_hour, seed)?;
        let zone = forecast.location.as_str();

        let ((weather, weather_error), (news, news_error)) =
            tokio::join!(self.fetch_weather(zone), self.fetch_news(country, zone));

        let tips = weather.as_ref().map(safety_tips).unwrap_or_default();
        let refresh_count = self.refresh_counter.fetch_add(1, Ordering::SeqCst) + 1;

        tracing::info!(
            "Generated briefing #{} for {} ({}), {}",
            refresh_count,
            zone,
            country,
            forecast.status.label()
        );

        Ok(Briefing {
            zone: zone.to_string(),
            corrected_from: forecast.corrected_from.clone(),
            country: country.to_string(),
            timestamp: Utc::now(),
            weather,
            weather_error,
            safety_tips: tips,
            news,
            news_error,
            gas_stations: GasStationOutlook::for_hour(current_hour),
            delivery_load: DeliveryLoad::estimate(zone, current_hour),
            traffic: forecast.snapshot(),
            refresh_count,
        })
    }

    pub async fn save(&self, briefing: &Briefing) -> anyhow::Result<BriefingRecord> {
        let record = briefing.to_record();
        self.store.save(&record).await?;
        Ok(record)
    }

    /// Weather for the zone, or the provider's message when unavailable.
    pub async fn fetch_weather(&self, zone: &str) -> (Option<Weather>, Option<String>) {
        match self.weather.current_weather(zone.trim()).await {
            Ok(weather) => (Some(weather), None),
            Err(e) => {
                tracing::warn!("Weather lookup failed for {}: {}", zone, e);
                (None, Some(e.to_string()))
            }
        }
    }

    /// Relevant headlines for the zone. When the provider cannot be reached
    /// the courier still gets the canned city items, and the provider's
    /// message is returned alongside.
    pub async fn fetch_news(&self, country: &str, zone: &str) -> (Vec<NewsItem>, Option<String>) {
        match self.news.headlines(country, zone.trim()).await {
            Ok(articles) => (
                select_relevant(articles, &self.selection.keywords, self.selection.max_items),
                None,
            ),
            Err(e) => {
                tracing::warn!("News lookup failed for {}, {}: {}. Using simulated news", zone, country, e);
                (NewsItem::simulated(zone.trim()), Some(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::{
        sample_weather, FakeNews, FakeWeather, RecordingStore,
    };
    use crate::application::provider_error::ProviderError;

    fn service(weather: FakeWeather, news: FakeNews, store: Arc<RecordingStore>) -> BriefingService {
        BriefingService::new(
            Arc::new(weather),
            Arc::new(news),
            store,
            TrafficService::default(),
            NewsSelection {
                keywords: vec!["traffic".to_string(), "strike".to_string()],
                max_items: 3,
            },
        )
    }

    #[tokio::test]
    async fn test_generate_full_briefing() {
        let store = Arc::new(RecordingStore::default());
        let svc = service(
            FakeWeather::ok(sample_weather("Light rain", 12.0)),
            FakeNews::ok(&["Metro strike on Friday", "Local team wins"]),
            store,
        );

        let briefing = svc.generate("Barcelona", "es", 8, 42).await.unwrap();
        assert_eq!(briefing.zone, "Barcelona");
        assert!(briefing.weather.is_some());
        assert!(briefing.weather_error.is_none());
        assert!(briefing.safety_tips[0].contains("slippery"));
        assert_eq!(briefing.news.len(), 1);
        assert_eq!(briefing.news[0].title, "Metro strike on Friday");
        assert!(briefing.news_error.is_none());
        assert!(briefing.corrected_from.is_none());
        assert_eq!(briefing.traffic.current_hour, 8);
        assert!(!briefing.traffic.optimal_windows.is_empty());
        assert_eq!(briefing.refresh_count, 1);
    }

    #[tokio::test]
    async fn test_provider_failures_degrade_gracefully() {
        let store = Arc::new(RecordingStore::default());
        let svc = service(
            FakeWeather::err(ProviderError::Unauthorized { provider: "OpenWeatherMap" }),
            FakeNews::err(ProviderError::RateLimited),
            store,
        );

        let briefing = svc.generate("Cuenca", "es", 13, 1).await.unwrap();
        assert!(briefing.weather.is_none());
        assert_eq!(
            briefing.weather_error.as_deref(),
            Some("API key error. Please check your OpenWeatherMap API key.")
        );
        assert!(briefing.safety_tips.is_empty());
        assert_eq!(
            briefing.news_error.as_deref(),
            Some("Too many requests. API rate limit exceeded.")
        );

        let record = briefing.to_record();
        assert!(record.weather.is_none());
        assert_eq!(record.news, NewsItem::simulated("Cuenca"));
    }

    #[tokio::test]
    async fn test_unavailable_news_falls_back_to_canned_items() {
        let svc = service(
            FakeWeather::ok(sample_weather("Clear", 20.0)),
            FakeNews::err(ProviderError::RateLimited),
            Arc::new(RecordingStore::default()),
        );

        let briefing = svc.generate("Barcelona", "es", 9, 1).await.unwrap();
        assert_eq!(briefing.news.len(), 4);
        assert!(briefing.news.iter().all(|item| item.title.contains("Barcelona")));
        assert_eq!(briefing.news[0].source, "Traffic Update");
        assert!(briefing.news_error.is_some());
        assert_eq!(briefing.to_record().news.len(), 4);
    }

    #[tokio::test]
    async fn test_misspelled_zone_is_corrected_before_lookups() {
        let weather = FakeWeather::ok(sample_weather("Clear", 20.0));
        let seen = weather.cities();
        let svc = service(weather, FakeNews::err(ProviderError::RateLimited), Arc::new(RecordingStore::default()));

        let briefing = svc.generate("Barcelna", "es", 9, 1).await.unwrap();
        assert_eq!(briefing.zone, "Barcelona");
        assert_eq!(briefing.corrected_from.as_deref(), Some("Barcelna"));
        assert_eq!(seen.lock().unwrap().as_slice(), ["Barcelona".to_string()]);
        assert!(briefing.news[0].title.contains("Barcelona"));
    }

    #[tokio::test]
    async fn test_invalid_hour_is_rejected() {
        let svc = service(
            FakeWeather::ok(sample_weather("Clear", 20.0)),
            FakeNews::ok(&[]),
            Arc::new(RecordingStore::default()),
        );
        assert!(svc.generate("Madrid", "es", 24, 1).await.is_err());
        let briefing = svc.generate("Madrid", "es", 23, 1).await.unwrap();
        assert_eq!(briefing.refresh_count, 1);
    }

    #[tokio::test]
    async fn test_refresh_counter_and_save() {
        let store = Arc::new(RecordingStore::default());
        let svc = service(
            FakeWeather::ok(sample_weather("Clear", 20.0)),
            FakeNews::ok(&["Road works downtown"]),
            store.clone(),
        );

        svc.generate("Madrid", "es", 9, 1).await.unwrap();
        let briefing = svc.clone().generate("Madrid", "es", 9, 1).await.unwrap();
        assert_eq!(briefing.refresh_count, 2);

        let record = svc.save(&briefing).await.unwrap();
        let saved = store.records();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0], record);
        assert_eq!(record.zone, "Madrid");
    }
}
