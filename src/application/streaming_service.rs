// Streaming briefing service - Progressive loading, one event per section
use crate::application::briefing_service::BriefingService;
use crate::application::traffic_service::TrafficForecast;
use crate::domain::news::NewsItem;
use crate::domain::weather::{safety_tips, Weather};
use crate::domain::zone::{DeliveryLoad, GasStationOutlook};
use serde::Serialize;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

const CHANNEL_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Traffic,
    GasStations,
    DeliveryLoad,
    Weather,
    News,
}

pub const SECTIONS: [Section; 5] = [
    Section::Traffic,
    Section::GasStations,
    Section::DeliveryLoad,
    Section::Weather,
    Section::News,
];

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BriefingEvent {
    Skeleton {
        zone: String,
        corrected_from: Option<String>,
        country: String,
        sections: Vec<Section>,
    },
    Traffic {
        forecast: TrafficForecast,
    },
    GasStations {
        outlook: GasStationOutlook,
    },
    DeliveryLoad {
        load: DeliveryLoad,
    },
    Weather {
        weather: Option<Weather>,
        error: Option<String>,
        safety_tips: Vec<String>,
    },
    News {
        items: Vec<NewsItem>,
        error: Option<String>,
    },
    Error {
        message: String,
    },
    Complete {
        sections: usize,
        duration_ms: i64,
    },
}

#[derive(Clone)]
pub struct StreamingBriefingService {
    briefings: BriefingService,
}

impl StreamingBriefingService {
    pub fn new(briefings: BriefingService) -> Self {
        Self { briefings }
    }

    pub async fn stream_briefing(
        &self,
        zone: &str,
        country: &str,
        current_hour: u32,
        seed: u64,
    ) -> mpsc::Receiver<BriefingEvent> {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let start_time = Instant::now();
        let country = country.to_string();

        // 0. Validate up front so a bad hour ends the stream immediately
        let forecast = match self.briefings.traffic().forecast(zone, current_hour, seed) {
            Ok(forecast) => forecast,
            Err(e) => {
                tracing::debug!("Rejecting briefing stream for {}: {}", zone, e);
                let _ = tx.send(BriefingEvent::Error { message: e.to_string() }).await;
                let _ = tx
                    .send(BriefingEvent::Complete {
                        sections: 0,
                        duration_ms: start_time.elapsed().as_millis() as i64,
                    })
                    .await;
                return rx;
            }
        };

        let zone = forecast.location.clone();

        // 1. Skeleton
        let skeleton = BriefingEvent::Skeleton {
            zone: zone.clone(),
            corrected_from: forecast.corrected_from.clone(),
            country: country.clone(),
            sections: SECTIONS.to_vec(),
        };
        let _ = tx.send(skeleton).await;

        // 2. Local sections need no provider round-trip
        let _ = tx.send(BriefingEvent::Traffic { forecast }).await;
        let _ = tx
            .send(BriefingEvent::GasStations {
                outlook: GasStationOutlook::for_hour(current_hour),
            })
            .await;
        let _ = tx
            .send(BriefingEvent::DeliveryLoad {
                load: DeliveryLoad::estimate(&zone, current_hour),
            })
            .await;

        // 3. Provider-backed sections, each on its own task
        let mut tasks = JoinSet::new();

        {
            let tx = tx.clone();
            let briefings = self.briefings.clone();
            let zone = zone.clone();
            tasks.spawn(async move {
                let (weather, error) = briefings.fetch_weather(&zone).await;
                let tips = weather.as_ref().map(safety_tips).unwrap_or_default();
                let _ = tx
                    .send(BriefingEvent::Weather {
                        weather,
                        error,
                        safety_tips: tips,
                    })
                    .await;
            });
        }

        {
            let tx = tx.clone();
            let briefings = self.briefings.clone();
            let zone = zone.clone();
            let country = country.clone();
            tasks.spawn(async move {
                let (items, error) = briefings.fetch_news(&country, &zone).await;
                let _ = tx.send(BriefingEvent::News { items, error }).await;
            });
        }

        // 4. Completion once every section task has reported
        tokio::spawn(async move {
            while let Some(result) = tasks.join_next().await {
                if let Err(e) = result {
                    tracing::error!("Briefing section task failed: {}", e);
                }
            }

            let complete = BriefingEvent::Complete {
                sections: SECTIONS.len(),
                duration_ms: start_time.elapsed().as_millis() as i64,
            };
            let _ = tx.send(complete).await;
        });

        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::briefing_service::NewsSelection;
    use crate::application::fakes::{sample_weather, FakeNews, FakeWeather, RecordingStore};
    use crate::application::provider_error::ProviderError;
    use crate::application::traffic_service::TrafficService;
    use std::sync::Arc;

    fn streaming(weather: FakeWeather) -> StreamingBriefingService {
        let briefings = BriefingService::new(
            Arc::new(weather),
            Arc::new(FakeNews::ok(&["Traffic jam on the A-2"])),
            Arc::new(RecordingStore::default()),
            TrafficService::default(),
            NewsSelection {
                keywords: vec!["traffic".to_string()],
                max_items: 5,
            },
        );
        StreamingBriefingService::new(briefings)
    }

    async fn collect(mut rx: mpsc::Receiver<BriefingEvent>) -> Vec<BriefingEvent> {
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_stream_sends_skeleton_sections_and_completion() {
        let rx = streaming(FakeWeather::ok(sample_weather("Clear", 22.0)))
            .stream_briefing("Valencia", "es", 9, 42)
            .await;
        let events = collect(rx).await;

        assert!(matches!(events.first(), Some(BriefingEvent::Skeleton { .. })));
        assert!(matches!(
            events.last(),
            Some(BriefingEvent::Complete { sections: 5, .. })
        ));
        // skeleton + five sections + completion
        assert_eq!(events.len(), 7);
        assert!(events.iter().any(|e| matches!(e, BriefingEvent::News { error: None, .. })));
        assert!(events
            .iter()
            .any(|e| matches!(e, BriefingEvent::Weather { weather: Some(_), .. })));
    }

    #[tokio::test]
    async fn test_stream_reports_weather_error() {
        let rx = streaming(FakeWeather::err(ProviderError::NotFound(
            "City 'Atlantis' not found. Please check spelling.".to_string(),
        )))
        .stream_briefing("Atlantis", "es", 9, 42)
        .await;
        let events = collect(rx).await;

        let weather_error = events.iter().find_map(|e| match e {
            BriefingEvent::Weather { error, .. } => error.clone(),
            _ => None,
        });
        assert_eq!(
            weather_error.as_deref(),
            Some("City 'Atlantis' not found. Please check spelling.")
        );
    }

    #[tokio::test]
    async fn test_skeleton_reports_corrected_zone() {
        let rx = streaming(FakeWeather::ok(sample_weather("Clear", 22.0)))
            .stream_briefing("Valncia", "es", 9, 42)
            .await;
        let events = collect(rx).await;

        match &events[0] {
            BriefingEvent::Skeleton {
                zone, corrected_from, ..
            } => {
                assert_eq!(zone, "Valencia");
                assert_eq!(corrected_from.as_deref(), Some("Valncia"));
            }
            other => panic!("expected skeleton, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_hour_ends_stream() {
        let rx = streaming(FakeWeather::ok(sample_weather("Clear", 22.0)))
            .stream_briefing("Valencia", "es", 31, 42)
            .await;
        let events = collect(rx).await;

        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], BriefingEvent::Error { .. }));
        assert!(matches!(events[1], BriefingEvent::Complete { sections: 0, .. }));
    }

    #[test]
    fn test_event_serializes_with_type_tag() {
        let json = serde_json::to_value(BriefingEvent::Complete {
            sections: 5,
            duration_ms: 12,
        })
        .unwrap();
        assert_eq!(json["type"], "complete");
        assert_eq!(json["sections"], 5);
    }
}
