// Briefing domain model
use super::delivery_window::{format_window, DeliveryWindow};
use super::news::NewsItem;
use super::traffic::TrafficLevel;
use super::weather::Weather;
use super::zone::{DeliveryLoad, GasStationOutlook};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficSnapshot {
    pub current_hour: u32,
    pub status: TrafficLevel,
    pub intensity: f64,
    pub in_delivery_window: bool,
    pub optimal_windows: Vec<String>,
}

impl TrafficSnapshot {
    pub fn new(current_hour: u32, intensity: f64, windows: &[DeliveryWindow]) -> Self {
        Self {
            current_hour,
            status: TrafficLevel::classify(intensity),
            intensity,
            in_delivery_window: windows.iter().any(|w| w.contains(current_hour)),
            optimal_windows: windows.iter().map(format_window).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Briefing {
    pub zone: String,
    pub corrected_from: Option<String>,
    pub country: String,
    pub timestamp: DateTime<Utc>,
    pub weather: Option<Weather>,
    pub weather_error: Option<String>,
    pub safety_tips: Vec<String>,
    pub news: Vec<NewsItem>,
    pub news_error: Option<String>,
    pub gas_stations: GasStationOutlook,
    pub delivery_load: DeliveryLoad,
    pub traffic: TrafficSnapshot,
    pub refresh_count: u64,
}

/// Persisted subset of a briefing. Weather is null when the lookup failed;
/// news always holds what the courier was shown, canned items included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BriefingRecord {
    pub zone: String,
    pub country: String,
    pub timestamp: DateTime<Utc>,
    pub weather: Option<Weather>,
    pub news: Vec<NewsItem>,
    pub gas_stations: GasStationOutlook,
    pub traffic: TrafficSnapshot,
}

impl Briefing {
    pub fn to_record(&self) -> BriefingRecord {
        BriefingRecord {
            zone: self.zone.clone(),
            country: self.country.clone(),
            timestamp: self.timestamp,
            weather: self.weather.clone(),
            news: self.news.clone(),
            gas_stations: self.gas_stations.clone(),
            traffic: self.traffic.clone(),
        }
    }
}
