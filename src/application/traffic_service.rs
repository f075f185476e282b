// Traffic service - Use case for hourly forecasts and delivery windows
use crate::domain::briefing::TrafficSnapshot;
use crate::domain::city_name::{CityDirectory, ResolvedCity};
use crate::domain::city_tier::CityTier;
use crate::domain::delivery_window::{derive_delivery_windows, format_window, DeliveryWindow, ThresholdPolicy};
use crate::domain::error::EstimatorError;
use crate::domain::traffic::{TrafficEstimator, TrafficLevel, TrafficSeries};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TrafficForecast {
    pub location: String,
    pub corrected_from: Option<String>,
    pub tier: CityTier,
    pub current_hour: u32,
    pub status: TrafficLevel,
    pub peak_hour: Option<u32>,
    pub series: TrafficSeries,
    pub windows: Vec<DeliveryWindow>,
    pub window_labels: Vec<String>,
}

impl TrafficForecast {
    pub fn current_intensity(&self) -> f64 {
        self.series
            .get(self.current_hour)
            .map(|s| s.intensity)
            .unwrap_or_default()
    }

    pub fn snapshot(&self) -> TrafficSnapshot {
        TrafficSnapshot::new(self.current_hour, self.current_intensity(), &self.windows)
    }
}

#[derive(Debug, Clone)]
pub struct TrafficService {
    estimator: TrafficEstimator,
    policy: ThresholdPolicy,
    directory: CityDirectory,
}

impl TrafficService {
    pub fn new(estimator: TrafficEstimator, policy: ThresholdPolicy, directory: CityDirectory) -> Self {
        Self {
            estimator,
            policy,
            directory,
        }
    }

    /// Spelling-corrected zone name; every lookup keyed by city uses it.
    pub fn resolve(&self, location: &str) -> ResolvedCity {
        self.directory.resolve(location)
    }

    pub fn forecast(
        &self,
        location: &str,
        current_hour: u32,
        seed: u64,
    ) -> Result<TrafficForecast, EstimatorError> {
        self.forecast_with_policy(location, current_hour, seed, self.policy)
    }

    pub fn forecast_with_policy(
        &self,
        location: &str,
        current_hour: u32,
        seed: u64,
        policy: ThresholdPolicy,
    ) -> Result<TrafficForecast, EstimatorError> {
        let resolved = self.resolve(location);
        let series = self.estimator.build_traffic_series(&resolved.name, current_hour, seed)?;
        let windows = derive_delivery_windows(&series, policy);
        let status = TrafficLevel::classify(series.current().map(|s| s.intensity).unwrap_or_default());

        Ok(TrafficForecast {
            tier: self.estimator.classify(&resolved.name),
            location: resolved.name,
            corrected_from: resolved.corrected_from,
            current_hour,
            status,
            peak_hour: series.peak_hour(),
            window_labels: windows.iter().map(format_window).collect(),
            series,
            windows,
        })
    }
}

impl Default for TrafficService {
    fn default() -> Self {
        Self::new(
            TrafficEstimator::default(),
            ThresholdPolicy::default(),
            CityDirectory::default(),
        )
    }
}
