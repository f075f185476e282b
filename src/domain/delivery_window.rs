// Delivery window domain model - low-traffic hour ranges
use super::traffic::TrafficSeries;
use serde::Serialize;
use std::fmt;

pub const DEFAULT_CUTOFF: f64 = 0.5;
pub const FALLBACK_QUANTILE: f64 = 0.25;

/// Inclusive hour range `[start_hour, end_hour]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeliveryWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl DeliveryWindow {
    pub fn new(start_hour: u32, end_hour: u32) -> Self {
        debug_assert!(start_hour <= end_hour);
        Self { start_hour, end_hour }
    }

    pub fn contains(&self, hour: u32) -> bool {
        (self.start_hour..=self.end_hour).contains(&hour)
    }
}

impl fmt::Display for DeliveryWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start_hour == self.end_hour {
            write!(f, "{}:00", self.start_hour)
        } else {
            write!(f, "{}:00-{}:00", self.start_hour, self.end_hour)
        }
    }
}

pub fn format_window(window: &DeliveryWindow) -> String {
    window.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdPolicy {
    Fixed(f64),
    /// Non-finite values fall back to the lowest quartile.
    Percentile(f64),
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        ThresholdPolicy::Fixed(DEFAULT_CUTOFF)
    }
}

/// Low-traffic hours grouped into contiguous windows, ordered by start hour.
///
/// `Fixed(cutoff)` keeps hours strictly below the cutoff. When none qualify,
/// or for `Percentile(q)`, hours at or below the interpolated quantile are
/// kept instead, so a non-empty series always yields at least one window.
pub fn derive_delivery_windows(series: &TrafficSeries, policy: ThresholdPolicy) -> Vec<DeliveryWindow> {
    let intensities: Vec<f64> = series.samples().iter().map(|s| s.intensity).collect();

    let mut selected: Vec<u32> = match policy {
        ThresholdPolicy::Fixed(cutoff) => series
            .samples()
            .iter()
            .filter(|s| s.intensity < cutoff)
            .map(|s| s.hour)
            .collect(),
        ThresholdPolicy::Percentile(_) => Vec::new(),
    };

    if selected.is_empty() {
        let quantile = match policy {
            ThresholdPolicy::Percentile(q) if q.is_finite() => q,
            _ => FALLBACK_QUANTILE,
        };
        if let Some(threshold) = percentile(&intensities, quantile) {
            tracing::debug!("Using percentile threshold {:.2} (q = {})", threshold, quantile);
            selected = series
                .samples()
                .iter()
                .filter(|s| s.intensity <= threshold)
                .map(|s| s.hour)
                .collect();
        }
    }

    merge_runs(&selected)
}

/// Collapse ascending hours into maximal runs of consecutive integers.
/// 23 and 0 are never joined.
fn merge_runs(hours: &[u32]) -> Vec<DeliveryWindow> {
    let mut windows: Vec<DeliveryWindow> = Vec::new();
    for &hour in hours {
        match windows.last_mut() {
            Some(last) if hour == last.end_hour + 1 => last.end_hour = hour,
            _ => windows.push(DeliveryWindow::new(hour, hour)),
        }
    }
    windows
}

/// Quantile with linear interpolation between closest ranks.
fn percentile(values: &[f64], quantile: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let position = quantile.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}
