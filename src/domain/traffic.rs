// Traffic domain models and the synthetic traffic series estimator
use super::city_tier::{CityTier, CityTierTable, HOURS_PER_DAY};
use super::error::EstimatorError;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use serde::Serialize;

pub const DEFAULT_NOISE_STD_DEV: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrafficSample {
    pub hour: u32,
    pub intensity: f64,
    pub is_current: bool,
}

/// Exactly 24 samples, one per hour, in ascending hour order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficSeries {
    samples: Vec<TrafficSample>,
}

impl TrafficSeries {
    pub fn from_intensities(intensities: [f64; HOURS_PER_DAY], current_hour: Option<u32>) -> Self {
        let samples = intensities
            .iter()
            .enumerate()
            .map(|(hour, intensity)| TrafficSample {
                hour: hour as u32,
                intensity: *intensity,
                is_current: current_hour == Some(hour as u32),
            })
            .collect();
        Self { samples }
    }

    pub fn samples(&self) -> &[TrafficSample] {
        &self.samples
    }

    pub fn get(&self, hour: u32) -> Option<&TrafficSample> {
        self.samples.get(hour as usize)
    }

    pub fn current(&self) -> Option<&TrafficSample> {
        self.samples.iter().find(|s| s.is_current)
    }

    /// First hour holding the maximum intensity.
    pub fn peak_hour(&self) -> Option<u32> {
        self.samples
            .iter()
            .fold(None::<&TrafficSample>, |best, s| match best {
                Some(b) if b.intensity >= s.intensity => Some(b),
                _ => Some(s),
            })
            .map(|s| s.hour)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrafficLevel {
    Light,
    Moderate,
    Heavy,
}

impl TrafficLevel {
    pub fn classify(intensity: f64) -> Self {
        if intensity > 0.7 {
            TrafficLevel::Heavy
        } else if intensity > 0.4 {
            TrafficLevel::Moderate
        } else {
            TrafficLevel::Light
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrafficLevel::Light => "Light traffic",
            TrafficLevel::Moderate => "Moderate traffic",
            TrafficLevel::Heavy => "Heavy traffic",
        }
    }
}

/// Synthesizes hourly traffic curves from tier profiles with seeded noise.
///
/// Each of the 24 base values is scaled by an independent draw from
/// Normal(1.0, `noise_std_dev`), clamped at zero, then the whole day is
/// divided by its maximum and rounded to one decimal. The busiest hour is
/// therefore always 1.0, and the same location, hour and seed always give
/// the same series.
#[derive(Debug, Clone)]
pub struct TrafficEstimator {
    tiers: CityTierTable,
    noise_std_dev: f64,
}

impl TrafficEstimator {
    pub fn new(tiers: CityTierTable, noise_std_dev: f64) -> Result<Self, EstimatorError> {
        noise(noise_std_dev)?;
        Ok(Self { tiers, noise_std_dev })
    }

    pub fn classify(&self, location: &str) -> CityTier {
        self.tiers.classify(location)
    }

    pub fn build_traffic_series(
        &self,
        location: &str,
        current_hour: u32,
        random_seed: u64,
    ) -> Result<TrafficSeries, EstimatorError> {
        if current_hour as usize >= HOURS_PER_DAY {
            return Err(EstimatorError::invalid("current_hour", current_hour));
        }

        let tier = self.classify(location);
        let noise = noise(self.noise_std_dev)?;
        let mut rng = StdRng::seed_from_u64(random_seed);

        let mut levels = tier.base_values();
        for level in levels.iter_mut() {
            let factor = noise.sample(&mut rng);
            *level = (*level * factor).max(0.0);
        }

        let max_level = levels.iter().copied().fold(0.0_f64, f64::max);
        for level in levels.iter_mut() {
            *level = if max_level > 0.0 {
                round_one_decimal(*level / max_level)
            } else {
                0.0
            };
        }

        tracing::debug!(
            "Built traffic series for {} (tier {:?}, seed {})",
            location.trim(),
            tier,
            random_seed
        );

        Ok(TrafficSeries::from_intensities(levels, Some(current_hour)))
    }
}

impl Default for TrafficEstimator {
    fn default() -> Self {
        Self {
            tiers: CityTierTable::default(),
            noise_std_dev: DEFAULT_NOISE_STD_DEV,
        }
    }
}

/// Multiplicative noise centred on 1.0.
fn noise(std_dev: f64) -> Result<Normal<f64>, EstimatorError> {
    Normal::new(1.0, std_dev).map_err(|_| EstimatorError::invalid("noise_std_dev", std_dev))
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
