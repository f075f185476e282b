// City tier domain model - classification and base traffic profiles
use serde::Serialize;
use std::collections::HashMap;

pub const HOURS_PER_DAY: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CityTier {
    Major,
    Medium,
    Default,
}

/// Base traffic shape split into morning (0-8), midday (9-16) and evening (17-23).
#[derive(Debug, Clone, PartialEq)]
pub struct TierProfile {
    pub morning: [f64; 9],
    pub midday: [f64; 8],
    pub evening: [f64; 7],
}

const MAJOR_PROFILE: TierProfile = TierProfile {
    morning: [0.3, 0.4, 0.5, 0.7, 1.0, 1.5, 1.8, 2.0, 1.7],
    midday: [1.5, 1.3, 1.4, 1.6, 1.5, 1.4, 1.3, 1.5],
    evening: [1.7, 1.9, 1.8, 1.5, 1.3, 1.0, 0.7],
};

const MEDIUM_PROFILE: TierProfile = TierProfile {
    morning: [0.2, 0.3, 0.4, 0.6, 0.9, 1.3, 1.6, 1.8, 1.5],
    midday: [1.3, 1.1, 1.2, 1.4, 1.3, 1.2, 1.1, 1.3],
    evening: [1.5, 1.7, 1.6, 1.3, 1.1, 0.8, 0.5],
};

const DEFAULT_PROFILE: TierProfile = TierProfile {
    morning: [0.1, 0.2, 0.3, 0.5, 0.7, 1.0, 1.2, 1.3, 1.1],
    midday: [1.0, 0.9, 1.0, 1.1, 1.0, 0.9, 0.8, 1.0],
    evening: [1.2, 1.4, 1.3, 1.1, 0.9, 0.6, 0.3],
};

pub const DEFAULT_MAJOR_CITIES: [&str; 5] = ["Barcelona", "Madrid", "Valencia", "Bilbao", "Sevilla"];
pub const DEFAULT_MEDIUM_CITIES: [&str; 5] = ["Zaragoza", "Málaga", "Murcia", "Mallorca", "Alicante"];

impl CityTier {
    pub fn profile(&self) -> &'static TierProfile {
        match self {
            CityTier::Major => &MAJOR_PROFILE,
            CityTier::Medium => &MEDIUM_PROFILE,
            CityTier::Default => &DEFAULT_PROFILE,
        }
    }

    /// The 24 hourly base values, morning then midday then evening.
    pub fn base_values(&self) -> [f64; HOURS_PER_DAY] {
        let profile = self.profile();
        let mut values = [0.0; HOURS_PER_DAY];
        let segments = profile
            .morning
            .iter()
            .chain(profile.midday.iter())
            .chain(profile.evening.iter());
        for (slot, value) in values.iter_mut().zip(segments) {
            *slot = *value;
        }
        values
    }
}

/// Static lookup from normalized city name to tier.
#[derive(Debug, Clone)]
pub struct CityTierTable {
    entries: HashMap<String, CityTier>,
}

impl CityTierTable {
    pub fn new<M, N>(major: M, medium: N) -> Self
    where
        M: IntoIterator,
        M::Item: AsRef<str>,
        N: IntoIterator,
        N::Item: AsRef<str>,
    {
        let mut entries = HashMap::new();
        for name in medium {
            entries.insert(normalize(name.as_ref()), CityTier::Medium);
        }
        // Major wins when a city is listed twice
        for name in major {
            entries.insert(normalize(name.as_ref()), CityTier::Major);
        }
        Self { entries }
    }

    pub fn classify(&self, location: &str) -> CityTier {
        self.entries
            .get(&normalize(location))
            .copied()
            .unwrap_or(CityTier::Default)
    }
}

impl Default for CityTierTable {
    fn default() -> Self {
        Self::new(DEFAULT_MAJOR_CITIES, DEFAULT_MEDIUM_CITIES)
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
