// Local time per delivery zone
use super::error::EstimatorError;
use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use std::collections::HashMap;

pub const DEFAULT_TIMEZONE: &str = "UTC";

pub const DEFAULT_CITY_TIMEZONES: [(&str, &str); 17] = [
    ("barcelona", "Europe/Madrid"),
    ("madrid", "Europe/Madrid"),
    ("valencia", "Europe/Madrid"),
    ("sevilla", "Europe/Madrid"),
    ("bilbao", "Europe/Madrid"),
    ("zaragoza", "Europe/Madrid"),
    ("málaga", "Europe/Madrid"),
    ("murcia", "Europe/Madrid"),
    ("mallorca", "Europe/Madrid"),
    ("palma", "Europe/Madrid"),
    ("alicante", "Europe/Madrid"),
    ("new york", "America/New_York"),
    ("london", "Europe/London"),
    ("paris", "Europe/Paris"),
    ("rome", "Europe/Rome"),
    ("berlin", "Europe/Berlin"),
    ("lisboa", "Europe/Lisbon"),
];

#[derive(Debug, Clone)]
pub struct TimezoneTable {
    zones: HashMap<String, Tz>,
    fallback: Tz,
}

impl TimezoneTable {
    /// Build from `(city, IANA name)` pairs. Unknown zone names are rejected.
    pub fn new<I, K, V>(entries: I, fallback: &str) -> Result<Self, EstimatorError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut zones = HashMap::new();
        for (city, name) in entries {
            zones.insert(city.as_ref().trim().to_lowercase(), parse_tz(name.as_ref())?);
        }
        Ok(Self {
            zones,
            fallback: parse_tz(fallback)?,
        })
    }

    pub fn timezone(&self, city: &str) -> Tz {
        self.zones
            .get(&city.trim().to_lowercase())
            .copied()
            .unwrap_or(self.fallback)
    }

    pub fn hour_at(&self, city: &str, instant: DateTime<Utc>) -> u32 {
        instant.with_timezone(&self.timezone(city)).hour()
    }

    pub fn current_hour(&self, city: &str) -> u32 {
        self.hour_at(city, Utc::now())
    }
}

impl Default for TimezoneTable {
    fn default() -> Self {
        let zones = DEFAULT_CITY_TIMEZONES
            .iter()
            .filter_map(|(city, name)| name.parse::<Tz>().ok().map(|tz| (city.to_string(), tz)))
            .collect();
        Self {
            zones,
            fallback: Tz::UTC,
        }
    }
}

fn parse_tz(name: &str) -> Result<Tz, EstimatorError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| EstimatorError::invalid("timezone", name))
}
