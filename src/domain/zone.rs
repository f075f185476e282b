// Zone heuristics - gas station availability and delivery load by hour
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Level {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GasStationOutlook {
    pub level: Level,
    pub details: String,
}

impl GasStationOutlook {
    pub fn for_hour(hour: u32) -> Self {
        let (level, details) = match hour {
            7..=10 => (Level::High, "5+ gas stations open within 3km radius"),
            17..=20 => (Level::Medium, "3-4 gas stations open within 3km radius"),
            22..=23 | 0..=6 => (Level::Low, "Limited gas stations open for 24h service"),
            _ => (Level::Medium, "Normal gas station operations in your area"),
        };
        Self {
            level,
            details: details.to_string(),
        }
    }
}

/// Inclusive hour ranges when a city sees its delivery peaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadPattern {
    pub morning: (u32, u32),
    pub lunch: (u32, u32),
    pub evening: (u32, u32),
}

const DEFAULT_PATTERN: LoadPattern = LoadPattern {
    morning: (8, 11),
    lunch: (12, 15),
    evening: (18, 21),
};

impl LoadPattern {
    pub fn for_city(city: &str) -> Self {
        match city.trim().to_lowercase().as_str() {
            "barcelona" => LoadPattern {
                morning: (9, 11),
                lunch: (12, 15),
                evening: (18, 21),
            },
            "madrid" => LoadPattern {
                morning: (8, 11),
                lunch: (13, 16),
                evening: (19, 22),
            },
            _ => DEFAULT_PATTERN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryLoad {
    pub level: Level,
    pub details: String,
}

impl DeliveryLoad {
    pub fn estimate(city: &str, hour: u32) -> Self {
        let pattern = LoadPattern::for_city(city);
        let within = |(start, end): (u32, u32)| (start..=end).contains(&hour);

        let (level, details) = if within(pattern.lunch) {
            let (start, end) = pattern.lunch;
            (
                Level::High,
                format!("{} deliveries scheduled between {}:00 - {}:00", 10 + hour - start, start, end),
            )
        } else if within(pattern.evening) {
            let (start, end) = pattern.evening;
            (
                Level::Medium,
                format!("5-10 deliveries scheduled between {}:00 - {}:00", start, end),
            )
        } else if within(pattern.morning) {
            let (start, end) = pattern.morning;
            (
                Level::Medium,
                format!("5-8 deliveries scheduled between {}:00 - {}:00", start, end),
            )
        } else {
            (Level::Low, "Less than 5 deliveries expected in the next hour".to_string())
        };

        Self { level, details }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gas_station_outlook_by_hour() {
        assert_eq!(GasStationOutlook::for_hour(8).level, Level::High);
        assert_eq!(GasStationOutlook::for_hour(18).level, Level::Medium);
        assert_eq!(GasStationOutlook::for_hour(23).level, Level::Low);
        assert_eq!(GasStationOutlook::for_hour(3).level, Level::Low);
        let midday = GasStationOutlook::for_hour(13);
        assert_eq!(midday.level, Level::Medium);
        assert_eq!(midday.details, "Normal gas station operations in your area");
        assert_eq!(GasStationOutlook::for_hour(21).level, Level::Medium);
    }

    #[test]
    fn test_lunch_peak_counts_deliveries() {
        let load = DeliveryLoad::estimate("Barcelona", 14);
        assert_eq!(load.level, Level::High);
        assert_eq!(load.details, "12 deliveries scheduled between 12:00 - 15:00");
    }

    #[test]
    fn test_city_patterns_differ() {
        // Madrid lunches later, so 12:00 falls between its peaks
        assert_eq!(DeliveryLoad::estimate("barcelona", 12).level, Level::High);
        assert_eq!(DeliveryLoad::estimate(" Madrid ", 12).level, Level::Low);
        let madrid = DeliveryLoad::estimate("Madrid", 11);
        assert_eq!(madrid.level, Level::Medium);
        assert!(madrid.details.starts_with("5-8"));
        assert_eq!(DeliveryLoad::estimate("Madrid", 22).level, Level::Medium);
    }

    #[test]
    fn test_quiet_hours() {
        let load = DeliveryLoad::estimate("Sevilla", 4);
        assert_eq!(load.level, Level::Low);
        assert_eq!(load.details, "Less than 5 deliveries expected in the next hour");
    }
}
