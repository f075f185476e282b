// Weather domain model and courier safety tips
use serde::Serialize;

pub const NO_CONCERNS_TIP: &str = "No specific weather-related safety concerns. Proceed normally.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Weather {
    pub description: String,
    pub temperature_celsius: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub icon: String,
    pub lat: f64,
    pub lon: f64,
}

/// Safety advice derived from current conditions. Only the first matching
/// sky condition contributes a tip; temperature adds at most one more.
pub fn safety_tips(weather: &Weather) -> Vec<String> {
    let description = weather.description.to_lowercase();
    let mut tips = Vec::new();

    if description.contains("rain") || description.contains("shower") {
        tips.push("Roads may be slippery. Maintain safe distance and reduce speed.");
    } else if description.contains("snow") {
        tips.push("Snow conditions reported. Use winter equipment and drive cautiously.");
    } else if description.contains("fog") {
        tips.push("Reduced visibility. Use fog lights and reduce speed.");
    } else if description.contains("storm") || description.contains("thunder") {
        tips.push("Stormy conditions. Seek shelter if lightning intensifies.");
    }

    if weather.temperature_celsius >= 30.0 {
        tips.push("High temperature. Stay hydrated and avoid prolonged sun exposure.");
    } else if weather.temperature_celsius <= 5.0 {
        tips.push("Cold temperature. Wear appropriate clothing and watch for ice.");
    }

    if tips.is_empty() {
        tips.push(NO_CONCERNS_TIP);
    }

    tips.into_iter().map(String::from).collect()
}
