// Application layer - Use cases and provider ports
pub mod briefing_service;
pub mod briefing_store;
pub mod news_provider;
pub mod provider_error;
pub mod route_service;
pub mod routing_provider;
pub mod streaming_service;
pub mod traffic_service;
pub mod weather_provider;

#[cfg(test)]
pub mod fakes;
