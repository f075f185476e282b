// Infrastructure layer - External dependencies and adapters
pub mod chunked_json;
pub mod config;
pub mod http_response;
pub mod json_briefing_store;
pub mod newsapi_client;
pub mod openweather_client;
pub mod tomtom_client;
