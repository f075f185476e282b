// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::briefing_service::BriefingService;
use crate::application::route_service::RouteService;
use crate::application::streaming_service::StreamingBriefingService;
use crate::application::traffic_service::TrafficService;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::json_briefing_store::JsonBriefingStore;
use crate::infrastructure::newsapi_client::NewsApiClient;
use crate::infrastructure::openweather_client::OpenWeatherClient;
use crate::infrastructure::tomtom_client::TomTomClient;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_briefing, health_check, plan_route, save_briefing, stream_briefing, traffic_forecast,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config().context("Failed to load configuration")?;
    if config.api_keys.weather_api_key.is_empty() || config.api_keys.news_api_key.is_empty() {
        tracing::warn!("Weather or news API key missing; those sections will fall back to placeholders");
    }

    // Create provider adapters (infrastructure layer)
    let timeout = config.endpoints.timeout();
    let weather = Arc::new(OpenWeatherClient::new(
        config.endpoints.weather_base_url.clone(),
        config.api_keys.weather_api_key.clone(),
        timeout,
    )?);
    let news = Arc::new(NewsApiClient::new(
        config.endpoints.news_base_url.clone(),
        config.api_keys.news_api_key.clone(),
        timeout,
    )?);
    let routing = Arc::new(TomTomClient::new(
        config.endpoints.routing_base_url.clone(),
        config.api_keys.routing_api_key.clone(),
        timeout,
    )?);
    let store = Arc::new(JsonBriefingStore::new(&config.briefing.output_path));

    // Create services (application layer)
    let estimator = config.traffic.estimator().context("Invalid traffic settings")?;
    let traffic_service = TrafficService::new(
        estimator,
        config.traffic.policy(),
        config.zones.directory(&config.traffic),
    );
    let timezones = config.zones.timezone_table().context("Invalid timezone settings")?;
    let briefing_service = BriefingService::new(
        weather,
        news,
        store,
        traffic_service.clone(),
        config.news.selection(),
    );
    let streaming_service = StreamingBriefingService::new(briefing_service.clone());
    let route_service = RouteService::new(routing, config.routing.fallback_center());

    // Create application state
    let state = Arc::new(AppState {
        traffic_service,
        briefing_service,
        streaming_service,
        route_service,
        timezones,
        default_seed: config.traffic.default_seed,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/traffic/:location", get(traffic_forecast))
        .route("/briefings/:zone", get(get_briefing))
        .route("/briefings/:zone/stream", get(stream_briefing))
        .route("/briefings/:zone/save", post(save_briefing))
        .route("/routes", get(plan_route))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind_addr))?;
    tracing::info!("Starting courier-briefing service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
