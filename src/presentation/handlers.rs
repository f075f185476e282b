// HTTP request handlers
use crate::domain::delivery_window::ThresholdPolicy;
use crate::domain::route::VehicleKind;
use crate::infrastructure::chunked_json::stream_from_receiver;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

const DEFAULT_COUNTRY: &str = "es";

#[derive(Deserialize)]
pub struct TrafficQuery {
    pub hour: Option<u32>,
    pub seed: Option<u64>,
    pub cutoff: Option<f64>,
    pub percentile: Option<f64>,
}

#[derive(Deserialize)]
pub struct BriefingQuery {
    pub country: Option<String>,
    pub hour: Option<u32>,
    pub seed: Option<u64>,
}

#[derive(Deserialize)]
pub struct RouteQuery {
    pub from: String,
    pub to: String,
    pub vehicle: Option<VehicleKind>,
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

fn into_response(result: Result<Response, StatusCode>) -> Response {
    match result {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Hourly traffic forecast and delivery windows for a location
pub async fn traffic_forecast(
    Path(location): Path<String>,
    Query(query): Query<TrafficQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let hour = query.hour.unwrap_or_else(|| state.local_hour(&location));
    let seed = query.seed.unwrap_or(state.default_seed);

    let policy = match (query.percentile, query.cutoff) {
        (Some(q), _) => Some(ThresholdPolicy::Percentile(q)),
        (None, Some(cutoff)) => Some(ThresholdPolicy::Fixed(cutoff)),
        (None, None) => None,
    };
    let result = match policy {
        Some(policy) => state
            .traffic_service
            .forecast_with_policy(&location, hour, seed, policy),
        None => state.traffic_service.forecast(&location, hour, seed),
    };

    match result {
        Ok(forecast) => into_response(json_response(&forecast, accepts_brotli(&headers)).await),
        Err(e) => bad_request(e.to_string()),
    }
}

/// Full briefing for a delivery zone
pub async fn get_briefing(
    Path(zone): Path<String>,
    Query(query): Query<BriefingQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let country = query.country.unwrap_or_else(|| DEFAULT_COUNTRY.to_string());
    let hour = query.hour.unwrap_or_else(|| state.local_hour(&zone));
    let seed = query.seed.unwrap_or(state.default_seed);

    match state.briefing_service.generate(&zone, &country, hour, seed).await {
        Ok(briefing) => into_response(json_response(&briefing, accepts_brotli(&headers)).await),
        Err(e) => bad_request(e.to_string()),
    }
}

/// Stream a briefing section by section (progressive loading)
pub async fn stream_briefing(
    Path(zone): Path<String>,
    Query(query): Query<BriefingQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let country = query.country.unwrap_or_else(|| DEFAULT_COUNTRY.to_string());
    let hour = query.hour.unwrap_or_else(|| state.local_hour(&zone));
    let seed = query.seed.unwrap_or(state.default_seed);

    let rx = state
        .streaming_service
        .stream_briefing(&zone, &country, hour, seed)
        .await;
    stream_from_receiver(rx, accepts_brotli(&headers)).await
}

/// Generate a briefing and persist it as the latest one
pub async fn save_briefing(
    Path(zone): Path<String>,
    Query(query): Query<BriefingQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let country = query.country.unwrap_or_else(|| DEFAULT_COUNTRY.to_string());
    let hour = query.hour.unwrap_or_else(|| state.local_hour(&zone));
    let seed = query.seed.unwrap_or(state.default_seed);

    let briefing = match state.briefing_service.generate(&zone, &country, hour, seed).await {
        Ok(briefing) => briefing,
        Err(e) => return bad_request(e.to_string()),
    };

    match state.briefing_service.save(&briefing).await {
        Ok(record) => Json(record).into_response(),
        Err(e) => {
            tracing::error!("Error saving briefing for {}: {:#}", zone, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Error saving briefing" })),
            )
                .into_response()
        }
    }
}

/// Plan a route between two addresses
pub async fn plan_route(
    Query(query): Query<RouteQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let vehicle = query.vehicle.unwrap_or_default();
    let plan = state.route_service.plan(&query.from, &query.to, vehicle).await;
    into_response(json_response(&plan, accepts_brotli(&headers)).await)
}
