// TomTom adapter for geocoding and traffic-aware routing
use crate::application::provider_error::{ProviderError, ProviderResult};
use crate::application::routing_provider::RoutingProvider;
use crate::domain::route::{Coordinates, Incident, NearbyResource, ResourceKind, RouteSummary, VehicleKind};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

const PROVIDER: &str = "TomTom";
const MAX_NEARBY: usize = 5;

#[derive(Debug, Clone)]
pub struct TomTomClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    position: Coordinates,
}

#[derive(Debug, Deserialize)]
struct PoiSearchResponse {
    #[serde(default)]
    results: Vec<PoiResult>,
}

#[derive(Debug, Deserialize)]
struct PoiResult {
    #[serde(default)]
    poi: Option<Poi>,
    position: Coordinates,
    #[serde(default)]
    dist: f64,
}

#[derive(Debug, Deserialize)]
struct Poi {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteResponse {
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Route {
    summary: Summary,
    #[serde(default)]
    legs: Vec<Leg>,
    #[serde(default)]
    guidance: Option<Guidance>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Summary {
    length_in_meters: f64,
    travel_time_in_seconds: f64,
    #[serde(default)]
    traffic_delay_in_seconds: f64,
}

#[derive(Debug, Deserialize)]
struct Leg {
    #[serde(default)]
    points: Vec<RoutePoint>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
struct RoutePoint {
    latitude: f64,
    longitude: f64,
}

impl From<RoutePoint> for Coordinates {
    fn from(point: RoutePoint) -> Self {
        Coordinates::new(point.latitude, point.longitude)
    }
}

#[derive(Debug, Deserialize)]
struct Guidance {
    #[serde(default)]
    instructions: Vec<Instruction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Instruction {
    #[serde(default)]
    message: String,
    #[serde(default)]
    road_numbers: Vec<String>,
    #[serde(default)]
    point: Option<RoutePoint>,
    #[serde(default)]
    travel_time_in_seconds: f64,
}

impl TomTomClient {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.trim().to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, params: &[(&str, &str)]) -> ProviderResult<T> {
        let response = self
            .client
            .get(url)
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| ProviderError::Network {
                provider: PROVIDER,
                message: e.to_string(),
            })?;

        match response.status() {
            StatusCode::OK => response.json::<T>().await.map_err(|e| ProviderError::Decode {
                provider: PROVIDER,
                message: e.to_string(),
            }),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(ProviderError::Unauthorized { provider: PROVIDER })
            }
            StatusCode::TOO_MANY_REQUESTS => Err(ProviderError::RateLimited),
            status => Err(ProviderError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
            }),
        }
    }

    fn into_summary(route: Route) -> RouteSummary {
        let polyline: Vec<Coordinates> = route
            .legs
            .into_iter()
            .flat_map(|leg| leg.points)
            .map(Coordinates::from)
            .collect();

        let incidents = route
            .guidance
            .map(|g| g.instructions)
            .unwrap_or_default()
            .into_iter()
            .filter(|i| i.message.to_lowercase().contains("incident"))
            .map(|i| Incident {
                kind: "INCIDENT".to_string(),
                location: format!("Near {}", i.road_numbers.first().map(String::as_str).unwrap_or("")),
                delay_min: seconds_to_minutes(i.travel_time_in_seconds),
                severity: "medium".to_string(),
                coordinates: i.point.map(Coordinates::from),
                description: i.message,
            })
            .collect();

        RouteSummary {
            distance_km: (route.summary.length_in_meters / 100.0).round() / 10.0,
            duration_min: seconds_to_minutes(route.summary.travel_time_in_seconds),
            traffic_delay_min: seconds_to_minutes(route.summary.traffic_delay_in_seconds),
            polyline,
            incidents,
        }
    }
}

fn seconds_to_minutes(seconds: f64) -> i64 {
    (seconds / 60.0).round() as i64
}

#[async_trait]
impl RoutingProvider for TomTomClient {
    async fn geocode(&self, address: &str) -> ProviderResult<Coordinates> {
        let url = format!(
            "{}/search/2/geocode/{}.json",
            self.base_url,
            urlencoding::encode(address.trim())
        );
        let response: GeocodeResponse = self.get_json(&url, &[]).await?;

        response
            .results
            .into_iter()
            .next()
            .map(|r| r.position)
            .ok_or_else(|| ProviderError::NotFound(format!("Could not geocode address: {}", address)))
    }

    async fn route(
        &self,
        start: Coordinates,
        end: Coordinates,
        vehicle: VehicleKind,
    ) -> ProviderResult<RouteSummary> {
        let url = format!(
            "{}/routing/1/calculateRoute/{},{}:{},{}/json",
            self.base_url, start.lat, start.lon, end.lat, end.lon
        );
        tracing::debug!("Requesting {} route {:?} -> {:?}", vehicle.routing_profile(), start, end);

        let response: RouteResponse = self
            .get_json(
                &url,
                &[
                    ("traffic", "true"),
                    ("travelMode", vehicle.routing_profile()),
                    ("instructionsType", "text"),
                ],
            )
            .await?;

        response
            .routes
            .into_iter()
            .next()
            .map(Self::into_summary)
            .ok_or_else(|| ProviderError::NotFound("No route found between the given points".to_string()))
    }

    async fn nearby(
        &self,
        center: Coordinates,
        kind: ResourceKind,
        radius_m: u32,
    ) -> ProviderResult<Vec<NearbyResource>> {
        let url = format!("{}/search/2/poiSearch/{}.json", self.base_url, kind.query());
        let (lat, lon, radius, limit) = (
            center.lat.to_string(),
            center.lon.to_string(),
            radius_m.to_string(),
            MAX_NEARBY.to_string(),
        );
        let response: PoiSearchResponse = self
            .get_json(
                &url,
                &[
                    ("lat", lat.as_str()),
                    ("lon", lon.as_str()),
                    ("radius", radius.as_str()),
                    ("categorySet", kind.category()),
                    ("limit", limit.as_str()),
                ],
            )
            .await?;

        Ok(response
            .results
            .into_iter()
            .take(MAX_NEARBY)
            .map(|result| NearbyResource {
                name: result
                    .poi
                    .and_then(|p| p.name)
                    .unwrap_or_else(|| "Unknown".to_string()),
                kind,
                coordinates: result.position,
                distance_km: (result.dist / 100.0).round() / 10.0,
                details: kind.default_details().to_string(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> TomTomClient {
        TomTomClient::new(server.uri(), "tt".to_string(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_geocode_encodes_address() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/2/geocode/Barcelona%20Airport.json"))
            .and(query_param("key", "tt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"position": {"lat": 41.2974, "lon": 2.0833}}]
            })))
            .mount(&server)
            .await;

        let coords = client(&server).geocode("Barcelona Airport").await.unwrap();
        assert_eq!(coords, Coordinates::new(41.2974, 2.0833));
    }

    #[tokio::test]
    async fn test_geocode_without_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .mount(&server)
            .await;

        let err = client(&server).geocode("zzz").await.unwrap_err();
        assert_eq!(err.to_string(), "Could not geocode address: zzz");
    }

    #[tokio::test]
    async fn test_route_summary_and_incidents() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/routing/1/calculateRoute/41.38,2.17:41.29,2.08/json"))
            .and(query_param("traffic", "true"))
            .and(query_param("travelMode", "truck"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "routes": [{
                    "summary": {
                        "lengthInMeters": 15730,
                        "travelTimeInSeconds": 1510,
                        "trafficDelayInSeconds": 420
                    },
                    "legs": [
                        {"points": [{"latitude": 41.38, "longitude": 2.17}, {"latitude": 41.33, "longitude": 2.12}]},
                        {"points": [{"latitude": 41.29, "longitude": 2.08}]}
                    ],
                    "guidance": {"instructions": [
                        {"message": "Turn left", "point": {"latitude": 41.37, "longitude": 2.16}},
                        {
                            "message": "Incident ahead: lane closed",
                            "roadNumbers": ["B-10"],
                            "point": {"latitude": 41.33, "longitude": 2.12},
                            "travelTimeInSeconds": 240
                        }
                    ]}
                }]
            })))
            .mount(&server)
            .await;

        let route = client(&server)
            .route(Coordinates::new(41.38, 2.17), Coordinates::new(41.29, 2.08), VehicleKind::Truck)
            .await
            .unwrap();

        assert_eq!(route.distance_km, 15.7);
        assert_eq!(route.duration_min, 25);
        assert_eq!(route.traffic_delay_min, 7);
        assert_eq!(route.polyline.len(), 3);
        assert_eq!(route.incidents.len(), 1);
        assert_eq!(route.incidents[0].location, "Near B-10");
        assert_eq!(route.incidents[0].delay_min, 4);
        assert_eq!(route.incidents[0].coordinates, Some(Coordinates::new(41.33, 2.12)));
    }

    #[tokio::test]
    async fn test_nearby_chargers() {
        let server = MockServer::start().await;
        let results: Vec<_> = (0..7)
            .map(|i| {
                json!({
                    "poi": {"name": format!("Charger {}", i)},
                    "position": {"lat": 41.39, "lon": 2.16},
                    "dist": 1240.0 + i as f64
                })
            })
            .collect();
        Mock::given(method("GET"))
            .and(path("/search/2/poiSearch/charging.json"))
            .and(query_param("key", "tt"))
            .and(query_param("categorySet", "7309"))
            .and(query_param("radius", "5000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": results })))
            .mount(&server)
            .await;

        let found = client(&server)
            .nearby(Coordinates::new(41.38, 2.17), ResourceKind::EvCharging, 5000)
            .await
            .unwrap();

        assert_eq!(found.len(), 5);
        assert_eq!(found[0].name, "Charger 0");
        assert_eq!(found[0].kind, ResourceKind::EvCharging);
        assert_eq!(found[0].distance_km, 1.2);
        assert_eq!(found[0].coordinates, Coordinates::new(41.39, 2.16));
    }

    #[tokio::test]
    async fn test_nearby_parking_without_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/2/poiSearch/parking.json"))
            .and(query_param("categorySet", "7600"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"position": {"lat": 41.3, "lon": 2.1}}]
            })))
            .mount(&server)
            .await;

        let found = client(&server)
            .nearby(Coordinates::new(41.3, 2.1), ResourceKind::Parking, 1000)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Unknown");
        assert_eq!(found[0].distance_km, 0.0);
        assert_eq!(found[0].details, "Multiple spots, €3.00/hour");
    }

    #[tokio::test]
    async fn test_nearby_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = client(&server)
            .nearby(Coordinates::new(41.3, 2.1), ResourceKind::Fuel, 5000)
            .await
            .unwrap_err();
        assert_eq!(err, ProviderError::RateLimited);
    }

    #[tokio::test]
    async fn test_route_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let err = client(&server)
            .route(Coordinates::new(0.0, 0.0), Coordinates::new(1.0, 1.0), VehicleKind::Car)
            .await
            .unwrap_err();
        assert_eq!(err, ProviderError::Unauthorized { provider: PROVIDER });
    }
}
