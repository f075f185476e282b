// Route service - Use case for planning a delivery route
use crate::application::routing_provider::RoutingProvider;
use crate::domain::route::{midpoint, Coordinates, NearbyResource, ResourceKind, RouteSummary, VehicleKind};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub origin: Coordinates,
    pub destination: Coordinates,
    pub vehicle: VehicleKind,
    pub route: RouteSummary,
    /// True when the route is a stand-in because routing failed.
    pub simulated: bool,
    /// Fuel or charging stops around the route midpoint.
    pub refuel_stops: Vec<NearbyResource>,
    pub parking: Vec<NearbyResource>,
    pub warnings: Vec<String>,
}

#[derive(Clone)]
pub struct RouteService {
    routing: Arc<dyn RoutingProvider>,
    fallback_center: Coordinates,
}

impl RouteService {
    pub fn new(routing: Arc<dyn RoutingProvider>, fallback_center: Coordinates) -> Self {
        Self {
            routing,
            fallback_center,
        }
    }

    pub async fn plan(&self, from: &str, to: &str, vehicle: VehicleKind) -> RoutePlan {
        let mut warnings = Vec::new();

        let (origin, destination) = tokio::join!(self.locate(from), self.locate(to));
        let origin = origin.unwrap_or_else(|w| {
            warnings.push(w);
            self.fallback_center
        });
        let destination = destination.unwrap_or_else(|w| {
            warnings.push(w);
            self.fallback_center
        });

        let refuel_kind = ResourceKind::for_vehicle(vehicle);
        let (route, refuel, parking) = tokio::join!(
            self.routing.route(origin, destination, vehicle),
            self.find_nearby(midpoint(origin, destination), refuel_kind),
            self.find_nearby(destination, ResourceKind::Parking),
        );

        let (route, simulated) = match route {
            Ok(route) => (route.with_congestion_fallback(), false),
            Err(e) => {
                tracing::warn!("Routing failed from {} to {}: {}", from, to, e);
                warnings.push(e.to_string());
                (RouteSummary::simulated(origin, destination), true)
            }
        };

        let (refuel_stops, refuel_warning) = refuel;
        let (parking, parking_warning) = parking;
        warnings.extend(refuel_warning);
        warnings.extend(parking_warning);

        RoutePlan {
            origin,
            destination,
            vehicle,
            route,
            simulated,
            refuel_stops,
            parking,
            warnings,
        }
    }

    /// Provider results, or stand-in stops when the search fails or comes
    /// back empty. A failure message is returned alongside.
    async fn find_nearby(
        &self,
        center: Coordinates,
        kind: ResourceKind,
    ) -> (Vec<NearbyResource>, Option<String>) {
        match self.routing.nearby(center, kind, kind.default_radius_m()).await {
            Ok(found) if !found.is_empty() => (found, None),
            Ok(_) => (kind.simulated(center), None),
            Err(e) => {
                tracing::warn!("Nearby {} search failed: {}", kind.query(), e);
                (kind.simulated(center), Some(e.to_string()))
            }
        }
    }

    async fn locate(&self, address: &str) -> Result<Coordinates, String> {
        self.routing.geocode(address).await.map_err(|e| {
            tracing::warn!("Geocoding failed for {}: {}", address, e);
            e.to_string()
        })
    }
}
