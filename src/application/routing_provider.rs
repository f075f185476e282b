// Port for geocoding, traffic-aware routing and POI search
use crate::application::provider_error::ProviderResult;
use crate::domain::route::{Coordinates, NearbyResource, ResourceKind, RouteSummary, VehicleKind};
use async_trait::async_trait;

#[async_trait]
pub trait RoutingProvider: Send + Sync {
    /// Resolve a free-form address to coordinates
    async fn geocode(&self, address: &str) -> ProviderResult<Coordinates>;

    /// Route between two points including live traffic delay.
    ///
    /// Incidents are only those the provider reports; synthesizing a
    /// congestion marker is left to the caller.
    async fn route(
        &self,
        start: Coordinates,
        end: Coordinates,
        vehicle: VehicleKind,
    ) -> ProviderResult<RouteSummary>;

    /// Points of interest of `kind` within `radius_m` metres of `center`,
    /// closest first and at most five.
    ///
    /// An empty result is not an error; callers decide whether to fall back
    /// to stand-in stops.
    async fn nearby(
        &self,
        center: Coordinates,
        kind: ResourceKind,
        radius_m: u32,
    ) -> ProviderResult<Vec<NearbyResource>>;
}
