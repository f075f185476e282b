// Application state for HTTP handlers
use crate::application::briefing_service::BriefingService;
use crate::application::route_service::RouteService;
use crate::application::streaming_service::StreamingBriefingService;
use crate::application::traffic_service::TrafficService;
use crate::domain::local_time::TimezoneTable;

#[derive(Clone)]
pub struct AppState {
    pub traffic_service: TrafficService,
    pub briefing_service: BriefingService,
    pub streaming_service: StreamingBriefingService,
    pub route_service: RouteService,
    pub timezones: TimezoneTable,
    pub default_seed: u64,
}

impl AppState {
    /// Current hour in the zone's own timezone, after spelling correction.
    pub fn local_hour(&self, zone: &str) -> u32 {
        let resolved = self.traffic_service.resolve(zone);
        self.timezones.current_hour(&resolved.name)
    }
}
