// Route domain models
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleKind {
    #[default]
    Car,
    ElectricVehicle,
    Truck,
    Motorcycle,
}

impl VehicleKind {
    /// Vehicle profile understood by the routing provider.
    pub fn routing_profile(&self) -> &'static str {
        match self {
            VehicleKind::Car | VehicleKind::ElectricVehicle => "car",
            VehicleKind::Truck => "truck",
            VehicleKind::Motorcycle => "motorcycle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Incident {
    pub kind: String,
    pub description: String,
    pub location: String,
    pub delay_min: i64,
    pub severity: String,
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub distance_km: f64,
    pub duration_min: i64,
    pub traffic_delay_min: i64,
    pub polyline: Vec<Coordinates>,
    pub incidents: Vec<Incident>,
}

impl RouteSummary {
    /// When the provider reports a delay but no incident, mark congestion a
    /// third of the way along the route.
    pub fn with_congestion_fallback(mut self) -> Self {
        if self.incidents.is_empty() && self.traffic_delay_min > 0 {
            let index = self.polyline.len() / 3;
            let coordinates = self.polyline.get(index).or(self.polyline.first()).copied();
            let severity = if self.traffic_delay_min > 5 { "medium" } else { "low" };
            self.incidents.push(Incident {
                kind: "CONGESTION".to_string(),
                description: "Heavy traffic detected".to_string(),
                location: "Along route".to_string(),
                delay_min: self.traffic_delay_min,
                severity: severity.to_string(),
                coordinates,
            });
        }
        self
    }

    /// Stand-in route used when the routing provider is unavailable.
    pub fn simulated(start: Coordinates, end: Coordinates) -> Self {
        Self {
            distance_km: 15.7,
            duration_min: 25,
            traffic_delay_min: 5,
            polyline: vec![start, end],
            incidents: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Fuel,
    EvCharging,
    Parking,
}

impl ResourceKind {
    /// Refuelling stops depend on what the courier drives.
    pub fn for_vehicle(vehicle: VehicleKind) -> Self {
        match vehicle {
            VehicleKind::ElectricVehicle => ResourceKind::EvCharging,
            _ => ResourceKind::Fuel,
        }
    }

    /// POI category set understood by the search provider.
    pub fn category(&self) -> &'static str {
        match self {
            ResourceKind::Fuel => "7311",
            ResourceKind::EvCharging => "7309",
            ResourceKind::Parking => "7600",
        }
    }

    pub fn query(&self) -> &'static str {
        match self {
            ResourceKind::Fuel => "fuel",
            ResourceKind::EvCharging => "charging",
            ResourceKind::Parking => "parking",
        }
    }

    pub fn default_radius_m(&self) -> u32 {
        match self {
            ResourceKind::Fuel | ResourceKind::EvCharging => 5000,
            ResourceKind::Parking => 1000,
        }
    }

    pub fn default_details(&self) -> &'static str {
        match self {
            ResourceKind::Fuel => "€1.45/L",
            ResourceKind::EvCharging => "50 kW, available",
            ResourceKind::Parking => "Multiple spots, €3.00/hour",
        }
    }

    /// Stand-in stops around `center` when the search provider has nothing.
    pub fn simulated(&self, center: Coordinates) -> Vec<NearbyResource> {
        let offset = match self {
            ResourceKind::Parking => 0.001,
            _ => 0.01,
        };
        let near = Coordinates::new(center.lat + offset, center.lon + offset);
        let far = Coordinates::new(center.lat - offset, center.lon - offset);

        let entries = match self {
            ResourceKind::Fuel => [
                ("Shell Station", near, 0.5, "€1.45/L"),
                ("BP Gas", far, 0.3, "€1.42/L"),
            ],
            ResourceKind::EvCharging => [
                ("Fast Charger Station", near, 0.5, "150 kW, available"),
                ("Mall Parking Charger", far, 0.3, "50 kW, available"),
            ],
            ResourceKind::Parking => [
                ("Street Parking", near, 0.1, "3 spots, €2.50/hour"),
                ("Public Garage", far, 0.1, "Multiple spots, €3.00/hour"),
            ],
        };

        entries
            .into_iter()
            .map(|(name, coordinates, distance_km, details)| NearbyResource {
                name: name.to_string(),
                kind: *self,
                coordinates,
                distance_km,
                details: details.to_string(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyResource {
    pub name: String,
    pub kind: ResourceKind,
    pub coordinates: Coordinates,
    pub distance_km: f64,
    pub details: String,
}

/// Midpoint of the straight line between two points.
pub fn midpoint(a: Coordinates, b: Coordinates) -> Coordinates {
    Coordinates::new((a.lat + b.lat) / 2.0, (a.lon + b.lon) / 2.0)
}
