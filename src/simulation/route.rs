//! Route definitions matching the backend data contract
//!
//! Routes are supplied by the external data layer as a JSON array and are
//! read-only to the tracker. Everything besides the path, stops, active-bus
//! count and color is opaque display data passed through to the UI.

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::types::{GeoPoint, DEFAULT_ACTIVE_BUSES, DEFAULT_ROUTE_COLOR};

/// A named stop along a route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stop {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lng: f64,
}

/// A bus route as supplied by the backend data layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteDefinition {
    pub id: String,
    pub route_number: String,
    pub route_name: String,
    #[serde(default)]
    pub start_point: String,
    #[serde(default)]
    pub end_point: String,
    /// Ordered geographic points approximating the route's road path.
    #[serde(default)]
    pub route_path: Vec<GeoPoint>,
    #[serde(default)]
    pub stops: Vec<Stop>,
    /// Desired simulated concurrency. Absent means [`DEFAULT_ACTIVE_BUSES`].
    #[serde(default)]
    pub active_buses: Option<u32>,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub fare: Option<String>,
    #[serde(default)]
    pub first_bus: Option<String>,
    #[serde(default)]
    pub last_bus: Option<String>,
}

fn default_color() -> String {
    DEFAULT_ROUTE_COLOR.to_string()
}

impl RouteDefinition {
    /// Number of buses to simulate for this route.
    pub fn effective_active_buses(&self) -> u32 {
        self.active_buses.unwrap_or(DEFAULT_ACTIVE_BUSES)
    }

    /// Whether the route has geometry to place buses on.
    pub fn has_path(&self) -> bool {
        !self.route_path.is_empty()
    }

    /// Path point at the midpoint index, used for selection recentering.
    pub fn midpoint(&self) -> Option<GeoPoint> {
        self.route_path.get(self.route_path.len() / 2).copied()
    }
}

/// Decode a JSON array of route definitions.
///
/// Each element is decoded independently; a malformed element is logged and
/// skipped so one bad route never hides the rest of the catalog.
pub fn routes_from_json(json: &str) -> Result<Vec<RouteDefinition>> {
    let raw: Vec<serde_json::Value> =
        serde_json::from_str(json).context("Route data is not a JSON array")?;

    let mut routes = Vec::with_capacity(raw.len());
    for value in raw {
        match serde_json::from_value::<RouteDefinition>(value) {
            Ok(route) => routes.push(route),
            Err(e) => warn!("Skipping malformed route: {}", e),
        }
    }
    Ok(routes)
}

/// Load route definitions from a JSON file.
pub fn load_routes(path: &Path) -> Result<Vec<RouteDefinition>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read route file {}", path.display()))?;
    routes_from_json(&json)
}

/// Built-in demo catalog so the tracker runs without external data.
///
/// Geometry loosely follows Vizianagaram, the demo deployment city.
pub fn demo_routes() -> Vec<RouteDefinition> {
    vec![
        demo_route(
            "route-101",
            "101",
            "Railway Station - RTC Complex",
            "#0ea5e9",
            Some(2),
            ("Every 15 mins", "Rs 10-25"),
            &[
                (18.0967, 83.3956),
                (18.1002, 83.4021),
                (18.1038, 83.4089),
                (18.1061, 83.4152),
                (18.1085, 83.4211),
                (18.1103, 83.4262),
                (18.1124, 83.4309),
            ],
            &[
                ("Railway Station", 18.0967, 83.3956),
                ("Ayyannapeta", 18.1038, 83.4089),
                ("Clock Tower", 18.1085, 83.4211),
                ("RTC Complex", 18.1124, 83.4309),
            ],
        ),
        demo_route(
            "route-205",
            "205",
            "Fort Junction - University",
            "#f59e0b",
            Some(3),
            ("Every 20 mins", "Rs 15-30"),
            &[
                (18.1180, 83.4125),
                (18.1159, 83.4188),
                (18.1141, 83.4248),
                (18.1122, 83.4304),
                (18.1097, 83.4367),
                (18.1070, 83.4428),
                (18.1049, 83.4481),
                (18.1031, 83.4536),
            ],
            &[
                ("Fort Junction", 18.1180, 83.4125),
                ("Gantyada Road", 18.1141, 83.4248),
                ("Town Kotha Road", 18.1097, 83.4367),
                ("University Gate", 18.1031, 83.4536),
            ],
        ),
        demo_route(
            "route-318",
            "318",
            "Bus Stand - Industrial Estate",
            "#10b981",
            Some(2),
            ("Every 30 mins", "Rs 10-20"),
            &[
                (18.1124, 83.4309),
                (18.1167, 83.4331),
                (18.1213, 83.4356),
                (18.1258, 83.4384),
                (18.1301, 83.4415),
                (18.1344, 83.4449),
            ],
            &[
                ("Bus Stand", 18.1124, 83.4309),
                ("Cantonment", 18.1213, 83.4356),
                ("Pedatadivada", 18.1301, 83.4415),
                ("Industrial Estate", 18.1344, 83.4449),
            ],
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn demo_route(
    id: &str,
    route_number: &str,
    route_name: &str,
    color: &str,
    active_buses: Option<u32>,
    (frequency, fare): (&str, &str),
    path: &[(f64, f64)],
    stops: &[(&str, f64, f64)],
) -> RouteDefinition {
    let (start_point, end_point) = match (stops.first(), stops.last()) {
        (Some(first), Some(last)) => (first.0.to_string(), last.0.to_string()),
        _ => (String::new(), String::new()),
    };

    RouteDefinition {
        id: id.to_string(),
        route_number: route_number.to_string(),
        route_name: route_name.to_string(),
        start_point,
        end_point,
        route_path: path.iter().map(|&(lat, lng)| GeoPoint::new(lat, lng)).collect(),
        stops: stops
            .iter()
            .map(|&(name, lat, lng)| Stop {
                name: name.to_string(),
                lat,
                lng,
            })
            .collect(),
        active_buses,
        color: color.to_string(),
        frequency: Some(frequency.to_string()),
        fare: Some(fare.to_string()),
        first_bus: Some("05:30".to_string()),
        last_bus: Some("22:00".to_string()),
    }
}
