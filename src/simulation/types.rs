//! Core types for the transit tracker
//!
//! These are standalone types that don't depend on Bevy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Composite identity of a simulated bus: route number plus in-route slot.
///
/// Stable across ticks only while the route's active-bus count and path
/// length are unchanged. There is no cross-tick identity guarantee beyond
/// this key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BusSlot {
    pub route_number: String,
    pub index: u32,
}

impl BusSlot {
    pub fn new(route_number: String, index: u32) -> Self {
        Self {
            route_number,
            index,
        }
    }
}

impl fmt::Display for BusSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.route_number, self.index)
    }
}

/// Wall-clock period of the progress sawtooth in milliseconds.
pub const SAWTOOTH_PERIOD_MS: u64 = 10_000;

/// Divisor applied to the in-period time offset when computing progress.
pub const PROGRESS_DIVISOR_MS: f64 = 50_000.0;

/// Buses simulated for a route that doesn't configure a count.
pub const DEFAULT_ACTIVE_BUSES: u32 = 2;

/// Route color used when the data source doesn't provide one.
pub const DEFAULT_ROUTE_COLOR: &str = "#0ea5e9";

/// Next-stop label for routes without usable stop data.
pub const FALLBACK_NEXT_STOP: &str = "Next stop";
