//! Live position simulation
//!
//! This is a display oracle, not a physics model: every tick recomputes the
//! full bus set from scratch as a function of wall-clock time and route
//! geometry. Nothing persists between ticks, so consecutive snapshots may
//! show a visible jump when a path is short relative to the tick interval.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::route::RouteDefinition;
use super::types::{BusSlot, GeoPoint, FALLBACK_NEXT_STOP, PROGRESS_DIVISOR_MS, SAWTOOTH_PERIOD_MS};

/// ETA range in minutes for the placeholder telemetry.
const ETA_MINUTES_MIN: u32 = 2;
const ETA_MINUTES_MAX: u32 = 11;

/// Passenger count range for the placeholder telemetry.
const PASSENGERS_MIN: u32 = 10;
const PASSENGERS_MAX: u32 = 49;

/// A bus derived for the current tick.
///
/// Created fresh every tick, never mutated, replaced wholesale on the next
/// tick.
#[derive(Debug, Clone)]
pub struct SimulatedBus {
    pub slot: BusSlot,
    pub route_name: String,
    pub color: String,
    pub position: GeoPoint,
    pub path_index: usize,
    pub next_stop: String,
    /// Placeholder figure regenerated every tick, pending real telemetry.
    pub eta_minutes: u32,
    /// Placeholder figure regenerated every tick, pending real telemetry.
    pub passengers: u32,
}

impl SimulatedBus {
    pub fn route_number(&self) -> &str {
        &self.slot.route_number
    }

    /// Display id, e.g. `101-0`.
    pub fn id(&self) -> String {
        self.slot.to_string()
    }
}

/// Recomputes the full set of simulated buses each tick.
pub struct PositionSimulator {
    /// Optional seeded RNG so tests can pin the placeholder figures.
    rng: Option<StdRng>,
}

impl Default for PositionSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionSimulator {
    pub fn new() -> Self {
        Self { rng: None }
    }

    /// Create a simulator with a seeded RNG for reproducible output.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Some(StdRng::seed_from_u64(seed)),
        }
    }

    /// Get a random value in the given range, using the seeded RNG if available
    fn random_range(&mut self, range: std::ops::RangeInclusive<u32>) -> u32 {
        match &mut self.rng {
            Some(rng) => rng.random_range(range),
            None => rand::rng().random_range(range),
        }
    }

    /// Compute the bus snapshot for `timestamp_ms`.
    ///
    /// One bus per (route, slot) pair for every route with a non-empty
    /// path. Positions and next-stops depend only on the inputs; ETA and
    /// passenger figures come from the random source.
    pub fn simulate(
        &mut self,
        routes: &[RouteDefinition],
        timestamp_ms: u64,
    ) -> Vec<SimulatedBus> {
        let mut buses = Vec::new();

        for route in routes {
            if !route.has_path() {
                continue;
            }

            let path_len = route.route_path.len();
            let active = route.effective_active_buses();

            for slot in 0..active {
                let progress = progress_fraction(slot, active, timestamp_ms);
                let index = path_index(progress, path_len);

                buses.push(SimulatedBus {
                    slot: BusSlot::new(route.route_number.clone(), slot),
                    route_name: route.route_name.clone(),
                    color: route.color.clone(),
                    position: route.route_path[index],
                    path_index: index,
                    next_stop: next_stop_name(route, index),
                    eta_minutes: self.random_range(ETA_MINUTES_MIN..=ETA_MINUTES_MAX),
                    passengers: self.random_range(PASSENGERS_MIN..=PASSENGERS_MAX),
                });
            }
        }

        buses
    }
}

/// Sawtooth progress along the path: resets every 10 s of wall-clock time
/// and advances smoothly within that window, offset per slot so buses stay
/// evenly distributed along the route.
pub fn progress_fraction(slot: u32, active: u32, timestamp_ms: u64) -> f64 {
    slot as f64 / active as f64
        + (timestamp_ms % SAWTOOTH_PERIOD_MS) as f64 / PROGRESS_DIVISOR_MS
}

/// Wrapping path index; always in `[0, len)` for `len > 0`.
pub fn path_index(progress: f64, len: usize) -> usize {
    (progress * len as f64).floor() as usize % len
}

/// Name of the stop nearest-after the path index, clamped to the last stop.
fn next_stop_name(route: &RouteDefinition, path_index: usize) -> String {
    if route.stops.is_empty() {
        return FALLBACK_NEXT_STOP.to_string();
    }

    let stop_index = (path_index + 1).min(route.stops.len() - 1);
    let name = &route.stops[stop_index].name;
    if name.is_empty() {
        FALLBACK_NEXT_STOP.to_string()
    } else {
        name.clone()
    }
}
