//! Map view state: selection, viewport and the tick lifecycle
//!
//! Engine-independent so the whole state machine can be exercised without
//! booting the renderer. The Bevy layer reads from [`MapView`] and mutates
//! it only through the operations here.

use super::route::RouteDefinition;
use super::simulator::{PositionSimulator, SimulatedBus};
use super::types::{BusSlot, GeoPoint};

/// Map zoom when no route is selected.
pub const DEFAULT_ZOOM: u8 = 12;

/// Map zoom when focused on a selected route.
pub const FOCUS_ZOOM: u8 = 13;

/// Wall-clock interval between position recomputations.
pub const TICK_INTERVAL_MS: u64 = 2_000;

/// Construction-time configuration for the map view.
///
/// The default center is explicit and supplied by the caller rather than
/// hardcoded in the renderer.
#[derive(Debug, Clone)]
pub struct MapConfig {
    pub default_center: GeoPoint,
    pub default_zoom: u8,
    pub focus_zoom: u8,
    pub tick_interval_ms: u64,
}

impl MapConfig {
    /// Standard configuration around the caller's city center.
    pub fn new(default_center: GeoPoint) -> Self {
        Self {
            default_center,
            default_zoom: DEFAULT_ZOOM,
            focus_zoom: FOCUS_ZOOM,
            tick_interval_ms: TICK_INTERVAL_MS,
        }
    }
}

/// Current map camera target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: GeoPoint,
    pub zoom: u8,
}

/// Cancellable repeating timer driving simulation recomputation.
///
/// Fires on the first poll after creation, then once per interval.
/// Cancellation is idempotent; a cancelled timer never fires again.
#[derive(Debug, Clone)]
pub struct TickTimer {
    interval_ms: u64,
    next_due: Option<u64>,
    cancelled: bool,
}

impl TickTimer {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            next_due: None,
            cancelled: false,
        }
    }

    /// Returns true when a tick is due at `now_ms`.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if self.cancelled {
            return false;
        }
        match self.next_due {
            Some(due) if now_ms < due => false,
            _ => {
                self.next_due = Some(now_ms + self.interval_ms);
                true
            }
        }
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// Payload surfaced to the enclosing view when a bus marker is clicked.
#[derive(Debug, Clone, PartialEq)]
pub struct BusClickEvent {
    pub id: String,
    pub route_number: String,
    pub route_name: String,
    pub position: GeoPoint,
    pub color: String,
    pub next_stop: String,
    pub eta_minutes: u32,
    pub passengers: u32,
}

/// The selected route, carrying both keys the filters need: polylines
/// filter by route id, buses by route number.
#[derive(Debug, Clone, PartialEq)]
struct Selection {
    route_id: String,
    route_number: String,
}

/// Live tracking view over a set of routes.
///
/// Owns the tick timer, the selection, the viewport and the latest bus
/// snapshot.
pub struct MapView {
    config: MapConfig,
    routes: Vec<RouteDefinition>,
    simulator: PositionSimulator,
    timer: TickTimer,
    selection: Option<Selection>,
    viewport: Viewport,
    buses: Vec<SimulatedBus>,
}

impl MapView {
    /// Mount the view: starts tracking all routes at the default viewport
    /// and computes the initial bus snapshot.
    pub fn mount(
        config: MapConfig,
        routes: Vec<RouteDefinition>,
        simulator: PositionSimulator,
        now_ms: u64,
    ) -> Self {
        let viewport = Viewport {
            center: config.default_center,
            zoom: config.default_zoom,
        };
        let timer = TickTimer::new(config.tick_interval_ms);

        let mut view = Self {
            config,
            routes,
            simulator,
            timer,
            selection: None,
            viewport,
            buses: Vec::new(),
        };
        view.advance(now_ms);
        view
    }

    /// Poll the tick timer and recompute the bus snapshot when a tick is
    /// due. Returns whether a tick fired. No-op once dismissed.
    pub fn advance(&mut self, now_ms: u64) -> bool {
        if !self.timer.poll(now_ms) {
            return false;
        }
        self.buses = self.simulator.simulate(&self.routes, now_ms);
        true
    }

    /// Select a route by id, recentering the viewport on its midpoint path
    /// point at focus zoom. Unknown ids leave the view untouched.
    pub fn select_route(&mut self, route_id: &str) -> bool {
        let Some(route) = self.routes.iter().find(|r| r.id == route_id) else {
            return false;
        };

        self.selection = Some(Selection {
            route_id: route.id.clone(),
            route_number: route.route_number.clone(),
        });

        // Recenter only here, never per tick, so the camera doesn't jitter.
        if let Some(mid) = route.midpoint() {
            self.viewport = Viewport {
                center: mid,
                zoom: self.config.focus_zoom,
            };
        }
        true
    }

    /// Select by display code. First match wins when numbers collide
    /// across data sources.
    pub fn select_route_number(&mut self, route_number: &str) -> bool {
        let id = self
            .routes
            .iter()
            .find(|r| r.route_number == route_number)
            .map(|r| r.id.clone());
        match id {
            Some(id) => self.select_route(&id),
            None => false,
        }
    }

    /// Clear the selection, restoring the default viewport.
    pub fn clear_selection(&mut self) {
        self.selection = None;
        self.viewport = Viewport {
            center: self.config.default_center,
            zoom: self.config.default_zoom,
        };
    }

    pub fn selected_route(&self) -> Option<&RouteDefinition> {
        let selection = self.selection.as_ref()?;
        self.routes.iter().find(|r| r.id == selection.route_id)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn routes(&self) -> &[RouteDefinition] {
        &self.routes
    }

    /// The latest snapshot, unfiltered.
    pub fn buses(&self) -> &[SimulatedBus] {
        &self.buses
    }

    /// Whether the route's polyline passes the selection filter.
    pub fn is_route_visible(&self, route: &RouteDefinition) -> bool {
        match &self.selection {
            Some(selection) => selection.route_id == route.id,
            None => true,
        }
    }

    /// Whether the bus's marker passes the selection filter.
    pub fn is_bus_visible(&self, bus: &SimulatedBus) -> bool {
        match &self.selection {
            Some(selection) => selection.route_number == bus.slot.route_number,
            None => true,
        }
    }

    pub fn visible_routes(&self) -> Vec<&RouteDefinition> {
        self.routes
            .iter()
            .filter(|route| self.is_route_visible(route))
            .collect()
    }

    pub fn visible_buses(&self) -> Vec<&SimulatedBus> {
        self.buses
            .iter()
            .filter(|bus| self.is_bus_visible(bus))
            .collect()
    }

    /// Full derived state for a clicked marker.
    pub fn bus_click(&self, slot: &BusSlot) -> Option<BusClickEvent> {
        self.buses.iter().find(|bus| &bus.slot == slot).map(|bus| BusClickEvent {
            id: bus.id(),
            route_number: bus.slot.route_number.clone(),
            route_name: bus.route_name.clone(),
            position: bus.position,
            color: bus.color.clone(),
            next_stop: bus.next_stop.clone(),
            eta_minutes: bus.eta_minutes,
            passengers: bus.passengers,
        })
    }

    /// Tear down the view: cancels the tick timer and clears the
    /// selection. Safe to call more than once; subsequent `advance` calls
    /// never fire.
    pub fn dismiss(&mut self) {
        self.timer.cancel();
        self.selection = None;
    }

    pub fn is_active(&self) -> bool {
        !self.timer.is_cancelled()
    }
}
