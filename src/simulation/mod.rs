//! Standalone transit tracking core
//!
//! This module contains all the position simulation and map-view state
//! logic that can run independently of the Bevy renderer. It can be tested
//! via console without needing to boot up the full map.

mod route;
mod simulator;
mod types;
mod view;

// Re-export public types for external use
// These may not be used within this crate but are part of the public API
#[allow(unused_imports)]
pub use route::{demo_routes, load_routes, routes_from_json, RouteDefinition, Stop};
#[allow(unused_imports)]
pub use simulator::{path_index, progress_fraction, PositionSimulator, SimulatedBus};
#[allow(unused_imports)]
pub use types::{
    BusSlot, GeoPoint, DEFAULT_ACTIVE_BUSES, DEFAULT_ROUTE_COLOR, FALLBACK_NEXT_STOP,
    PROGRESS_DIVISOR_MS, SAWTOOTH_PERIOD_MS,
};
#[allow(unused_imports)]
pub use view::{
    BusClickEvent, MapConfig, MapView, TickTimer, Viewport, DEFAULT_ZOOM, FOCUS_ZOOM,
    TICK_INTERVAL_MS,
};
