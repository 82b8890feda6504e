//! Map view module that visualizes tracker state using Bevy
//!
//! This module is purely for visualization - all tracking logic is in the
//! `simulation` module. The UI reads state from `MapView` and renders it
//! using Bevy's 3D graphics.

mod components;
mod input;
mod panel;
mod projection;
mod spawner;
mod sync;
mod world;

use bevy::prelude::*;
use std::time::{SystemTime, UNIX_EPOCH};

pub use components::{EntityMappings, MapViewResource, SelectedBus};

use input::{handle_bus_click, handle_input, handle_route_keys};
use panel::{setup_panel, update_detail_panel};
use projection::GeoProjection;
use spawner::spawn_route_visuals;
use sync::{apply_viewport, sync_buses, tick_simulation, update_route_visibility};
use world::setup_world;

use crate::simulation::{MapConfig, MapView, PositionSimulator, RouteDefinition};

/// Plugin rendering the live map for a configured route set.
///
/// The map center comes in through [`MapConfig`] rather than living as a
/// constant inside the renderer.
pub struct BusTrackerUiPlugin {
    pub config: MapConfig,
    pub routes: Vec<RouteDefinition>,
    /// Route number to focus on startup, when given.
    pub initial_route_number: Option<String>,
}

impl Plugin for BusTrackerUiPlugin {
    fn build(&self, app: &mut App) {
        let projection = GeoProjection::new(self.config.default_center);

        let mut view = MapView::mount(
            self.config.clone(),
            self.routes.clone(),
            PositionSimulator::new(),
            now_ms(),
        );
        if let Some(route_number) = &self.initial_route_number {
            if !view.select_route_number(route_number) {
                bevy::log::warn!("Unknown route number {}, showing all routes", route_number);
            }
        }

        app.insert_resource(MapViewResource(view))
            .insert_resource(projection)
            .init_resource::<EntityMappings>()
            .init_resource::<SelectedBus>()
            .add_systems(
                Startup,
                (
                    setup_world,
                    spawn_route_visuals.after(setup_world),
                    setup_panel,
                ),
            )
            .add_systems(
                Update,
                (
                    tick_simulation,
                    sync_buses,
                    update_route_visibility,
                    apply_viewport,
                    handle_input,
                    handle_route_keys,
                    handle_bus_click,
                    update_detail_panel,
                ),
            );
    }
}

/// Milliseconds since the Unix epoch, the simulator's time base.
pub(crate) fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
