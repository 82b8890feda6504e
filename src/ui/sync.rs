//! Systems for syncing Bevy entities with tracker state

use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

use super::components::{BusLink, EntityMappings, MainCamera, MapViewResource, RouteLink};
use super::now_ms;
use super::projection::GeoProjection;
use super::spawner::{spawn_bus_visual, MARKER_HEIGHT};
use crate::simulation::{BusSlot, SimulatedBus, Viewport};

/// System to advance the tracking tick from wall-clock time
pub fn tick_simulation(mut view: ResMut<MapViewResource>) {
    view.0.advance(now_ms());
}

/// System to sync bus markers from the latest snapshot.
///
/// Marker identity follows [`BusSlot`]: surviving slots get their transform
/// updated, stale slots are despawned, new slots spawn fresh markers. The
/// whole set is replaced every tick, so no marker handles leak across
/// ticks.
pub fn sync_buses(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    view: Res<MapViewResource>,
    projection: Res<GeoProjection>,
    mut mappings: ResMut<EntityMappings>,
    mut marker_query: Query<(Entity, &BusLink, &mut Transform, &mut Visibility)>,
) {
    let tracker = &view.0;

    let by_slot: HashMap<&BusSlot, &SimulatedBus> =
        tracker.buses().iter().map(|bus| (&bus.slot, bus)).collect();

    // Update existing markers and track which slots still exist
    let mut existing_slots: HashSet<BusSlot> = HashSet::new();

    for (entity, link, mut transform, mut visibility) in marker_query.iter_mut() {
        if let Some(bus) = by_slot.get(&link.0) {
            existing_slots.insert(link.0.clone());

            let pos = projection.to_world(bus.position);
            transform.translation = Vec3::new(pos.x, MARKER_HEIGHT, pos.z);
            *visibility = if tracker.is_bus_visible(bus) {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
        } else {
            // Slot no longer exists in the snapshot, despawn
            commands.entity(entity).despawn();
            mappings.buses.remove(&link.0);
        }
    }

    // Spawn markers for new slots
    for bus in tracker.buses() {
        if !existing_slots.contains(&bus.slot) {
            spawn_bus_visual(
                &mut commands,
                &mut meshes,
                &mut materials,
                bus,
                &projection,
                &mut mappings,
            );
        }
    }
}

/// System applying the selection filter to route polylines
pub fn update_route_visibility(
    view: Res<MapViewResource>,
    mut polyline_query: Query<(&RouteLink, &mut Visibility)>,
) {
    for (link, mut visibility) in polyline_query.iter_mut() {
        let visible = view
            .0
            .routes()
            .iter()
            .find(|route| route.id == link.0)
            .map(|route| view.0.is_route_visible(route))
            .unwrap_or(false);

        *visibility = if visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

/// System recentering the camera when the viewport changes.
///
/// The viewport only changes on selection changes, so the camera holds
/// steady across simulation ticks.
pub fn apply_viewport(
    view: Res<MapViewResource>,
    projection: Res<GeoProjection>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
    mut last_viewport: Local<Option<Viewport>>,
) {
    let viewport = view.0.viewport();
    if *last_viewport == Some(viewport) {
        return;
    }
    *last_viewport = Some(viewport);

    for mut transform in camera_query.iter_mut() {
        *transform = projection.camera_transform(viewport);
    }
}
