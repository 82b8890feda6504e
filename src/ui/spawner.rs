//! Systems for spawning visual entities from tracker state

use bevy::prelude::*;

use super::components::{route_color, BusLink, EntityMappings, MapViewResource, RouteLink};
use super::projection::GeoProjection;
use crate::simulation::{RouteDefinition, SimulatedBus};

/// Polyline segment width in world units.
const LINE_WIDTH: f32 = 0.35;
const LINE_HEIGHT: f32 = 0.02;

/// Bus marker size and hover height.
const MARKER_RADIUS: f32 = 0.6;
pub const MARKER_HEIGHT: f32 = 0.6;

/// System to create route polylines from the mounted view
pub fn spawn_route_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    view: Res<MapViewResource>,
    projection: Res<GeoProjection>,
    mut mappings: ResMut<EntityMappings>,
) {
    for route in view.0.routes() {
        // No polyline for a route with an empty path
        if !route.has_path() {
            continue;
        }
        spawn_polyline(
            &mut commands,
            &mut meshes,
            &mut materials,
            &projection,
            route,
            &mut mappings,
        );
    }
}

/// Spawn one continuous polyline for a route as segment cuboids parented to
/// a shared root, so the selection filter toggles a single entity.
fn spawn_polyline(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    projection: &GeoProjection,
    route: &RouteDefinition,
    mappings: &mut ResMut<EntityMappings>,
) {
    let material = materials.add(route_color(&route.color));

    let root = commands
        .spawn((
            RouteLink(route.id.clone()),
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    for pair in route.route_path.windows(2) {
        let start = projection.to_world(pair[0]);
        let end = projection.to_world(pair[1]);
        let length = start.distance(end);
        if length <= f32::EPSILON {
            continue;
        }

        let midpoint = (start + end) / 2.0;
        let angle = (end.x - start.x).atan2(end.z - start.z);

        let segment = commands
            .spawn((
                Mesh3d(meshes.add(Cuboid::new(LINE_WIDTH, LINE_HEIGHT, length))),
                MeshMaterial3d(material.clone()),
                Transform::from_translation(Vec3::new(
                    midpoint.x,
                    LINE_HEIGHT / 2.0,
                    midpoint.z,
                ))
                .with_rotation(Quat::from_rotation_y(angle)),
            ))
            .id();
        commands.entity(root).add_child(segment);
    }

    mappings.routes.insert(route.id.clone(), root);
}

/// Spawn a marker for a simulated bus, styled with its route color
pub fn spawn_bus_visual(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    bus: &SimulatedBus,
    projection: &GeoProjection,
    mappings: &mut ResMut<EntityMappings>,
) {
    let pos = projection.to_world(bus.position);

    let entity = commands
        .spawn((
            BusLink(bus.slot.clone()),
            Mesh3d(meshes.add(Sphere::new(MARKER_RADIUS))),
            MeshMaterial3d(materials.add(route_color(&bus.color))),
            Transform::from_translation(Vec3::new(pos.x, MARKER_HEIGHT, pos.z)),
        ))
        .id();
    mappings.buses.insert(bus.slot.clone(), entity);
}
