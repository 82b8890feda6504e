//! World setup systems for camera, lighting, and the map surface

use bevy::prelude::*;

use super::components::{Ground, MainCamera, MapViewResource};
use super::projection::GeoProjection;

/// System to setup the world environment (ground, lighting, camera)
pub fn setup_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    view: Res<MapViewResource>,
    projection: Res<GeoProjection>,
) {
    // Spawn a 3D camera top-down over the configured default viewport
    commands.spawn((
        MainCamera,
        Camera3d::default(),
        projection.camera_transform(view.0.viewport()),
    ));

    // Spawn a directional light
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(40.0, 80.0, 40.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Ground plane standing in for the tiled basemap, which is owned by the
    // excluded rendering surface.
    commands.spawn((
        Ground,
        Mesh3d(meshes.add(Plane3d::default().mesh().size(400.0, 400.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.85, 0.88, 0.90))),
    ));
}
