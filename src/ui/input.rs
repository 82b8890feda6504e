//! Input handling systems

use bevy::prelude::*;
use ordered_float::OrderedFloat;

use super::components::{BusLink, MainCamera, MapViewResource, SelectedBus};

/// Cursor-to-marker distance on the ground plane that counts as a hit.
const PICK_RADIUS: f32 = 2.0;

/// Handle basic keyboard input
pub fn handle_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut exit: MessageWriter<AppExit>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}

/// Number keys focus a route; 0 shows all routes again.
pub fn handle_route_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut view: ResMut<MapViewResource>,
) {
    const DIGITS: [KeyCode; 9] = [
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
        KeyCode::Digit5,
        KeyCode::Digit6,
        KeyCode::Digit7,
        KeyCode::Digit8,
        KeyCode::Digit9,
    ];

    if keyboard.just_pressed(KeyCode::Digit0) {
        view.0.clear_selection();
        return;
    }

    for (index, key) in DIGITS.iter().enumerate() {
        if keyboard.just_pressed(*key) {
            let route_id = view.0.routes().get(index).map(|route| route.id.clone());
            if let Some(route_id) = route_id {
                view.0.select_route(&route_id);
            }
        }
    }
}

/// Left-click picks the nearest visible bus marker under the cursor and
/// opens the detail panel with its derived state. Clicking empty map space
/// closes the panel.
pub fn handle_bus_click(
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    marker_query: Query<(&BusLink, &GlobalTransform, &Visibility)>,
    view: Res<MapViewResource>,
    mut selected: ResMut<SelectedBus>,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };

    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    let Some(cursor_position) = window.cursor_position() else {
        return;
    };

    // Cast ray from camera through cursor position
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor_position) else {
        return;
    };

    // Find intersection with ground plane (y = 0)
    let Some(distance) = ray.intersect_plane(Vec3::ZERO, InfinitePlane3d::new(Vec3::Y)) else {
        return;
    };

    let click_point = ray.get_point(distance);

    let nearest = marker_query
        .iter()
        .filter(|(_, _, visibility)| **visibility != Visibility::Hidden)
        .filter_map(|(link, transform, _)| {
            let marker = transform.translation();
            let planar = Vec2::new(marker.x - click_point.x, marker.z - click_point.z);
            let d = planar.length();
            (d <= PICK_RADIUS).then_some((link, OrderedFloat(d)))
        })
        .min_by_key(|(_, d)| *d);

    selected.0 = nearest.and_then(|(link, _)| view.0.bus_click(&link.0));
}
