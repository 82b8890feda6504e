//! UI components and resources linking Bevy entities to tracker state

use bevy::prelude::*;
use std::collections::HashMap;

use crate::simulation::{BusClickEvent, BusSlot, MapView, DEFAULT_ROUTE_COLOR};

/// Resource wrapper for the map view state.
#[derive(Resource)]
pub struct MapViewResource(pub MapView);

/// Marker component for ground plane
#[derive(Component)]
pub struct Ground;

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Links a Bevy entity to a route polyline, keyed by route id.
#[derive(Component)]
pub struct RouteLink(pub String);

/// Links a Bevy entity to a simulated bus slot.
#[derive(Component)]
pub struct BusLink(pub BusSlot);

/// Resource to track Bevy entities mapped to tracker entities.
#[derive(Resource, Default)]
pub struct EntityMappings {
    pub routes: HashMap<String, Entity>,
    pub buses: HashMap<BusSlot, Entity>,
}

/// The bus most recently clicked, shown in the detail panel.
#[derive(Resource, Default)]
pub struct SelectedBus(pub Option<BusClickEvent>);

/// Marker for the detail panel root node.
#[derive(Component)]
pub struct DetailPanel;

/// Marker for detail panel text elements.
#[derive(Component)]
pub enum DetailPanelText {
    /// Route number and name
    RouteLabel,
    /// Next stop name
    NextStop,
    /// Minutes to the next stop
    Eta,
    /// Passengers aboard
    Passengers,
}

/// Parse a `#rrggbb` route color, falling back to the default route color.
pub fn route_color(hex: &str) -> Color {
    parse_hex(hex)
        .or_else(|| parse_hex(DEFAULT_ROUTE_COLOR))
        .unwrap_or(Color::WHITE)
}

fn parse_hex(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::srgb_u8(r, g, b))
}
