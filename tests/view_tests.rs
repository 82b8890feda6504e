//! Map view state machine validation tests

use bus_tracker::simulation::{
    routes_from_json, BusSlot, GeoPoint, MapConfig, MapView, PositionSimulator, RouteDefinition,
    Stop, TickTimer, DEFAULT_ROUTE_COLOR, DEFAULT_ZOOM, FOCUS_ZOOM,
};

const CITY_CENTER: GeoPoint = GeoPoint {
    lat: 18.1124,
    lng: 83.4309,
};

fn test_route(
    id: &str,
    route_number: &str,
    points: usize,
    active_buses: Option<u32>,
) -> RouteDefinition {
    RouteDefinition {
        id: id.to_string(),
        route_number: route_number.to_string(),
        route_name: format!("Route {}", route_number),
        start_point: String::new(),
        end_point: String::new(),
        route_path: (0..points)
            .map(|i| GeoPoint::new(18.10 + i as f64 * 0.01, 83.40 + i as f64 * 0.01))
            .collect(),
        stops: vec![
            Stop {
                name: "First".to_string(),
                lat: 18.10,
                lng: 83.40,
            },
            Stop {
                name: "Last".to_string(),
                lat: 18.20,
                lng: 83.50,
            },
        ],
        active_buses,
        color: DEFAULT_ROUTE_COLOR.to_string(),
        frequency: None,
        fare: None,
        first_bus: None,
        last_bus: None,
    }
}

fn mount_view(routes: Vec<RouteDefinition>) -> MapView {
    MapView::mount(
        MapConfig::new(CITY_CENTER),
        routes,
        PositionSimulator::with_seed(7),
        0,
    )
}

#[test]
fn test_mount_computes_initial_snapshot() {
    let view = mount_view(vec![
        test_route("route-a", "101", 5, Some(2)),
        test_route("route-b", "202", 4, Some(1)),
    ]);

    assert!(view.is_active());
    assert_eq!(view.buses().len(), 3);
    assert_eq!(view.viewport().center, CITY_CENTER);
    assert_eq!(view.viewport().zoom, DEFAULT_ZOOM);
}

#[test]
fn test_selection_filters_buses_by_route_number() {
    let mut view = mount_view(vec![
        test_route("route-a", "101", 5, Some(2)),
        test_route("route-b", "202", 4, Some(1)),
    ]);

    assert!(view.select_route("route-a"));

    let visible = view.visible_buses();
    assert_eq!(visible.len(), 2);
    assert!(visible.iter().all(|b| b.route_number() == "101"));

    let routes = view.visible_routes();
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].id, "route-a");
}

#[test]
fn test_no_selection_shows_all_routes() {
    let view = mount_view(vec![
        test_route("route-a", "101", 5, Some(2)),
        test_route("route-b", "202", 4, Some(1)),
    ]);

    assert_eq!(view.visible_routes().len(), 2);
    assert_eq!(view.visible_buses().len(), 3);
}

#[test]
fn test_duplicate_route_numbers_share_buses() {
    // Route numbers are a display key and not guaranteed unique; bus
    // filtering follows the number while the polyline follows the id.
    let mut view = mount_view(vec![
        test_route("route-a", "9", 5, Some(1)),
        test_route("route-b", "9", 4, Some(1)),
    ]);

    assert!(view.select_route("route-a"));

    assert_eq!(view.visible_routes().len(), 1);
    assert_eq!(view.visible_buses().len(), 2);
}

#[test]
fn test_selection_recenters_on_midpoint() {
    let route = test_route("route-a", "101", 5, Some(2));
    let midpoint = route.route_path[2];

    let mut view = mount_view(vec![route]);
    assert!(view.select_route("route-a"));

    assert_eq!(view.viewport().center, midpoint);
    assert_eq!(view.viewport().zoom, FOCUS_ZOOM);
    assert_eq!(view.selected_route().map(|r| r.id.as_str()), Some("route-a"));
}

#[test]
fn test_even_length_path_midpoint() {
    let route = test_route("route-a", "101", 4, Some(1));
    let midpoint = route.route_path[2];

    let mut view = mount_view(vec![route]);
    view.select_route("route-a");

    assert_eq!(view.viewport().center, midpoint);
}

#[test]
fn test_clear_selection_restores_default_viewport() {
    let mut view = mount_view(vec![test_route("route-a", "101", 5, Some(2))]);

    view.select_route("route-a");
    view.clear_selection();

    assert_eq!(view.viewport().center, CITY_CENTER);
    assert_eq!(view.viewport().zoom, DEFAULT_ZOOM);
    assert!(view.selected_route().is_none());
    assert_eq!(view.visible_routes().len(), 1);
}

#[test]
fn test_unknown_selection_leaves_view_untouched() {
    let mut view = mount_view(vec![test_route("route-a", "101", 5, Some(2))]);

    assert!(!view.select_route("route-z"));
    assert!(view.selected_route().is_none());
    assert_eq!(view.viewport().center, CITY_CENTER);
}

#[test]
fn test_select_by_route_number() {
    let mut view = mount_view(vec![
        test_route("route-a", "101", 5, Some(2)),
        test_route("route-b", "202", 4, Some(1)),
    ]);

    assert!(view.select_route_number("202"));
    assert_eq!(view.selected_route().map(|r| r.id.as_str()), Some("route-b"));
    assert!(!view.select_route_number("999"));
}

#[test]
fn test_tick_cadence() {
    let mut view = mount_view(vec![test_route("route-a", "101", 5, Some(2))]);

    // Mounting fired the first tick at t=0
    assert!(!view.advance(1_999));
    assert!(view.advance(2_000));
    assert!(!view.advance(2_100));
    assert!(view.advance(4_000));
}

#[test]
fn test_dismiss_cancels_ticks() {
    let mut view = mount_view(vec![test_route("route-a", "101", 5, Some(2))]);

    view.dismiss();
    assert!(!view.is_active());
    assert!(!view.advance(100_000));

    // Dismissal is idempotent
    view.dismiss();
    assert!(!view.advance(200_000));
}

#[test]
fn test_tick_timer_lifecycle() {
    let mut timer = TickTimer::new(2_000);

    // Fires immediately on the first poll, then once per interval
    assert!(timer.poll(5));
    assert!(!timer.poll(6));
    assert!(!timer.poll(2_004));
    assert!(timer.poll(2_005));

    timer.cancel();
    assert!(timer.is_cancelled());
    assert!(!timer.poll(1_000_000));
    timer.cancel();
    assert!(!timer.poll(2_000_000));
}

#[test]
fn test_bus_click_payload() {
    let view = mount_view(vec![test_route("route-a", "101", 5, Some(2))]);

    let slot = BusSlot::new("101".to_string(), 0);
    let event = view.bus_click(&slot).expect("clicked bus exists");
    let bus = &view.buses()[0];

    assert_eq!(event.id, "101-0");
    assert_eq!(event.route_number, "101");
    assert_eq!(event.route_name, "Route 101");
    assert_eq!(event.position, bus.position);
    assert_eq!(event.color, bus.color);
    assert_eq!(event.next_stop, bus.next_stop);
    assert_eq!(event.eta_minutes, bus.eta_minutes);
    assert_eq!(event.passengers, bus.passengers);
}

#[test]
fn test_bus_click_unknown_slot() {
    let view = mount_view(vec![test_route("route-a", "101", 5, Some(2))]);

    let slot = BusSlot::new("999".to_string(), 0);
    assert!(view.bus_click(&slot).is_none());
}

#[test]
fn test_malformed_routes_are_skipped() {
    let json = r##"[
        {
            "id": "r1",
            "route_number": "101",
            "route_name": "Good",
            "route_path": [{"lat": 18.1, "lng": 83.4}],
            "stops": [{"name": "S", "lat": 18.1, "lng": 83.4}],
            "active_buses": 1,
            "color": "#112233"
        },
        {
            "id": "r2",
            "route_number": "202",
            "route_name": "Bad path",
            "route_path": "not an array"
        },
        {
            "route_number": "303",
            "route_name": "Missing id"
        }
    ]"##;

    let routes = routes_from_json(json).expect("array parses");
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].id, "r1");
}

#[test]
fn test_route_defaults_applied_on_load() {
    let json = r#"[
        {
            "id": "r1",
            "route_number": "101",
            "route_name": "Sparse",
            "route_path": [{"lat": 18.1, "lng": 83.4}, {"lat": 18.2, "lng": 83.5}]
        }
    ]"#;

    let routes = routes_from_json(json).expect("array parses");
    let route = &routes[0];

    assert_eq!(route.effective_active_buses(), 2);
    assert_eq!(route.color, DEFAULT_ROUTE_COLOR);
    assert!(route.stops.is_empty());
    assert!(route.frequency.is_none());
}

#[test]
fn test_non_array_route_data_is_an_error() {
    assert!(routes_from_json(r#"{"id": "r1"}"#).is_err());
    assert!(routes_from_json("not json at all").is_err());
}
