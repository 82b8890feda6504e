mod simulation;

#[cfg(feature = "ui")]
mod ui;

use std::path::PathBuf;
use std::time::Duration;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::Parser;
use log::{info, warn};

use simulation::{
    demo_routes, load_routes, GeoPoint, MapConfig, MapView, PositionSimulator, RouteDefinition,
};

/// Default city center for the demo deployment (Vizianagaram).
const DEMO_CENTER: GeoPoint = GeoPoint {
    lat: 18.1124,
    lng: 83.4309,
};

#[derive(Parser)]
#[command(name = "bus_tracker")]
#[command(about = "Live transit tracking with optional map UI")]
struct Cli {
    /// Run with the Bevy map view
    #[arg(long)]
    ui: bool,

    /// Number of simulation ticks to run in headless mode
    #[arg(long, default_value = "5")]
    ticks: u32,

    /// Route definitions JSON file (built-in demo catalog when omitted)
    #[arg(long)]
    routes: Option<PathBuf>,

    /// Start focused on this route number
    #[arg(long)]
    select: Option<String>,

    /// Seed for the placeholder ETA/passenger generator
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let routes = match &cli.routes {
        Some(path) => load_routes(path)?,
        None => demo_routes(),
    };

    if cli.ui {
        #[cfg(feature = "ui")]
        {
            run_with_ui(routes, cli.select);
        }
        #[cfg(not(feature = "ui"))]
        {
            eprintln!("Error: UI feature is not enabled. Rebuild with --features ui");
            std::process::exit(1);
        }
    } else {
        run_headless(routes, &cli);
    }

    Ok(())
}

/// Milliseconds since the Unix epoch, the simulator's time base.
fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Run the tracker in headless mode (no graphics)
fn run_headless(routes: Vec<RouteDefinition>, cli: &Cli) {
    env_logger::init();

    println!("Running bus tracker in headless mode...");
    println!("Routes: {}, Ticks: {}", routes.len(), cli.ticks);
    println!();

    let simulator = match cli.seed {
        Some(seed) => PositionSimulator::with_seed(seed),
        None => PositionSimulator::new(),
    };

    let mut view = MapView::mount(MapConfig::new(DEMO_CENTER), routes, simulator, now_ms());

    if let Some(route_number) = &cli.select {
        if view.select_route_number(route_number) {
            let viewport = view.viewport();
            println!(
                "Tracking route {} (centered {:.4}, {:.4} at zoom {})",
                route_number, viewport.center.lat, viewport.center.lng, viewport.zoom
            );
            println!();
        } else {
            warn!("Unknown route number {}, showing all routes", route_number);
        }
    }

    // Mounting computed the first snapshot already
    print_tick(&view, 1);

    let mut ticks_done = 1;
    while ticks_done < cli.ticks {
        std::thread::sleep(Duration::from_millis(250));
        if view.advance(now_ms()) {
            ticks_done += 1;
            print_tick(&view, ticks_done);
        }
    }

    view.dismiss();
    info!("Tracking stopped after {} ticks", ticks_done);
}

fn print_tick(view: &MapView, tick: u32) {
    println!("--- Tick {} ---", tick);
    for bus in view.visible_buses() {
        println!(
            "  {:<8} {:<32} ({:.4}, {:.4})  next: {:<18} eta {:>2} mins, {} aboard",
            bus.id(),
            bus.route_name,
            bus.position.lat,
            bus.position.lng,
            bus.next_stop,
            bus.eta_minutes,
            bus.passengers
        );
    }
    println!();
}

#[cfg(feature = "ui")]
fn run_with_ui(routes: Vec<RouteDefinition>, select: Option<String>) {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;

    println!("Starting Bus Tracker UI...");
    println!();
    println!("Controls:");
    println!("  1-9    - Focus a route");
    println!("  0      - Show all routes");
    println!("  Click  - Bus details");
    println!("  ESC    - Exit");
    println!();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: "warn,bus_tracker=debug".to_string(),
                    level: bevy::log::Level::DEBUG,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Bus Tracker - Live Map".into(),
                        resolution: (1280, 720).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins(ui::BusTrackerUiPlugin {
            config: MapConfig::new(DEMO_CENTER),
            routes,
            initial_route_number: select,
        })
        .run();
}
