//! Headless driver for the surge tracker: runs the refresh loop for a
//! bounded simulated duration and renders the board, zones, and trailing
//! history as text.

mod export;
mod render;

use std::error::Error;
use std::path::PathBuf;
use std::process::exit;

use bevy_ecs::prelude::World;
use clap::{Args, Parser, Subcommand, ValueEnum};
use h3o::LatLng;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use surge_core::board::{surge_zones, SurgeBoard, SurgeHistory};
use surge_core::catalog::ServiceCatalog;
use surge_core::clock::{EventKind, EventSubject, SimulationClock};
#[cfg(feature = "geolocate")]
use surge_core::geolocate::GeolocateClient;
use surge_core::generator::{generate, LocalTime};
use surge_core::location::{LocationError, LocationPlan, UserLocation};
use surge_core::runner::{initialize_tracker, run_until_empty_with_hook, tracker_schedule};
use surge_core::scenario::{build_tracker, TrackerParams};
use surge_core::surge::SurgeFactorTable;

#[derive(Parser)]
#[command(
    name = "surge_cli",
    about = "Surge pricing tracker demo",
    long_about = "Simulates surge pricing for a fixed service catalog:\n\
                  periodic refresh, manual refresh with debounce, and a\n\
                  best-effort location request with a fixed fallback."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the tracker loop for a bounded simulated duration
    Run(RunArgs),
    /// Generate one surge snapshot without running the loop
    Snapshot(SnapshotArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Random seed for reproducible runs
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Simulated run length in seconds
    #[arg(long, default_value_t = 300)]
    duration_secs: u64,
    /// Auto-refresh interval in seconds
    #[arg(long, default_value_t = 30)]
    interval_secs: u64,
    /// Resolve the location request at LAT,LNG
    #[arg(long, value_parser = parse_coordinate, conflicts_with = "location_error")]
    location: Option<LatLng>,
    /// Fail the location request with this case
    #[arg(long, value_enum)]
    location_error: Option<LocationFailure>,
    /// Hide the view at this simulated second (pauses auto refresh)
    #[arg(long)]
    pause_at: Option<u64>,
    /// Show the view again at this simulated second
    #[arg(long)]
    resume_at: Option<u64>,
    /// Trigger manual refreshes at these simulated seconds
    #[arg(long = "manual-at")]
    manual_at: Vec<u64>,
    /// Write history and board exports into this directory
    #[arg(long)]
    export_dir: Option<PathBuf>,
    /// Resolve the location via an HTTP geolocation endpoint
    #[cfg(feature = "geolocate")]
    #[arg(long, conflicts_with_all = ["location", "location_error"])]
    geolocate_endpoint: Option<String>,
}

#[derive(Args)]
struct SnapshotArgs {
    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Hour of day, 0-23
    #[arg(long, default_value_t = 8)]
    hour: u8,
    /// Day of week, 0 = Sunday .. 6 = Saturday
    #[arg(long, default_value_t = 1)]
    day: u8,
    /// Print JSON instead of the table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LocationFailure {
    Denied,
    Unavailable,
    Timeout,
    Unsupported,
}

impl From<LocationFailure> for LocationError {
    fn from(failure: LocationFailure) -> Self {
        match failure {
            LocationFailure::Denied => LocationError::PermissionDenied,
            LocationFailure::Unavailable => LocationError::Unavailable,
            LocationFailure::Timeout => LocationError::Timeout,
            LocationFailure::Unsupported => LocationError::Unsupported,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run(args) => run_tracker(args),
        Commands::Snapshot(args) => snapshot(args),
    };

    if let Err(error) = result {
        eprintln!("error: {error}");
        exit(1);
    }
}

fn parse_coordinate(arg: &str) -> Result<LatLng, String> {
    let (lat, lng) = arg
        .split_once(',')
        .ok_or_else(|| "expected LAT,LNG".to_string())?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|error| format!("bad latitude: {error}"))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|error| format!("bad longitude: {error}"))?;
    LatLng::new(lat, lng).map_err(|error| format!("invalid coordinate: {error}"))
}

fn location_plan(args: &RunArgs) -> LocationPlan {
    #[cfg(feature = "geolocate")]
    if let Some(endpoint) = &args.geolocate_endpoint {
        let outcome = GeolocateClient::new(endpoint).lookup();
        return LocationPlan {
            outcome,
            resolve_after_ms: 1_000,
        };
    }

    match (args.location, args.location_error) {
        (Some(position), _) => LocationPlan {
            outcome: Ok(position),
            resolve_after_ms: 1_000,
        },
        (None, Some(failure)) => LocationPlan {
            outcome: Err(failure.into()),
            resolve_after_ms: 1_000,
        },
        (None, None) => LocationPlan::default(),
    }
}

fn run_tracker(args: RunArgs) -> Result<(), Box<dyn Error>> {
    let params = TrackerParams::default()
        .with_seed(args.seed)
        .with_refresh_interval_secs(args.interval_secs)
        .with_duration_secs(args.duration_secs)
        .with_location_plan(location_plan(&args));

    let mut world = World::new();
    build_tracker(&mut world, params);

    {
        let mut clock = world.resource_mut::<SimulationClock>();
        for secs in &args.manual_at {
            clock.schedule_at(secs * 1_000, EventKind::ManualRefresh, None);
        }
        if let Some(secs) = args.pause_at {
            clock.schedule_at(
                secs * 1_000,
                EventKind::VisibilityChanged,
                Some(EventSubject::Visibility(false)),
            );
        }
        if let Some(secs) = args.resume_at {
            clock.schedule_at(
                secs * 1_000,
                EventKind::VisibilityChanged,
                Some(EventSubject::Visibility(true)),
            );
        }
    }

    initialize_tracker(&mut world);
    let mut schedule = tracker_schedule();

    let progress = ProgressBar::new(args.duration_secs);
    progress.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len}s")
            .expect("valid progress template"),
    );
    let steps = run_until_empty_with_hook(&mut world, &mut schedule, 1_000_000, |world, _| {
        let now = world.resource::<SimulationClock>().now();
        progress.set_position(now / 1_000);
    });
    progress.finish_and_clear();

    let board = world.resource::<SurgeBoard>();
    let history = world.resource::<SurgeHistory>();
    let location = world.resource::<UserLocation>();

    println!("{}", render::render_board(board, location));
    println!("{}", render::render_zones(&surge_zones(board, location.cell)));
    println!("{}", render::render_history(history));
    println!(
        "processed {steps} events over {} simulated seconds",
        args.duration_secs
    );

    if let Some(dir) = &args.export_dir {
        export::export_run(dir, board, history)?;
        println!("exports written to {}", dir.display());
    }

    Ok(())
}

fn snapshot(args: SnapshotArgs) -> Result<(), Box<dyn Error>> {
    let time = LocalTime::new(args.hour, args.day)?;
    let catalog = ServiceCatalog::default();
    let table = SurgeFactorTable::default();
    let mut rng = StdRng::seed_from_u64(args.seed);
    let results = generate(&catalog, &table, time, &mut rng);

    if args.json {
        serde_json::to_writer_pretty(std::io::stdout().lock(), &results)?;
        println!();
    } else {
        print!("{}", render::render_results(&results));
    }

    Ok(())
}
