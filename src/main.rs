//! CLI entry point for the Bluebikes station traffic tool.
//!
//! Provides subcommands for exporting per-station traffic counts to CSV and
//! for printing the busiest stations, with an optional time-of-day filter.

use anyhow::Result;
use bluebikes_traffic::{
    loader::{load_stations, load_trips},
    model::{Station, TimeFilter, Trip},
    output::{append_record, traffic_label},
    scale::RadiusScale,
    traffic::{compute_traffic, filter_trips},
};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEFAULT_STATIONS_URL: &str = "https://dsc106.com/labs/lab07/data/bluebikes-stations.json";
const DEFAULT_TRIPS_URL: &str = "https://dsc106.com/labs/lab07/data/bluebikes-traffic-2024-03.csv";

#[derive(Parser)]
#[command(name = "bluebikes_traffic")]
#[command(about = "A tool to analyze Bluebikes station traffic", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute per-station traffic and append the rows to a CSV file
    Analyze {
        /// Station list: path to file or URL to fetch
        #[arg(long, default_value = DEFAULT_STATIONS_URL)]
        stations: String,

        /// Trip log: path to file or URL to fetch
        #[arg(long, default_value = DEFAULT_TRIPS_URL)]
        trips: String,

        /// Only count trips starting or ending within an hour of this
        /// minute-of-day (0-1439)
        #[arg(long)]
        at: Option<u16>,

        /// CSV file to append results to
        #[arg(short, long, default_value = "traffic.csv")]
        output: String,
    },
    /// Print the busiest stations
    Top {
        /// Station list: path to file or URL to fetch
        #[arg(long, default_value = DEFAULT_STATIONS_URL)]
        stations: String,

        /// Trip log: path to file or URL to fetch
        #[arg(long, default_value = DEFAULT_TRIPS_URL)]
        trips: String,

        /// Only count trips starting or ending within an hour of this
        /// minute-of-day (0-1439)
        #[arg(long)]
        at: Option<u16>,

        /// How many stations to show
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bluebikes_traffic.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bluebikes_traffic.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            stations,
            trips,
            at,
            output,
        } => {
            let result = run_aggregation(&stations, &trips, at).await?;

            for station in &result {
                append_record(&output, station)?;
            }
            info!(
                stations = result.len(),
                output, "Traffic export complete"
            );
        }
        Commands::Top {
            stations,
            trips,
            at,
            count,
        } => {
            let mut result = run_aggregation(&stations, &trips, at).await?;
            let scale = RadiusScale::from_stations(&result);

            result.sort_by(|a, b| b.total_traffic.cmp(&a.total_traffic));

            for station in result.iter().take(count) {
                info!(
                    short_name = %station.short_name,
                    name = %station.name,
                    radius = scale.radius(station.total_traffic),
                    "{}",
                    traffic_label(station)
                );
            }
        }
    }

    Ok(())
}

/// Loads both datasets, applies the optional time filter, and computes
/// per-station traffic.
#[tracing::instrument(fields(stations = %stations_source, trips = %trips_source, at))]
async fn run_aggregation(
    stations_source: &str,
    trips_source: &str,
    at: Option<u16>,
) -> Result<Vec<Station>> {
    let stations = load_stations(stations_source).await?;
    let trips = load_trips(trips_source).await?;

    let filter = match at {
        Some(minute) => TimeFilter::around(minute)?,
        None => TimeFilter::All,
    };

    let filtered: Vec<Trip> = filter_trips(&trips, filter);
    if filtered.len() != trips.len() {
        info!(
            kept = filtered.len(),
            total = trips.len(),
            "Time filter applied"
        );
    }

    Ok(compute_traffic(stations, &filtered))
}
