//! `flightarc route` - inspect the great-circle path between two airports.

use std::fmt::Write as _;
use std::path::PathBuf;

use clap::Args;
use flightarc::geo::{calculate_bearing, haversine_distance_km};
use flightarc::waypoints::generate_waypoints;
use flightarc::GeoPoint;
use tracing::info;

use super::common::{format_heading, load_airports, lookup_airport, resolve_waypoints};
use crate::error::CliError;
use crate::runner::CliRunner;

#[derive(Debug, Args)]
pub struct RouteArgs {
    /// Departure airport ICAO code (e.g., KJFK)
    pub departure: String,

    /// Arrival airport ICAO code (e.g., KLAX)
    pub arrival: String,

    /// Airport table (JSON object keyed by ICAO code)
    #[arg(long, value_name = "FILE")]
    pub airports: PathBuf,

    /// Number of path segments (default: paths.waypoints)
    #[arg(long, value_name = "N")]
    pub waypoints: Option<usize>,

    /// Print only every Nth way-point (endpoints are always printed)
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub every: usize,
}

pub fn run(runner: &CliRunner, args: RouteArgs) -> Result<(), CliError> {
    let count = resolve_waypoints(args.waypoints, runner.config().paths.waypoints)?;
    let airports = load_airports(&args.airports)?;
    let from = lookup_airport(&airports, &args.departure)?;
    let to = lookup_airport(&airports, &args.arrival)?;

    info!(
        departure = %args.departure,
        arrival = %args.arrival,
        waypoints = count,
        "Generating route"
    );

    let label = format!(
        "{} → {}",
        args.departure.to_ascii_uppercase(),
        args.arrival.to_ascii_uppercase()
    );
    print!("{}", render_route(&label, from, to, count, args.every.max(1)));
    Ok(())
}

/// Text report: header with distance and initial heading, then the table.
fn render_route(label: &str, from: GeoPoint, to: GeoPoint, count: usize, every: usize) -> String {
    let waypoints = generate_waypoints(from, to, count);
    let last = waypoints.len() - 1;

    let mut out = String::new();
    let _ = writeln!(out, "Route {}", label);
    let _ = writeln!(out, "  From:     {}", from);
    let _ = writeln!(out, "  To:       {}", to);
    let _ = writeln!(out, "  Distance: {:.0} km", haversine_distance_km(from, to));
    let _ = writeln!(out, "  Heading:  {}", format_heading(calculate_bearing(from, to)));
    let _ = writeln!(out, "  Segments: {}", last);
    out.push('\n');
    let _ = writeln!(out, "  {:>5}  {:>10}  {:>9}  {:>9}", "#", "Longitude", "Latitude", "Heading");

    for (index, point) in waypoints.iter().enumerate() {
        if index % every != 0 && index != last {
            continue;
        }
        // Heading of the segment leaving this way-point; the last has none
        let heading = waypoints
            .get(index + 1)
            .map(|next| format!("{:9.2}", calculate_bearing(*point, *next)))
            .unwrap_or_else(|| format!("{:>9}", "-"));
        let _ = writeln!(
            out,
            "  {:>5}  {:>10.4}  {:>9.4}  {}",
            index,
            point.longitude(),
            point.latitude(),
            heading
        );
    }

    out
}
