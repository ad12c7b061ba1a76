//! `flightarc simulate` - replay a flight feed through the playback clock.
//!
//! ```text
//!   feed.json ──► normalize ──► [NormalizedFlight]
//!                                     │
//!   frame loop:  tick(now) ──► render_frame(current) ──► summary line
//!                  ▲                                        │
//!                  └──── now += 1/fps (or real sleep) ◄─────┘
//! ```
//!
//! Without `--realtime` the loop feeds the clock synthetic instants one
//! frame apart, so a replay finishes as fast as it can print.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use chrono::Utc;
use clap::Args;
use flightarc::flight::{normalize_with_resolution, ArrivalPolicy};
use flightarc::{render_frame, FlightFeed, FlightFrame, NormalizedFlight, PlaybackClock};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use super::common::{format_heading, format_unix, load_airports, resolve_waypoints, PolicyArg};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Default frames per second of the replay loop.
pub const DEFAULT_FPS: u32 = 30;

#[derive(Debug, Args)]
pub struct SimulateArgs {
    /// Airport table (JSON object keyed by ICAO code)
    #[arg(long, value_name = "FILE")]
    pub airports: PathBuf,

    /// Flight feed ({ "data": [...] } envelope or bare array)
    #[arg(long, value_name = "FILE")]
    pub flights: PathBuf,

    /// Simulated seconds per real second (default: playback.speed)
    #[arg(long, value_name = "X")]
    pub speed: Option<f64>,

    /// Frames per second
    #[arg(long, default_value_t = DEFAULT_FPS, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// What happens to landed flights (default: paths.arrival_policy)
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,

    /// Way-point segments per flight (default: paths.waypoints)
    #[arg(long, value_name = "N")]
    pub waypoints: Option<usize>,

    /// Pace frames in real time instead of replaying as fast as possible
    #[arg(long)]
    pub realtime: bool,

    /// Replay the hours leading up to now instead of the feed's own span
    #[arg(long)]
    pub lookback: bool,

    /// Look-back window in hours (default: playback.lookback_hours)
    #[arg(long, value_name = "H", requires = "lookback")]
    pub hours: Option<u32>,

    /// Print a summary every Nth frame
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub every: u64,

    /// Only show the progress bar and the final summary
    #[arg(long)]
    pub quiet: bool,
}

pub fn run(runner: &CliRunner, args: SimulateArgs) -> Result<(), CliError> {
    let config = runner.config();
    let count = resolve_waypoints(args.waypoints, config.paths.waypoints)?;
    let policy: ArrivalPolicy = args
        .policy
        .map(Into::into)
        .unwrap_or(config.paths.arrival_policy);
    let speed = args.speed.unwrap_or(config.playback.speed);
    if speed <= 0.0 {
        return Err(CliError::Config(format!(
            "Replay speed must be positive, got {}",
            speed
        )));
    }

    let airports = load_airports(&args.airports)?;
    let feed = FlightFeed::load(&args.flights)?;
    let (flights, stats) = normalize_with_resolution(&feed.data, &airports, count);
    if stats.dropped() > 0 {
        warn!(
            dropped = stats.dropped(),
            missing_airport = stats.missing_airport,
            bad_timestamp = stats.bad_timestamp,
            non_positive_duration = stats.non_positive_duration,
            "Skipped unusable flight records"
        );
    }

    let clock = if args.lookback {
        let hours = args.hours.unwrap_or(config.playback.lookback_hours);
        PlaybackClock::lookback_hours(Utc::now().timestamp(), hours)
    } else {
        PlaybackClock::for_flights(&flights)
            .ok_or_else(|| CliError::NoFlights(args.flights.display().to_string()))?
    };
    let clock = clock.with_speed(speed)?;

    println!("FlightArc Simulation");
    println!("====================");
    println!();
    println!("Flights:  {} of {} records", flights.len(), stats.total());
    println!(
        "Window:   {} .. {}",
        format_unix(clock.start()),
        format_unix(clock.end())
    );
    println!("Speed:    {}x", clock.speed());
    println!("Policy:   {}", policy);
    println!(
        "Pacing:   {} fps{}",
        args.fps,
        if args.realtime { " (real time)" } else { "" }
    );
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = shutdown.clone();
    ctrlc::set_handler(move || {
        shutdown_clone.store(true, Ordering::SeqCst);
    })
    .map_err(|e| CliError::Signal(e.to_string()))?;

    let mut replay = Replay::new(&flights, clock, policy);
    let bar = progress_bar(replay.clock.window().duration());
    let frame_interval = Duration::from_secs_f64(1.0 / f64::from(args.fps));
    let every = args.every.max(1);

    let mut now = Instant::now();
    replay.clock.play(now);

    while replay.clock.is_playing() {
        if shutdown.load(Ordering::SeqCst) {
            replay.clock.pause();
            break;
        }

        if args.realtime {
            thread::sleep(frame_interval);
            now = Instant::now();
        } else {
            now += frame_interval;
        }

        let frame = replay.step(now);
        bar.set_position(replay.elapsed());
        bar.set_message(format!("{} active", frame.len()));

        if !args.quiet && replay.frames % every == 0 {
            bar.println(render_summary(&frame, replay.clock.current()));
        }
    }

    let stopped = shutdown.load(Ordering::SeqCst);
    if stopped {
        bar.abandon_with_message("stopped");
    } else {
        bar.finish_with_message("done");
    }

    info!(
        frames = replay.frames,
        time = replay.clock.current(),
        stopped,
        "Simulation finished"
    );

    let last = render_frame(&flights, replay.clock.current(), ArrivalPolicy::Visible);
    println!();
    println!("Session Summary");
    println!("───────────────");
    println!(
        "  {} at {}",
        if stopped { "Stopped" } else { "Finished" },
        format_unix(replay.clock.current())
    );
    println!("  Frames:   {}", replay.frames);
    println!(
        "  Landed:   {} of {}",
        last.iter().filter(|f| f.has_landed()).count(),
        flights.len()
    );
    Ok(())
}

/// Clock plus flights, advanced one frame at a time.
struct Replay<'a> {
    flights: &'a [NormalizedFlight],
    clock: PlaybackClock,
    policy: ArrivalPolicy,
    frames: u64,
}

impl<'a> Replay<'a> {
    fn new(flights: &'a [NormalizedFlight], clock: PlaybackClock, policy: ArrivalPolicy) -> Self {
        Self {
            flights,
            clock,
            policy,
            frames: 0,
        }
    }

    /// Tick the clock to wall time `now` and evaluate every flight.
    fn step(&mut self, now: Instant) -> Vec<FlightFrame<'a>> {
        self.clock.tick(now);
        self.frames += 1;
        render_frame(self.flights, self.clock.current(), self.policy)
    }

    /// Simulated seconds played so far.
    fn elapsed(&self) -> u64 {
        u64::try_from(self.clock.current() - self.clock.start()).unwrap_or(0)
    }
}

fn progress_bar(length: i64) -> ProgressBar {
    let bar = ProgressBar::new(u64::try_from(length).unwrap_or(0).max(1));
    let style = ProgressStyle::with_template("{bar:40.cyan/blue} {percent:>3}% {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    bar.set_style(style);
    bar
}

/// One header line plus one line per flight in the frame.
fn render_summary(frame: &[FlightFrame<'_>], time: i64) -> String {
    let airborne = frame.iter().filter(|f| f.is_airborne()).count();
    let landed = frame.iter().filter(|f| f.has_landed()).count();

    let mut out = String::new();
    let _ = write!(
        out,
        "[{}] {} active ({} airborne, {} landed)",
        format_unix(time),
        frame.len(),
        airborne,
        landed
    );

    for entry in frame {
        let record = entry.flight.record();
        let route = format!(
            "{} → {}",
            record.departure.icao.as_deref().unwrap_or("?"),
            record.arrival.icao.as_deref().unwrap_or("?")
        );
        let heading = entry
            .sample
            .orientation
            .map(format_heading)
            .unwrap_or_else(|| "-".to_string());
        let _ = write!(
            out,
            "\n    {:<8} {:<12} {:>3.0}%  {}  {}",
            record.designator().unwrap_or("?"),
            route,
            entry.sample.progress * 100.0,
            entry.sample.position,
            heading
        );
    }

    out
}
