//! Seekable simulation clock.
//!
//! The clock never schedules itself. The render loop calls
//! [`PlaybackClock::tick`] once per frame with the current wall time, and
//! the clock advances by the elapsed real time scaled by the speed
//! multiplier.

use std::fmt;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info};

use crate::flight::NormalizedFlight;

use super::window::TimeWindow;
use super::{DEFAULT_SPEED_MULTIPLIER, SECONDS_PER_HOUR};

/// Errors raised when configuring a clock.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ClockError {
    #[error("Start bound {start} is after end bound {end}")]
    InvertedBounds { start: i64, end: i64 },

    #[error("Invalid speed multiplier {0} (must be finite and non-negative)")]
    InvalidSpeed(f64),
}

/// Whether the clock is advancing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Paused,
    Playing,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackState::Paused => f.write_str("paused"),
            PlaybackState::Playing => f.write_str("playing"),
        }
    }
}

/// Simulated time cursor bounded by `[start, end]` (unix seconds).
///
/// `start <= current <= end` holds after every operation. Reaching `end`
/// while playing pauses the clock; playback does not loop.
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    start: i64,
    end: i64,
    current: i64,
    speed: f64,
    state: PlaybackState,
    /// Wall time of the last tick (or of `play`). `None` after a seek so the
    /// next tick re-anchors instead of jumping.
    last_tick: Option<Instant>,
    /// Fractional simulated seconds not yet applied.
    carry: f64,
}

impl PlaybackClock {
    /// Create a paused clock positioned at `start`.
    pub fn new(start: i64, end: i64) -> Result<Self, ClockError> {
        TimeWindow::new(start, end).map(Self::from_window)
    }

    /// Paused clock positioned at the start of `window`.
    pub fn from_window(window: TimeWindow) -> Self {
        Self {
            start: window.start(),
            end: window.end(),
            current: window.start(),
            speed: DEFAULT_SPEED_MULTIPLIER,
            state: PlaybackState::Paused,
            last_tick: None,
            carry: 0.0,
        }
    }

    /// Clock spanning the earliest departure to the latest arrival.
    ///
    /// Returns `None` for an empty flight list.
    pub fn for_flights(flights: &[NormalizedFlight]) -> Option<Self> {
        TimeWindow::of_flights(flights).map(Self::from_window)
    }

    /// Clock covering the `window_secs` seconds leading up to `now_unix`.
    pub fn lookback(now_unix: i64, window_secs: u64) -> Self {
        Self::from_window(TimeWindow::lookback(now_unix, window_secs))
    }

    /// Clock covering the last `hours` hours before `now_unix`.
    pub fn lookback_hours(now_unix: i64, hours: u32) -> Self {
        Self::lookback(now_unix, u64::from(hours) * SECONDS_PER_HOUR)
    }

    /// Builder-style [`set_speed`](Self::set_speed).
    pub fn with_speed(mut self, speed: f64) -> Result<Self, ClockError> {
        self.set_speed(speed)?;
        Ok(self)
    }

    // ==================== Accessors ====================

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    /// The `[start, end]` bounds.
    pub fn window(&self) -> TimeWindow {
        TimeWindow {
            start: self.start,
            end: self.end,
        }
    }

    /// Current simulated time, unix seconds.
    pub fn current(&self) -> i64 {
        self.current
    }

    /// Simulated seconds per real second.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Whether the cursor sits on the end bound.
    pub fn at_end(&self) -> bool {
        self.current >= self.end
    }

    /// Fraction of the window already played, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.window().fraction(self.current)
    }

    // ==================== Transitions ====================

    /// Start advancing from wall time `now`. No effect while already playing.
    pub fn play(&mut self, now: Instant) {
        if self.state == PlaybackState::Playing {
            return;
        }
        self.state = PlaybackState::Playing;
        self.last_tick = Some(now);
        self.carry = 0.0;
        debug!(current = self.current, speed = self.speed, "Playback started");
    }

    /// Stop advancing. No effect while already paused.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Paused {
            return;
        }
        self.state = PlaybackState::Paused;
        self.last_tick = None;
        self.carry = 0.0;
        debug!(current = self.current, "Playback paused");
    }

    /// Play when paused, pause when playing.
    pub fn toggle(&mut self, now: Instant) {
        match self.state {
            PlaybackState::Paused => self.play(now),
            PlaybackState::Playing => self.pause(),
        }
    }

    /// Move the cursor to `time`, clamped into the bounds.
    ///
    /// The playing state is kept. While playing, the next tick re-anchors
    /// its wall-time reference rather than applying the time spent before
    /// the seek.
    pub fn seek(&mut self, time: i64) {
        self.current = time.clamp(self.start, self.end);
        self.last_tick = None;
        self.carry = 0.0;
        debug!(requested = time, current = self.current, "Playback seek");
    }

    /// Change the speed multiplier.
    pub fn set_speed(&mut self, speed: f64) -> Result<(), ClockError> {
        if !speed.is_finite() || speed < 0.0 {
            return Err(ClockError::InvalidSpeed(speed));
        }
        self.speed = speed;
        Ok(())
    }

    /// Advance by the wall time elapsed since the previous tick.
    ///
    /// Adds `floor(elapsed * speed)` simulated seconds, carrying the
    /// fractional remainder to the next tick. Reaching the end bound clamps
    /// the cursor and pauses. Returns the number of simulated seconds
    /// advanced; a tick while paused is a no-op returning 0.
    pub fn tick(&mut self, now: Instant) -> i64 {
        if self.state == PlaybackState::Paused {
            return 0;
        }

        let Some(last) = self.last_tick.replace(now) else {
            return 0;
        };

        let elapsed = now.saturating_duration_since(last).as_secs_f64();
        let advance = elapsed * self.speed + self.carry;
        let whole = advance.floor();
        self.carry = advance - whole;

        let before = self.current;
        // `as` saturates for out-of-range floats
        let target = self.current.saturating_add(whole as i64);

        if target >= self.end {
            self.current = self.end;
            self.state = PlaybackState::Paused;
            self.last_tick = None;
            self.carry = 0.0;
            info!(end = self.end, "Playback reached end of window");
        } else {
            self.current = target;
        }

        self.current - before
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::flight::FlightRecord;
    use crate::geo::GeoPoint;

    const START: i64 = 1_731_888_000;
    const END: i64 = START + 86_400;

    fn clock() -> PlaybackClock {
        PlaybackClock::new(START, END)
            .unwrap()
            .with_speed(100.0)
            .unwrap()
    }

    #[test]
    fn test_new_clock_is_paused_at_start() {
        let c = PlaybackClock::new(START, END).unwrap();
        assert_eq!(c.current(), START);
        assert_eq!(c.state(), PlaybackState::Paused);
        assert_eq!(c.speed(), DEFAULT_SPEED_MULTIPLIER);
        assert_eq!(c.progress(), 0.0);
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        assert_eq!(
            PlaybackClock::new(END, START).unwrap_err(),
            ClockError::InvertedBounds {
                start: END,
                end: START
            }
        );
    }

    #[test]
    fn test_invalid_speed_rejected() {
        let mut c = clock();
        assert!(c.set_speed(-1.0).is_err());
        assert!(c.set_speed(f64::NAN).is_err());
        assert!(c.set_speed(f64::INFINITY).is_err());
        assert_eq!(c.speed(), 100.0);
        assert!(c.set_speed(0.0).is_ok());
    }

    #[test]
    fn test_tick_advances_by_scaled_elapsed_time() {
        let mut c = clock();
        let base = Instant::now();
        c.play(base);

        let advanced = c.tick(base + Duration::from_secs(2));
        assert_eq!(advanced, 200);
        assert_eq!(c.current(), START + 200);

        let advanced = c.tick(base + Duration::from_millis(2_500));
        assert_eq!(advanced, 50);
        assert_eq!(c.current(), START + 250);
    }

    #[test]
    fn test_tick_while_paused_is_noop() {
        let mut c = clock();
        let base = Instant::now();
        assert_eq!(c.tick(base + Duration::from_secs(10)), 0);
        assert_eq!(c.current(), START);
        assert_eq!(c.state(), PlaybackState::Paused);
    }

    #[test]
    fn test_pause_stops_advancement() {
        let mut c = clock();
        let base = Instant::now();
        c.play(base);
        c.tick(base + Duration::from_secs(1));
        c.pause();

        assert_eq!(c.tick(base + Duration::from_secs(60)), 0);
        assert_eq!(c.current(), START + 100);

        // Resuming measures from the resume instant, not the pause
        c.play(base + Duration::from_secs(60));
        assert_eq!(c.tick(base + Duration::from_secs(61)), 100);
        assert_eq!(c.current(), START + 200);
    }

    #[test]
    fn test_seek_clamps_to_bounds() {
        let mut c = clock();
        c.seek(START - 1_000);
        assert_eq!(c.current(), START);

        c.seek(END + 1_000);
        assert_eq!(c.current(), END);
        assert!(c.at_end());

        c.seek(START + 42);
        assert_eq!(c.current(), START + 42);
    }

    #[test]
    fn test_seek_while_playing_keeps_state_and_reanchors() {
        let mut c = clock();
        let base = Instant::now();
        c.play(base);

        c.seek(START + 1_000);
        assert_eq!(c.state(), PlaybackState::Playing);

        // Ten seconds passed since play, but the seek reset the reference
        assert_eq!(c.tick(base + Duration::from_secs(10)), 0);
        assert_eq!(c.current(), START + 1_000);

        assert_eq!(c.tick(base + Duration::from_secs(11)), 100);
        assert_eq!(c.current(), START + 1_100);
    }

    #[test]
    fn test_tick_past_end_clamps_and_pauses() {
        let mut c = clock();
        let base = Instant::now();
        c.seek(END - 50);
        c.play(base);

        let advanced = c.tick(base + Duration::from_secs(5));
        assert_eq!(advanced, 50);
        assert_eq!(c.current(), END);
        assert_eq!(c.state(), PlaybackState::Paused);
        assert_eq!(c.progress(), 1.0);

        // Stays put afterwards
        assert_eq!(c.tick(base + Duration::from_secs(50)), 0);
        assert_eq!(c.current(), END);
    }

    #[test]
    fn test_fractional_advance_is_carried() {
        let mut c = PlaybackClock::new(START, END).unwrap().with_speed(1.0).unwrap();
        let base = Instant::now();
        c.play(base);

        // 60 fps at 1x: each frame alone is under a simulated second
        let mut total = 0;
        for frame in 1..=60u64 {
            total += c.tick(base + Duration::from_micros(frame * 16_667));
        }
        assert_eq!(total, 1);
        assert_eq!(c.current(), START + 1);
    }

    #[test]
    fn test_toggle() {
        let mut c = clock();
        let base = Instant::now();
        c.toggle(base);
        assert!(c.is_playing());
        c.toggle(base);
        assert!(!c.is_playing());
    }

    #[test]
    fn test_lookback_window() {
        let now = START + 86_400;
        let c = PlaybackClock::lookback_hours(now, 24);
        assert_eq!(c.start(), START);
        assert_eq!(c.end(), now);
        assert_eq!(c.current(), START);
    }

    #[test]
    fn test_for_flights_spans_all_flights() {
        let a = GeoPoint::new(0.0, 0.0).unwrap();
        let b = GeoPoint::new(10.0, 10.0).unwrap();
        let flights = vec![
            NormalizedFlight::new(FlightRecord::default(), a, b, START + 500, START + 900, 4).unwrap(),
            NormalizedFlight::new(FlightRecord::default(), b, a, START + 100, START + 700, 4).unwrap(),
        ];

        let c = PlaybackClock::for_flights(&flights).unwrap();
        assert_eq!(c.start(), START + 100);
        assert_eq!(c.end(), START + 900);
        assert!(PlaybackClock::for_flights(&[]).is_none());
    }

    #[test]
    fn test_degenerate_window() {
        let mut c = PlaybackClock::new(START, START).unwrap();
        let base = Instant::now();
        assert_eq!(c.progress(), 1.0);
        c.play(base);
        c.tick(base + Duration::from_secs(1));
        assert_eq!(c.current(), START);
        assert_eq!(c.state(), PlaybackState::Paused);
    }
}
