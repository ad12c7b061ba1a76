//! Simulated time ranges.

use std::fmt;

use crate::flight::NormalizedFlight;

use super::clock::ClockError;

/// Closed range of unix seconds `[start, end]` with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub(super) start: i64,
    pub(super) end: i64,
}

impl TimeWindow {
    pub fn new(start: i64, end: i64) -> Result<Self, ClockError> {
        if start > end {
            return Err(ClockError::InvertedBounds { start, end });
        }
        Ok(Self { start, end })
    }

    /// Earliest departure to latest arrival. `None` for no flights.
    pub fn of_flights(flights: &[NormalizedFlight]) -> Option<Self> {
        let start = flights.iter().map(|f| f.departure_time()).min()?;
        let end = flights.iter().map(|f| f.arrival_time()).max()?;
        Self::new(start, end).ok()
    }

    /// The `window_secs` seconds leading up to `now_unix`.
    pub fn lookback(now_unix: i64, window_secs: u64) -> Self {
        let window = i64::try_from(window_secs).unwrap_or(i64::MAX);
        Self {
            start: now_unix.saturating_sub(window),
            end: now_unix,
        }
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    /// Length in seconds.
    pub fn duration(&self) -> i64 {
        self.end.saturating_sub(self.start)
    }

    pub fn contains(&self, time: i64) -> bool {
        (self.start..=self.end).contains(&time)
    }

    pub fn clamp(&self, time: i64) -> i64 {
        time.clamp(self.start, self.end)
    }

    /// Position of `time` within the window in `[0, 1]`; 1 for an empty window.
    pub fn fraction(&self, time: i64) -> f64 {
        let span = self.duration();
        if span <= 0 {
            return 1.0;
        }
        ((self.clamp(time) as f64 - self.start as f64) / span as f64).clamp(0.0, 1.0)
    }

    /// Smallest window covering both.
    pub fn union(&self, other: &TimeWindow) -> TimeWindow {
        TimeWindow {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
