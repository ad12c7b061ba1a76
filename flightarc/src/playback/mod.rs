//! Playback clock driving the animation.
//!
//! # State Machine
//!
//! ```text
//!            play(now)
//!   Paused ────────────► Playing ──┐
//!     ▲  ◄────────────     │       │ tick(now): current += floor(elapsed × speed)
//!     │      pause()       │ ◄─────┘
//!     │                    │
//!     └── tick reaches end ┘   (current clamped to end, no looping)
//!
//!   seek(t): either state, t clamped into [start, end]
//! ```
//!
//! The clock is owned by a single driver (the render loop). Hosts that read
//! it from other threads should copy it; it holds no shared state.

mod clock;
mod window;

pub use clock::{ClockError, PlaybackClock, PlaybackState};
pub use window::TimeWindow;

/// Default simulated seconds per real second.
pub const DEFAULT_SPEED_MULTIPLIER: f64 = 10_000.0;

/// Default look-back window when no flight bounds are used.
pub const DEFAULT_LOOKBACK_HOURS: u32 = 24;

pub(crate) const SECONDS_PER_HOUR: u64 = 3_600;
