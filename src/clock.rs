//! Engine clock
//!
//! Issues strictly increasing microsecond ticks. A tick is the source of both
//! the `_id` of an inserted document and its `_created`/`_modified` stamps, so
//! ids are unique per engine and `_modified` always moves forward.
//!
//! When the wall clock stalls (two calls inside one microsecond) or moves
//! backwards, the next tick is `last + 1`.
//!
//! Observed floors above [`MAX_FLOOR_MICROS`] are ignored: past 2^53 µs
//! (year 2255) a tick can no longer be told apart from its neighbours as
//! fractional seconds.

use std::time::{SystemTime, UNIX_EPOCH};

/// Highest floor a loaded id or timestamp may raise the clock to
pub const MAX_FLOOR_MICROS: u64 = 1 << 53;

/// Microseconds since the Unix epoch, or 0 if the system clock is before it
#[inline]
pub fn wall_clock_micros() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0)
}

/// One reading of the engine clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tick(u64);

impl Tick {
    pub fn from_micros(micros: u64) -> Self {
        Self(micros)
    }

    pub fn micros(self) -> u64 {
        self.0
    }

    /// Document identifier form: the decimal microsecond count
    pub fn id(self) -> String {
        self.0.to_string()
    }

    /// Timestamp form: fractional seconds since the epoch
    pub fn seconds(self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }
}

/// Monotonic tick source
#[derive(Debug, Default)]
pub struct Clock {
    last_micros: u64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the floor to `micros` if it is higher than the current one.
    ///
    /// Values above [`MAX_FLOOR_MICROS`] are ignored.
    pub fn observe(&mut self, micros: u64) {
        if micros <= MAX_FLOOR_MICROS {
            self.last_micros = self.last_micros.max(micros);
        }
    }

    /// Raise the floor to a `_created`/`_modified` timestamp in seconds
    pub fn observe_seconds(&mut self, seconds: f64) {
        let micros = seconds * 1_000_000.0;
        if micros.is_finite() && micros > 0.0 && micros <= MAX_FLOOR_MICROS as f64 {
            self.observe(micros.round() as u64);
        }
    }

    pub fn tick(&mut self) -> Tick {
        let now = wall_clock_micros();
        let next = if now > self.last_micros {
            now
        } else {
            self.last_micros.saturating_add(1)
        };
        self.last_micros = next;
        Tick(next)
    }
}
