//! Departure-time model for sampled agents.
//!
//! # Design
//!
//! Departures are drawn as a whole number of minutes past a base hour:
//!
//!   minute = ceil(uniform(min_minute, max_minute))
//!
//! and rendered as a 4-digit `HHMM` clock string.  Minute 60 rolls over into
//! the next hour, so with the default window the latest departure is `0800`.

use std::fmt;

use crate::DemandRng;

// ── DepartureTime ─────────────────────────────────────────────────────────────

/// A time of day with minute resolution.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct DepartureTime {
    pub hour: u8,
    pub minute: u8,
}

impl DepartureTime {
    /// `minutes` past `base_hour`, normalised so `minute < 60` and the hour
    /// wraps at midnight.
    pub fn from_offset(base_hour: u8, minutes: u32) -> Self {
        let total = base_hour as u32 * 60 + minutes;
        Self {
            hour: ((total / 60) % 24) as u8,
            minute: (total % 60) as u8,
        }
    }

    /// Minutes since midnight.
    #[inline]
    pub fn minutes_of_day(self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }
}

impl fmt::Display for DepartureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}", self.hour, self.minute)
    }
}

// ── DepartureWindow ───────────────────────────────────────────────────────────

/// Window from which each agent's departure time is drawn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DepartureWindow {
    /// Hour of day the offsets count from.  Default: 7.
    pub base_hour: u8,
    /// Lower bound of the uniform draw, in minutes.  Default: 1.
    pub min_minute: u32,
    /// Upper bound of the uniform draw, in minutes.  Default: 60.
    pub max_minute: u32,
}

impl Default for DepartureWindow {
    fn default() -> Self {
        Self { base_hour: 7, min_minute: 1, max_minute: 60 }
    }
}

impl DepartureWindow {
    /// Draw one departure time.
    pub fn sample(&self, rng: &mut DemandRng) -> DepartureTime {
        let (lo, hi) = (self.min_minute.min(self.max_minute), self.min_minute.max(self.max_minute));
        let minute = if lo == hi {
            lo
        } else {
            rng.gen_range(lo as f64..=hi as f64).ceil() as u32
        };
        DepartureTime::from_offset(self.base_hour, minute)
    }
}
