//! Simulation time model.
//!
//! Time is a monotonically increasing integer `Tick`.  One tick is one
//! simulated second, so kinematic travel times (seconds, `f64`) and tick
//! stamps share a unit: a trip that departs at tick `t` and takes `r`
//! seconds brings the lift back to the lobby at tick `ceil(t + r)`.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter (one simulated second).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// The tick as fractional seconds, for mixing with kinematic times.
    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64
    }

    /// The first tick at or after `secs` seconds (`ceil`).
    ///
    /// Negative and non-finite inputs clamp to `Tick::ZERO`.
    #[inline]
    pub fn ceil_secs(secs: f64) -> Tick {
        if secs.is_finite() && secs > 0.0 {
            Tick(secs.ceil() as u64)
        } else {
            Tick::ZERO
        }
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The simulation clock: the current tick and the iteration budget.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
    /// Exclusive upper bound on `current_tick` for a full run.
    pub iterations: u64,
}

impl SimClock {
    pub fn new(iterations: u64) -> Self {
        Self {
            current_tick: Tick::ZERO,
            iterations,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// The tick at which a full run times out.
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.iterations)
    }

    /// `true` once the iteration budget is spent.
    #[inline]
    pub fn timed_out(&self) -> bool {
        self.current_tick >= self.end_tick()
    }

    /// Break elapsed time into (hour, minute, second) components.
    pub fn elapsed_hms(&self) -> (u64, u32, u32) {
        let secs = self.current_tick.0;
        let hours = secs / 3_600;
        let minutes = ((secs % 3_600) / 60) as u32;
        let seconds = (secs % 60) as u32;
        (hours, minutes, seconds)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.elapsed_hms();
        write!(f, "{} ({:02}:{:02}:{:02})", self.current_tick, h, m, s)
    }
}
