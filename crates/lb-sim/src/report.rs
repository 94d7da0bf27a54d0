//! Per-tick counters and the end-of-run report.

use std::fmt;

use lb_core::{Passenger, Tick};

// ── TickStats ─────────────────────────────────────────────────────────────────

/// What happened during one tick, handed to
/// [`SimObserver::on_tick_end`][crate::SimObserver::on_tick_end].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    pub tick:       Tick,
    /// Passengers that walked into the lobby this tick.
    pub walk_ins:   usize,
    /// Passengers released from the holding queue to a lift.
    pub dispatched: usize,
    pub departures: usize,
    /// Passengers whose lift returned to the lobby this tick.
    pub completed:  usize,
    /// Holding queue length after dispatch.
    pub holding:    usize,
    /// Boarding-queue passengers across the bank after the lift phase.
    pub waiting:    usize,
    /// On-board passengers across the bank after the lift phase.
    pub in_transit: usize,
}

// ── PassengerStats ────────────────────────────────────────────────────────────

/// Aggregates over the completed passengers of a run.  All zero when no one
/// was served.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PassengerStats {
    /// Mean ticks from walking in to boarding.
    pub mean_wait_ticks:    f64,
    pub max_wait_ticks:     u64,
    /// Mean seconds from walking in to reaching the destination floor.
    pub mean_journey_secs:  f64,
    /// Mean seconds of the trips that carried them.
    pub mean_trip_secs:     f64,
}

impl PassengerStats {
    pub fn from_passengers(passengers: &[Passenger]) -> Self {
        if passengers.is_empty() {
            return Self::default();
        }
        let n = passengers.len() as f64;

        let waits: Vec<u64> = passengers.iter().filter_map(Passenger::wait_ticks).collect();
        let journeys: Vec<f64> = passengers.iter().filter_map(Passenger::journey_secs).collect();
        let trips: Vec<f64> = passengers
            .iter()
            .filter_map(|p| Some(p.return_to_lobby_time?.since(p.departure_time?) as f64))
            .collect();

        Self {
            mean_wait_ticks:   waits.iter().sum::<u64>() as f64 / n,
            max_wait_ticks:    waits.iter().copied().max().unwrap_or(0),
            mean_journey_secs: journeys.iter().sum::<f64>() / n,
            mean_trip_secs:    trips.iter().sum::<f64>() / n,
        }
    }
}

// ── SimReport ─────────────────────────────────────────────────────────────────

/// Outcome of [`Sim::run`][crate::Sim::run].
#[derive(Clone, Debug, PartialEq)]
pub struct SimReport {
    pub policy:        &'static str,
    /// Ticks the loop actually ran.
    pub ticks_elapsed: u64,
    /// Tick budget from the configuration.
    pub iterations:    u64,
    /// Passengers that completed a round trip.
    pub served:        usize,
    /// Passengers in the traffic trace.
    pub total:         usize,
    /// `true` when the budget ran out before everyone was served.
    pub timed_out:     bool,
    pub passengers:    PassengerStats,
}

impl SimReport {
    #[inline]
    pub fn unserved(&self) -> usize {
        self.total - self.served
    }

    /// Share of the trace served, in percent.  An empty trace counts as
    /// fully processed.
    pub fn percent_processed(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.served as f64 / self.total as f64 * 100.0
        }
    }
}

impl fmt::Display for SimReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}/{} served ({:.1}%) in {} ticks",
            self.policy,
            self.served,
            self.total,
            self.percent_processed(),
            self.ticks_elapsed
        )?;
        if self.timed_out {
            write!(f, " [timed out after {} iterations]", self.iterations)?;
        }
        Ok(())
    }
}
