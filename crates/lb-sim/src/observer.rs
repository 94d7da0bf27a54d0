//! Simulation observer trait for progress reporting and data collection.

use lb_core::{LiftId, Passenger, PassengerId, Tick};

use crate::{SimReport, TickStats};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, stats: &TickStats) {
///         if stats.tick.0 % self.interval == 0 {
///             println!("{}: {} waiting", stats.tick, stats.waiting);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the policy assigns `passenger` to `lift`.
    fn on_dispatch(&mut self, _tick: Tick, _passenger: PassengerId, _lift: LiftId) {}

    /// Called when `lift` returns to the lobby with `passengers`, whose
    /// timestamps are now complete.
    fn on_arrivals(&mut self, _tick: Tick, _lift: LiftId, _passengers: &[Passenger]) {}

    /// Called at the end of each tick, before the clock advances.
    fn on_tick_end(&mut self, _stats: &TickStats) {}

    /// Called once after the loop stops.
    fn on_sim_end(&mut self, _report: &SimReport) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
