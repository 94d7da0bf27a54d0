//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use lb_core::{LiftId, Passenger, Tick};
use lb_sim::{SimObserver, SimReport, TickStats};

use crate::row::{PassengerRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes completed passengers and tick summaries to
/// any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value.  After `sim.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_arrivals(&mut self, _tick: Tick, _lift: LiftId, passengers: &[Passenger]) {
        let rows: Vec<PassengerRow> =
            passengers.iter().filter_map(PassengerRow::from_passenger).collect();
        if !rows.is_empty() {
            let result = self.writer.write_passengers(&rows);
            self.store_err(result);
        }
    }

    fn on_tick_end(&mut self, stats: &TickStats) {
        let result = self.writer.write_tick_summary(&TickSummaryRow::from(stats));
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _report: &SimReport) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
