//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `passengers.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, PassengerRow, TickSummaryRow};

pub(crate) const PASSENGER_HEADER: [&str; 10] = [
    "passenger_id",
    "lift_id",
    "destination_floor",
    "arrival_at_building",
    "enters_boarding_queue",
    "enters_lift",
    "departure_time",
    "travel_time",
    "travel_completed_time",
    "return_to_lobby_time",
];

pub(crate) const SUMMARY_HEADER: [&str; 8] = [
    "tick",
    "walk_ins",
    "dispatched",
    "departures",
    "completed",
    "holding",
    "waiting",
    "in_transit",
];

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    passengers: Writer<File>,
    summaries:  Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the two CSV files, and write the header
    /// rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut passengers = Writer::from_path(dir.join("passengers.csv"))?;
        passengers.write_record(PASSENGER_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        Ok(Self {
            passengers,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_passengers(&mut self, rows: &[PassengerRow]) -> OutputResult<()> {
        for row in rows {
            self.passengers.write_record(&[
                row.passenger_id.to_string(),
                row.lift_id.to_string(),
                row.destination_floor.to_string(),
                row.arrival_at_building.to_string(),
                row.enters_boarding_queue.to_string(),
                row.enters_lift.to_string(),
                row.departure_time.to_string(),
                row.travel_time.to_string(),
                row.travel_completed_time.to_string(),
                row.return_to_lobby_time.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.walk_ins.to_string(),
            row.dispatched.to_string(),
            row.departures.to_string(),
            row.completed.to_string(),
            row.holding.to_string(),
            row.waiting.to_string(),
            row.in_transit.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.passengers.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
