//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `passengers` and `tick_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{OutputResult, PassengerRow, TickSummaryRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS passengers (
                 passenger_id          INTEGER PRIMARY KEY,
                 lift_id               INTEGER NOT NULL,
                 destination_floor     INTEGER NOT NULL,
                 arrival_at_building   INTEGER NOT NULL,
                 enters_boarding_queue INTEGER NOT NULL,
                 enters_lift           INTEGER NOT NULL,
                 departure_time        INTEGER NOT NULL,
                 travel_time           REAL    NOT NULL,
                 travel_completed_time REAL    NOT NULL,
                 return_to_lobby_time  INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick       INTEGER PRIMARY KEY,
                 walk_ins   INTEGER NOT NULL,
                 dispatched INTEGER NOT NULL,
                 departures INTEGER NOT NULL,
                 completed  INTEGER NOT NULL,
                 holding    INTEGER NOT NULL,
                 waiting    INTEGER NOT NULL,
                 in_transit INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_passengers(&mut self, rows: &[PassengerRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO passengers \
                 (passenger_id, lift_id, destination_floor, arrival_at_building, \
                  enters_boarding_queue, enters_lift, departure_time, travel_time, \
                  travel_completed_time, return_to_lobby_time) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.passenger_id,
                    row.lift_id,
                    row.destination_floor,
                    row.arrival_at_building,
                    row.enters_boarding_queue,
                    row.enters_lift,
                    row.departure_time,
                    row.travel_time,
                    row.travel_completed_time,
                    row.return_to_lobby_time,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries \
             (tick, walk_ins, dispatched, departures, completed, holding, waiting, in_transit) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            rusqlite::params![
                row.tick,
                row.walk_ins,
                row.dispatched,
                row.departures,
                row.completed,
                row.holding,
                row.waiting,
                row.in_transit,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
