//! Integration tests for lb-output.

use lb_core::{LiftId, Passenger, PassengerId, Tick, TrafficRecord};

use crate::row::{PassengerRow, TickSummaryRow};

fn finished_passenger(id: u32, floor: u32) -> Passenger {
    let mut p = Passenger::new(PassengerId(id), TrafficRecord::new(1, floor));
    p.lift = Some(LiftId(2));
    p.enters_boarding_queue = Some(Tick(1));
    p.enters_lift = Some(Tick(2));
    p.departure_time = Some(Tick(4));
    p.travel_time = Some(8.0);
    p.travel_completed_time = Some(12.0);
    p.return_to_lobby_time = Some(Tick(20));
    p
}

fn summary_row(tick: u64) -> TickSummaryRow {
    TickSummaryRow {
        tick,
        walk_ins:   2,
        dispatched: 3,
        departures: 1,
        completed:  0,
        holding:    4,
        waiting:    5,
        in_transit: 6,
    }
}

#[cfg(test)]
mod row_tests {
    use super::*;

    #[test]
    fn complete_passenger_flattens() {
        let row = PassengerRow::from_passenger(&finished_passenger(7, 9)).unwrap();
        assert_eq!(row.passenger_id, 7);
        assert_eq!(row.lift_id, 2);
        assert_eq!(row.destination_floor, 9);
        assert_eq!(row.arrival_at_building, 1);
        assert_eq!(row.departure_time, 4);
        assert_eq!(row.travel_time, 8.0);
        assert_eq!(row.return_to_lobby_time, 20);
    }

    #[test]
    fn incomplete_passenger_skipped() {
        let mut p = finished_passenger(0, 3);
        p.return_to_lobby_time = None;
        assert!(PassengerRow::from_passenger(&p).is_none());
        assert!(PassengerRow::from_passenger(&Passenger::new(
            PassengerId(1),
            TrafficRecord::new(0, 3)
        ))
        .is_none());
    }
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::csv::{CsvWriter, PASSENGER_HEADER, SUMMARY_HEADER};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("passengers.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
    }

    #[test]
    fn csv_creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("greedy").join("run-1");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join("passengers.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("passengers.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, PASSENGER_HEADER);

        let mut rdr2 = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, SUMMARY_HEADER);
    }

    #[test]
    fn csv_passenger_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let rows: Vec<_> = (0..3)
            .map(|i| PassengerRow::from_passenger(&finished_passenger(i, 5 + i)).unwrap())
            .collect();
        w.write_passengers(&rows).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("passengers.csv")).unwrap();
        let read_rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(read_rows.len(), 3);
        assert_eq!(&read_rows[0][0], "0"); // passenger_id
        assert_eq!(&read_rows[0][1], "2"); // lift_id
        assert_eq!(&read_rows[2][2], "7"); // destination_floor
        assert_eq!(&read_rows[1][7], "8"); // travel_time
    }

    #[test]
    fn csv_tick_summary_row() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(3)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let read_rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(read_rows.len(), 1);
        let fields: Vec<&str> = read_rows[0].iter().collect();
        assert_eq!(fields, ["3", "2", "3", "1", "0", "4", "5", "6"]);
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_batch_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_passengers(&[]).unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use lb_core::{BankConfig, KinematicModel};
    use lb_dispatch::PolicyKind;
    use lb_sim::{SimBuilder, SimObserver, SimReport};

    use super::*;
    use crate::csv::CsvWriter;
    use crate::observer::SimOutputObserver;
    use crate::writer::OutputWriter;
    use crate::{OutputError, OutputResult};

    /// Fails every write with an I/O error, counting attempts.
    #[derive(Default)]
    struct BrokenWriter {
        attempts: usize,
    }

    impl OutputWriter for BrokenWriter {
        fn write_passengers(&mut self, _rows: &[PassengerRow]) -> OutputResult<()> {
            self.attempts += 1;
            Err(OutputError::Io(std::io::Error::other("disk full")))
        }

        fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
            self.attempts += 1;
            Err(OutputError::Io(std::io::Error::other("disk full")))
        }

        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    fn config() -> BankConfig {
        BankConfig {
            lift_count:          2,
            capacity:            4,
            departure_threshold: 0.5,
            kinematics:          KinematicModel::default(),
            iterations:          600,
            seed:                9,
            release_min:         2,
            release_max:         4,
        }
    }

    fn trace() -> Vec<TrafficRecord> {
        (0..16).map(|i| TrafficRecord::new(i, 1 + (i % 6) as u32)).collect()
    }

    #[test]
    fn integration_csv() {
        let mut sim = SimBuilder::new(config())
            .traffic(&trace())
            .policy_kind(PolicyKind::Greedy)
            .build()
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer);
        let report = sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");
        assert_eq!(report.served, 16);

        let mut rdr = csv::Reader::from_path(dir.path().join("passengers.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 16);

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len() as u64, report.ticks_elapsed);
        assert_eq!(&rows[0][0], "0");
    }

    #[test]
    fn first_error_is_kept() {
        let mut obs = SimOutputObserver::new(BrokenWriter::default());
        obs.on_tick_end(&lb_sim::TickStats::default());
        obs.on_arrivals(Tick(5), LiftId(0), &[finished_passenger(0, 3)]);
        obs.on_sim_end(&SimReport {
            policy:        "greedy",
            ticks_elapsed: 1,
            iterations:    10,
            served:        1,
            total:         1,
            timed_out:     false,
            passengers:    Default::default(),
        });

        let err = obs.take_error().expect("error stored");
        assert!(matches!(err, OutputError::Io(_)));
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().attempts, 2);
    }

    #[test]
    fn incomplete_arrivals_not_written() {
        let mut obs = SimOutputObserver::new(BrokenWriter::default());
        let fresh = Passenger::new(PassengerId(0), TrafficRecord::new(0, 3));
        obs.on_arrivals(Tick(1), LiftId(0), &[fresh]);
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().attempts, 0);
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_passenger_count() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        let rows: Vec<_> = (0..3)
            .map(|i| PassengerRow::from_passenger(&finished_passenger(i, 4)).unwrap())
            .collect();
        w.write_passengers(&rows).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM passengers", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn sqlite_travel_time_is_real() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        let row = PassengerRow::from_passenger(&finished_passenger(0, 4)).unwrap();
        w.write_passengers(&[row]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (travel, done): (f64, f64) = conn
            .query_row(
                "SELECT travel_time, travel_completed_time FROM passengers WHERE passenger_id = 0",
                [],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .unwrap();
        assert_eq!(travel, 8.0);
        assert_eq!(done, 12.0);
    }

    #[test]
    fn sqlite_tick_summary() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(7)).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (tick, waiting, in_transit): (i64, i64, i64) = conn
            .query_row(
                "SELECT tick, waiting, in_transit FROM tick_summaries WHERE tick = 7",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .unwrap();
        assert_eq!(tick, 7);
        assert_eq!(waiting, 5);
        assert_eq!(in_transit, 6);
    }
}
