//! Traffic traces: CSV loading and a seeded morning-rush generator.
//!
//! # CSV format
//!
//! ```csv
//! arrival_time,destination_floor
//! 0,7
//! 0,3
//! 2,12
//! ```
//!
//! Rows must be in non-decreasing `arrival_time` order; the simulation
//! builder rejects anything else.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use lb_core::{SimRng, TrafficRecord};

#[derive(Deserialize)]
struct TrafficRow {
    arrival_time:      u64,
    destination_floor: u32,
}

/// Load a trace from a CSV file.
pub fn load_traffic_csv(path: &Path) -> Result<Vec<TrafficRecord>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening traffic file {}", path.display()))?;
    load_traffic_reader(file).with_context(|| format!("reading {}", path.display()))
}

/// Like [`load_traffic_csv`] but accepts any `Read` source.
pub fn load_traffic_reader<R: Read>(reader: R) -> Result<Vec<TrafficRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut trace = Vec::new();
    for (line, result) in csv_reader.deserialize::<TrafficRow>().enumerate() {
        let row = result.with_context(|| format!("traffic row {}", line + 1))?;
        trace.push(TrafficRecord::new(row.arrival_time, row.destination_floor));
    }
    Ok(trace)
}

// ── Synthetic traffic ─────────────────────────────────────────────────────────

/// Shape of a generated morning rush.
#[derive(Clone, Debug)]
pub struct RushProfile {
    /// Ticks over which people arrive.
    pub duration:     u64,
    /// Highest floor served; destinations are uniform over `1..=floors`.
    pub floors:       u32,
    /// Expected arrivals per tick at the peak, reached mid-rush.
    pub peak_rate:    f64,
    /// Upper bound on arrivals in a single tick.
    pub max_per_tick: u32,
}

impl Default for RushProfile {
    fn default() -> Self {
        Self {
            duration:     30 * 60,
            floors:       20,
            peak_rate:    1.2,
            max_per_tick: 4,
        }
    }
}

impl RushProfile {
    /// Expected arrivals at `tick`: a triangle rising from zero to
    /// `peak_rate` at the midpoint and back.
    pub fn rate_at(&self, tick: u64) -> f64 {
        if self.duration == 0 || tick >= self.duration {
            return 0.0;
        }
        let half = self.duration as f64 / 2.0;
        let offset = (tick as f64 + 0.5 - half).abs();
        self.peak_rate * (1.0 - offset / half).max(0.0)
    }

    /// Draw a trace.  Each tick makes `max_per_tick` Bernoulli trials whose
    /// expected sum is `rate_at(tick)`.
    pub fn generate(&self, rng: &mut SimRng) -> Vec<TrafficRecord> {
        let mut trace = Vec::new();
        if self.floors == 0 || self.max_per_tick == 0 {
            return trace;
        }
        for tick in 0..self.duration {
            let p = self.rate_at(tick) / f64::from(self.max_per_tick);
            for _ in 0..self.max_per_tick {
                if rng.gen_bool(p) {
                    trace.push(TrafficRecord::new(tick, rng.gen_range(1..=self.floors)));
                }
            }
        }
        trace
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use lb_core::Tick;

    use super::*;

    #[test]
    fn reads_csv_rows() {
        let csv = "arrival_time,destination_floor\n0,7\n0,3\n2,12\n";
        let trace = load_traffic_reader(Cursor::new(csv)).unwrap();
        assert_eq!(
            trace,
            [TrafficRecord::new(0, 7), TrafficRecord::new(0, 3), TrafficRecord::new(2, 12)]
        );
    }

    #[test]
    fn bad_row_reports_line() {
        let csv = "arrival_time,destination_floor\n0,7\nsoon,3\n";
        let err = load_traffic_reader(Cursor::new(csv)).unwrap_err();
        assert!(format!("{err:#}").contains("traffic row 2"), "{err:#}");
    }

    #[test]
    fn rate_peaks_mid_rush() {
        let profile = RushProfile { duration: 100, ..RushProfile::default() };
        assert!(profile.rate_at(0) < profile.rate_at(25));
        assert!(profile.rate_at(25) < profile.rate_at(50));
        assert!(profile.rate_at(99) < profile.rate_at(75));
        assert_eq!(profile.rate_at(100), 0.0);
    }

    #[test]
    fn generated_trace_is_valid_and_seeded() {
        let profile = RushProfile::default();
        let a = profile.generate(&mut SimRng::new(3));
        let b = profile.generate(&mut SimRng::new(3));
        assert_eq!(a, b);
        assert!(!a.is_empty());
        assert!(TrafficRecord::validate_trace(&a).is_ok());
        assert!(a.iter().all(|r| (1..=profile.floors).contains(&r.destination_floor)));
        assert!(a.iter().all(|r| r.arrival_time < Tick(profile.duration)));
    }
}
