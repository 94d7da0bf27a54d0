//! lobby: compare the six dispatch policies on one morning rush.
//!
//! Usage: `lobby [TRAFFIC_CSV]`
//!
//! Without an argument a synthetic 30-minute rush is generated from `SEED`.
//! Every policy runs in parallel on the same trace and seed, writes its
//! passengers and tick summaries under `output/lobby/<policy>/`, and prints
//! a boxed report.  Set `RUST_LOG=debug` to see individual departures.

mod report;
mod traffic;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use lb_core::{BankConfig, SimRng, TrafficRecord};
use lb_dispatch::PolicyKind;
use lb_output::{CsvWriter, SimOutputObserver};
use lb_sim::SimBuilder;

use report::PolicyRun;
use traffic::{RushProfile, load_traffic_csv};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:       u64  = 42;
const OUTPUT_DIR: &str = "output/lobby";

// ── Per-policy run ────────────────────────────────────────────────────────────

fn run_policy(kind: PolicyKind, config: &BankConfig, trace: &[TrafficRecord]) -> Result<PolicyRun> {
    let mut sim = SimBuilder::new(config.clone())
        .traffic(trace)
        .policy_kind(kind)
        .build()
        .with_context(|| format!("building {kind} simulation"))?;

    let dir = Path::new(OUTPUT_DIR).join(kind.as_str());
    let writer = CsvWriter::new(&dir).with_context(|| format!("opening {}", dir.display()))?;
    let mut obs = SimOutputObserver::new(writer);

    let t0 = Instant::now();
    let report = sim.run(&mut obs)?;
    let wall_time = t0.elapsed();

    if let Some(e) = obs.take_error() {
        warn!(policy = kind.as_str(), error = %e, "output incomplete");
    }

    Ok(PolicyRun {
        report,
        dispatch_time: sim.dispatch_timings().to_vec(),
        wall_time,
    })
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // 1. Traffic.
    let trace = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => load_traffic_csv(&path)?,
        None => RushProfile::default().generate(&mut SimRng::new(SEED)),
    };
    TrafficRecord::validate_trace(&trace).context("invalid traffic trace")?;

    // 2. Bank.
    let config = BankConfig { seed: SEED, ..BankConfig::default() };
    info!(
        passengers = trace.len(),
        lifts = config.lift_count,
        capacity = config.capacity,
        threshold = config.departure_threshold,
        "traffic ready"
    );

    // 3. Every policy, in parallel.
    let runs: Vec<PolicyRun> = PolicyKind::ALL
        .par_iter()
        .map(|&kind| run_policy(kind, &config, &trace))
        .collect::<Result<_>>()?;

    // 4. Reports, in policy order.
    for run in &runs {
        println!("{}", run.render_box());
    }

    let best = runs
        .iter()
        .filter(|r| !r.report.timed_out)
        .min_by(|a, b| {
            a.report
                .passengers
                .mean_journey_secs
                .total_cmp(&b.report.passengers.mean_journey_secs)
        });
    match best {
        Some(run) => println!(
            "Fastest mean time to destination: {} ({:.1} s)",
            run.report.policy, run.report.passengers.mean_journey_secs
        ),
        None => println!("No policy served the whole trace within {} ticks", config.iterations),
    }
    println!("Per-policy CSV written under {OUTPUT_DIR}/");

    Ok(())
}
