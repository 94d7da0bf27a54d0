//! The `Sim` struct and its tick loop.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use lb_core::{BankConfig, LiftId, Passenger, SimClock, SimRng, Tick};
use lb_dispatch::{DispatchPolicy, Policy};
use lb_lift::Lift;
use tracing::{debug, info, warn};

use crate::{PassengerStats, SimError, SimObserver, SimReport, SimResult, TickStats};

/// The main simulation runner.
///
/// `Sim<P>` owns the lift bank and drives the four-phase tick loop:
///
/// 1. **Walk-ins**: traffic whose `arrival_time` has come moves from the
///    pending trace into the holding queue, in trace order.
/// 2. **Dispatch**: `release_min..=release_max` (seeded) passengers leave
///    the holding queue; the policy picks a lift for each.
/// 3. **Lifts**: in bank order, every lift samples its queue length, then
///    an idle lift runs `check_departure` and a departed one
///    `check_arrival`.  Returning riders join the completed set.
/// 4. **Advance**: the clock moves one tick.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: DispatchPolicy = Policy> {
    /// Bank configuration the simulation was built from.
    pub config: BankConfig,

    /// Current tick and iteration budget.
    pub clock: SimClock,

    /// The lift bank, indexed by `LiftId`.
    pub lifts: Vec<Lift>,

    /// Assignment policy.  Called once per released passenger.
    pub policy: P,

    /// Trace passengers that have not walked in yet.
    pub(crate) pending:          VecDeque<Passenger>,
    /// Walked in, not yet assigned to a lift.
    pub(crate) holding:          VecDeque<Passenger>,
    pub(crate) completed:        Vec<Passenger>,
    pub(crate) total_traffic:    usize,
    /// Release-count stream, a child of `config.seed`.
    pub(crate) rng:              SimRng,
    pub(crate) dispatch_timings: Vec<Duration>,
}

impl<P: DispatchPolicy> Sim<P> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until every passenger is served or the iteration budget is spent.
    ///
    /// Termination is checked before each tick, so an empty trace finishes
    /// after zero ticks.  Use [`NoopObserver`][crate::NoopObserver] if you
    /// don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<SimReport> {
        info!(
            policy = self.policy.name(),
            lifts = self.lifts.len(),
            passengers = self.total_traffic,
            iterations = self.config.iterations,
            "simulation started"
        );

        while !self.is_finished() {
            self.step(observer)?;
        }

        let report = self.report();
        if report.timed_out {
            warn!(
                policy = report.policy,
                served = report.served,
                unserved = report.unserved(),
                "iteration budget exhausted"
            );
        }
        info!(
            policy = report.policy,
            ticks = report.ticks_elapsed,
            served = report.served,
            percent = report.percent_processed(),
            clock = %self.clock,
            "simulation finished"
        );
        observer.on_sim_end(&report);
        Ok(report)
    }

    /// Run exactly `n` ticks from the current position, ignoring the
    /// termination condition.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Process the current tick and advance the clock by one.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<TickStats> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        let walk_ins = self.admit_walk_ins(now);
        let dispatched = self.dispatch(now, observer)?;
        let (departures, completed) = self.process_lifts(now, observer);

        let stats = TickStats {
            tick: now,
            walk_ins,
            dispatched,
            departures,
            completed,
            holding: self.holding.len(),
            waiting: self.lifts.iter().map(Lift::queue_len).sum(),
            in_transit: self.lifts.iter().map(Lift::in_transit_len).sum(),
        };
        observer.on_tick_end(&stats);

        self.clock.advance();
        Ok(stats)
    }

    /// `true` once everyone is served or the iteration budget is spent.
    pub fn is_finished(&self) -> bool {
        self.completed.len() == self.total_traffic || self.clock.timed_out()
    }

    /// Snapshot of the run so far.
    pub fn report(&self) -> SimReport {
        SimReport {
            policy:        self.policy.name(),
            ticks_elapsed: self.clock.current_tick.0,
            iterations:    self.config.iterations,
            served:        self.completed.len(),
            total:         self.total_traffic,
            timed_out:     self.completed.len() < self.total_traffic && self.clock.timed_out(),
            passengers:    PassengerStats::from_passengers(&self.completed),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Passengers whose round trip is complete, in order of return.
    pub fn completed(&self) -> &[Passenger] {
        &self.completed
    }

    /// Walked-in passengers not yet assigned to a lift.
    pub fn holding_len(&self) -> usize {
        self.holding.len()
    }

    /// Trace passengers that have not walked in yet.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn total_traffic(&self) -> usize {
        self.total_traffic
    }

    /// Wall-clock time of every `select_lift` call, in dispatch order.
    pub fn dispatch_timings(&self) -> &[Duration] {
        &self.dispatch_timings
    }

    pub fn lift(&self, id: LiftId) -> Option<&Lift> {
        self.lifts.get(id.index())
    }

    // ── Tick phases ───────────────────────────────────────────────────────

    fn admit_walk_ins(&mut self, now: Tick) -> usize {
        let mut admitted = 0;
        while self.pending.front().is_some_and(|p| p.arrival_at_building <= now) {
            let Some(passenger) = self.pending.pop_front() else { break };
            self.holding.push_back(passenger);
            admitted += 1;
        }
        admitted
    }

    fn dispatch<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<usize> {
        let quota: u32 = self.rng.gen_range(self.config.release_min..=self.config.release_max);

        let mut dispatched = 0;
        for _ in 0..quota {
            let Some(passenger) = self.holding.pop_front() else { break };

            let started = Instant::now();
            let choice = self.policy.select_lift(&passenger, &self.lifts);
            self.dispatch_timings.push(started.elapsed());

            let Some(index) = choice.map(LiftId::index).filter(|&i| i < self.lifts.len()) else {
                self.holding.push_front(passenger);
                return Err(SimError::InvalidSelection {
                    policy:   self.policy.name(),
                    selected: choice,
                });
            };

            let lift = &mut self.lifts[index];
            observer.on_dispatch(now, passenger.id, lift.id());
            debug!(
                tick = now.0,
                passenger = passenger.id.0,
                lift = lift.id().0,
                floor = passenger.destination_floor,
                "passenger dispatched"
            );
            lift.queue_passenger(passenger, now);
            dispatched += 1;
        }
        Ok(dispatched)
    }

    fn process_lifts<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> (usize, usize) {
        let mut departures = 0;
        let mut completed = 0;
        for lift in &mut self.lifts {
            lift.record_queue_length();
            if lift.is_available() {
                if lift.check_departure(now) {
                    departures += 1;
                }
            } else {
                let riders = lift.check_arrival(now);
                if !riders.is_empty() {
                    observer.on_arrivals(now, lift.id(), &riders);
                    completed += riders.len();
                    self.completed.extend(riders);
                }
            }
        }
        (departures, completed)
    }
}
