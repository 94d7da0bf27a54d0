//! Integration tests for lb-sim.

use lb_core::{
    BankConfig, CoreError, KinematicModel, LiftId, Passenger, PassengerId, Tick, TrafficRecord,
};
use lb_dispatch::{DispatchError, DispatchPolicy, PolicyKind};
use lb_lift::{Lift, LiftState};

use crate::{NoopObserver, Sim, SimBuilder, SimError, SimObserver, SimReport, TickStats};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn single_lift_config(iterations: u64) -> BankConfig {
    BankConfig {
        lift_count:          1,
        capacity:            4,
        departure_threshold: 1.0,
        kinematics:          KinematicModel::default(),
        iterations,
        seed:                42,
        release_min:         2,
        release_max:         4,
    }
}

/// Four passengers at tick 0 for floors 3, 1, 4, 2.
fn four_riders() -> Vec<TrafficRecord> {
    [3, 1, 4, 2].iter().map(|&f| TrafficRecord::new(0, f)).collect()
}

/// `n` passengers, two walking in per tick, floors cycling through 1..=20.
fn steady_trace(n: u64) -> Vec<TrafficRecord> {
    (0..n).map(|i| TrafficRecord::new(i / 2, 1 + (i * 7 % 20) as u32)).collect()
}

fn busy_config(seed: u64) -> BankConfig {
    BankConfig {
        lift_count: 4,
        capacity:   6,
        seed,
        ..BankConfig::default()
    }
}

fn build(config: BankConfig, trace: &[TrafficRecord], kind: PolicyKind) -> Sim {
    SimBuilder::new(config).traffic(trace).policy_kind(kind).build().unwrap()
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_bank_from_config() {
        let sim = build(busy_config(1), &steady_trace(10), PolicyKind::Greedy);
        assert_eq!(sim.lifts.len(), 4);
        assert!(sim.lifts.iter().enumerate().all(|(i, l)| l.id() == LiftId(i as u32)));
        assert!(sim.lifts.iter().all(|l| l.capacity() == 6 && l.is_available()));
        assert_eq!(sim.pending_len(), 10);
        assert_eq!(sim.total_traffic(), 10);
        assert_eq!(sim.clock.current_tick, Tick::ZERO);
    }

    #[test]
    fn missing_traffic_errors() {
        let err = SimBuilder::new(busy_config(1))
            .policy_kind(PolicyKind::Greedy)
            .build()
            .err()
            .expect("build must fail");
        assert!(matches!(err, SimError::MissingTraffic));
    }

    #[test]
    fn missing_policy_errors() {
        let err = SimBuilder::new(busy_config(1))
            .traffic(&steady_trace(4))
            .build()
            .err()
            .expect("build must fail");
        assert!(matches!(err, SimError::MissingPolicy));
    }

    #[test]
    fn out_of_range_threshold_errors() {
        let config = BankConfig { departure_threshold: 1.5, ..busy_config(1) };
        let err = SimBuilder::new(config)
            .traffic(&steady_trace(4))
            .policy_kind(PolicyKind::Greedy)
            .build()
            .err()
            .expect("build must fail");
        assert!(matches!(err, SimError::Core(CoreError::Threshold(t)) if t == 1.5));
    }

    #[test]
    fn unknown_policy_name_fails_at_configuration() {
        let err = SimBuilder::new(busy_config(1))
            .policy_name("express")
            .err()
            .expect("unknown name must fail");
        assert!(matches!(
            err,
            SimError::Dispatch(DispatchError::UnknownPolicy(ref name)) if name == "express"
        ));
    }

    #[test]
    fn policy_name_accepts_alias() {
        let sim = SimBuilder::new(busy_config(1))
            .traffic(&steady_trace(4))
            .policy_name("adv grp")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(sim.policy.name(), "adv_grouping");
    }

    #[test]
    fn ground_floor_destination_rejected() {
        let trace = [TrafficRecord::new(0, 3), TrafficRecord::new(1, 0)];
        let err = SimBuilder::new(busy_config(1))
            .traffic(&trace)
            .policy_kind(PolicyKind::Greedy)
            .build()
            .err()
            .expect("build must fail");
        assert!(matches!(err, SimError::Core(CoreError::Traffic { index: 1, .. })));
    }

    #[test]
    fn decreasing_arrivals_rejected() {
        let trace = [TrafficRecord::new(5, 3), TrafficRecord::new(2, 4)];
        let err = SimBuilder::new(busy_config(1))
            .traffic(&trace)
            .policy_kind(PolicyKind::Greedy)
            .build()
            .err()
            .expect("build must fail");
        assert!(matches!(err, SimError::Core(CoreError::Traffic { index: 1, .. })));
    }

    #[test]
    fn trace_is_copied() {
        let trace = four_riders();
        let mut sim = build(single_lift_config(200), &trace, PolicyKind::Greedy);
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(trace, four_riders());
    }
}

// ── Termination ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod termination {
    use super::*;

    #[test]
    fn empty_trace_finishes_in_zero_ticks() {
        let mut sim = build(busy_config(1), &[], PolicyKind::Greedy);
        let report = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(report.ticks_elapsed, 0);
        assert_eq!(report.served, 0);
        assert_eq!(report.total, 0);
        assert!(!report.timed_out);
        assert_eq!(report.percent_processed(), 100.0);
        assert_eq!(report.policy, "greedy");
    }

    #[test]
    fn budget_exhaustion_reports_unserved() {
        let mut sim = build(single_lift_config(5), &four_riders(), PolicyKind::Greedy);
        let report = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(report.ticks_elapsed, 5);
        assert_eq!(report.served, 0);
        assert_eq!(report.unserved(), 4);
        assert!(report.timed_out);
        assert_eq!(report.percent_processed(), 0.0);
        assert!(sim.is_finished());
    }

    #[test]
    fn run_ticks_ignores_termination() {
        let mut sim = build(busy_config(1), &[], PolicyKind::Greedy);
        sim.run_ticks(3, &mut NoopObserver).unwrap();
        assert_eq!(sim.clock.current_tick, Tick(3));
        assert!(sim.lifts.iter().all(|l| l.queue_history().len() == 3));
    }
}

// ── Single-lift walk-through ──────────────────────────────────────────────────

#[cfg(test)]
mod single_lift {
    use super::*;

    #[test]
    fn boards_one_per_tick_then_departs_full() {
        let mut sim = build(single_lift_config(200), &four_riders(), PolicyKind::Greedy);

        sim.run_ticks(3, &mut NoopObserver).unwrap();
        assert_eq!(sim.lifts[0].state(), LiftState::Idle);
        assert_eq!(sim.lifts[0].in_transit_len(), 3);

        let stats = sim.step(&mut NoopObserver).unwrap();
        assert_eq!(stats.tick, Tick(3));
        assert_eq!(stats.departures, 1);
        assert_eq!(sim.lifts[0].state(), LiftState::Departed);
        assert_eq!(sim.lifts[0].in_transit_len(), 4);
        assert_eq!(sim.lifts[0].round_trip_time(), Some(24.0));
        assert_eq!(sim.lifts[0].next_arrival_time(), Tick(27));
    }

    #[test]
    fn completes_round_trip() {
        let mut sim = build(single_lift_config(200), &four_riders(), PolicyKind::Greedy);
        let report = sim.run(&mut NoopObserver).unwrap();

        assert_eq!(report.served, 4);
        assert_eq!(report.ticks_elapsed, 28);
        assert!(!report.timed_out);
        assert_eq!(report.percent_processed(), 100.0);

        for p in sim.completed() {
            assert!(p.has_ordered_timestamps(), "{p:?}");
            assert_eq!(p.lift, Some(LiftId(0)));
            assert_eq!(p.departure_time, Some(Tick(3)));
            assert_eq!(p.return_to_lobby_time, Some(Tick(27)));
        }
        assert_eq!(sim.lifts[0].state(), LiftState::Idle);
        assert_eq!(sim.lifts[0].queue_history().len(), 28);
        assert_eq!(sim.dispatch_timings().len(), 4);
    }

    #[test]
    fn riders_reach_floors_in_order() {
        let mut sim = build(single_lift_config(200), &four_riders(), PolicyKind::Greedy);
        sim.run(&mut NoopObserver).unwrap();

        let mut done: Vec<(u32, f64)> = sim
            .completed()
            .iter()
            .map(|p| (p.destination_floor, p.travel_completed_time.unwrap()))
            .collect();
        done.sort_by_key(|&(floor, _)| floor);
        let expected = [(1, 7.0), (2, 11.0), (3, 15.0), (4, 19.0)];
        for ((floor, at), (want_floor, want_at)) in done.iter().zip(expected) {
            assert_eq!(*floor, want_floor);
            assert!((at - want_at).abs() < 1e-9, "floor {floor}: {at} != {want_at}");
        }
    }

    #[test]
    fn report_aggregates_passengers() {
        let mut sim = build(single_lift_config(200), &four_riders(), PolicyKind::Greedy);
        let report = sim.run(&mut NoopObserver).unwrap();
        let stats = report.passengers;
        assert!((stats.mean_wait_ticks - 1.5).abs() < 1e-9);
        assert_eq!(stats.max_wait_ticks, 3);
        assert!((stats.mean_journey_secs - 13.0).abs() < 1e-9);
        assert!((stats.mean_trip_secs - 24.0).abs() < 1e-9);
    }
}

// ── Whole-bank properties ─────────────────────────────────────────────────────

#[cfg(test)]
mod bank {
    use super::*;

    #[test]
    fn every_policy_serves_steady_traffic() {
        let trace = steady_trace(120);
        for kind in PolicyKind::ALL {
            let mut sim = build(busy_config(7), &trace, kind);
            let report = sim.run(&mut NoopObserver).unwrap();
            assert_eq!(report.served, 120, "{kind}");
            assert!(!report.timed_out, "{kind}");
            assert_eq!(report.policy, kind.as_str());
            assert!(sim.completed().iter().all(Passenger::has_ordered_timestamps), "{kind}");
        }
    }

    #[test]
    fn passengers_are_conserved_every_tick() {
        let mut sim = build(busy_config(3), &steady_trace(80), PolicyKind::Journey);
        while !sim.is_finished() {
            let stats = sim.step(&mut NoopObserver).unwrap();
            let accounted = sim.pending_len()
                + stats.holding
                + stats.waiting
                + stats.in_transit
                + sim.completed().len();
            assert_eq!(accounted, 80, "at {}", stats.tick);
            for lift in &sim.lifts {
                assert!(lift.in_transit_len() <= lift.capacity());
            }
        }
    }

    #[test]
    fn release_count_stays_in_bounds() {
        let trace: Vec<_> = (0..100).map(|_| TrafficRecord::new(0, 5)).collect();
        let mut sim = build(busy_config(11), &trace, PolicyKind::Greedy);
        for _ in 0..20 {
            let stats = sim.step(&mut NoopObserver).unwrap();
            assert!((2..=4).contains(&stats.dispatched), "{stats:?}");
        }
    }

    #[test]
    fn identical_seeds_reproduce_runs() {
        let trace = steady_trace(100);
        let mut a = build(busy_config(99), &trace, PolicyKind::Random);
        let mut b = build(busy_config(99), &trace, PolicyKind::Random);
        let report_a = a.run(&mut NoopObserver).unwrap();
        let report_b = b.run(&mut NoopObserver).unwrap();
        assert_eq!(report_a, report_b);
        assert_eq!(a.completed(), b.completed());
    }

    #[test]
    fn release_sequence_independent_of_policy() {
        let trace: Vec<_> = (0..100).map(|i| TrafficRecord::new(0, 1 + i % 9)).collect();
        let mut releases = Vec::new();
        for kind in [PolicyKind::Greedy, PolicyKind::Random, PolicyKind::Journey] {
            let mut sim = build(busy_config(5), &trace, kind);
            let seq: Vec<usize> = (0..20)
                .map(|_| sim.step(&mut NoopObserver).unwrap().dispatched)
                .collect();
            releases.push(seq);
        }
        assert_eq!(releases[0], releases[1]);
        assert_eq!(releases[0], releases[2]);
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        ticks:      u64,
        dispatches: Vec<(Tick, PassengerId, LiftId)>,
        returned:   usize,
        last_stats: Option<TickStats>,
        report:     Option<SimReport>,
    }

    impl SimObserver for Recorder {
        fn on_tick_start(&mut self, _tick: Tick) {
            self.ticks += 1;
        }

        fn on_dispatch(&mut self, tick: Tick, passenger: PassengerId, lift: LiftId) {
            self.dispatches.push((tick, passenger, lift));
        }

        fn on_arrivals(&mut self, _tick: Tick, _lift: LiftId, passengers: &[Passenger]) {
            assert!(passengers.iter().all(Passenger::is_complete));
            self.returned += passengers.len();
        }

        fn on_tick_end(&mut self, stats: &TickStats) {
            self.last_stats = Some(*stats);
        }

        fn on_sim_end(&mut self, report: &SimReport) {
            assert!(self.report.is_none(), "on_sim_end called twice");
            self.report = Some(report.clone());
        }
    }

    #[test]
    fn hooks_cover_whole_run() {
        let mut sim = build(busy_config(2), &steady_trace(40), PolicyKind::Nearest);
        let mut rec = Recorder::default();
        let report = sim.run(&mut rec).unwrap();

        assert_eq!(rec.ticks, report.ticks_elapsed);
        assert_eq!(rec.dispatches.len(), 40);
        assert_eq!(rec.returned, 40);
        assert_eq!(rec.report.as_ref(), Some(&report));
        assert_eq!(rec.last_stats.map(|s| s.tick), Some(Tick(report.ticks_elapsed - 1)));

        // Passengers leave the holding queue in trace order.
        let order: Vec<u32> = rec.dispatches.iter().map(|&(_, p, _)| p.0).collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
    }
}

// ── Custom policies ───────────────────────────────────────────────────────────

#[cfg(test)]
mod custom_policy {
    use super::*;

    struct LastLift;

    impl DispatchPolicy for LastLift {
        fn name(&self) -> &'static str {
            "last"
        }

        fn select_lift(&mut self, _passenger: &Passenger, bank: &[Lift]) -> Option<LiftId> {
            bank.last().map(Lift::id)
        }
    }

    struct Rogue;

    impl DispatchPolicy for Rogue {
        fn name(&self) -> &'static str {
            "rogue"
        }

        fn select_lift(&mut self, _passenger: &Passenger, _bank: &[Lift]) -> Option<LiftId> {
            Some(LiftId(99))
        }
    }

    #[test]
    fn custom_policy_drives_run() {
        let mut sim = SimBuilder::with_policy(busy_config(4), LastLift)
            .traffic(&steady_trace(12))
            .build()
            .unwrap();
        let report = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(report.policy, "last");
        assert_eq!(report.served, 12);
        assert!(sim.completed().iter().all(|p| p.lift == Some(LiftId(3))));
    }

    #[test]
    fn selecting_missing_lift_errors() {
        let mut sim = SimBuilder::with_policy(busy_config(4), Rogue)
            .traffic(&[TrafficRecord::new(0, 3)])
            .build()
            .unwrap();
        let err = sim.step(&mut NoopObserver).err().expect("step must fail");
        assert!(matches!(
            err,
            SimError::InvalidSelection { policy: "rogue", selected: Some(LiftId(99)) }
        ));
        assert_eq!(sim.holding_len(), 1);
    }
}
