//! Fluent builder for constructing a [`Sim`].

use std::collections::VecDeque;
use std::time::Duration;

use lb_core::{BankConfig, LiftId, Passenger, PassengerId, SimClock, SimRng, TrafficRecord};
use lb_dispatch::{DispatchPolicy, Policy, PolicyKind};
use lb_lift::Lift;

use crate::{Sim, SimError, SimResult};

/// Child-stream offset for the per-tick release counts.
pub(crate) const RELEASE_STREAM: u64 = 0;
/// Child-stream offset handed to the random dispatch policy.
pub(crate) const POLICY_STREAM: u64 = 1;

/// Fluent builder for [`Sim<P>`].
///
/// # Required inputs
///
/// - [`BankConfig`]: lift count, capacity, threshold, kinematics, seed, …
/// - a traffic trace, via [`traffic`](SimBuilder::traffic)
/// - a dispatch policy, via [`policy_kind`](SimBuilder::policy_kind),
///   [`policy_name`](SimBuilder::policy_name), or a custom `P` passed to
///   [`with_policy`](SimBuilder::with_policy)
///
/// Nothing is validated until [`build`](SimBuilder::build), except policy
/// names, which fail as soon as they are parsed.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config)
///     .traffic(&trace)
///     .policy_name("adv grp")?
///     .build()?;
/// let report = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<P: DispatchPolicy = Policy> {
    config:  BankConfig,
    traffic: Option<Vec<TrafficRecord>>,
    policy:  Option<P>,
}

impl SimBuilder<Policy> {
    /// Create a builder for one of the built-in policies.
    pub fn new(config: BankConfig) -> Self {
        Self { config, traffic: None, policy: None }
    }

    /// Use the built-in policy `kind`.
    ///
    /// The random policy draws from its own child stream of
    /// `config.seed`, so the release sequence is the same whichever policy
    /// runs.
    pub fn policy_kind(mut self, kind: PolicyKind) -> Self {
        let rng = SimRng::new(self.config.seed).child(POLICY_STREAM);
        self.policy = Some(Policy::new(kind, rng));
        self
    }

    /// Parse `name` (e.g. `"journey"`, `"adv grp"`) and use that policy.
    pub fn policy_name(self, name: &str) -> SimResult<Self> {
        let kind: PolicyKind = name.parse()?;
        Ok(self.policy_kind(kind))
    }
}

impl<P: DispatchPolicy> SimBuilder<P> {
    /// Create a builder around a caller-supplied policy.
    pub fn with_policy(config: BankConfig, policy: P) -> Self {
        Self { config, traffic: None, policy: Some(policy) }
    }

    /// Replace the policy.
    pub fn policy(mut self, policy: P) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Supply the traffic trace.  The records are copied; the caller's slice
    /// is never modified.
    pub fn traffic(mut self, trace: &[TrafficRecord]) -> Self {
        self.traffic = Some(trace.to_vec());
        self
    }

    /// Validate inputs, build the lift bank, and return a ready-to-run
    /// [`Sim`].
    pub fn build(self) -> SimResult<Sim<P>> {
        self.config.validate()?;
        let trace = self.traffic.ok_or(SimError::MissingTraffic)?;
        let policy = self.policy.ok_or(SimError::MissingPolicy)?;
        TrafficRecord::validate_trace(&trace)?;

        // ── Lift bank ─────────────────────────────────────────────────────
        let mut lifts = Vec::with_capacity(self.config.lift_count);
        for index in 0..self.config.lift_count {
            let id = LiftId::try_from(index)
                .map_err(|_| SimError::Config(format!("lift index {index} overflows LiftId")))?;
            lifts.push(Lift::new(
                id,
                self.config.capacity,
                self.config.departure_threshold,
                self.config.kinematics,
            )?);
        }

        // ── Passengers, in trace order ────────────────────────────────────
        let mut pending = VecDeque::with_capacity(trace.len());
        for (index, record) in trace.iter().enumerate() {
            let id = PassengerId::try_from(index).map_err(|_| {
                SimError::Config(format!("traffic index {index} overflows PassengerId"))
            })?;
            pending.push_back(Passenger::new(id, *record));
        }

        Ok(Sim {
            clock:            SimClock::new(self.config.iterations),
            rng:              SimRng::new(self.config.seed).child(RELEASE_STREAM),
            config:           self.config,
            lifts,
            policy,
            total_traffic:    pending.len(),
            pending,
            holding:          VecDeque::new(),
            completed:        Vec::with_capacity(trace.len()),
            dispatch_timings: Vec::<Duration>::with_capacity(trace.len()),
        })
    }
}
