//! Policy names and the closed set of built-in policies.

use std::fmt;
use std::str::FromStr;

use lb_core::{LiftId, Passenger, SimRng};
use lb_lift::Lift;

use crate::{
    AdvancedGrouping, DispatchError, DispatchPolicy, Greedy, Grouping, Journey, Nearest, Random,
};

// ── PolicyKind ────────────────────────────────────────────────────────────────

/// Names of the built-in policies, as accepted in configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    Greedy,
    Nearest,
    Grouping,
    Random,
    Journey,
    AdvancedGrouping,
}

impl PolicyKind {
    /// Every built-in policy, in the order reports list them.
    pub const ALL: [PolicyKind; 6] = [
        PolicyKind::Greedy,
        PolicyKind::Nearest,
        PolicyKind::Grouping,
        PolicyKind::Random,
        PolicyKind::Journey,
        PolicyKind::AdvancedGrouping,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Greedy           => "greedy",
            PolicyKind::Nearest          => "nearest",
            PolicyKind::Grouping         => "grouping",
            PolicyKind::Random           => "random",
            PolicyKind::Journey          => "journey",
            PolicyKind::AdvancedGrouping => "adv_grouping",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = DispatchError;

    /// Parse a configured policy name.  `"adv grp"` is accepted for
    /// `adv_grouping`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "greedy"                  => Ok(PolicyKind::Greedy),
            "nearest"                 => Ok(PolicyKind::Nearest),
            "grouping"                => Ok(PolicyKind::Grouping),
            "random"                  => Ok(PolicyKind::Random),
            "journey"                 => Ok(PolicyKind::Journey),
            "adv_grouping" | "adv grp" => Ok(PolicyKind::AdvancedGrouping),
            other                     => Err(DispatchError::UnknownPolicy(other.to_owned())),
        }
    }
}

// ── Policy ────────────────────────────────────────────────────────────────────

/// One of the built-in policies, dispatched by `match`.
#[derive(Clone, Debug)]
pub enum Policy {
    Greedy(Greedy),
    Nearest(Nearest),
    Grouping(Grouping),
    Random(Random),
    Journey(Journey),
    AdvancedGrouping(AdvancedGrouping),
}

impl Policy {
    /// Build the policy named by `kind`.  `rng` is consumed only by
    /// [`PolicyKind::Random`].
    pub fn new(kind: PolicyKind, rng: SimRng) -> Self {
        match kind {
            PolicyKind::Greedy           => Policy::Greedy(Greedy),
            PolicyKind::Nearest          => Policy::Nearest(Nearest),
            PolicyKind::Grouping         => Policy::Grouping(Grouping),
            PolicyKind::Random           => Policy::Random(Random::new(rng)),
            PolicyKind::Journey          => Policy::Journey(Journey),
            PolicyKind::AdvancedGrouping => Policy::AdvancedGrouping(AdvancedGrouping),
        }
    }

    pub fn kind(&self) -> PolicyKind {
        match self {
            Policy::Greedy(_)           => PolicyKind::Greedy,
            Policy::Nearest(_)          => PolicyKind::Nearest,
            Policy::Grouping(_)         => PolicyKind::Grouping,
            Policy::Random(_)           => PolicyKind::Random,
            Policy::Journey(_)          => PolicyKind::Journey,
            Policy::AdvancedGrouping(_) => PolicyKind::AdvancedGrouping,
        }
    }
}

impl DispatchPolicy for Policy {
    fn name(&self) -> &'static str {
        self.kind().as_str()
    }

    fn select_lift(&mut self, passenger: &Passenger, bank: &[Lift]) -> Option<LiftId> {
        match self {
            Policy::Greedy(p)           => p.select_lift(passenger, bank),
            Policy::Nearest(p)          => p.select_lift(passenger, bank),
            Policy::Grouping(p)         => p.select_lift(passenger, bank),
            Policy::Random(p)           => p.select_lift(passenger, bank),
            Policy::Journey(p)          => p.select_lift(passenger, bank),
            Policy::AdvancedGrouping(p) => p.select_lift(passenger, bank),
        }
    }
}
