//! Uniform random assignment, the comparison baseline.

use lb_core::{LiftId, Passenger, SimRng};
use lb_lift::Lift;

use crate::DispatchPolicy;

/// Assign to a lift drawn uniformly from the bank.
///
/// Owns its RNG stream so its draws never disturb the simulation's
/// per-tick release counts.
#[derive(Clone, Debug)]
pub struct Random {
    rng: SimRng,
}

impl Random {
    pub fn new(rng: SimRng) -> Self {
        Self { rng }
    }
}

impl DispatchPolicy for Random {
    fn name(&self) -> &'static str {
        "random"
    }

    fn select_lift(&mut self, _passenger: &Passenger, bank: &[Lift]) -> Option<LiftId> {
        self.rng.index(bank.len()).map(|i| bank[i].id())
    }
}
