//! Soonest-available assignment.

use lb_core::{LiftId, Passenger};
use lb_lift::Lift;

use crate::{DispatchPolicy, Greedy};

/// Assign to the lift due back at the lobby soonest, skipping lifts whose
/// boarding queue already holds a full load.  Falls back to [`Greedy`]
/// when every queue is at or above capacity.
#[derive(Copy, Clone, Debug, Default)]
pub struct Nearest;

impl DispatchPolicy for Nearest {
    fn name(&self) -> &'static str {
        "nearest"
    }

    fn select_lift(&mut self, passenger: &Passenger, bank: &[Lift]) -> Option<LiftId> {
        bank.iter()
            .filter(|lift| lift.queue_len() < lift.capacity())
            .min_by_key(|lift| lift.next_arrival_time())
            .map(Lift::id)
            .or_else(|| Greedy.select_lift(passenger, bank))
    }
}
