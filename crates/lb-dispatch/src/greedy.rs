//! Shortest-queue assignment.

use lb_core::{LiftId, Passenger};
use lb_lift::Lift;

use crate::DispatchPolicy;

/// Assign to the lift with the fewest passengers in its boarding queue.
///
/// With equal queues this cycles through the bank in order, so a quiet
/// building sees round-robin assignment.
#[derive(Copy, Clone, Debug, Default)]
pub struct Greedy;

impl DispatchPolicy for Greedy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn select_lift(&mut self, _passenger: &Passenger, bank: &[Lift]) -> Option<LiftId> {
        bank.iter().min_by_key(|lift| lift.queue_len()).map(Lift::id)
    }
}
