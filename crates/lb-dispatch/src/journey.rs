//! Minimum estimated journey assignment.

use lb_core::{LiftId, Passenger};
use lb_lift::Lift;

use crate::DispatchPolicy;
use crate::model::first_min_by;

/// Assign to the lift minimising `estimated_trip_time + estimated_wait_time`:
/// how long until the passenger reaches its floor if queued there now.
#[derive(Copy, Clone, Debug, Default)]
pub struct Journey;

impl DispatchPolicy for Journey {
    fn name(&self) -> &'static str {
        "journey"
    }

    fn select_lift(&mut self, passenger: &Passenger, bank: &[Lift]) -> Option<LiftId> {
        first_min_by(bank.iter(), |lift| {
            lift.estimated_trip_time(passenger) + lift.estimated_wait_time()
        })
        .map(Lift::id)
    }
}
