//! Destination-floor grouping.
//!
//! Both policies compare the passenger's floor with each lift's
//! [`Lift::average_pending_destination`]: the mean floor of the batch the
//! passenger would ride with.  An average of `0.0` means the lift has no
//! such batch yet.

use lb_core::{LiftId, Passenger};
use lb_lift::Lift;

use crate::DispatchPolicy;
use crate::model::first_min_by;

/// Floors within which a passenger counts as a good match for a batch.
pub const GROUPING_WINDOW_FLOORS: f64 = 5.0;

fn floor_gap(lift: &Lift, passenger: &Passenger) -> f64 {
    (lift.average_pending_destination() - f64::from(passenger.destination_floor)).abs()
}

#[inline]
fn has_no_batch(lift: &Lift) -> bool {
    lift.average_pending_destination() == 0.0
}

// ── Grouping ──────────────────────────────────────────────────────────────────

/// Join the batch whose average floor is closest to the passenger's.
///
/// If that best match is [`GROUPING_WINDOW_FLOORS`] or more away and some
/// lift has no batch forming, start a fresh batch on the first such lift
/// instead.
#[derive(Copy, Clone, Debug, Default)]
pub struct Grouping;

impl DispatchPolicy for Grouping {
    fn name(&self) -> &'static str {
        "grouping"
    }

    fn select_lift(&mut self, passenger: &Passenger, bank: &[Lift]) -> Option<LiftId> {
        let best = first_min_by(bank.iter(), |lift| floor_gap(lift, passenger))?;
        if floor_gap(best, passenger) < GROUPING_WINDOW_FLOORS {
            return Some(best.id());
        }
        let fresh = bank.iter().find(|lift| has_no_batch(lift)).unwrap_or(best);
        Some(fresh.id())
    }
}

// ── AdvancedGrouping ──────────────────────────────────────────────────────────

/// Tiered grouping that also weighs load.
///
/// 1. Lifts with a free seat on board: the first whose batch average is
///    within the window, or that has no batch yet.
/// 2. Lifts carrying fewer than two loads (queue + on board): the first
///    whose average is within the window, or whose load fits in one trip.
/// 3. Otherwise the lift with the smallest combined load.
#[derive(Copy, Clone, Debug, Default)]
pub struct AdvancedGrouping;

impl DispatchPolicy for AdvancedGrouping {
    fn name(&self) -> &'static str {
        "adv_grouping"
    }

    fn select_lift(&mut self, passenger: &Passenger, bank: &[Lift]) -> Option<LiftId> {
        let seat_free = bank
            .iter()
            .filter(|lift| lift.in_transit_len() < lift.capacity())
            .find(|lift| floor_gap(lift, passenger) < GROUPING_WINDOW_FLOORS || has_no_batch(lift));
        if let Some(lift) = seat_free {
            return Some(lift.id());
        }

        let light_load = bank
            .iter()
            .filter(|lift| lift.pending_len() < 2 * lift.capacity())
            .find(|lift| {
                floor_gap(lift, passenger) < GROUPING_WINDOW_FLOORS
                    || lift.pending_len() <= lift.capacity()
            });
        if let Some(lift) = light_load {
            return Some(lift.id());
        }

        bank.iter().min_by_key(|lift| lift.pending_len()).map(Lift::id)
    }
}
