//! The `DispatchPolicy` trait: the extension point for assignment rules.

use lb_core::{LiftId, Passenger};
use lb_lift::Lift;

/// Pluggable passenger-to-lift assignment.
///
/// Given the passenger at the head of the holding queue and the whole bank,
/// return the lift whose boarding queue should receive it.  The simulation
/// performs the actual `queue_passenger` call, so an implementation only
/// reads the bank.  `&mut self` is for policies that carry their own state,
/// such as an RNG stream.
///
/// # Example
///
/// ```rust,ignore
/// struct FirstLift;
///
/// impl DispatchPolicy for FirstLift {
///     fn name(&self) -> &'static str { "first" }
///     fn select_lift(&mut self, _p: &Passenger, bank: &[Lift]) -> Option<LiftId> {
///         bank.first().map(Lift::id)
///     }
/// }
/// ```
pub trait DispatchPolicy {
    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Choose a lift for `passenger`.
    ///
    /// Returns `None` only when `bank` is empty.
    fn select_lift(&mut self, passenger: &Passenger, bank: &[Lift]) -> Option<LiftId>;
}

/// The first lift minimising `key`; earlier lifts win ties.
pub(crate) fn first_min_by<'a, F>(lifts: impl Iterator<Item = &'a Lift>, mut key: F) -> Option<&'a Lift>
where
    F: FnMut(&Lift) -> f64,
{
    lifts
        .map(|lift| (key(lift), lift))
        .min_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, lift)| lift)
}
