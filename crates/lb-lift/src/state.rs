//! Lift operating state.

/// The two states of a lift car.
///
/// `Idle` is the only state in which passengers board; `Departed` lasts from
/// departure until the tick the car is back at the lobby.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum LiftState {
    /// At the lobby, doors open, accepting boarders.
    #[default]
    Idle,
    /// Away on a trip; returns at `Lift::next_arrival_time`.
    Departed,
}

impl LiftState {
    /// `true` while the lift can take on passengers.
    #[inline]
    pub fn is_available(self) -> bool {
        matches!(self, LiftState::Idle)
    }
}

impl std::fmt::Display for LiftState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LiftState::Idle     => write!(f, "idle"),
            LiftState::Departed => write!(f, "departed"),
        }
    }
}
