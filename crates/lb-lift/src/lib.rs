//! `lb-lift`: the lift car as a two-state machine.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`state`]    | `LiftState`: `Idle` / `Departed`                           |
//! | [`lift`]     | `Lift`: boarding queue, in-transit set, transitions        |
//! | [`estimate`] | read-only estimators used by dispatch policies              |
//!
//! # Lobby-shuttle model
//!
//! Every trip starts and ends at the lobby (floor 0):
//!
//! 1. While `Idle`, `Lift::check_departure` boards at most one waiting
//!    passenger per tick and decides whether to leave.
//! 2. `Lift::depart` orders the riders by floor, computes the trip with the
//!    kinematic model, and fixes `next_arrival_time = ceil(now + RTT)`.
//! 3. While `Departed`, `Lift::check_arrival` returns the riders on exactly
//!    `next_arrival_time` and the lift is `Idle` again.
//!
//! The boarding queue accepts passengers in either state; only boarding is
//! restricted to `Idle`.

pub mod estimate;
pub mod lift;
pub mod state;


pub use lift::{Lift, CONGESTION_QUEUE_LEN, MAX_BOARDED_WAIT_TICKS};
pub use state::LiftState;
