//! `lb-dispatch`: passenger-to-lift assignment policies.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`model`]    | `DispatchPolicy` trait                                       |
//! | [`policy`]   | `PolicyKind` (names) and `Policy` (closed set of built-ins)  |
//! | [`greedy`]   | `Greedy`: shortest boarding queue                           |
//! | [`nearest`]  | `Nearest`: soonest back at the lobby                        |
//! | [`grouping`] | `Grouping`, `AdvancedGrouping`: batch by destination floor  |
//! | [`random`]   | `Random`: uniform baseline                                  |
//! | [`journey`]  | `Journey`: minimum estimated trip + wait                    |
//! | [`error`]    | `DispatchError`, `DispatchResult<T>`                         |
//!
//! # Design notes
//!
//! A policy only *chooses*; the simulation loop performs the
//! `Lift::queue_passenger` call.  Policies read lifts through `&[Lift]`
//! and never see future traffic.  Ties go to the earliest lift in bank
//! order for every deterministic policy.

pub mod error;
pub mod greedy;
pub mod grouping;
pub mod journey;
pub mod model;
pub mod nearest;
pub mod policy;
pub mod random;


pub use error::{DispatchError, DispatchResult};
pub use greedy::Greedy;
pub use grouping::{AdvancedGrouping, Grouping, GROUPING_WINDOW_FLOORS};
pub use journey::Journey;
pub use model::DispatchPolicy;
pub use nearest::Nearest;
pub use policy::{Policy, PolicyKind};
pub use random::Random;
