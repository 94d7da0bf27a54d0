//! `lb-core`: foundational types for the `liftbank` lift-dispatch simulator.
//!
//! This crate is a dependency of every other `lb-*` crate.  It has no `lb-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `LiftId`, `PassengerId`                               |
//! | [`time`]        | `Tick`, `SimClock`                                    |
//! | [`rng`]         | `SimRng` (seedable, splittable)                       |
//! | [`kinematics`]  | `KinematicModel`: floor distance → travel seconds    |
//! | [`passenger`]   | `Passenger`, `TrafficRecord`                          |
//! | [`config`]      | `BankConfig`                                          |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public data types.   |

pub mod config;
pub mod error;
pub mod ids;
pub mod kinematics;
pub mod passenger;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::BankConfig;
pub use error::{CoreError, CoreResult};
pub use ids::{LiftId, PassengerId};
pub use kinematics::KinematicModel;
pub use passenger::{Passenger, TrafficRecord};
pub use rng::SimRng;
pub use time::{SimClock, Tick};
