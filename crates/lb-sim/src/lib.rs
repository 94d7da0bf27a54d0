//! `lb-sim`: tick loop orchestrator for the liftbank simulator.
//!
//! # Tick loop
//!
//! ```text
//! until every passenger is served or clock == iterations:
//!   ① Walk-ins: traffic with arrival_time <= clock joins the holding queue.
//!   ② Dispatch: release 2–4 (seeded) holding passengers; the policy picks
//!               a lift for each and the passenger joins its boarding queue.
//!   ③ Lifts:    idle lifts run check_departure, departed lifts run
//!               check_arrival; returning riders join the completed set.
//!   ④ Advance:  clock += 1.
//! ```
//!
//! The loop visits every tick, which the lifts' equality-based arrival
//! check relies on.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lb_core::{BankConfig, TrafficRecord};
//! use lb_dispatch::PolicyKind;
//! use lb_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(BankConfig::default())
//!     .traffic(&trace)
//!     .policy_kind(PolicyKind::Journey)
//!     .build()?;
//! let report = sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod report;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use report::{PassengerStats, SimReport, TickStats};
pub use sim::Sim;
