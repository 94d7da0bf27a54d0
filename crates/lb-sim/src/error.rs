use lb_core::{CoreError, LiftId};
use lb_dispatch::DispatchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("no traffic was supplied to the simulation")]
    MissingTraffic,

    #[error("no dispatch policy was supplied to the simulation")]
    MissingPolicy,

    #[error("policy {policy} selected {selected:?}, which is not a lift in the bank")]
    InvalidSelection {
        policy:   &'static str,
        selected: Option<LiftId>,
    },
}

pub type SimResult<T> = Result<T, SimError>;
