use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("dispatch policy {0:?} is not recognised")]
    UnknownPolicy(String),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
