use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("Unknown action: {0:?}")]
    UnknownAction(String),
    #[error("Malformed input: {0}")]
    MalformedInput(String),
}

pub type Result<T> = core::result::Result<T, GameError>;
