//! Error types for option lookups and listeners.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, OptionsError>;

/// Recoverable lookup failures.
///
/// None of these are fatal: callers treat them as "no value" and carry on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("options not set, wanted option: {name}")]
    NotInitialized { name: String },

    #[error("option doesn't exist: {name}")]
    UnknownOption { name: String },

    #[error("option '{name}' is {actual}, expected {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("option store is busy notifying listeners")]
    Busy,
}

pub type ListenerResult = std::result::Result<(), ListenerError>;

/// Failure reported by a change listener.
#[derive(Debug, Error)]
pub enum ListenerError {
    #[error(transparent)]
    Options(#[from] OptionsError),

    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl ListenerError {
    pub fn msg(message: impl Into<String>) -> Self {
        ListenerError::Message(message.into())
    }
}
