//! Error types surfaced by message dispatch and command invocation.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CommError>;

/// Boxed error type used when a handler or command wraps a component error.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type HandlerResult = std::result::Result<(), HandlerError>;

#[derive(Debug, Error)]
pub enum CommError {
    #[error("malformed frame: {reason}")]
    Malformed { reason: String },

    #[error("frame is not valid JSON")]
    InvalidJson(#[source] serde_json::Error),

    #[error("no handler registered for message kind '{kind}'")]
    UnknownKind { kind: String },

    #[error("handler for '{kind}' failed")]
    Handler {
        kind: String,
        #[source]
        source: HandlerError,
    },

    #[error(transparent)]
    Command(#[from] CommandError),
}

/// Failure reported by a message handler.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("payload does not match the expected shape")]
    Payload(#[from] serde_json::Error),

    #[error(transparent)]
    Failed(BoxError),
}

impl HandlerError {
    pub fn failed(error: impl Into<BoxError>) -> Self {
        HandlerError::Failed(error.into())
    }
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command '{name}'")]
    UnknownCommand { name: String },

    #[error("invalid arguments for '{command}': {reason}")]
    InvalidArguments { command: String, reason: String },

    #[error("empty command line")]
    Empty,

    #[error("command '{command}' failed")]
    Failed {
        command: String,
        #[source]
        source: BoxError,
    },
}

impl CommandError {
    pub fn invalid_arguments(command: &str, reason: impl Into<String>) -> Self {
        CommandError::InvalidArguments {
            command: command.to_string(),
            reason: reason.into(),
        }
    }

    pub fn failed(command: &str, error: impl Into<BoxError>) -> Self {
        CommandError::Failed {
            command: command.to_string(),
            source: error.into(),
        }
    }
}
