//! Error types for the reverse parsers.

use thiserror::Error;

use oactool_core::SpecError;

/// Errors produced while parsing external formats into a specification.
#[derive(Debug, Error)]
pub enum ParseError {
    /// No `complete` directive in the input named a command.
    #[error("no 'complete' directive with a command name found")]
    NoCommandName,

    /// The man rendering pipeline could not be started or waited on.
    #[error("failed to run man: {0}")]
    ManInvocation(#[from] std::io::Error),

    /// The man rendering pipeline did not finish in time.
    #[error("man rendering for '{command}' timed out after {timeout_ms} ms")]
    ManTimeout { command: String, timeout_ms: u64 },

    /// The assembled specification failed validation.
    #[error(transparent)]
    Spec(#[from] SpecError),
}

/// Convenience alias for results with [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;
