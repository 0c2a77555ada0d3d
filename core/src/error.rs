//! Error types for specification decoding and validation.

use thiserror::Error;

use crate::resolve::ResolveError;
use crate::validate::ValidationError;

/// Errors produced while turning input into a validated [`Specification`].
///
/// [`Specification`]: crate::Specification
#[derive(Debug, Error)]
pub enum SpecError {
    /// Input is not a well-formed specification document.
    #[error("invalid specification document: {0}")]
    Decode(#[from] serde_json::Error),

    /// Document decoded but violates model invariants; every violation is
    /// listed.
    #[error("specification validation failed: {}", join_violations(.0))]
    Validation(Vec<ValidationError>),

    /// Same-document reference expansion failed.
    #[error("reference resolution failed: {0}")]
    Resolve(#[from] ResolveError),
}

fn join_violations(violations: &[ValidationError]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convenience alias for results with [`SpecError`].
pub type Result<T> = std::result::Result<T, SpecError>;
