//! Core pattern tree model for OpenAutoComplete specifications.
//!
//! This crate defines the foundational types for modeling a command-line
//! interface as a specification document:
//!
//! - [`Specification`] — root aggregate: version tag, component registries,
//!   and one [`Cli`].
//! - [`Pattern`] — the recursive sum type over groups, commands, arguments,
//!   and options, discriminated by a `type` field on the wire.
//! - [`OptionSpec`] / [`CommandSpec`] / [`ArgumentSpec`] — the entities
//!   wrapped by the pattern variants.
//!
//! Validation ([`validate_spec`]) enumerates every violated invariant at
//! once; traversal ([`collect_unique`]) extracts deduplicated patterns of
//! one variant from a forest of groups; reference resolution
//! ([`resolve_refs`]) inlines same-document `$ref` entries before decoding.
//!
//! # Example
//!
//! ```
//! use oactool_core::{PatternKind, Specification, collect_unique};
//!
//! let spec = Specification::from_json_str(r#"{
//!     "openautocomplete": {"version": "1.0"},
//!     "cli": {
//!         "name": "svc",
//!         "pattern_groups": [
//!             {"type": "group", "exclusive": true, "patterns": [
//!                 {"type": "command", "command": {"names": ["start"]}},
//!                 {"type": "command", "command": {"names": ["stop"]}}
//!             ]}
//!         ]
//!     }
//! }"#).unwrap();
//!
//! let commands = collect_unique(&spec.cli.pattern_groups, PatternKind::Command);
//! assert_eq!(commands.len(), 2);
//! ```

mod error;
mod resolve;
mod types;
mod validate;
mod walk;

pub use error::{Result, SpecError};
pub use resolve::{ResolveError, resolve_refs};
pub use types::*;
pub use validate::{MAX_PATTERN_DEPTH, ValidationError, validate_spec};
pub use walk::collect_unique;

/// Returns the JSON Schema describing the specification document format.
pub fn document_schema() -> schemars::Schema {
    schemars::schema_for!(Specification)
}
