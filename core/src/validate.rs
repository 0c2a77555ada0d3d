//! Structural validation of specification documents.
//!
//! Validation collects **every** violation in one pass rather than stopping
//! at the first, so a failing document can be fixed in one round trip. Each
//! violation names the offending field with a `cli.pattern_groups[1].…`
//! style path.
//!
//! # Examples
//!
//! ```
//! use oactool_core::{Cli, GroupPattern, OptionPattern, OptionSpec, Pattern, Specification};
//!
//! let unnamed = OptionPattern::new(OptionSpec::default());
//! let cli = Cli::new("demo", vec![GroupPattern::new(vec![Pattern::Option(unnamed)])]);
//! let errors = oactool_core::validate_spec(&Specification::new(cli));
//! assert_eq!(errors.len(), 1);
//! assert!(errors[0].to_string().contains("pattern_groups[0].patterns[0]"));
//! ```

use thiserror::Error;

use crate::{GroupPattern, OptionSpec, Pattern, Specification};

/// Maximum pattern nesting depth accepted by validation and traversal.
pub const MAX_PATTERN_DEPTH: usize = 64;

/// A single violated model invariant, with the path of the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Version string does not match `MAJOR.MINOR`.
    #[error("{path}: version '{value}' does not match MAJOR.MINOR")]
    InvalidVersion { path: String, value: String },
    /// A `Cli` with no pattern groups.
    #[error("{path}: at least one pattern group is required")]
    EmptyPatternGroups { path: String },
    /// An option with neither short nor long names.
    #[error("{path}: at least one short or long option name is required")]
    UnnamedOption { path: String },
    /// A command with an empty name list.
    #[error("{path}: at least one command name is required")]
    UnnamedCommand { path: String },
    /// Groups nested beyond [`MAX_PATTERN_DEPTH`].
    #[error("{path}: pattern nesting exceeds {limit} levels")]
    NestingTooDeep { path: String, limit: usize },
}

/// Validates a specification, returning all violations.
///
/// An empty result means the document satisfies every model invariant.
pub fn validate_spec(spec: &Specification) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !version_is_valid(&spec.openautocomplete.version) {
        errors.push(ValidationError::InvalidVersion {
            path: "openautocomplete.version".to_string(),
            value: spec.openautocomplete.version.clone(),
        });
    }

    for (name, option) in &spec.components.options {
        check_option(option, &format!("components.options.{name}"), &mut errors);
    }
    for (name, command) in &spec.components.commands {
        if command.names.is_empty() {
            errors.push(ValidationError::UnnamedCommand {
                path: format!("components.commands.{name}"),
            });
        }
    }

    if spec.cli.pattern_groups.is_empty() {
        errors.push(ValidationError::EmptyPatternGroups {
            path: "cli.pattern_groups".to_string(),
        });
    }
    for (index, group) in spec.cli.pattern_groups.iter().enumerate() {
        validate_group(group, &format!("cli.pattern_groups[{index}]"), 0, &mut errors);
    }

    errors
}

fn validate_group(
    group: &GroupPattern,
    path: &str,
    depth: usize,
    errors: &mut Vec<ValidationError>,
) {
    if depth >= MAX_PATTERN_DEPTH {
        errors.push(ValidationError::NestingTooDeep {
            path: path.to_string(),
            limit: MAX_PATTERN_DEPTH,
        });
        return;
    }

    for (index, pattern) in group.patterns.iter().enumerate() {
        let child_path = format!("{path}.patterns[{index}]");
        match pattern {
            Pattern::Group(nested) => validate_group(nested, &child_path, depth + 1, errors),
            Pattern::Command(command) => {
                if command.command.names.is_empty() {
                    errors.push(ValidationError::UnnamedCommand { path: child_path });
                }
            }
            Pattern::Option(option) => check_option(&option.option, &child_path, errors),
            Pattern::Argument(_) => {}
        }
    }
}

fn check_option(option: &OptionSpec, path: &str, errors: &mut Vec<ValidationError>) {
    if option.names_short.is_empty() && option.names_long.is_empty() {
        errors.push(ValidationError::UnnamedOption {
            path: path.to_string(),
        });
    }
}

fn version_is_valid(version: &str) -> bool {
    let Some((major, minor)) = version.split_once('.') else {
        return false;
    };
    !major.is_empty()
        && !minor.is_empty()
        && major.chars().all(|ch| ch.is_ascii_digit())
        && minor.chars().all(|ch| ch.is_ascii_digit())
}
