//! Parser for fish `complete` directives.
//!
//! Scans a completion script line by line; lines starting with the literal
//! `complete` token are shell-word split and their flags decoded into
//! option patterns. Lines that fail to tokenize or carry unrecognized flags
//! are logged with their line number and skipped, never failing the whole
//! parse.

use clap::Parser;
use tracing::warn;

use oactool_core::{Cli, GroupPattern, Pattern, Specification};

use crate::error::{ParseError, Result};
use crate::util::{build_option_pattern, with_required_argument};

/// One `complete` directive, decoded from its shell words.
///
/// Field set mirrors the fish builtin. The condition, file behavior, and
/// candidate list are captured so directives using them still decode, but
/// they are not encoded into the produced tree; conditional visibility does
/// not round-trip.
#[derive(Debug, Parser)]
#[command(name = "complete", disable_help_flag = true)]
#[allow(dead_code)]
struct Directive {
    #[arg(short = 'c', long = "command")]
    command: Option<String>,
    #[arg(short = 's', long = "short-option")]
    short_option: Vec<String>,
    #[arg(short = 'l', long = "long-option")]
    long_option: Vec<String>,
    #[arg(short = 'o', long = "old-option")]
    old_option: Vec<String>,
    #[arg(short = 'r', long = "require-parameter")]
    require_parameter: bool,
    #[arg(short = 'f', long = "no-files")]
    no_files: bool,
    #[arg(short = 'x', long = "exclusive")]
    exclusive: bool,
    #[arg(short = 'n', long = "condition")]
    condition: Option<String>,
    #[arg(short = 'd', long = "description")]
    description: Option<String>,
    #[arg(short = 'a', long = "arguments")]
    arguments: Option<String>,
}

impl Directive {
    fn option_pattern(&self) -> Option<Pattern> {
        if self.short_option.is_empty() && self.long_option.is_empty() && self.old_option.is_empty()
        {
            return None;
        }

        let pattern = build_option_pattern(
            self.short_option.clone(),
            self.long_option.clone(),
            self.old_option.clone(),
            self.description.clone(),
        );
        let pattern = if self.require_parameter {
            with_required_argument(pattern)
        } else {
            pattern
        };
        Some(Pattern::Option(pattern))
    }
}

/// Parses a fish completion document into a specification.
///
/// The first directive carrying `-c` names the resulting [`Cli`]; every
/// directive declaring at least one option contributes one option pattern
/// to a single flat group.
///
/// # Examples
///
/// ```
/// use oactool_parsers::parse_fish_document;
///
/// let spec = parse_fish_document(
///     "complete -c git -s v -l verbose -d 'be verbose'\n",
/// ).unwrap();
/// assert_eq!(spec.cli.name, "git");
/// ```
pub fn parse_fish_document(document: &str) -> Result<Specification> {
    let mut command_name: Option<String> = None;
    let mut patterns: Vec<Pattern> = Vec::new();

    for (index, line) in document.lines().enumerate() {
        if !line.starts_with("complete") {
            continue;
        }

        let words = match shell_words::split(line) {
            Ok(words) => words,
            Err(err) => {
                warn!(line = index + 1, %err, "skipping unparseable completion line");
                continue;
            }
        };

        let directive = match Directive::try_parse_from(&words) {
            Ok(directive) => directive,
            Err(err) => {
                warn!(line = index + 1, %err, "skipping unrecognized completion line");
                continue;
            }
        };

        if command_name.is_none() {
            command_name = directive.command.clone();
        }
        if let Some(pattern) = directive.option_pattern() {
            patterns.push(pattern);
        }
    }

    let name = command_name.ok_or(ParseError::NoCommandName)?;
    let cli = Cli::new(&name, vec![GroupPattern::new(patterns)]);
    Ok(Specification::new(cli).validated()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_yields_option_with_names_and_description() {
        let spec =
            parse_fish_document("complete -c git -s v -l verbose -d \"be verbose\"\n").unwrap();

        assert_eq!(spec.cli.name, "git");
        let group = &spec.cli.pattern_groups[0];
        let Pattern::Option(option) = &group.patterns[0] else {
            panic!("expected an option pattern");
        };
        assert_eq!(option.option.names_short, vec!["v"]);
        assert_eq!(option.option.names_long, vec!["verbose"]);
        assert_eq!(option.option.description.as_deref(), Some("be verbose"));
        assert!(option.optional);
        assert!(option.argument.is_none());
    }

    #[test]
    fn test_require_parameter_adds_an_argument_child() {
        let spec = parse_fish_document("complete -c tar -s f -r\n").unwrap();

        let Pattern::Option(option) = &spec.cli.pattern_groups[0].patterns[0] else {
            panic!("expected an option pattern");
        };
        let argument = option.argument.as_ref().unwrap();
        assert!(!argument.optional);
    }

    #[test]
    fn test_old_style_options_force_single_dash_rendering() {
        let spec = parse_fish_document("complete -c find -o name -r\n").unwrap();

        let Pattern::Option(option) = &spec.cli.pattern_groups[0].patterns[0] else {
            panic!("expected an option pattern");
        };
        assert_eq!(option.option.names_long, vec!["name"]);
        assert_eq!(option.prefix_long, "-");
        assert_eq!(option.separators_long, vec![" "]);
    }

    #[test]
    fn test_malformed_lines_are_skipped_not_fatal() {
        let document = "\
complete -c git -s a
complete -c git -s 'unterminated
complete -c git --bogus-flag x
complete -c git -s b
";
        let spec = parse_fish_document(document).unwrap();

        assert_eq!(spec.cli.pattern_groups[0].patterns.len(), 2);
    }

    #[test]
    fn test_directives_without_options_only_name_the_command() {
        let document = "\
complete -c kubectl -n __fish_use_subcommand -a get -d 'Display resources'
complete -c kubectl -s v
";
        let spec = parse_fish_document(document).unwrap();

        assert_eq!(spec.cli.name, "kubectl");
        assert_eq!(spec.cli.pattern_groups[0].patterns.len(), 1);
    }

    #[test]
    fn test_document_without_command_name_is_an_error() {
        let err = parse_fish_document("# only comments here\n").unwrap_err();
        assert!(matches!(err, ParseError::NoCommandName));
    }

    #[test]
    fn test_non_complete_lines_are_ignored() {
        let document = "\
function __helper
    return 0
end
complete -c jq -s r -d 'Raw output'
";
        let spec = parse_fish_document(document).unwrap();
        assert_eq!(spec.cli.name, "jq");
        assert_eq!(spec.cli.pattern_groups[0].patterns.len(), 1);
    }
}
