//! Docopt-style usage and options rendering.
//!
//! Renders a specification into a `Usage:` block (one line per pattern
//! group) followed by an `Options:` block listing every unique option with
//! its description. The token formatter applies the grouping precedence
//! rules: `|` between alternatives, `[...]` around optional patterns,
//! `(...)` around multi-token sequences below the root, and a trailing
//! `...` on repeated patterns.

use oactool_core::{
    ArgumentPattern, Cli, CommandPattern, GroupPattern, OptionPattern, Pattern, PatternKind,
    Specification, collect_unique,
};

/// Joins already-formatted tokens and applies wrapping per the pattern
/// flags. The `root` flag suppresses parenthesization on the usage line
/// itself.
fn format_token(items: &[String], exclusive: bool, optional: bool, repeated: bool, root: bool) -> String {
    let separator = if exclusive { "|" } else { " " };
    let mut joined = items.join(separator);

    if optional {
        joined = format!("[{joined}]");
    } else if items.len() > 1 && !root {
        joined = format!("({joined})");
    }

    if repeated {
        joined.push_str("...");
    }

    joined
}

fn format_argument(pattern: &ArgumentPattern) -> String {
    let name = pattern.argument.name.as_deref().unwrap_or_default();
    format_token(
        &[format!("<{name}>")],
        false,
        pattern.optional,
        pattern.repeated,
        false,
    )
}

fn format_command(pattern: &CommandPattern) -> String {
    let name = pattern.command.canonical_name().unwrap_or_default();
    format_token(
        &[name.to_string()],
        false,
        pattern.optional,
        pattern.repeated,
        false,
    )
}

fn format_option_single(name: &str, prefix: &str, separator: &str, argument: Option<&str>) -> String {
    match argument {
        Some(argument) => format!("{prefix}{name}{separator}{argument}"),
        None => format!("{prefix}{name}"),
    }
}

fn canonical_separator(separators: &[String]) -> &str {
    separators.first().map(String::as_str).unwrap_or(" ")
}

/// All rendered alias spellings of one option, short names first.
fn format_option_names(pattern: &OptionPattern, cli: &Cli) -> Vec<String> {
    let argument = pattern.argument.as_ref().map(format_argument);
    let argument = argument.as_deref();

    let mut names = Vec::new();
    for name in &pattern.option.names_short {
        names.push(format_option_single(
            name,
            &cli.option_prefix_short,
            canonical_separator(&cli.option_separators_short),
            argument,
        ));
    }
    for name in &pattern.option.names_long {
        names.push(format_option_single(
            name,
            &cli.option_prefix_long,
            canonical_separator(&cli.option_separators_long),
            argument,
        ));
    }
    names
}

fn format_option(pattern: &OptionPattern, cli: &Cli) -> String {
    // Aliases of one option are always alternatives of each other.
    format_token(
        &format_option_names(pattern, cli),
        true,
        pattern.optional,
        pattern.repeated,
        false,
    )
}

fn format_group(group: &GroupPattern, cli: &Cli, root: bool) -> String {
    let items: Vec<String> = group
        .patterns
        .iter()
        .map(|pattern| format_pattern(pattern, cli))
        .collect();
    format_token(&items, group.exclusive, group.optional, group.repeated, root)
}

/// Renders any single pattern into its usage token string.
pub fn format_pattern(pattern: &Pattern, cli: &Cli) -> String {
    match pattern {
        Pattern::Group(group) => format_group(group, cli, false),
        Pattern::Command(command) => format_command(command),
        Pattern::Argument(argument) => format_argument(argument),
        Pattern::Option(option) => format_option(option, cli),
    }
}

fn make_usage_block(cli: &Cli) -> String {
    let mut lines = vec!["Usage:".to_string()];
    for group in &cli.pattern_groups {
        lines.push(format!("  {} {}", cli.name, format_group(group, cli, true)));
    }
    lines.join("\n")
}

fn make_options_block(cli: &Cli, width: usize) -> String {
    let mut lines = vec!["Options:".to_string()];

    let entries: Vec<(String, String)> = collect_unique(&cli.pattern_groups, PatternKind::Option)
        .into_iter()
        .filter_map(|pattern| match pattern {
            Pattern::Option(option) => Some((
                format_option_names(option, cli).join(", "),
                option.option.description.clone().unwrap_or_default(),
            )),
            _ => None,
        })
        .collect();

    let widest = entries
        .iter()
        .map(|(names, _)| names.len())
        .max()
        .unwrap_or(20);
    let names_column = widest.min(width);
    let text_width = width.saturating_sub(names_column + 4).max(1);

    for (names, description) in &entries {
        let wrapped = wrap(description, text_width);
        if wrapped.is_empty() {
            lines.push(format!("  {names}"));
            continue;
        }
        for (index, text_line) in wrapped.iter().enumerate() {
            let line = if index == 0 {
                format!("  {names:<names_column$}  {text_line}")
            } else {
                format!("{}{text_line}", " ".repeat(names_column + 4))
            };
            lines.push(line);
        }
    }

    lines.join("\n")
}

/// Greedy whitespace wrap; words longer than `width` get their own line.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Renders the usage and options text at an explicit terminal width.
pub fn render_docopt_at_width(spec: &Specification, width: usize) -> String {
    [
        make_usage_block(&spec.cli),
        String::new(),
        make_options_block(&spec.cli, width),
    ]
    .join("\n")
}

/// Renders the usage and options text at the current terminal width
/// (falling back to 80 columns without a terminal).
pub fn render_docopt(spec: &Specification) -> String {
    let width = terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80);
    render_docopt_at_width(spec, width)
}
