//! Fish completion script emission.
//!
//! Walks the pattern groups in order and emits one `complete` directive per
//! command or option encountered. A synthesized guard function scopes
//! top-level completions to "no subcommand chosen yet"; once a command has
//! been seen in a group, subsequent directives are scoped to that command
//! via `__fish_seen_subcommand_from`.

use std::collections::HashSet;

use tracing::warn;

use oactool_core::{Cli, CommandPattern, OptionPattern, Pattern, Specification};

const HEADER: &str = "# Generated using OpenAutoComplete specification";

fn complete_for_option(pattern: &OptionPattern, cli: &Cli, condition: &str) -> String {
    let mut tokens = vec!["complete".to_string(), "-c".to_string(), cli.name.clone()];
    tokens.push("-n".to_string());
    tokens.push(condition.to_string());
    if let Some(description) = &pattern.option.description {
        tokens.push("-d".to_string());
        tokens.push(description.clone());
    }

    if !pattern.option.names_short.is_empty() {
        if cli.option_prefix_short == "-" {
            for name in &pattern.option.names_short {
                tokens.push("-s".to_string());
                tokens.push(name.clone());
            }
        } else {
            warn!(
                prefix = %cli.option_prefix_short,
                "short option prefix is not supported by fish completions; dropping short names"
            );
        }
    }

    if !pattern.option.names_long.is_empty() {
        let flag = match cli.option_prefix_long.as_str() {
            "--" => Some("-l"),
            "-" => Some("-o"),
            _ => None,
        };
        match flag {
            Some(flag) => {
                for name in &pattern.option.names_long {
                    tokens.push(flag.to_string());
                    tokens.push(name.clone());
                }
            }
            None => warn!(
                prefix = %cli.option_prefix_long,
                "long option prefix is not supported by fish completions; dropping long names"
            ),
        }
    }

    if pattern.argument.is_some() {
        tokens.push("-r".to_string());
    }

    shell_words::join(&tokens)
}

fn complete_for_command(pattern: &CommandPattern, cli: &Cli, condition: &str) -> String {
    let mut tokens = vec!["complete".to_string(), "-c".to_string(), cli.name.clone()];
    tokens.push("-n".to_string());
    tokens.push(condition.to_string());
    if let Some(description) = &pattern.command.description {
        tokens.push("-d".to_string());
        tokens.push(description.clone());
    }
    for name in &pattern.command.names {
        tokens.push("-a".to_string());
        tokens.push(name.clone());
    }

    shell_words::join(&tokens)
}

fn no_subcommand_function(name: &str, commands: &[String]) -> String {
    format!(
        "function {name}
    for i in (commandline -opc)
        if contains -- $i {commands}
            return 1
        end
    end
    return 0
end",
        commands = commands.join(" ")
    )
}

/// Renders a fish completion script for the specification.
///
/// `suffix` disambiguates the generated guard function when several
/// generated scripts are sourced in one shell session; callers supply a
/// fresh random value per render.
pub fn render_fish(spec: &Specification, suffix: &str) -> String {
    let cli = &spec.cli;
    let no_subcommand_name = format!("__fish_{}_{suffix}_complete_no_subcommand", cli.name);

    let mut completes: Vec<String> = Vec::new();
    let mut root_commands: Vec<String> = Vec::new();

    for group in &cli.pattern_groups {
        let mut condition = no_subcommand_name.clone();
        for pattern in &group.patterns {
            match pattern {
                Pattern::Command(command) => {
                    if condition == no_subcommand_name {
                        root_commands.extend(command.command.names.iter().cloned());
                    }
                    completes.push(complete_for_command(command, cli, &condition));
                    if let Some(canonical) = command.command.canonical_name() {
                        condition = format!("__fish_seen_subcommand_from {canonical}");
                    }
                }
                Pattern::Option(option) => {
                    completes.push(complete_for_option(option, cli, &condition));
                }
                _ => {}
            }
        }
    }

    let mut seen = HashSet::new();
    root_commands.retain(|name| seen.insert(name.clone()));
    let mut seen = HashSet::new();
    completes.retain(|line| seen.insert(line.clone()));

    let mut lines = vec![HEADER.to_string()];
    if !root_commands.is_empty() {
        lines.push(no_subcommand_function(&no_subcommand_name, &root_commands));
    }
    lines.extend(completes);
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use oactool_core::{
        ArgumentPattern, ArgumentSpec, CommandSpec, GroupPattern, OptionSpec, Specification,
    };

    fn spec_for(name: &str, patterns: Vec<Pattern>) -> Specification {
        Specification::new(Cli::new(name, vec![GroupPattern::new(patterns)]))
    }

    fn option(short: &[&str], long: &[&str]) -> OptionPattern {
        OptionPattern::new(OptionSpec::new(short, long))
    }

    #[test]
    fn test_option_directive_carries_names_and_description() {
        let verbose = OptionPattern::new(
            OptionSpec::new(&["v"], &["verbose"]).with_description("be verbose"),
        );
        let spec = spec_for("git", vec![Pattern::Option(verbose)]);

        let script = render_fish(&spec, "cafe0123");
        let directive = script
            .lines()
            .find(|line| line.starts_with("complete"))
            .unwrap();

        assert!(directive.contains("-c git"), "{directive}");
        assert!(directive.contains("-s v"), "{directive}");
        assert!(directive.contains("-l verbose"), "{directive}");
        assert!(directive.contains("-d 'be verbose'"), "{directive}");
    }

    #[test]
    fn test_option_with_argument_requires_parameter() {
        let output = option(&[], &["output"])
            .with_argument(ArgumentPattern::new(ArgumentSpec::named("file")));
        let spec = spec_for("tool", vec![Pattern::Option(output)]);

        let script = render_fish(&spec, "00000000");
        assert!(script.lines().any(|line| line.ends_with("-r")), "{script}");
    }

    #[test]
    fn test_commands_narrow_the_condition() {
        let spec = spec_for(
            "svc",
            vec![
                Pattern::Command(CommandPattern::new(CommandSpec::new("start"))),
                Pattern::Option(option(&["q"], &[])),
            ],
        );

        let script = render_fish(&spec, "abcd1234");
        let guard = "__fish_svc_abcd1234_complete_no_subcommand";

        assert!(script.contains(&format!("function {guard}")));
        assert!(script.contains(&format!("-n {guard} -a start")));
        assert!(script.contains("-n '__fish_seen_subcommand_from start' -s q"));
    }

    #[test]
    fn test_guard_function_lists_root_commands_once() {
        let start = Pattern::Command(CommandPattern::new(CommandSpec::new("start")));
        let spec = Specification::new(Cli::new(
            "svc",
            vec![
                GroupPattern::new(vec![start.clone()]),
                GroupPattern::new(vec![start]),
            ],
        ));

        let script = render_fish(&spec, "feed5678");
        assert!(script.contains("if contains -- $i start\n"));
        assert_eq!(script.matches("-a start").count(), 1, "directives deduplicated");
    }

    #[test]
    fn test_guard_function_omitted_without_commands() {
        let spec = spec_for("tool", vec![Pattern::Option(option(&["v"], &[]))]);

        let script = render_fish(&spec, "0a0a0a0a");
        assert!(!script.contains("function "), "{script}");
    }

    #[test]
    fn test_single_dash_long_prefix_uses_old_style_flag() {
        let mut spec = spec_for("find", vec![Pattern::Option(option(&[], &["name"]))]);
        spec.cli.option_prefix_long = "-".to_string();
        spec.cli.option_separators_long = vec![" ".to_string()];

        let script = render_fish(&spec, "12341234");
        assert!(script.contains("-o name"), "{script}");
        assert!(!script.contains("-l name"), "{script}");
    }
}
