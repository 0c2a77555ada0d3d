//! Man page scraper.
//!
//! Renders a command's man page to plain text and scans it for indented
//! option blocks: one or more `-option` tokens separated by whitespace or
//! pipes, followed by indented description lines up to the next blank line.
//! Man page formatting carries no reliable signal for whether an option
//! consumes a value, so scraped options never get an argument child.

use std::io::Read;
use std::process::{Command, Stdio};
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use wait_timeout::ChildExt;

use oactool_core::{Cli, GroupPattern, Pattern, Specification};

use crate::error::{ParseError, Result};
use crate::util::build_option_pattern;

const MAN_TIMEOUT_MS: u64 = 10_000;

static PATTERNS: LazyLock<ManPatterns> = LazyLock::new(ManPatterns::new);

struct ManPatterns {
    /// Indented cluster of dash-led tokens plus its description block.
    option_block: Regex,
    /// A single option token inside a matched cluster.
    option_token: Regex,
    /// Hyphenated line wrap inside a description.
    wrapped_hyphen: Regex,
    /// Any run of interior whitespace.
    whitespace_run: Regex,
}

impl ManPatterns {
    fn new() -> Self {
        Self {
            option_block: Regex::new(r"(?m)^\s+((?:-\S+[\s|])+)\s*((?:.+\n)+)$")
                .expect("static regex must compile"),
            option_token: Regex::new(r"-[^=\s\[,]+").expect("static regex must compile"),
            wrapped_hyphen: Regex::new(r"-[ \t]*\n\s+").expect("static regex must compile"),
            whitespace_run: Regex::new(r"[ \n\t\r]+").expect("static regex must compile"),
        }
    }
}

/// Renders `man <command>` to plain text via the system pipeline.
///
/// The pipeline is killed after a fixed timeout; a missing page simply
/// produces output that matches no option block.
pub fn render_man_page(command: &str) -> Result<String> {
    let pipeline = format!("{} | col -b", shell_words::join(["man", command]));
    let mut child = Command::new("sh")
        .arg("-c")
        .arg(pipeline)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()?;

    // Drain stdout on a separate thread so a full pipe buffer cannot
    // deadlock the timed wait.
    let stdout_thread = child.stdout.take().map(|mut pipe| {
        std::thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            buf
        })
    });

    match child.wait_timeout(Duration::from_millis(MAN_TIMEOUT_MS))? {
        Some(_status) => {
            let buf = stdout_thread
                .and_then(|thread| thread.join().ok())
                .unwrap_or_default();
            Ok(String::from_utf8_lossy(&buf).into_owned())
        }
        None => {
            let _ = child.kill();
            let _ = child.wait();
            Err(ParseError::ManTimeout {
                command: command.to_string(),
                timeout_ms: MAN_TIMEOUT_MS,
            })
        }
    }
}

/// Joins hyphenated line wraps, collapses whitespace runs, trims, and
/// capitalizes the first letter.
fn clean_description(raw: &str) -> String {
    let joined = PATTERNS.wrapped_hyphen.replace_all(raw, "");
    let collapsed = PATTERNS.whitespace_run.replace_all(&joined, " ");
    capitalize(collapsed.trim())
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Splits a matched option cluster into short, long, and old-style names.
fn classify_option_tokens(cluster: &str) -> (Vec<String>, Vec<String>, Vec<String>) {
    let mut short = Vec::new();
    let mut long = Vec::new();
    let mut old = Vec::new();

    for token in PATTERNS.option_token.find_iter(cluster) {
        let name = &token.as_str()[1..];
        if name.chars().count() == 1 && name != "-" {
            short.push(name.to_string());
        } else if let Some(long_name) = name.strip_prefix('-') {
            long.push(long_name.to_string());
        } else {
            old.push(name.to_string());
        }
    }

    (short, long, old)
}

/// Scrapes option patterns out of rendered man page text.
///
/// Pure function over the page text, so the scraping rules are testable
/// without invoking any real renderer.
pub fn parse_man_text(command: &str, page: &str) -> Result<Specification> {
    let mut patterns: Vec<Pattern> = Vec::new();

    for captures in PATTERNS.option_block.captures_iter(page) {
        let (short, long, old) = classify_option_tokens(&captures[1]);
        let description = clean_description(&captures[2]);
        let description = (!description.is_empty()).then_some(description);
        patterns.push(Pattern::Option(build_option_pattern(
            short,
            long,
            old,
            description,
        )));
    }

    let cli = Cli::new(command, vec![GroupPattern::new(patterns)]);
    Ok(Specification::new(cli).validated()?)
}

/// Renders and scrapes a command's man page.
pub fn scrape_man(command: &str) -> Result<Specification> {
    let page = render_man_page(command)?;
    parse_man_text(command, &page)
}
