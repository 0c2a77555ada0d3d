use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

use oactool_core::{Specification, resolve_refs};
use oactool_parsers::{parse_fish_document, scrape_man};
use oactool_render::{render_docopt, render_fish};

#[derive(Debug, Parser)]
#[command(name = "oactool")]
#[command(about = "Convert OpenAutoComplete specifications to and from shell tooling formats")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render usage and options text from a specification.
    MakeDocopt(SpecInput),
    /// Render a fish completion script from a specification.
    MakeFish(SpecInput),
    /// Validate one or more specification files.
    Validate(ValidateArgs),
    /// Strip the components registry from a specification.
    Simplify(SpecInput),
    /// Scrape a specification from a command's man page.
    ParseMan(ParseManArgs),
    /// Parse a specification from fish completion directives.
    ParseFish(FileInput),
    /// Print the JSON Schema for the specification document format.
    Jsonschema,
}

#[derive(Debug, Args)]
struct SpecInput {
    /// Specification file (stdin when omitted or '-').
    spec: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Specification files to check independently.
    #[arg(required = true)]
    specs: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct ParseManArgs {
    /// Command whose man page should be scraped.
    command: String,
}

#[derive(Debug, Args)]
struct FileInput {
    /// Input file (stdin when omitted or '-').
    file: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::MakeDocopt(args) => run_make_docopt(args),
        Command::MakeFish(args) => run_make_fish(args),
        Command::Validate(args) => run_validate(args),
        Command::Simplify(args) => run_simplify(args),
        Command::ParseMan(args) => run_parse_man(args),
        Command::ParseFish(args) => run_parse_fish(args),
        Command::Jsonschema => run_jsonschema(),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn read_input(path: Option<&Path>) -> Result<String, String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .map_err(|err| format!("Failed to read '{}': {err}", path.display())),
        _ => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .map_err(|err| format!("Failed to read stdin: {err}"))?;
            Ok(raw)
        }
    }
}

/// Decodes, reference-resolves, and validates a specification document.
fn load_spec(raw: &str) -> Result<Specification, String> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|err| format!("invalid specification document: {err}"))?;
    let resolved = resolve_refs(&value).map_err(|err| err.to_string())?;
    Specification::from_value(resolved).map_err(|err| err.to_string())
}

fn print_spec(spec: &Specification) -> Result<(), String> {
    let raw = serde_json::to_string_pretty(spec)
        .map_err(|err| format!("Failed to serialize specification: {err}"))?;
    println!("{raw}");
    Ok(())
}

fn run_make_docopt(args: SpecInput) -> Result<(), String> {
    let spec = load_spec(&read_input(args.spec.as_deref())?)?;
    println!("{}", render_docopt(&spec));
    Ok(())
}

fn run_make_fish(args: SpecInput) -> Result<(), String> {
    let spec = load_spec(&read_input(args.spec.as_deref())?)?;
    let suffix = Uuid::new_v4().simple().to_string();
    println!("{}", render_fish(&spec, &suffix[..8]));
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let mut failed = false;

    for path in &args.specs {
        let outcome = read_input(Some(path.as_path())).and_then(|raw| load_spec(&raw));
        match outcome {
            Ok(_) => println!("[{}] Specification is correct!", path.display()),
            Err(err) => {
                eprintln!("[{}] {err}", path.display());
                failed = true;
            }
        }
    }

    if failed {
        Err("one or more specifications failed validation".to_string())
    } else {
        Ok(())
    }
}

fn run_simplify(args: SpecInput) -> Result<(), String> {
    let spec = load_spec(&read_input(args.spec.as_deref())?)?;
    let simplified = spec.simplified().map_err(|err| err.to_string())?;
    print_spec(&simplified)
}

fn run_parse_man(args: ParseManArgs) -> Result<(), String> {
    let spec = scrape_man(&args.command).map_err(|err| err.to_string())?;
    print_spec(&spec)
}

fn run_parse_fish(args: FileInput) -> Result<(), String> {
    let raw = read_input(args.file.as_deref())?;
    let spec = parse_fish_document(&raw).map_err(|err| err.to_string())?;
    print_spec(&spec)
}

fn run_jsonschema() -> Result<(), String> {
    let schema = oactool_core::document_schema();
    let raw = serde_json::to_string_pretty(&schema)
        .map_err(|err| format!("Failed to serialize schema: {err}"))?;
    println!("{raw}");
    Ok(())
}
