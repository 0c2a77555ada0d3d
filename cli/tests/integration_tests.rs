use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

/// Helper to create a temp directory that is cleaned up on drop.
struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!("oactool_test_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).expect("failed to create temp dir");
        Self { path }
    }

    fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

const SAMPLE_SPEC: &str = r##"{
  "openautocomplete": {"version": "1.0"},
  "components": {
    "options": {
      "verbose": {"names_short": ["v"], "names_long": ["verbose"], "description": "Be verbose"}
    }
  },
  "cli": {
    "name": "svc",
    "pattern_groups": [
      {"type": "group", "patterns": [
        {"type": "command", "command": {"names": ["start"], "description": "Start the service"}},
        {"type": "option", "optional": true, "option": {"$ref": "#/components/options/verbose"}}
      ]}
    ]
  }
}"##;

const BROKEN_SPEC: &str = r#"{
  "openautocomplete": {"version": "one"},
  "cli": {"name": "bad", "pattern_groups": []}
}"#;

fn write_sample(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("failed to write spec file");
    path
}

fn run_oactool(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_oactool"))
        .args(args)
        .output()
        .expect("failed to run oactool")
}

#[test]
fn make_docopt_renders_usage_and_options() {
    let dir = TempDir::new("docopt");
    let spec = write_sample(&dir, "svc.json", SAMPLE_SPEC);

    let output = run_oactool(&["make-docopt", spec.to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"), "{stdout}");
    assert!(stdout.contains("svc start [-v|--verbose]"), "{stdout}");
    assert!(stdout.contains("-v, --verbose"), "{stdout}");
    assert!(stdout.contains("Be verbose"), "{stdout}");
}

#[test]
fn make_fish_emits_guarded_directives() {
    let dir = TempDir::new("fish");
    let spec = write_sample(&dir, "svc.json", SAMPLE_SPEC);

    let output = run_oactool(&["make-fish", spec.to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("# Generated using OpenAutoComplete specification"), "{stdout}");
    assert!(stdout.contains("-c svc"), "{stdout}");
    assert!(stdout.contains("-a start"), "{stdout}");
    assert!(stdout.contains("-s v -l verbose"), "{stdout}");
}

#[test]
fn validate_reports_each_file_and_fails_on_any_error() {
    let dir = TempDir::new("validate_mixed");
    let good = write_sample(&dir, "good.json", SAMPLE_SPEC);
    let bad = write_sample(&dir, "bad.json", BROKEN_SPEC);

    let output = run_oactool(&[
        "validate",
        good.to_str().unwrap(),
        bad.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("good.json"), "good file must still be reported: {stdout}");
    assert!(stdout.contains("Specification is correct!"), "{stdout}");
    assert!(stderr.contains("bad.json"), "{stderr}");
    assert!(stderr.contains("version"), "{stderr}");
    assert!(stderr.contains("pattern group"), "{stderr}");
}

#[test]
fn validate_succeeds_when_all_files_pass() {
    let dir = TempDir::new("validate_ok");
    let first = write_sample(&dir, "a.json", SAMPLE_SPEC);
    let second = write_sample(&dir, "b.json", SAMPLE_SPEC);

    let output = run_oactool(&[
        "validate",
        first.to_str().unwrap(),
        second.to_str().unwrap(),
    ]);
    assert!(output.status.success());
}

#[test]
fn simplify_strips_components_and_inlines_references() {
    let dir = TempDir::new("simplify");
    let spec = write_sample(&dir, "svc.json", SAMPLE_SPEC);

    let output = run_oactool(&["simplify", spec.to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("output must be JSON");
    assert!(value.get("components").is_none(), "{stdout}");
    assert!(!stdout.contains("$ref"), "{stdout}");

    let option = &value["cli"]["pattern_groups"][0]["patterns"][1]["option"];
    assert_eq!(option["names_long"][0], "verbose");
}

#[test]
fn parse_fish_round_trips_into_a_specification() {
    let dir = TempDir::new("parse_fish");
    let completions = write_sample(
        &dir,
        "git.fish",
        "complete -c git -s v -l verbose -d 'be verbose'\ncomplete -c git -l version\n",
    );

    let output = run_oactool(&["parse-fish", completions.to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("output must be JSON");
    assert_eq!(value["cli"]["name"], "git");
    assert_eq!(
        value["cli"]["pattern_groups"][0]["patterns"][0]["option"]["names_short"][0],
        "v"
    );
}

#[test]
fn jsonschema_describes_the_document_format() {
    let output = run_oactool(&["jsonschema"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("schema must be JSON");
    let properties = value["properties"].as_object().expect("schema has properties");
    assert!(properties.contains_key("openautocomplete"));
    assert!(properties.contains_key("cli"));
}

#[test]
fn invalid_documents_exit_nonzero_with_a_diagnostic() {
    let dir = TempDir::new("invalid");
    let spec = write_sample(&dir, "broken.json", "{not json");

    let output = run_oactool(&["make-docopt", spec.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"), "{stderr}");
}
