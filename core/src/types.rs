//! Pattern tree model for OpenAutoComplete specifications.
//!
//! This module defines the recursive data model used to describe a command
//! line interface: options, arguments, commands, and groups thereof. The
//! types are designed for serialization with [`serde`] and round-trip
//! through the JSON document format unchanged.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Version of the specification format emitted by the reverse parsers.
pub const SPEC_FORMAT_VERSION: &str = "1.0";

/// A positional or option-attached argument.
///
/// Both fields are optional; an unnamed argument renders as `<>` in usage
/// text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct ArgumentSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ArgumentSpec {
    /// Creates an argument with the given name.
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            description: None,
        }
    }
}

/// A command-line option with its short and long aliases.
///
/// At least one of `names_short`/`names_long` must be non-empty; a
/// specification violating this fails validation.
///
/// # Examples
///
/// ```
/// use oactool_core::OptionSpec;
///
/// let verbose = OptionSpec::new(&["v"], &["verbose"]).with_description("Be verbose");
/// assert_eq!(verbose.names_short, vec!["v"]);
/// assert_eq!(verbose.names_long, vec!["verbose"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct OptionSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names_short: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names_long: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl OptionSpec {
    /// Creates an option from short and long alias names (without prefixes).
    pub fn new(names_short: &[&str], names_long: &[&str]) -> Self {
        Self {
            names_short: names_short.iter().map(|s| s.to_string()).collect(),
            names_long: names_long.iter().map(|s| s.to_string()).collect(),
            description: None,
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// A (sub)command with one or more names; the first name is canonical.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct CommandSpec {
    pub names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CommandSpec {
    /// Creates a command with a single canonical name.
    pub fn new(name: &str) -> Self {
        Self {
            names: vec![name.to_string()],
            description: None,
        }
    }

    /// Adds an alias after the canonical name.
    pub fn with_alias(mut self, name: &str) -> Self {
        self.names.push(name.to_string());
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// The canonical (first) name, if any.
    pub fn canonical_name(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }
}

/// The four pattern variants, discriminated by a `type` field on the wire.
///
/// Groups contain an owned, ordered sequence of child patterns and may nest
/// arbitrarily; nesting depth is bounded by validation
/// (see [`MAX_PATTERN_DEPTH`](crate::MAX_PATTERN_DEPTH)).
///
/// # Examples
///
/// ```
/// use oactool_core::Pattern;
///
/// let pattern: Pattern = serde_json::from_str(
///     r#"{"type": "command", "command": {"names": ["start"]}}"#,
/// ).unwrap();
/// assert!(matches!(pattern, Pattern::Command(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Pattern {
    Group(GroupPattern),
    Command(CommandPattern),
    Argument(ArgumentPattern),
    Option(OptionPattern),
}

impl Pattern {
    /// The variant discriminator of this pattern.
    pub fn kind(&self) -> PatternKind {
        match self {
            Pattern::Group(_) => PatternKind::Group,
            Pattern::Command(_) => PatternKind::Command,
            Pattern::Argument(_) => PatternKind::Argument,
            Pattern::Option(_) => PatternKind::Option,
        }
    }
}

/// Pattern variant discriminator, mirroring the wire-level `type` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Group,
    Command,
    Argument,
    Option,
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PatternKind::Group => "group",
            PatternKind::Command => "command",
            PatternKind::Argument => "argument",
            PatternKind::Option => "option",
        };
        f.write_str(name)
    }
}

/// A sequence of alternative or consecutive child patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct GroupPattern {
    /// When set, children are alternatives rather than a sequence.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub exclusive: bool,
    pub patterns: Vec<Pattern>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub repeated: bool,
}

impl GroupPattern {
    /// Creates a non-exclusive, required group over the given children.
    pub fn new(patterns: Vec<Pattern>) -> Self {
        Self {
            patterns,
            ..Default::default()
        }
    }
}

/// A command occurrence in a pattern group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct CommandPattern {
    pub command: CommandSpec,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub repeated: bool,
}

impl CommandPattern {
    pub fn new(command: CommandSpec) -> Self {
        Self {
            command,
            ..Default::default()
        }
    }
}

/// An argument occurrence in a pattern group or attached to an option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct ArgumentPattern {
    #[serde(default)]
    pub argument: ArgumentSpec,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub repeated: bool,
}

impl ArgumentPattern {
    pub fn new(argument: ArgumentSpec) -> Self {
        Self {
            argument,
            ..Default::default()
        }
    }
}

/// An option occurrence, optionally taking an argument.
///
/// Rendering prefixes and separators default to the GNU convention
/// (`--name=value`, `-n value`) and may be overridden per pattern; the
/// overrides round-trip through the document format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct OptionPattern {
    pub option: OptionSpec,
    /// The value-taking parameter of this option, if it requires one.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "tagged_argument")]
    #[schemars(with = "Option<Pattern>")]
    pub argument: Option<ArgumentPattern>,
    #[serde(default = "default_prefix_long", skip_serializing_if = "is_default_prefix_long")]
    pub prefix_long: String,
    #[serde(default = "default_prefix_short", skip_serializing_if = "is_default_prefix_short")]
    pub prefix_short: String,
    #[serde(default = "default_separators_long", skip_serializing_if = "is_default_separators_long")]
    pub separators_long: Vec<String>,
    #[serde(default = "default_separators_short", skip_serializing_if = "is_default_separators_short")]
    pub separators_short: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub repeated: bool,
}

impl OptionPattern {
    pub fn new(option: OptionSpec) -> Self {
        Self {
            option,
            ..Default::default()
        }
    }

    /// Attaches a value-taking argument.
    pub fn with_argument(mut self, argument: ArgumentPattern) -> Self {
        self.argument = Some(argument);
        self
    }
}

impl Default for OptionPattern {
    fn default() -> Self {
        Self {
            option: OptionSpec::default(),
            argument: None,
            prefix_long: default_prefix_long(),
            prefix_short: default_prefix_short(),
            separators_long: default_separators_long(),
            separators_short: default_separators_short(),
            optional: false,
            repeated: false,
        }
    }
}

fn default_prefix_long() -> String {
    "--".to_string()
}

fn default_prefix_short() -> String {
    "-".to_string()
}

fn default_separators_long() -> Vec<String> {
    vec!["=".to_string(), " ".to_string()]
}

fn default_separators_short() -> Vec<String> {
    vec![" ".to_string(), String::new()]
}

fn is_default_prefix_long(value: &str) -> bool {
    value == "--"
}

fn is_default_prefix_short(value: &str) -> bool {
    value == "-"
}

fn is_default_separators_long(value: &[String]) -> bool {
    value.len() == 2 && value[0] == "=" && value[1] == " "
}

fn is_default_separators_short(value: &[String]) -> bool {
    value.len() == 2 && value[0] == " " && value[1].is_empty()
}

/// The command-line interface described by a specification.
///
/// `pattern_groups` must be non-empty; each entry is one usage alternative.
/// The prefix and separator fields configure how the renderers print option
/// names; the first separator of each list is the canonical one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Cli {
    pub name: String,
    #[serde(default = "default_prefix_long", skip_serializing_if = "is_default_prefix_long")]
    pub option_prefix_long: String,
    #[serde(default = "default_prefix_short", skip_serializing_if = "is_default_prefix_short")]
    pub option_prefix_short: String,
    #[serde(default = "default_separators_long", skip_serializing_if = "is_default_separators_long")]
    pub option_separators_long: Vec<String>,
    #[serde(default = "default_separators_short", skip_serializing_if = "is_default_separators_short")]
    pub option_separators_short: Vec<String>,
    #[serde(with = "tagged_groups")]
    #[schemars(with = "Vec<Pattern>")]
    pub pattern_groups: Vec<GroupPattern>,
}

impl Cli {
    pub fn new(name: &str, pattern_groups: Vec<GroupPattern>) -> Self {
        Self {
            name: name.to_string(),
            option_prefix_long: default_prefix_long(),
            option_prefix_short: default_prefix_short(),
            option_separators_long: default_separators_long(),
            option_separators_short: default_separators_short(),
            pattern_groups,
        }
    }
}

/// Named entity registries used for reuse in authored specifications.
///
/// Registries only matter before reference resolution; the pattern tree
/// itself always stores fully inlined entities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Components {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub arguments: BTreeMap<String, ArgumentSpec>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, OptionSpec>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub commands: BTreeMap<String, CommandSpec>,
}

impl Components {
    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty() && self.options.is_empty() && self.commands.is_empty()
    }
}

/// The `openautocomplete` version tag of a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct OpenAutoComplete {
    /// Format version, `MAJOR.MINOR`.
    pub version: String,
}

/// Root aggregate of a specification document.
///
/// Constructed once from parsed (and reference-resolved) input, validated,
/// and then treated as immutable; [`simplified`](Specification::simplified)
/// is the only mutating operation and re-validates its result.
///
/// # Examples
///
/// ```
/// use oactool_core::Specification;
///
/// let spec = Specification::from_json_str(r#"{
///     "openautocomplete": {"version": "1.0"},
///     "cli": {
///         "name": "demo",
///         "pattern_groups": [
///             {"type": "group", "patterns": [
///                 {"type": "option", "option": {"names_long": ["help"]}}
///             ]}
///         ]
///     }
/// }"#).unwrap();
/// assert_eq!(spec.cli.name, "demo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Specification {
    pub openautocomplete: OpenAutoComplete,
    #[serde(default, skip_serializing_if = "Components::is_empty")]
    pub components: Components,
    pub cli: Cli,
}

impl Specification {
    /// Wraps a [`Cli`] in a fresh, component-free specification at the
    /// current format version. The result is not yet validated.
    pub fn new(cli: Cli) -> Self {
        Self {
            openautocomplete: OpenAutoComplete {
                version: SPEC_FORMAT_VERSION.to_string(),
            },
            components: Components::default(),
            cli,
        }
    }

    /// Decodes and validates a specification from a JSON value.
    ///
    /// References must already be resolved (see
    /// [`resolve_refs`](crate::resolve_refs)); an unknown or missing pattern
    /// `type` discriminator fails with a decode error naming it.
    pub fn from_value(value: serde_json::Value) -> Result<Self, crate::SpecError> {
        let spec: Self = serde_json::from_value(value)?;
        spec.validated()
    }

    /// Decodes and validates a specification from JSON text.
    pub fn from_json_str(raw: &str) -> Result<Self, crate::SpecError> {
        let spec: Self = serde_json::from_str(raw)?;
        spec.validated()
    }

    /// Checks all model invariants, returning the specification unchanged on
    /// success and every violation at once on failure.
    pub fn validated(self) -> Result<Self, crate::SpecError> {
        let violations = crate::validate_spec(&self);
        if violations.is_empty() {
            Ok(self)
        } else {
            Err(crate::SpecError::Validation(violations))
        }
    }

    /// Strips the components registry and re-validates.
    pub fn simplified(mut self) -> Result<Self, crate::SpecError> {
        self.components = Components::default();
        self.validated()
    }
}

/// `Vec<GroupPattern>` carried on the wire as tagged `Pattern` objects, so
/// each entry keeps its `"type": "group"` discriminator.
mod tagged_groups {
    use serde::de::Error as _;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{GroupPattern, Pattern};

    pub fn serialize<S: Serializer>(
        groups: &[GroupPattern],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(groups.len()))?;
        for group in groups {
            seq.serialize_element(&Pattern::Group(group.clone()))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<GroupPattern>, D::Error> {
        Vec::<Pattern>::deserialize(deserializer)?
            .into_iter()
            .map(|pattern| match pattern {
                Pattern::Group(group) => Ok(group),
                other => Err(D::Error::custom(format!(
                    "pattern_groups entries must have type \"group\", found \"{}\"",
                    other.kind()
                ))),
            })
            .collect()
    }
}

/// `Option<ArgumentPattern>` carried on the wire as a tagged `Pattern`
/// object, keeping the `"type": "argument"` discriminator.
mod tagged_argument {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{ArgumentPattern, Pattern};

    pub fn serialize<S: Serializer>(
        argument: &Option<ArgumentPattern>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match argument {
            Some(argument) => Pattern::Argument(argument.clone()).serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<ArgumentPattern>, D::Error> {
        match Option::<Pattern>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Pattern::Argument(argument)) => Ok(Some(argument)),
            Some(other) => Err(D::Error::custom(format!(
                "option arguments must have type \"argument\", found \"{}\"",
                other.kind()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_decodes_by_discriminator() {
        let raw = r#"{"type": "option", "option": {"names_short": ["v"]}, "optional": true}"#;
        let pattern: Pattern = serde_json::from_str(raw).unwrap();

        let Pattern::Option(option) = pattern else {
            panic!("expected an option pattern");
        };
        assert_eq!(option.option.names_short, vec!["v"]);
        assert!(option.optional);
        assert_eq!(option.prefix_long, "--");
        assert_eq!(option.separators_short, vec![" ".to_string(), String::new()]);
    }

    #[test]
    fn test_unknown_discriminator_is_a_decode_error() {
        let raw = r#"{"type": "flag", "option": {"names_short": ["v"]}}"#;
        let result: Result<Pattern, _> = serde_json::from_str(raw);

        let err = result.unwrap_err().to_string();
        assert!(err.contains("flag"), "error should name the bad variant: {err}");
    }

    #[test]
    fn test_pattern_groups_keep_their_type_tag() {
        let cli = Cli::new(
            "demo",
            vec![GroupPattern::new(vec![Pattern::Command(CommandPattern::new(
                CommandSpec::new("start"),
            ))])],
        );
        let value = serde_json::to_value(&cli).unwrap();

        assert_eq!(value["pattern_groups"][0]["type"], "group");
        assert_eq!(value["pattern_groups"][0]["patterns"][0]["type"], "command");
    }

    #[test]
    fn test_non_group_in_pattern_groups_is_rejected() {
        let raw = r#"{
            "name": "demo",
            "pattern_groups": [{"type": "command", "command": {"names": ["x"]}}]
        }"#;
        let result: Result<Cli, _> = serde_json::from_str(raw);

        let err = result.unwrap_err().to_string();
        assert!(err.contains("group"), "{err}");
    }

    #[test]
    fn test_option_argument_round_trips_with_tag() {
        let pattern = OptionPattern::new(OptionSpec::new(&["o"], &["output"]))
            .with_argument(ArgumentPattern::new(ArgumentSpec::named("file")));
        let value = serde_json::to_value(&pattern).unwrap();

        assert_eq!(value["argument"]["type"], "argument");

        let back: OptionPattern = serde_json::from_value(value).unwrap();
        assert_eq!(back, pattern);
    }

    #[test]
    fn test_decode_reencode_decode_is_a_fixed_point() {
        let raw = r#"{
            "openautocomplete": {"version": "1.0"},
            "cli": {
                "name": "tool",
                "pattern_groups": [
                    {"type": "group", "exclusive": true, "patterns": [
                        {"type": "command", "command": {"names": ["start", "run"], "description": "Start it"}},
                        {"type": "command", "command": {"names": ["stop"]}}
                    ]},
                    {"type": "group", "patterns": [
                        {"type": "option", "optional": true, "option": {"names_short": ["o"], "names_long": ["output"]},
                         "argument": {"type": "argument", "argument": {"name": "file"}}},
                        {"type": "argument", "argument": {"name": "input"}, "repeated": true}
                    ]}
                ]
            }
        }"#;

        let first = Specification::from_json_str(raw).unwrap();
        let reencoded = serde_json::to_string(&first).unwrap();
        let second = Specification::from_json_str(&reencoded).unwrap();

        assert_eq!(first, second);
    }
}
