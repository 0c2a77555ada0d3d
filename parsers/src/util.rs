//! Shared option pattern construction for the reverse parsers.

use oactool_core::{ArgumentPattern, OptionPattern, OptionSpec};

/// Builds an option pattern from classified names.
///
/// Old-style names (single dash, multiple letters) displace `names_long`
/// and force the pattern's long prefix to a single dash with a space
/// separator, since both reverse sources use them the same way.
pub(crate) fn build_option_pattern(
    names_short: Vec<String>,
    names_long: Vec<String>,
    names_old: Vec<String>,
    description: Option<String>,
) -> OptionPattern {
    let mut pattern = if names_old.is_empty() {
        OptionPattern::new(OptionSpec {
            names_short,
            names_long,
            description,
        })
    } else {
        let mut pattern = OptionPattern::new(OptionSpec {
            names_short,
            names_long: names_old,
            description,
        });
        pattern.prefix_long = "-".to_string();
        pattern.separators_long = vec![" ".to_string()];
        pattern
    };
    pattern.optional = true;
    pattern
}

/// Adds a required, unnamed argument child to an option that takes a value.
pub(crate) fn with_required_argument(mut pattern: OptionPattern) -> OptionPattern {
    pattern.argument = Some(ArgumentPattern::default());
    pattern
}
