//! Depth-first traversal and deduplicated extraction over pattern forests.

use std::collections::HashSet;

use crate::validate::MAX_PATTERN_DEPTH;
use crate::{GroupPattern, Pattern, PatternKind};

/// Collects all patterns of one variant from a forest of groups.
///
/// Performs a pre-order depth-first walk: groups are recursed into
/// regardless of their own `exclusive`/`optional`/`repeated` flags, and
/// leaves whose variant equals `kind` are yielded. Structurally equal
/// duplicates are suppressed, keeping the first occurrence and first-seen
/// order. The input is never mutated and repeated calls return identical
/// results.
///
/// Descent stops at [`MAX_PATTERN_DEPTH`] levels, so unvalidated input of
/// pathological depth cannot overflow the stack.
///
/// # Examples
///
/// ```
/// use oactool_core::{
///     GroupPattern, OptionPattern, OptionSpec, Pattern, PatternKind, collect_unique,
/// };
///
/// let verbose = Pattern::Option(OptionPattern::new(OptionSpec::new(&["v"], &[])));
/// let groups = vec![
///     GroupPattern::new(vec![verbose.clone()]),
///     GroupPattern::new(vec![verbose.clone()]),
/// ];
///
/// let unique = collect_unique(&groups, PatternKind::Option);
/// assert_eq!(unique.len(), 1);
/// ```
pub fn collect_unique(groups: &[GroupPattern], kind: PatternKind) -> Vec<&Pattern> {
    let mut seen: HashSet<&Pattern> = HashSet::new();
    let mut out = Vec::new();
    for group in groups {
        walk_group(group, kind, 0, &mut seen, &mut out);
    }
    out
}

fn walk_group<'a>(
    group: &'a GroupPattern,
    kind: PatternKind,
    depth: usize,
    seen: &mut HashSet<&'a Pattern>,
    out: &mut Vec<&'a Pattern>,
) {
    if depth >= MAX_PATTERN_DEPTH {
        return;
    }
    for pattern in &group.patterns {
        match pattern {
            Pattern::Group(nested) => walk_group(nested, kind, depth + 1, seen, out),
            leaf => {
                if leaf.kind() == kind && seen.insert(leaf) {
                    out.push(leaf);
                }
            }
        }
    }
}
