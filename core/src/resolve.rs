//! Same-document `$ref` expansion.
//!
//! Authored specifications may point into their `components` registries with
//! JSON references (`{"$ref": "#/components/options/verbose"}`). Resolution
//! is a pre-processing pass over the raw JSON value that inlines every
//! reference, producing a plain tree the decoder can consume without any
//! reference handling of its own.

use serde_json::Value;
use thiserror::Error;

/// Maximum reference/structure depth during expansion. Reference cycles hit
/// this limit instead of recursing forever.
const MAX_RESOLVE_DEPTH: usize = 128;

/// Errors produced while expanding `$ref` entries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Reference points outside the current document.
    #[error("unsupported external reference '{0}' (only '#/...' references are supported)")]
    ExternalRef(String),

    /// `$ref` value is not a string.
    #[error("reference at '{0}' must be a string")]
    MalformedRef(String),

    /// Reference does not point at an existing value.
    #[error("unresolved reference '{0}'")]
    UnresolvedRef(String),

    /// Expansion exceeded the depth limit, usually a reference cycle.
    #[error("reference expansion exceeded {limit} levels at '{reference}'")]
    DepthExceeded { reference: String, limit: usize },
}

/// Fully materializes all same-document references in `value`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
///
/// let doc = json!({
///     "components": {"options": {"v": {"names_short": ["v"]}}},
///     "cli": {"option": {"$ref": "#/components/options/v"}}
/// });
/// let resolved = oactool_core::resolve_refs(&doc).unwrap();
/// assert_eq!(resolved["cli"]["option"]["names_short"][0], "v");
/// ```
pub fn resolve_refs(value: &Value) -> Result<Value, ResolveError> {
    resolve_node(value, value, "#", 0)
}

fn resolve_node(
    node: &Value,
    root: &Value,
    context: &str,
    depth: usize,
) -> Result<Value, ResolveError> {
    if depth >= MAX_RESOLVE_DEPTH {
        return Err(ResolveError::DepthExceeded {
            reference: context.to_string(),
            limit: MAX_RESOLVE_DEPTH,
        });
    }

    match node {
        Value::Object(map) => {
            if let Some(reference) = map.get("$ref") {
                let Some(reference) = reference.as_str() else {
                    return Err(ResolveError::MalformedRef(context.to_string()));
                };
                let Some(pointer) = reference.strip_prefix('#') else {
                    return Err(ResolveError::ExternalRef(reference.to_string()));
                };
                let target = root
                    .pointer(pointer)
                    .ok_or_else(|| ResolveError::UnresolvedRef(reference.to_string()))?;
                return resolve_node(target, root, reference, depth + 1);
            }

            let mut resolved = serde_json::Map::with_capacity(map.len());
            for (key, child) in map {
                resolved.insert(key.clone(), resolve_node(child, root, context, depth + 1)?);
            }
            Ok(Value::Object(resolved))
        }
        Value::Array(items) => {
            let resolved = items
                .iter()
                .map(|child| resolve_node(child, root, context, depth + 1))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Array(resolved))
        }
        other => Ok(other.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_component_reference_is_inlined() {
        let doc = json!({
            "components": {"options": {"verbose": {"names_long": ["verbose"]}}},
            "cli": {
                "pattern_groups": [{"type": "group", "patterns": [
                    {"type": "option", "option": {"$ref": "#/components/options/verbose"}}
                ]}]
            }
        });

        let resolved = resolve_refs(&doc).unwrap();
        let option = &resolved["cli"]["pattern_groups"][0]["patterns"][0]["option"];
        assert_eq!(option["names_long"][0], "verbose");
    }

    #[test]
    fn test_nested_references_are_followed() {
        let doc = json!({
            "a": {"$ref": "#/b"},
            "b": {"$ref": "#/c"},
            "c": {"done": true}
        });

        let resolved = resolve_refs(&doc).unwrap();
        assert_eq!(resolved["a"]["done"], true);
    }

    #[test]
    fn test_unresolved_reference_is_an_error() {
        let doc = json!({"x": {"$ref": "#/nothing/here"}});

        let err = resolve_refs(&doc).unwrap_err();
        assert_eq!(err, ResolveError::UnresolvedRef("#/nothing/here".to_string()));
    }

    #[test]
    fn test_external_reference_is_rejected() {
        let doc = json!({"x": {"$ref": "other.json#/a"}});

        let err = resolve_refs(&doc).unwrap_err();
        assert!(matches!(err, ResolveError::ExternalRef(_)));
    }

    #[test]
    fn test_reference_cycle_is_reported() {
        let doc = json!({
            "a": {"$ref": "#/b"},
            "b": {"$ref": "#/a"}
        });

        let err = resolve_refs(&doc).unwrap_err();
        assert!(matches!(err, ResolveError::DepthExceeded { .. }));
    }

    #[test]
    fn test_plain_documents_pass_through_unchanged() {
        let doc = json!({"cli": {"name": "x", "pattern_groups": []}});

        assert_eq!(resolve_refs(&doc).unwrap(), doc);
    }
}
