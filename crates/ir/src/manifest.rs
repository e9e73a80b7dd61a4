//! Collection manifest loading
//!
//! The manifest is a JSON object written by the upstream type generator:
//!
//! ```json
//! { "collections": ["Services", "Products", "BlogPosts"] }
//! ```
//!
//! Only the `collections` key is recognised. Loading never fails: a missing
//! file, unparsable JSON or a `collections` value that is not an array all
//! collapse to an empty [`CollectionSet`], which the generator reports as
//! "nothing to generate".

use serde_json::Value;
use std::path::Path;

use crate::collection::{Collection, CollectionSet};

// ============================================================================
// Constants
// ============================================================================

/// Default manifest file name
pub const DEFAULT_MANIFEST: &str = "collections-info.json";

/// The only key read from the manifest
pub const COLLECTIONS_KEY: &str = "collections";

// ============================================================================
// Load Functions
// ============================================================================

/// Load the collection set from a manifest file.
pub fn load_manifest(path: impl AsRef<Path>) -> CollectionSet {
    let path = path.as_ref();

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "collection manifest unreadable, treating as empty",
            );
            return CollectionSet::new();
        }
    };

    parse_manifest(&content)
}

/// Parse a manifest from a JSON string.
pub fn parse_manifest(json: &str) -> CollectionSet {
    match serde_json::from_str::<Value>(json) {
        Ok(value) => collections_from_value(&value),
        Err(e) => {
            tracing::warn!(error = %e, "collection manifest is not valid JSON, treating as empty");
            CollectionSet::new()
        }
    }
}

/// Extract the collection set from an already-parsed manifest value.
///
/// Array entries that are not strings are skipped. String entries are taken
/// verbatim, including degenerate ones; deciding what to do with those is
/// the identifier policy's job.
pub fn collections_from_value(value: &Value) -> CollectionSet {
    let Some(entries) = value.get(COLLECTIONS_KEY) else {
        tracing::warn!("collection manifest has no '{}' key", COLLECTIONS_KEY);
        return CollectionSet::new();
    };

    let Some(entries) = entries.as_array() else {
        tracing::warn!("'{}' in collection manifest is not a list", COLLECTIONS_KEY);
        return CollectionSet::new();
    };

    entries
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| match entry.as_str() {
            Some(name) => Some(Collection::new(name)),
            None => {
                tracing::warn!(index = i, entry = %entry, "skipping non-string collection entry");
                None
            }
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_parse_manifest_keeps_order() {
        let set = parse_manifest(r#"{"collections": ["Services", "Products", "BlogPosts"]}"#);
        assert_eq!(set.names(), vec!["Services", "Products", "BlogPosts"]);
    }

    #[test]
    fn test_parse_manifest_ignores_other_keys() {
        let set = parse_manifest(r#"{"generatedAt": "now", "collections": ["FAQ"], "types": {}}"#);
        assert_eq!(set.names(), vec!["FAQ"]);
    }

    #[test]
    fn test_missing_key_is_empty() {
        assert!(parse_manifest(r#"{"tables": ["FAQ"]}"#).is_empty());
    }

    #[test]
    fn test_non_list_collections_is_empty() {
        assert!(parse_manifest(r#"{"collections": "FAQ"}"#).is_empty());
        assert!(parse_manifest(r#"{"collections": {"FAQ": true}}"#).is_empty());
        assert!(parse_manifest(r#"{"collections": null}"#).is_empty());
    }

    #[test]
    fn test_invalid_json_is_empty() {
        assert!(parse_manifest("{collections: [").is_empty());
        assert!(parse_manifest("").is_empty());
    }

    #[test]
    fn test_top_level_array_is_empty() {
        assert!(parse_manifest(r#"["Services"]"#).is_empty());
    }

    #[test]
    fn test_non_string_entries_are_skipped() {
        let set = collections_from_value(&json!({"collections": ["Orders", 3, null, "Tags"]}));
        assert_eq!(set.names(), vec!["Orders", "Tags"]);
    }

    #[test]
    fn test_degenerate_names_are_kept() {
        let set = collections_from_value(&json!({"collections": ["", "!!!"]}));
        assert_eq!(set.len(), 2);
        assert_eq!(set.identifiers(), vec!["", "!!!"]);
    }

    #[test]
    fn test_load_manifest_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"collections": ["GiftCards", "FAQ"]}}"#).unwrap();

        let set = load_manifest(file.path());
        assert_eq!(set.identifiers(), vec!["gift_cards", "faq"]);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let set = load_manifest(dir.path().join(DEFAULT_MANIFEST));
        assert!(set.is_empty());
    }
}
