//! In-memory configuration document: path lookup, leaf-level merge, and the
//! explicit shape check for the `modules` section.
use std::path::Path;

use serde_json::{Map, Value};

use super::error::StoreError;

/// Name of the section holding module name → 0/1 entries.
pub const MODULES_SECTION: &str = "modules";

/// Separator used by [`ConfigDocument::get`] paths (`modules/Vendor_Module`).
pub const PATH_SEPARATOR: char = '/';

/// A JSON object used as a section or as a partial document to merge.
pub type Section = Map<String, Value>;

/// Result of inspecting the `modules` section of a document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModulesSection<'a> {
    /// The section exists and is a mapping.
    Ready(&'a Section),
    /// The section is absent or is not a mapping; no module registry exists yet.
    Uninitialized,
}

/// An ordered, nested key/value configuration document.
///
/// Key order from the persisted file is preserved across a rewrite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDocument {
    root: Section,
}

impl ConfigDocument {
    /// Wrap an already-parsed top-level object.
    #[must_use]
    pub const fn from_section(root: Section) -> Self {
        Self { root }
    }

    /// Parse the textual form of a document read from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Parse`] for invalid JSON and
    /// [`StoreError::NotAnObject`] when the top level is not an object.
    pub fn parse(path: &Path, text: &str) -> Result<Self, StoreError> {
        let value: Value = serde_json::from_str(text).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        match value {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(StoreError::NotAnObject {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Resolve a `/`-separated path against the document.
    ///
    /// Returns `None` if any segment is missing, descends into a non-object,
    /// or the leaf is `null`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut segments = key.split(PATH_SEPARATOR);
        let first = segments.next()?;
        let mut current = self.root.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        (!current.is_null()).then_some(current)
    }

    /// Merge `patch` into this document at the granularity of leaf keys.
    ///
    /// Objects are merged recursively; every other value in `patch` replaces
    /// the value at the same position.  Keys absent from `patch` survive.
    pub fn merge(&mut self, patch: &Section) {
        merge_sections(&mut self.root, patch);
    }

    /// Inspect the `modules` section.
    #[must_use]
    pub fn modules(&self) -> ModulesSection<'_> {
        match self.root.get(MODULES_SECTION) {
            Some(Value::Object(modules)) => ModulesSection::Ready(modules),
            _ => ModulesSection::Uninitialized,
        }
    }

    /// Borrow the top-level object.
    #[must_use]
    pub const fn as_section(&self) -> &Section {
        &self.root
    }

    /// Render the document as pretty-printed JSON with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be serialized.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut text = serde_json::to_string_pretty(&self.root)?;
        text.push('\n');
        Ok(text)
    }
}

fn merge_sections(target: &mut Section, patch: &Section) {
    for (key, incoming) in patch {
        match (target.get_mut(key), incoming) {
            (Some(Value::Object(existing)), Value::Object(nested)) => {
                merge_sections(existing, nested);
            }
            _ => {
                target.insert(key.clone(), incoming.clone());
            }
        }
    }
}

/// Build the partial document `{"modules": {name: value}}`.
#[must_use]
pub fn module_patch(name: &str, value: Value) -> Section {
    let mut modules = Section::new();
    modules.insert(name.to_string(), value);
    let mut patch = Section::new();
    patch.insert(MODULES_SECTION.to_string(), Value::Object(modules));
    patch
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> ConfigDocument {
        match value {
            Value::Object(root) => ConfigDocument::from_section(root),
            other => panic!("test document must be an object, got {other}"),
        }
    }

    #[test]
    fn get_resolves_nested_path() {
        let d = doc(json!({"modules": {"Foo": 1}}));
        assert_eq!(d.get("modules/Foo"), Some(&json!(1)));
    }

    #[test]
    fn get_missing_segment_is_none() {
        let d = doc(json!({"modules": {"Foo": 1}}));
        assert_eq!(d.get("modules/Bar"), None);
        assert_eq!(d.get("cache/Foo"), None);
    }

    #[test]
    fn get_through_scalar_is_none() {
        let d = doc(json!({"modules": 5}));
        assert_eq!(d.get("modules/Foo"), None);
    }

    #[test]
    fn get_null_leaf_is_none() {
        let d = doc(json!({"modules": {"Foo": null}}));
        assert_eq!(d.get("modules/Foo"), None);
    }

    #[test]
    fn get_top_level_section() {
        let d = doc(json!({"modules": {"Foo": 0}}));
        assert_eq!(d.get("modules"), Some(&json!({"Foo": 0})));
    }

    #[test]
    fn merge_preserves_unrelated_keys() {
        let mut d = doc(json!({
            "modules": {"Foo": 1, "Bar": 0},
            "db": {"host": "localhost"}
        }));
        d.merge(&module_patch("Baz", json!(0)));
        assert_eq!(
            Value::Object(d.as_section().clone()),
            json!({
                "modules": {"Foo": 1, "Bar": 0, "Baz": 0},
                "db": {"host": "localhost"}
            })
        );
    }

    #[test]
    fn merge_replaces_existing_leaf() {
        let mut d = doc(json!({"modules": {"Foo": 0}}));
        d.merge(&module_patch("Foo", json!(1)));
        assert_eq!(d.get("modules/Foo"), Some(&json!(1)));
    }

    #[test]
    fn merge_creates_missing_section() {
        let mut d = doc(json!({"db": {}}));
        d.merge(&module_patch("Foo", json!(0)));
        assert_eq!(d.get("modules/Foo"), Some(&json!(0)));
        assert!(d.get("db").is_some());
    }

    #[test]
    fn merge_keeps_key_order() {
        let mut d = doc(json!({"modules": {"Zeta": 1, "Alpha": 1}}));
        d.merge(&module_patch("Mid", json!(0)));
        let ModulesSection::Ready(modules) = d.modules() else {
            panic!("modules section should be ready");
        };
        let keys: Vec<&str> = modules.keys().map(String::as_str).collect();
        assert_eq!(keys, ["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn modules_absent_is_uninitialized() {
        let d = doc(json!({"db": {}}));
        assert_eq!(d.modules(), ModulesSection::Uninitialized);
    }

    #[test]
    fn modules_not_a_mapping_is_uninitialized() {
        assert_eq!(
            doc(json!({"modules": [1, 2]})).modules(),
            ModulesSection::Uninitialized
        );
        assert_eq!(
            doc(json!({"modules": "Foo"})).modules(),
            ModulesSection::Uninitialized
        );
    }

    #[test]
    fn empty_modules_mapping_is_ready() {
        let d = doc(json!({"modules": {}}));
        assert!(matches!(d.modules(), ModulesSection::Ready(m) if m.is_empty()));
    }

    #[test]
    fn parse_rejects_invalid_json() {
        let err = ConfigDocument::parse(Path::new("config.json"), "{ nope").unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[test]
    fn parse_rejects_non_object_top_level() {
        let err = ConfigDocument::parse(Path::new("config.json"), "[1, 2]").unwrap_err();
        assert!(matches!(err, StoreError::NotAnObject { .. }));
    }

    #[test]
    fn to_json_ends_with_newline() {
        let d = doc(json!({"modules": {"Foo": 1}}));
        let text = d.to_json().unwrap();
        assert!(text.ends_with("}\n"));
        assert_eq!(
            ConfigDocument::parse(Path::new("config.json"), &text).unwrap(),
            d
        );
    }
}
