// metadata.rs
// Purpose: Caller-supplied structured fields attached to a log record

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::callsite::CallSite;

/// Structured fields carried by a record. Values are plain JSON so every
/// format can render them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(Map<String, Value>);

impl Metadata {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Adds `file` and `function` after the caller's own fields. Attribution
    /// always wins over caller keys of the same name.
    pub fn merge_attribution(&mut self, site: CallSite) {
        self.0.insert("file".to_string(), Value::String(site.file));
        if let Some(function) = site.function {
            self.0.insert("function".to_string(), Value::String(function));
        }
    }
}

impl From<()> for Metadata {
    fn from(_: ()) -> Self {
        Self::new()
    }
}

impl From<Map<String, Value>> for Metadata {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Metadata
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Metadata
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unit_converts_to_empty() {
        let meta: Metadata = ().into();
        assert!(meta.is_empty());
    }

    #[test]
    fn pairs_and_builder_agree() {
        let from_pairs = Metadata::from([("workflowId", json!("wf-1")), ("attempt", json!(2))]);
        let built = Metadata::new().with("workflowId", "wf-1").with("attempt", 2);
        assert_eq!(from_pairs, built);
    }

    #[test]
    fn attribution_overrides_caller_file() {
        let mut meta = Metadata::new().with("file", "spoofed.rs").with("user", "ada");
        meta.merge_attribution(CallSite::new("runner.rs").with_function("run"));

        assert_eq!(meta.get("file"), Some(&json!("runner.rs")));
        assert_eq!(meta.get("function"), Some(&json!("run")));
        assert_eq!(meta.get("user"), Some(&json!("ada")));
    }

    #[test]
    fn missing_function_is_not_emitted() {
        let mut meta = Metadata::new();
        meta.merge_attribution(CallSite::new("runner.rs"));
        assert!(meta.contains_key("file"));
        assert!(!meta.contains_key("function"));
    }

    #[test]
    fn serializes_as_plain_object() {
        let meta = Metadata::new().with("nested", json!({"a": [1, 2]}));
        assert_eq!(
            serde_json::to_string(&meta).unwrap(),
            r#"{"nested":{"a":[1,2]}}"#
        );
    }
}
