//! String-keyed annotation bag
//!
//! Any metadata item carries one. Values are JSON so conventions and the
//! builder can store labels, names, numbers and arbitrary default values in
//! the same bag.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::shared::models::ConfigurationSource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub value: Value,
    pub source: ConfigurationSource,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Annotations {
    entries: BTreeMap<String, Annotation>,
}

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Annotation> {
        self.entries.get(name)
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.entries.get(name).map(|a| &a.value)
    }

    pub fn source(&self, name: &str) -> Option<ConfigurationSource> {
        self.entries.get(name).map(|a| a.source)
    }

    /// Whether `set` with these arguments would be accepted by a source-guarded caller
    pub fn can_set(&self, name: &str, value: &Value, source: ConfigurationSource) -> bool {
        match self.entries.get(name) {
            None => true,
            Some(existing) => source.overrides(Some(existing.source)) || existing.value == *value,
        }
    }

    /// Store `value`, overwriting any previous entry. `Null` removes the entry.
    pub fn set(&mut self, name: impl Into<String>, value: Value, source: ConfigurationSource) {
        let name = name.into();
        if value.is_null() {
            self.entries.remove(&name);
            return;
        }
        let source = source.max_with(self.source(&name));
        self.entries.insert(name, Annotation { value, source });
    }

    pub fn remove(&mut self, name: &str) -> Option<Annotation> {
        self.entries.remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Annotation)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Entries whose name starts with `prefix`
    pub fn with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a Annotation)> + 'a {
        self.iter().filter(move |(name, _)| name.starts_with(prefix))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Metadata items that carry an annotation bag
pub trait HasAnnotations {
    fn annotations(&self) -> &Annotations;

    fn annotations_mut(&mut self) -> &mut Annotations;

    fn annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations().get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use ConfigurationSource::*;

    #[test]
    fn test_set_overwrites_and_keeps_strongest_source() {
        let mut bag = Annotations::new();
        bag.set("Cypher:StorageName", json!("a"), Explicit);
        bag.set("Cypher:StorageName", json!("b"), Convention);

        let entry = bag.get("Cypher:StorageName").unwrap();
        assert_eq!(entry.value, json!("b"));
        assert_eq!(entry.source, Explicit);
    }

    #[test]
    fn test_can_set() {
        let mut bag = Annotations::new();
        assert!(bag.can_set("k", &json!(1), Convention));

        bag.set("k", json!(1), DataAnnotation);
        assert!(!bag.can_set("k", &json!(2), Convention));
        assert!(bag.can_set("k", &json!(1), Convention));
        assert!(bag.can_set("k", &json!(2), Explicit));
    }

    #[test]
    fn test_null_removes() {
        let mut bag = Annotations::new();
        bag.set("k", json!("v"), Explicit);
        bag.set("k", Value::Null, Convention);
        assert!(bag.is_empty());
    }

    #[test]
    fn test_with_prefix() {
        let mut bag = Annotations::new();
        bag.set("Cypher:Labels", json!(["A"]), Convention);
        bag.set("Host:Table", json!("t"), Convention);
        let names: Vec<&str> = bag.with_prefix("Cypher:").map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Cypher:Labels"]);
    }
}
