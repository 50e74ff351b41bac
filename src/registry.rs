//! Property → rule registry.
//!
//! Populated once by whoever owns the configuration, then shared read-only
//! by every resolution. Lookup is exact; fuzzy matching only happens when
//! building suggestions.

use std::path::Path;

use indexmap::IndexMap;
use indexmap::map::Iter;
use serde::Deserialize;

use crate::error::Result;
use crate::rule::PropertyRule;

/// Insertion-ordered mapping from utility prefix to its rule.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    rules: IndexMap<String, PropertyRule>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the data-only rule format.
    ///
    /// ```
    /// use arbitrary_css::Registry;
    ///
    /// let registry = Registry::from_json_str(r#"{ "w": { "prop": "width" } }"#).unwrap();
    /// assert!(registry.lookup("w").is_some());
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a registry from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Register or replace the rule for `property`.
    pub fn insert(&mut self, property: impl Into<String>, rule: impl Into<PropertyRule>) {
        self.rules.insert(property.into(), rule.into());
    }

    /// Add every rule from `other`, replacing existing ones.
    pub fn extend(&mut self, other: Registry) {
        self.rules.extend(other.rules);
    }

    pub fn lookup(&self, property: &str) -> Option<&PropertyRule> {
        self.rules.get(property)
    }

    pub fn iter(&self) -> Iter<'_, String, PropertyRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<K, R> FromIterator<(K, R)> for Registry
where
    K: Into<String>,
    R: Into<PropertyRule>,
{
    fn from_iter<I: IntoIterator<Item = (K, R)>>(iter: I) -> Self {
        Self {
            rules: iter
                .into_iter()
                .map(|(k, r)| (k.into(), r.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = (&'a String, &'a PropertyRule);
    type IntoIter = Iter<'a, String, PropertyRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
