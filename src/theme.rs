//! Theme access and `theme(...)` references.
//!
//! The resolver never owns theme data. It only asks a [`Theme`] for the
//! value at a dot path such as `colors.red.500`.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

use crate::error::Result;

/// Read-only lookup of theme values by dot path.
///
/// Themes are shared by every thread resolving through the same [`Resolver`](crate::Resolver).
pub trait Theme: Send + Sync {
    fn get(&self, path: &str) -> Option<String>;
}

impl Theme for HashMap<String, String> {
    fn get(&self, path: &str) -> Option<String> {
        HashMap::get(self, path).cloned()
    }
}

impl<F> Theme for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn get(&self, path: &str) -> Option<String> {
        self(path)
    }
}

/// A theme backed by a JSON document.
#[derive(Debug, Clone, Default)]
pub struct JsonTheme {
    root: Value,
}

impl JsonTheme {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Load a theme from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }
}

impl Theme for JsonTheme {
    fn get(&self, path: &str) -> Option<String> {
        let mut node = &self.root;
        for segment in path.split('.').filter(|s| !s.is_empty()) {
            node = match node {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        value_to_css(node)
    }
}

fn value_to_css(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        // Font stacks and similar lists
        Value::Array(items) => {
            let parts: Option<Vec<String>> = items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect();
            parts.map(|p| p.join(", "))
        }
        Value::Object(map) => map.get("DEFAULT").and_then(value_to_css),
        Value::Null | Value::Bool(_) => None,
    }
}

/// Extract the dot path when `value` is exactly one `theme(...)` reference.
///
/// Accepts `theme(a.b)`, `theme('a.b')` and `theme("a.b")`. A reference
/// embedded in a larger expression, like `calc(theme(a) + 1px)`, is not
/// substituted.
pub fn theme_reference(value: &str) -> Option<&str> {
    let inner = value
        .trim()
        .strip_prefix("theme(")?
        .strip_suffix(')')?
        .trim();
    let path = ['\'', '"']
        .into_iter()
        .find_map(|q| inner.strip_prefix(q)?.strip_suffix(q))
        .unwrap_or(inner)
        .trim();
    let valid = !path.is_empty() && !path.contains(['(', ')', '\'', '"']);
    valid.then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn theme() -> JsonTheme {
        JsonTheme::new(json!({
            "colors": {
                "red": { "500": "#ef4444", "DEFAULT": "#f00" },
                "black": "#000"
            },
            "fontFamily": { "sans": ["Inter", "sans-serif"] },
            "zIndex": { "10": 10 }
        }))
    }

    #[test]
    fn test_dot_path_lookup() {
        let theme = theme();
        assert_eq!(theme.get("colors.red.500").as_deref(), Some("#ef4444"));
        assert_eq!(theme.get("colors.black").as_deref(), Some("#000"));
        assert_eq!(theme.get("colors.blue.500"), None);
    }

    #[test]
    fn test_lists_numbers_and_defaults() {
        let theme = theme();
        assert_eq!(theme.get("fontFamily.sans").as_deref(), Some("Inter, sans-serif"));
        assert_eq!(theme.get("zIndex.10").as_deref(), Some("10"));
        assert_eq!(theme.get("colors.red").as_deref(), Some("#f00"));
        assert_eq!(theme.get("colors"), None);
    }

    #[test]
    fn test_theme_reference_forms() {
        assert_eq!(theme_reference("theme(colors.red.500)"), Some("colors.red.500"));
        assert_eq!(theme_reference("theme('colors.red.500')"), Some("colors.red.500"));
        assert_eq!(theme_reference("theme(\"spacing.4\")"), Some("spacing.4"));
        assert_eq!(theme_reference(" theme(spacing.4) "), Some("spacing.4"));
        assert_eq!(theme_reference("calc(theme(spacing.4) + 1px)"), None);
        assert_eq!(theme_reference("theme(spacing.4) 1px"), None);
        assert_eq!(theme_reference("theme('spacing.4\")"), None);
        assert_eq!(theme_reference("red"), None);
        assert_eq!(theme_reference("theme()"), None);
    }

    #[test]
    fn test_closure_and_map_themes() {
        let closure = |path: &str| (path == "a").then(|| "1".to_string());
        assert_eq!(Theme::get(&closure, "a").as_deref(), Some("1"));

        let mut map = HashMap::new();
        map.insert("b".to_string(), "2".to_string());
        assert_eq!(Theme::get(&map, "b").as_deref(), Some("2"));
    }
}
