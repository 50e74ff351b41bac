//! Style fragments produced by resolution.
//!
//! A [`Style`] maps CSS property names (camelCase, custom properties or
//! nested selectors) to [`StyleValue`]s, in insertion order. [`Fragment`] is
//! what one resolved class yields: either keyed declarations or a raw
//! declaration string passed through untouched.

use indexmap::IndexMap;
use serde::Serialize;

/// Ordered mapping from property name to value.
pub type Style = IndexMap<String, StyleValue>;

/// A single declaration value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StyleValue {
    Text(String),
    /// Fallback list, e.g. `["-webkit-box", "flex"]`
    List(Vec<String>),
    /// Nested block, e.g. a selector or a color with its opacity variable
    Block(Style),
}

impl StyleValue {
    /// Whether the value counts as "present" for raw passthrough.
    pub fn is_empty(&self) -> bool {
        match self {
            StyleValue::Text(s) => s.is_empty(),
            StyleValue::List(l) => l.is_empty(),
            StyleValue::Block(b) => b.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            StyleValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        StyleValue::Text(s)
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::Text(s.to_string())
    }
}

impl From<Style> for StyleValue {
    fn from(style: Style) -> Self {
        StyleValue::Block(style)
    }
}

/// The resolved output for one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Fragment {
    Declarations(Style),
    /// Literal declaration text, e.g. `"color: red; display: block"`
    Raw(String),
}

impl Fragment {
    /// The declarations, if this fragment is keyed.
    pub fn as_style(&self) -> Option<&Style> {
        match self {
            Fragment::Declarations(style) => Some(style),
            Fragment::Raw(_) => None,
        }
    }

    /// Look up a top-level declaration value as text.
    pub fn get_text(&self, property: &str) -> Option<&str> {
        self.as_style()?.get(property)?.as_text()
    }
}

impl From<Style> for Fragment {
    fn from(style: Style) -> Self {
        Fragment::Declarations(style)
    }
}

/// Build a [`Style`] from `(property, value)` pairs.
pub fn style<K, V, I>(pairs: I) -> Style
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<StyleValue>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Serialize a value as declaration text.
pub trait ToCss {
    /// Write this value as CSS to the buffer.
    fn to_css(&self, buf: &mut String);

    /// Convert to a CSS string (convenience method).
    fn to_css_string(&self) -> String {
        let mut buf = String::new();
        self.to_css(&mut buf);
        buf
    }
}

impl ToCss for Fragment {
    fn to_css(&self, buf: &mut String) {
        match self {
            Fragment::Declarations(style) => write_block(style, 0, buf),
            Fragment::Raw(raw) => {
                buf.push_str(raw);
                buf.push('\n');
            }
        }
    }
}

fn write_block(style: &Style, depth: usize, buf: &mut String) {
    let indent = "  ".repeat(depth);
    for (property, value) in style {
        match value {
            StyleValue::Text(text) => {
                buf.push_str(&format!("{indent}{property}: {text};\n"));
            }
            StyleValue::List(items) => {
                // One declaration per fallback, last wins in the cascade
                for item in items {
                    buf.push_str(&format!("{indent}{property}: {item};\n"));
                }
            }
            StyleValue::Block(inner) => {
                buf.push_str(&format!("{indent}{property} {{\n"));
                write_block(inner, depth + 1, buf);
                buf.push_str(&format!("{indent}}}\n"));
            }
        }
    }
}
