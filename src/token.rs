//! Class token parsing.
//!
//! The upstream tokenizer replaces literal spaces inside brackets with a
//! placeholder so a class list can be split on whitespace. [`ClassToken::parse`]
//! expects that encoding and undoes it; it never re-derives where the
//! spaces were.

use crate::error::{Error, Result};
use crate::util::split_on_first;

/// Placeholder the upstream tokenizer uses for spaces inside brackets.
pub const SPACE_PLACEHOLDER: &str = "__SPACE_ID__";

/// Per-class metadata supplied alongside the class name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pieces {
    /// Class name without the leading `-` and without the `/alpha` suffix.
    pub class_name: String,
    /// The class was written with a leading `-`.
    pub negative: bool,
    /// Raw alpha modifier from `class/<alpha>`, e.g. `50` or `[.25]`.
    pub alpha: Option<String>,
}

impl Pieces {
    /// Split a full class like `-mt-[4px]` or `bg-[red]/50` into pieces.
    pub fn from_class(class: &str) -> Self {
        let (negative, rest) = match class.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, class),
        };

        // Only a slash right after the value's closing bracket is an alpha modifier
        let (class_name, alpha) = match value_end(rest) {
            Some(end) if rest[end..].starts_with('/') && end + 1 < rest.len() => {
                (&rest[..end], Some(rest[end + 1..].to_string()))
            }
            _ => (rest, None),
        };

        Self {
            class_name: class_name.to_string(),
            negative,
            alpha,
        }
    }

    pub fn has_alpha(&self) -> bool {
        self.alpha.is_some()
    }

    /// The alpha modifier as a CSS number: `50` → `0.5`, `[.25]` → `.25`.
    pub fn alpha_value(&self) -> Option<String> {
        let alpha = self.alpha.as_deref()?;
        if let Some(inner) = alpha.strip_prefix('[').and_then(|a| a.strip_suffix(']')) {
            let inner = inner.trim();
            return (!inner.is_empty()).then(|| inner.to_string());
        }
        let percent = alpha.parse::<f64>().ok().filter(|p| p.is_finite())?;
        Some(format_number(percent / 100.0))
    }
}

/// Byte offset just past the `]` matching the first `[`.
fn value_end(class: &str) -> Option<usize> {
    let open = class.find('[')?;
    let mut depth = 0usize;
    for (i, ch) in class[open..].char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

fn format_number(n: f64) -> String {
    // f64 Display already drops trailing zeros: 0.5, 1, 0.05
    format!("{}", (n * 1000.0).round() / 1000.0)
}

/// A class split into its property and bracketed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassToken {
    pub property: String,
    pub value: String,
}

impl ClassToken {
    /// Parse `property-[value]`, restoring placeholder-encoded spaces.
    pub fn parse(class_name: &str, placeholder: &str) -> Result<Self> {
        let restored = if placeholder.is_empty() {
            class_name.to_string()
        } else {
            class_name.replace(placeholder, " ")
        };

        let (head, tail) = split_on_first(&restored, b'[');
        let value = tail
            .strip_suffix(']')
            .ok_or_else(|| Error::MalformedToken(class_name.to_string()))?;

        // Drop the dash just before the bracket
        let property = head.strip_suffix('-').unwrap_or(head);

        Ok(Self {
            property: property.to_string(),
            value: value.trim().to_string(),
        })
    }
}
