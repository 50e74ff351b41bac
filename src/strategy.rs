//! Type-resolver strategies.
//!
//! Each [`ValueType`] maps a coerced rule and a value to a style, or `None`
//! when the value doesn't have that type. Strategies never fail; deciding
//! whether a miss is an error is up to the pipeline.

use crate::color::{self, AlphaRequest};
use crate::rule::{CoercedRule, ValueType};
use crate::style::{Style, StyleValue};
use crate::theme::Theme;
use crate::token::Pieces;

/// Units accepted as a trailing length suffix.
pub const LENGTH_UNITS: &[&str] = &[
    "cm", "mm", "Q", "in", "pc", "pt", "px", "em", "ex", "ch", "rem", "lh", "vw", "vh", "vmin",
    "vmax", "%",
];

/// Everything a strategy may look at.
#[derive(Clone, Copy)]
pub struct StrategyInput<'a> {
    pub rule: Option<&'a CoercedRule>,
    pub value: &'a str,
    pub pieces: &'a Pieces,
    pub theme: &'a dyn Theme,
    pub has_fallback: bool,
}

impl ValueType {
    /// Run this type's strategy.
    pub fn resolve(self, input: StrategyInput<'_>) -> Option<Style> {
        match self {
            ValueType::All | ValueType::Lookup => resolve_function(input),
            ValueType::Color => resolve_color(input),
            ValueType::Length => resolve_length(input),
            ValueType::Url => resolve_url(input),
        }
    }
}

fn resolve_function(input: StrategyInput<'_>) -> Option<Style> {
    match input.rule? {
        CoercedRule::Function(f) => f.call(input.value, input.theme),
        CoercedRule::Property { .. } => None,
    }
}

fn resolve_color(input: StrategyInput<'_>) -> Option<Style> {
    match input.rule? {
        CoercedRule::Function(f) => f.call(input.value, input.theme),
        CoercedRule::Property { property, variable } => color::with_alpha(AlphaRequest {
            color: input.value,
            property,
            pieces: input.pieces,
            has_fallback: input.has_fallback,
            variable: variable.as_deref(),
        }),
    }
}

fn resolve_length(input: StrategyInput<'_>) -> Option<Style> {
    if !is_length(input.value) && !input.value.starts_with("var(") {
        return None;
    }
    match input.rule? {
        CoercedRule::Function(f) => f.call(input.value, input.theme),
        CoercedRule::Property { property, .. } => {
            let mut style = Style::new();
            style.insert(property.clone(), StyleValue::from(input.value));
            Some(style)
        }
    }
}

fn resolve_url(input: StrategyInput<'_>) -> Option<Style> {
    if !input.value.starts_with("url(") {
        return None;
    }
    let mut style = Style::new();
    style.insert("backgroundImage".to_string(), StyleValue::from(input.value));
    Some(style)
}

/// Whether `value` ends in a length unit, or is a `calc()` mentioning one.
pub fn is_length(value: &str) -> bool {
    if LENGTH_UNITS.iter().any(|unit| value.ends_with(unit)) {
        return true;
    }
    // calc(...) needs at least one character before the unit
    match value.strip_prefix("calc(") {
        Some(body) => body
            .char_indices()
            .skip(1)
            .any(|(i, _)| LENGTH_UNITS.iter().any(|unit| body[i..].starts_with(unit))),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::JsonTheme;
    use proptest::prelude::*;

    fn run(ty: ValueType, rule: Option<&CoercedRule>, value: &str) -> Option<Style> {
        let pieces = Pieces::default();
        let theme = JsonTheme::default();
        ty.resolve(StrategyInput {
            rule,
            value,
            pieces: &pieces,
            theme: &theme,
            has_fallback: false,
        })
    }

    #[test]
    fn test_is_length() {
        assert!(is_length("10px"));
        assert!(is_length("1.5rem"));
        assert!(is_length("50%"));
        assert!(is_length("2Q"));
        assert!(is_length("calc(100% - 1rem)"));
        assert!(!is_length("10pixels"));
        assert!(!is_length("10"));
        assert!(!is_length("auto"));
        assert!(!is_length("calc(1 + 2)"));
    }

    #[test]
    fn test_length_strategy() {
        let rule = CoercedRule::property("width");
        let style = run(ValueType::Length, Some(&rule), "10px").unwrap();
        assert_eq!(style["width"], StyleValue::from("10px"));

        assert!(run(ValueType::Length, Some(&rule), "10pixels").is_none());
        assert!(run(ValueType::Length, Some(&rule), "var(--x)").is_some());
        // accepted value but nothing configured to receive it
        assert!(run(ValueType::Length, None, "10px").is_none());
    }

    #[test]
    fn test_length_strategy_delegates_to_function() {
        let rule = CoercedRule::function(|value, _| {
            let mut style = Style::new();
            style.insert("fontSize".into(), StyleValue::from(value));
            Some(style)
        });
        let style = run(ValueType::Length, Some(&rule), "2em").unwrap();
        assert_eq!(style["fontSize"], StyleValue::from("2em"));
    }

    #[test]
    fn test_url_strategy_ignores_rule() {
        let style = run(ValueType::Url, None, "url(/a.png)").unwrap();
        assert_eq!(style["backgroundImage"], StyleValue::from("url(/a.png)"));
        assert!(run(ValueType::Url, None, "/a.png").is_none());
    }

    #[test]
    fn test_color_strategy_requires_property() {
        let rule = CoercedRule::color("color", "--tw-text-opacity");
        let style = run(ValueType::Color, Some(&rule), "#000").unwrap();
        assert_eq!(style.len(), 1, "no fallback variable without has_fallback");
        assert!(run(ValueType::Color, None, "#000").is_none());
    }

    #[test]
    fn test_lookup_and_all_need_a_function() {
        let table = CoercedRule::function(|value, theme| {
            let curve = theme.get(&format!("ease.{value}"))?;
            let mut style = Style::new();
            style.insert("transitionTimingFunction".into(), StyleValue::from(curve));
            Some(style)
        });
        let pieces = Pieces::default();
        let theme = JsonTheme::new(serde_json::json!({ "ease": { "in": "cubic-bezier(0.4, 0, 1, 1)" } }));
        let input = StrategyInput {
            rule: Some(&table),
            value: "in",
            pieces: &pieces,
            theme: &theme,
            has_fallback: false,
        };
        assert!(ValueType::Lookup.resolve(input).is_some());
        assert!(ValueType::All.resolve(input).is_some());
        assert!(ValueType::Lookup.resolve(StrategyInput { value: "out", ..input }).is_none());

        let static_rule = CoercedRule::property("width");
        assert!(run(ValueType::Lookup, Some(&static_rule), "in").is_none());
    }

    proptest! {
        #[test]
        fn prop_number_with_unit_is_length(
            n in 0u32..10_000,
            unit in prop::sample::select(LENGTH_UNITS),
        ) {
            let value = format!("{n}{unit}");
            prop_assert!(is_length(&value));
        }

        #[test]
        fn prop_bare_number_is_not_length(n in 0u32..10_000) {
            prop_assert!(!is_length(&n.to_string()));
        }
    }
}
