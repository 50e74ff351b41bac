//! Built-in rules for common utilities.
//!
//! A starting point for engines that don't ship their own registry, and the
//! default registry of the CLI. Each rule shape appears at least once.

use crate::registry::Registry;
use crate::rule::{CoercedRule, PropertyRule, StaticRule, ValueType};
use crate::style::{Style, StyleValue, style};
use crate::theme::Theme;

fn length(property: &str) -> StaticRule {
    StaticRule::new()
        .prop(property)
        .coerce(ValueType::Length, CoercedRule::property(property))
}

/// The built-in registry.
pub fn registry() -> Registry {
    let mut registry = Registry::new();

    // Sizing and spacing
    registry.insert("w", length("width"));
    registry.insert("h", length("height"));
    registry.insert("m", length("margin"));
    registry.insert("mt", length("marginTop"));
    registry.insert("p", length("padding"));
    registry.insert(
        "mx",
        StaticRule::new().prop(["marginLeft", "marginRight"]),
    );
    registry.insert(
        "my",
        StaticRule::new().prop(["marginTop", "marginBottom"]),
    );
    registry.insert(
        "inset",
        StaticRule::new().prop(["top", "right", "bottom", "left"]),
    );
    registry.insert("z", StaticRule::new().prop("zIndex"));
    registry.insert("opacity", StaticRule::new().prop("opacity"));

    // Colors and lengths sharing a prefix
    registry.insert(
        "text",
        StaticRule::new()
            .types([ValueType::Length, ValueType::Color])
            .coerce(ValueType::Length, CoercedRule::property("fontSize"))
            .coerce(
                ValueType::Color,
                CoercedRule::color("color", "--tw-text-opacity"),
            ),
    );
    registry.insert(
        "bg",
        StaticRule::new()
            .types([ValueType::Url, ValueType::Length, ValueType::Color])
            .coerce(ValueType::Url, CoercedRule::property("backgroundImage"))
            .coerce(ValueType::Length, CoercedRule::property("backgroundSize"))
            .coerce(
                ValueType::Color,
                CoercedRule::color("backgroundColor", "--tw-bg-opacity"),
            ),
    );
    registry.insert(
        "border",
        StaticRule::new()
            .types([ValueType::Length, ValueType::Color])
            .coerce(ValueType::Length, CoercedRule::property("borderWidth"))
            .coerce(
                ValueType::Color,
                CoercedRule::color("borderColor", "--tw-border-opacity"),
            ),
    );

    // Gradient stop computed from the value
    registry.insert(
        "from",
        StaticRule::new()
            .compute(|args| {
                let mut stops = style([("--tw-gradient-from", args.value)]);
                stops.insert(
                    "--tw-gradient-stops".to_string(),
                    StyleValue::Text(format!(
                        "var(--tw-gradient-from), var(--tw-gradient-to, {})",
                        args.transparent_to()
                    )),
                );
                Some(StyleValue::Block(stops))
            })
            .coerce(
                ValueType::Color,
                CoercedRule::function(|value, _| {
                    Some(style([("--tw-gradient-from", value)]))
                }),
            ),
    );

    // Keyword table from the theme, falling back to the literal curve
    registry.insert(
        "ease",
        StaticRule::new().types([ValueType::Lookup]).coerce(
            ValueType::Lookup,
            CoercedRule::function(|value, theme| {
                let curve = theme
                    .get(&format!("transitionTimingFunction.{value}"))
                    .unwrap_or_else(|| value.to_string());
                Some(style([("transitionTimingFunction", curve)]))
            }),
        ),
    );

    // First candidate with a value wins
    registry.insert(
        "font",
        PropertyRule::Candidates(vec![
            StaticRule::new().prop("fontFamily"),
            StaticRule::new()
                .types([ValueType::Length, ValueType::All])
                .coerce(ValueType::Length, CoercedRule::property("fontSize"))
                .coerce(ValueType::All, CoercedRule::function(font_weight_or_family)),
        ]),
    );

    registry.insert(
        "content",
        StaticRule::new()
            .prop("content")
            .compute(|args| Some(StyleValue::Text(args.value.to_string()))),
    );

    // Raw declarations, e.g. css-[color:red;display:block]
    registry.insert("css", StaticRule::new().compute(|args| {
        Some(StyleValue::Text(args.value.to_string()))
    }));

    registry.insert(
        "aspect",
        PropertyRule::function(|value, _| Some(style([("aspectRatio", value)]))),
    );

    registry.insert("container", StaticRule::new().disable_arbitrary());

    registry
}

fn font_weight_or_family(value: &str, _theme: &dyn Theme) -> Option<Style> {
    let is_weight = value.len() == 3
        && value.ends_with("00")
        && value.starts_with(|c: char| ('1'..='9').contains(&c));
    if is_weight {
        Some(style([("fontWeight", value)]))
    } else {
        Some(style([("fontFamily", value)]))
    }
}
