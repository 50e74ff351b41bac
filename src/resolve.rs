//! The arbitrary value pipeline.
//!
//! One call resolves one class, top to bottom, returning as soon as a stage
//! produces a fragment:
//!
//! 1. split the class into property and value
//! 2. look the property up in the registry
//! 3. explicit `type:value` coercion
//! 4. `theme(...)` substitution
//! 5. collapse candidate lists to a single rule
//! 6. multi-type rules, then alpha-modified colors
//! 7. assemble the value onto the rule's target properties
//!
//! Nothing is cached between calls and nothing shared is written, so a
//! `Resolver` can be used from any number of threads at once.

use tracing::{debug, trace};

use crate::config::Options;
use crate::error::{Error, Result};
use crate::registry::Registry;
use crate::rule::{PropertyRule, RuleValue, StaticRule, TargetProperty, ValueArgs, ValueType};
use crate::strategy::StrategyInput;
use crate::style::{Fragment, Style, StyleValue};
use crate::suggest::suggest;
use crate::theme::{Theme, theme_reference};
use crate::token::{ClassToken, Pieces};
use crate::util::{maybe_add_negative, split_on_first};

/// Resolves arbitrary value classes against a registry and theme.
pub struct Resolver<'a> {
    registry: &'a Registry,
    theme: &'a dyn Theme,
    options: Options,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a Registry, theme: &'a dyn Theme) -> Self {
        Self {
            registry,
            theme,
            options: Options::default(),
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Resolve a full class such as `-mt-[4px]` or `bg-[red]/50`.
    pub fn resolve_class(&self, class: &str) -> Result<Fragment> {
        self.resolve(&Pieces::from_class(class))
    }

    /// Resolve a class the upstream tokenizer has already split into pieces.
    pub fn resolve(&self, pieces: &Pieces) -> Result<Fragment> {
        let ClassToken {
            property,
            mut value,
        } = ClassToken::parse(&pieces.class_name, &self.options.space_placeholder)?;
        let rule = self.registry.lookup(&property);

        // Values with their type spelled out: [length:3px], [color:red]
        if let Some(style) = self.resolve_coerced(&property, &value, rule, pieces)? {
            return Ok(style.into());
        }

        // Theme values, e.g. text-[theme(colors.red.500)]
        if let Some(themed) = theme_reference(&value).and_then(|path| self.theme.get(path)) {
            trace!(%property, %value, %themed, "substituted theme value");
            value = themed;
        }

        let rule = match rule {
            Some(PropertyRule::Static(rule)) => rule,
            Some(PropertyRule::Candidates(candidates)) => {
                match candidates.iter().find(|c| c.value.is_some()) {
                    Some(rule) => {
                        trace!(%property, "collapsed candidate list");
                        rule
                    }
                    None => return Err(self.unknown_property(&property, &value, false)),
                }
            }
            Some(PropertyRule::Function(f)) => {
                return f
                    .call(&value, self.theme)
                    .map(Fragment::from)
                    .ok_or_else(|| self.unresolved_raw_value(&property, &value));
            }
            None => return Err(self.unknown_property(&property, &value, false)),
        };

        if rule.is_empty() {
            return Err(self.unknown_property(&property, &value, false));
        }

        if !rule.has_arbitrary {
            return Err(self.unknown_property(&property, &value, true));
        }

        if let Some(RuleValue::Types(types)) = &rule.value {
            return self.resolve_types(&property, &value, rule, types, pieces);
        }

        if pieces.has_alpha() {
            return self.resolve_alpha(&property, &value, rule, pieces);
        }

        self.assemble(&property, &value, rule, pieces)
    }

    fn resolve_coerced(
        &self,
        property: &str,
        value: &str,
        rule: Option<&PropertyRule>,
        pieces: &Pieces,
    ) -> Result<Option<Style>> {
        let (explicit_type, coerced_value) = split_on_first(value, b':');
        if coerced_value.is_empty() || !is_type_tag(explicit_type) {
            return Ok(None);
        }

        let Some(PropertyRule::Static(StaticRule {
            coerced: Some(coerced),
            ..
        })) = rule
        else {
            return Ok(None);
        };

        let Some((ty, coerced_rule)) = ValueType::from_name(explicit_type)
            .and_then(|ty| coerced.get(&ty).map(|rule| (ty, rule)))
        else {
            let options: Vec<String> = coerced
                .keys()
                .map(|ty| format!("{property}-[{ty}:{coerced_value}]"))
                .collect();
            debug!(%property, %explicit_type, ?options, "coercion type not available");
            return Err(Error::InvalidCoercionType {
                property: property.to_string(),
                value: coerced_value.to_string(),
                explicit_type: explicit_type.to_string(),
                options,
            });
        };

        let input = StrategyInput {
            rule: Some(coerced_rule),
            value: coerced_value,
            pieces,
            theme: self.theme,
            has_fallback: true,
        };
        match ty.resolve(input) {
            Some(style) => {
                trace!(%property, %ty, "resolved explicit coercion");
                Ok(Some(style))
            }
            None => {
                debug!(%property, %ty, value = %coerced_value, "coerced value rejected");
                Err(Error::InvalidCoercedValue {
                    property: property.to_string(),
                    value: coerced_value.to_string(),
                    explicit_type: explicit_type.to_string(),
                })
            }
        }
    }

    fn resolve_types(
        &self,
        property: &str,
        value: &str,
        rule: &StaticRule,
        types: &[ValueType],
        pieces: &Pieces,
    ) -> Result<Fragment> {
        for &ty in types {
            let input = StrategyInput {
                rule: rule.coerced_rule(ty),
                value,
                pieces,
                theme: self.theme,
                has_fallback: false,
            };
            if let Some(style) = ty.resolve(input) {
                trace!(%property, %ty, "value matched type");
                return Ok(style.into());
            }
        }

        debug!(%property, %value, ?types, "no type accepted the value");
        Err(Error::AmbiguousValueUnresolved {
            property: property.to_string(),
            value: value.to_string(),
            types: types.iter().map(ToString::to_string).collect(),
        })
    }

    fn resolve_alpha(
        &self,
        property: &str,
        value: &str,
        rule: &StaticRule,
        pieces: &Pieces,
    ) -> Result<Fragment> {
        let style = rule.coerced_rule(ValueType::Color).and_then(|color_rule| {
            ValueType::Color.resolve(StrategyInput {
                rule: Some(color_rule),
                value,
                pieces,
                theme: self.theme,
                has_fallback: false,
            })
        });

        style.map(Fragment::from).ok_or_else(|| {
            debug!(%property, %value, alpha = ?pieces.alpha, "alpha not supported");
            Error::UnsupportedAlpha {
                property: property.to_string(),
                value: value.to_string(),
            }
        })
    }

    fn assemble(
        &self,
        property: &str,
        value: &str,
        rule: &StaticRule,
        pieces: &Pieces,
    ) -> Result<Fragment> {
        let resolved = match &rule.value {
            Some(RuleValue::Compute(f)) => f.call(&ValueArgs {
                value,
                negative: pieces.negative,
                mode: self.options.mode,
                pieces,
            }),
            _ => Some(StyleValue::Text(maybe_add_negative(value, pieces.negative))),
        }
        .filter(|v| !v.is_empty());

        let Some(resolved) = resolved else {
            return Err(self.unresolved_raw_value(property, value));
        };

        let fragment = match &rule.prop {
            // Raw values: the rule names no property
            None => match resolved {
                StyleValue::Block(style) => Fragment::Declarations(style),
                StyleValue::Text(text) => Fragment::Raw(text),
                StyleValue::List(items) => Fragment::Raw(items.join(", ")),
            },
            Some(TargetProperty::Single(name)) => {
                let mut style = Style::new();
                style.insert(name.clone(), resolved);
                Fragment::Declarations(style)
            }
            Some(TargetProperty::Many(names)) => Fragment::Declarations(
                names
                    .iter()
                    .map(|name| (name.clone(), resolved.clone()))
                    .collect(),
            ),
        };
        Ok(fragment)
    }

    fn unknown_property(&self, property: &str, value: &str, disabled: bool) -> Error {
        let suggestions = self.suggestions(property, value);
        debug!(%property, %value, disabled, ?suggestions, "arbitrary class not found");
        Error::UnknownProperty {
            property: property.to_string(),
            value: value.to_string(),
            suggestions,
            disabled,
        }
    }

    fn unresolved_raw_value(&self, property: &str, value: &str) -> Error {
        let suggestions = self.suggestions(property, value);
        debug!(%property, %value, ?suggestions, "rule produced no value");
        Error::UnresolvedRawValue {
            property: property.to_string(),
            value: value.to_string(),
            suggestions,
        }
    }

    fn suggestions(&self, property: &str, value: &str) -> Vec<String> {
        suggest(
            self.registry,
            property,
            value,
            self.options.suggestion_threshold,
        )
    }
}

/// A coercion prefix is a bare word like `length` or `color`.
fn is_type_tag(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphabetic() || b == b'-')
}

/// Resolve `class` with default options.
///
/// ```
/// use arbitrary_css::{JsonTheme, Registry, StaticRule, resolve_arbitrary};
///
/// let mut registry = Registry::new();
/// registry.insert("mx", StaticRule::new().prop(["marginLeft", "marginRight"]));
///
/// let fragment = resolve_arbitrary("mx-[4px]", &registry, &JsonTheme::default()).unwrap();
/// assert_eq!(fragment.get_text("marginRight"), Some("4px"));
/// ```
pub fn resolve_arbitrary(class: &str, registry: &Registry, theme: &dyn Theme) -> Result<Fragment> {
    Resolver::new(registry, theme).resolve_class(class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::CoercedRule;
    use crate::style::style;
    use crate::theme::JsonTheme;
    use serde_json::json;

    fn resolve(registry: &Registry, class: &str) -> Result<Fragment> {
        resolve_arbitrary(class, registry, &JsonTheme::default())
    }

    #[test]
    fn test_is_type_tag() {
        assert!(is_type_tag("length"));
        assert!(is_type_tag("color"));
        assert!(!is_type_tag("url(https"));
        assert!(!is_type_tag(""));
    }

    #[test]
    fn test_explicit_coercion_short_circuits() {
        // The Types path would reject "length:3px"; the coercion must win first
        let registry: Registry = [(
            "w",
            StaticRule::new()
                .types([ValueType::Color])
                .coerce(ValueType::Length, CoercedRule::property("width")),
        )]
        .into_iter()
        .collect();

        let fragment = resolve(&registry, "w-[length:3px]").unwrap();
        assert_eq!(fragment, Fragment::from(style([("width", "3px")])));
    }

    #[test]
    fn test_coercion_without_coerced_map_falls_through() {
        let registry: Registry = [("content", StaticRule::new().prop("content"))]
            .into_iter()
            .collect();
        let fragment = resolve(&registry, "content-[a:b]").unwrap();
        assert_eq!(fragment.get_text("content"), Some("a:b"));
    }

    #[test]
    fn test_invalid_coercion_type_lists_options() {
        let registry: Registry = [(
            "text",
            StaticRule::new()
                .coerce(ValueType::Color, CoercedRule::property("color"))
                .coerce(ValueType::Length, CoercedRule::property("fontSize")),
        )]
        .into_iter()
        .collect();

        let err = resolve(&registry, "text-[url:x]").unwrap_err();
        match err {
            Error::InvalidCoercionType {
                explicit_type,
                options,
                ..
            } => {
                assert_eq!(explicit_type, "url");
                assert_eq!(options, ["text-[color:x]", "text-[length:x]"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // not a known type at all
        assert!(matches!(
            resolve(&registry, "text-[size:1px]"),
            Err(Error::InvalidCoercionType { .. })
        ));
    }

    #[test]
    fn test_invalid_coerced_value() {
        let registry: Registry = [(
            "w",
            StaticRule::new().coerce(ValueType::Length, CoercedRule::property("width")),
        )]
        .into_iter()
        .collect();
        assert!(matches!(
            resolve(&registry, "w-[length:wide]"),
            Err(Error::InvalidCoercedValue { ref explicit_type, .. }) if explicit_type == "length"
        ));
    }

    #[test]
    fn test_url_value_is_not_a_coercion() {
        let registry: Registry = [(
            "bg",
            StaticRule::new()
                .types([ValueType::Url])
                .coerce(ValueType::Color, CoercedRule::property("backgroundColor")),
        )]
        .into_iter()
        .collect();
        let fragment = resolve(&registry, "bg-[url(https://x.test/a.png)]").unwrap();
        assert_eq!(
            fragment.get_text("backgroundImage"),
            Some("url(https://x.test/a.png)")
        );
    }

    #[test]
    fn test_theme_substitution() {
        let registry: Registry = [(
            "text",
            StaticRule::new()
                .types([ValueType::Color])
                .coerce(ValueType::Color, CoercedRule::property("color")),
        )]
        .into_iter()
        .collect();
        let theme = JsonTheme::new(json!({ "colors": { "red": { "500": "#ef4444" } } }));
        let resolver = Resolver::new(&registry, &theme);

        let fragment = resolver.resolve_class("text-[theme(colors.red.500)]").unwrap();
        assert_eq!(fragment.get_text("color"), Some("#ef4444"));

        // missing path keeps the literal
        let fragment = resolver.resolve_class("text-[theme(colors.nope)]").unwrap();
        assert_eq!(fragment.get_text("color"), Some("theme(colors.nope)"));
    }

    #[test]
    fn test_candidate_list_uses_first_with_value() {
        let registry: Registry = [(
            "font",
            PropertyRule::Candidates(vec![
                StaticRule::new().prop("fontFamily"),
                StaticRule::new()
                    .types([ValueType::Length])
                    .coerce(ValueType::Length, CoercedRule::property("fontSize")),
            ]),
        )]
        .into_iter()
        .collect();
        let fragment = resolve(&registry, "font-[12px]").unwrap();
        assert_eq!(fragment.get_text("fontSize"), Some("12px"));
    }

    #[test]
    fn test_candidate_list_without_value_is_unknown() {
        let registry: Registry = [(
            "font",
            PropertyRule::Candidates(vec![StaticRule::new().prop("fontFamily")]),
        )]
        .into_iter()
        .collect();
        assert!(matches!(
            resolve(&registry, "font-[x]"),
            Err(Error::UnknownProperty { disabled: false, .. })
        ));
    }

    #[test]
    fn test_function_rule() {
        let registry: Registry = [(
            "aspect",
            PropertyRule::function(|value, _| {
                value
                    .contains('/')
                    .then(|| style([("aspectRatio", value)]))
            }),
        )]
        .into_iter()
        .collect();
        let fragment = resolve(&registry, "aspect-[16/9]").unwrap();
        assert_eq!(fragment.get_text("aspectRatio"), Some("16/9"));
        assert!(matches!(
            resolve(&registry, "aspect-[wide]"),
            Err(Error::UnresolvedRawValue { .. })
        ));
    }

    #[test]
    fn test_negative_default_value() {
        let registry: Registry = [("mt", StaticRule::new().prop("marginTop"))]
            .into_iter()
            .collect();
        let fragment = resolve(&registry, "-mt-[4px]").unwrap();
        assert_eq!(fragment.get_text("marginTop"), Some("-4px"));
    }

    #[test]
    fn test_computed_value_sees_mode_and_negative() {
        let registry: Registry = [(
            "probe",
            StaticRule::new().prop("content").compute(|args| {
                Some(format!("{}|{}|{}", args.value, args.negative, args.is_embedded()).into())
            }),
        )]
        .into_iter()
        .collect();
        let theme = JsonTheme::default();
        let resolver = Resolver::new(&registry, &theme).with_options(
            Options::default().with_mode(crate::config::OutputMode::Stylesheet),
        );
        let fragment = resolver.resolve_class("-probe-[x]").unwrap();
        assert_eq!(fragment.get_text("content"), Some("x|true|false"));
    }

    #[test]
    fn test_prop_with_empty_value_is_unresolved() {
        let registry: Registry = [("w", StaticRule::new().prop("width"))]
            .into_iter()
            .collect();
        assert!(matches!(
            resolve(&registry, "w-[ ]"),
            Err(Error::UnresolvedRawValue { .. })
        ));
    }
}
