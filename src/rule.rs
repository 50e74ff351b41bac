//! Per-property resolution rules.
//!
//! A registry maps each utility prefix (`w`, `bg`, `font`, …) to a
//! [`PropertyRule`]. Rules come in three shapes:
//!
//! - [`PropertyRule::Function`]: a closure from `(value, theme)` to a style
//! - [`PropertyRule::Static`]: a [`StaticRule`] describing target
//!   properties, accepted value types and explicit coercions
//! - [`PropertyRule::Candidates`]: ordered static rules, collapsed to the
//!   first one with a `value` before resolution continues
//!
//! The data-only subset (everything except closures) deserializes from JSON.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

use crate::color::{self, AlphaRequest};
use crate::config::OutputMode;
use crate::style::{Style, StyleValue};
use crate::theme::Theme;
use crate::token::Pieces;

/// Defines a closed keyword enum with string conversions.
///
/// ```ignore
/// keyword_enum! {
///     pub enum ValueType {
///         Length => "length",
///     }
/// }
/// ```
macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $kw:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $kw)]
                $variant,
            )*
        }

        impl $name {
            /// All variants in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)*];

            /// Returns the keyword for this value.
            #[inline]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $kw,)*
                }
            }

            /// Parse a keyword into this enum.
            #[inline]
            pub fn from_name(s: &str) -> Option<Self> {
                match s {
                    $($kw => Some($name::$variant),)*
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

keyword_enum! {
    /// The closed set of value interpretations a rule can coerce to.
    #[derive(Deserialize, serde::Serialize)]
    pub enum ValueType {
        /// Hand the value to a rule function unchanged.
        All => "all",
        Color => "color",
        Length => "length",
        /// `url(...)` background images
        Url => "url",
        /// Keyword tables, e.g. named easing curves
        Lookup => "lookup",
    }
}

type RuleFnInner = dyn Fn(&str, &dyn Theme) -> Option<Style> + Send + Sync;

/// A rule closure from `(value, theme)` to a style, or `None` on no match.
#[derive(Clone)]
pub struct RuleFn(Arc<RuleFnInner>);

impl RuleFn {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str, &dyn Theme) -> Option<Style> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, value: &str, theme: &dyn Theme) -> Option<Style> {
        (self.0)(value, theme)
    }
}

impl fmt::Debug for RuleFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RuleFn(..)")
    }
}

/// Behavior for one explicitly typed value, e.g. the `color` in `bg-[color:red]`.
#[derive(Debug, Clone)]
pub enum CoercedRule {
    Function(RuleFn),
    /// Write the value to `property`, optionally through an opacity variable.
    Property {
        property: String,
        variable: Option<String>,
    },
}

impl CoercedRule {
    pub fn property(property: impl Into<String>) -> Self {
        CoercedRule::Property {
            property: property.into(),
            variable: None,
        }
    }

    pub fn color(property: impl Into<String>, variable: impl Into<String>) -> Self {
        CoercedRule::Property {
            property: property.into(),
            variable: Some(variable.into()),
        }
    }

    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&str, &dyn Theme) -> Option<Style> + Send + Sync + 'static,
    {
        CoercedRule::Function(RuleFn::new(f))
    }
}

/// Coercions keyed by type, in the order they were declared.
pub type CoercedMap = IndexMap<ValueType, CoercedRule>;

/// Arguments handed to a computed [`RuleValue`].
pub struct ValueArgs<'a> {
    pub value: &'a str,
    pub negative: bool,
    pub mode: OutputMode,
    pub(crate) pieces: &'a Pieces,
}

impl ValueArgs<'_> {
    /// Build a color declaration for the current value, honoring any alpha.
    pub fn color(&self, property: &str, variable: Option<&str>) -> Option<Style> {
        color::with_alpha(AlphaRequest {
            color: self.value,
            property,
            pieces: self.pieces,
            has_fallback: true,
            variable,
        })
    }

    /// The current value's color with zero alpha.
    pub fn transparent_to(&self) -> String {
        color::transparent_to(self.value)
    }

    pub fn is_embedded(&self) -> bool {
        self.mode == OutputMode::Embedded
    }
}

type ValueFnInner = dyn Fn(&ValueArgs<'_>) -> Option<StyleValue> + Send + Sync;

/// Computes the declaration value from the raw arbitrary value.
#[derive(Clone)]
pub struct ValueFn(Arc<ValueFnInner>);

impl ValueFn {
    pub fn call(&self, args: &ValueArgs<'_>) -> Option<StyleValue> {
        (self.0)(args)
    }
}

impl fmt::Debug for ValueFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValueFn(..)")
    }
}

/// How a static rule turns the arbitrary value into a declaration value.
#[derive(Debug, Clone)]
pub enum RuleValue {
    /// Try each type's coercion in order; the first match wins.
    Types(Vec<ValueType>),
    Compute(ValueFn),
}

/// The CSS property (or properties) a static rule writes to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TargetProperty {
    Single(String),
    Many(Vec<String>),
}

impl From<&str> for TargetProperty {
    fn from(s: &str) -> Self {
        TargetProperty::Single(s.to_string())
    }
}

impl<const N: usize> From<[&str; N]> for TargetProperty {
    fn from(props: [&str; N]) -> Self {
        TargetProperty::Many(props.iter().map(|p| p.to_string()).collect())
    }
}

/// Declarative rule for one utility prefix.
#[derive(Debug, Clone)]
pub struct StaticRule {
    pub prop: Option<TargetProperty>,
    pub value: Option<RuleValue>,
    pub coerced: Option<CoercedMap>,
    /// `false` turns every arbitrary value for this prefix into an error.
    pub has_arbitrary: bool,
}

impl Default for StaticRule {
    fn default() -> Self {
        Self {
            prop: None,
            value: None,
            coerced: None,
            has_arbitrary: true,
        }
    }
}

impl StaticRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prop(mut self, prop: impl Into<TargetProperty>) -> Self {
        self.prop = Some(prop.into());
        self
    }

    /// Types to try in order. An empty list leaves the rule without a value.
    pub fn types(mut self, types: impl IntoIterator<Item = ValueType>) -> Self {
        let types: Vec<_> = types.into_iter().collect();
        self.value = (!types.is_empty()).then_some(RuleValue::Types(types));
        self
    }

    pub fn compute<F>(mut self, f: F) -> Self
    where
        F: Fn(&ValueArgs<'_>) -> Option<StyleValue> + Send + Sync + 'static,
    {
        self.value = Some(RuleValue::Compute(ValueFn(Arc::new(f))));
        self
    }

    pub fn coerce(mut self, ty: ValueType, rule: CoercedRule) -> Self {
        self.coerced.get_or_insert_with(IndexMap::new).insert(ty, rule);
        self
    }

    pub fn disable_arbitrary(mut self) -> Self {
        self.has_arbitrary = false;
        self
    }

    /// No target, no value, no coercions and arbitrary values allowed.
    pub fn is_empty(&self) -> bool {
        self.prop.is_none() && self.value.is_none() && self.coerced.is_none() && self.has_arbitrary
    }

    pub fn coerced_rule(&self, ty: ValueType) -> Option<&CoercedRule> {
        self.coerced.as_ref()?.get(&ty)
    }
}

/// The registered behavior for a utility prefix.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawRule")]
pub enum PropertyRule {
    Function(RuleFn),
    Static(StaticRule),
    Candidates(Vec<StaticRule>),
}

impl PropertyRule {
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&str, &dyn Theme) -> Option<Style> + Send + Sync + 'static,
    {
        PropertyRule::Function(RuleFn::new(f))
    }

    /// Whether arbitrary values are allowed, and so whether the prefix may
    /// be offered as a suggestion.
    pub fn has_arbitrary(&self) -> bool {
        match self {
            PropertyRule::Static(rule) => rule.has_arbitrary,
            PropertyRule::Function(_) | PropertyRule::Candidates(_) => true,
        }
    }
}

impl From<StaticRule> for PropertyRule {
    fn from(rule: StaticRule) -> Self {
        PropertyRule::Static(rule)
    }
}

impl From<Vec<StaticRule>> for PropertyRule {
    fn from(rules: Vec<StaticRule>) -> Self {
        PropertyRule::Candidates(rules)
    }
}

// ============================================================================
// JSON representation
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRule {
    Candidates(Vec<RawStaticRule>),
    Static(RawStaticRule),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawStaticRule {
    #[serde(default)]
    prop: Option<TargetProperty>,
    #[serde(default, deserialize_with = "deserialize_types")]
    value: Option<Vec<ValueType>>,
    #[serde(default)]
    coerced: Option<IndexMap<ValueType, RawCoercedRule>>,
    #[serde(default = "default_true", deserialize_with = "deserialize_flag")]
    has_arbitrary: bool,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCoercedRule {
    property: String,
    #[serde(default)]
    variable: Option<String>,
}

fn default_true() -> bool {
    true
}

/// A type list must name at least one type.
fn deserialize_types<'de, D>(deserializer: D) -> Result<Option<Vec<ValueType>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Vec<ValueType>>::deserialize(deserializer)? {
        Some(types) if types.is_empty() => {
            Err(serde::de::Error::invalid_length(0, &"at least one value type"))
        }
        types => Ok(types),
    }
}

/// Accept both `false` and `"false"` for boolean flags.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Text(s) => !s.trim().eq_ignore_ascii_case("false"),
    })
}

impl From<RawStaticRule> for StaticRule {
    fn from(raw: RawStaticRule) -> Self {
        StaticRule {
            prop: raw.prop,
            value: raw.value.map(RuleValue::Types),
            coerced: raw.coerced.map(|map| {
                map.into_iter()
                    .map(|(ty, c)| {
                        (
                            ty,
                            CoercedRule::Property {
                                property: c.property,
                                variable: c.variable,
                            },
                        )
                    })
                    .collect()
            }),
            has_arbitrary: raw.has_arbitrary,
        }
    }
}

impl From<RawRule> for PropertyRule {
    fn from(raw: RawRule) -> Self {
        match raw {
            RawRule::Static(rule) => PropertyRule::Static(rule.into()),
            RawRule::Candidates(rules) => {
                PropertyRule::Candidates(rules.into_iter().map(Into::into).collect())
            }
        }
    }
}
