//! Error types for arbitrary value resolution.
//!
//! Every resolution failure is a user-input error. Each one carries a
//! headline and an optional hint, the same pair a "bad/good" diagnostic
//! prints, and `Display` joins the two with a blank line.

use thiserror::Error;

/// Errors that can occur while loading configuration or resolving a class.
#[derive(Error, Debug)]
pub enum Error {
    /// The property is not registered, its rule is empty, or the rule
    /// explicitly disables arbitrary values.
    #[error("{}", render(&unknown_headline(.property, .value, .disabled), suggestion_hint(.suggestions).as_deref()))]
    UnknownProperty {
        property: String,
        value: String,
        suggestions: Vec<String>,
        disabled: bool,
    },

    /// The explicit `type:` prefix is not in the rule's coerced map.
    #[error("The coerced value of “{explicit_type}” isn’t available\n\n{}", coerced_hint(.options))]
    InvalidCoercionType {
        property: String,
        value: String,
        explicit_type: String,
        options: Vec<String>,
    },

    /// The strategy picked by an explicit `type:` prefix rejected the value.
    #[error("The coerced value in “{property}-[{explicit_type}:{value}]” isn’t valid\n\nReplace “{value}” with a valid {explicit_type} based value")]
    InvalidCoercedValue {
        property: String,
        value: String,
        explicit_type: String,
    },

    /// None of the rule's candidate types accepted the value.
    #[error("The arbitrary value in “{property}-[{value}]” isn’t valid\n\nReplace “{value}” with a valid {} based value", .types.join(" or "))]
    AmbiguousValueUnresolved {
        property: String,
        value: String,
        types: Vec<String>,
    },

    /// An alpha modifier was supplied to a rule without color support.
    #[error("There is no support for a “{property}” alpha value in “{property}-[{value}]”")]
    UnsupportedAlpha { property: String, value: String },

    /// The rule targets no property and produced no value.
    #[error("{}", render(&unknown_headline(.property, .value, &false), suggestion_hint(.suggestions).as_deref()))]
    UnresolvedRawValue {
        property: String,
        value: String,
        suggestions: Vec<String>,
    },

    #[error("Malformed arbitrary value class: {0}")]
    MalformedToken(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// The one-line summary of the failure.
    pub fn headline(&self) -> String {
        match self {
            Error::UnknownProperty {
                property,
                value,
                disabled,
                ..
            } => unknown_headline(property, value, disabled),
            Error::UnresolvedRawValue {
                property, value, ..
            } => unknown_headline(property, value, &false),
            Error::InvalidCoercionType { explicit_type, .. } => {
                format!("The coerced value of “{explicit_type}” isn’t available")
            }
            Error::InvalidCoercedValue {
                property,
                value,
                explicit_type,
            } => format!("The coerced value in “{property}-[{explicit_type}:{value}]” isn’t valid"),
            Error::AmbiguousValueUnresolved {
                property, value, ..
            } => format!("The arbitrary value in “{property}-[{value}]” isn’t valid"),
            other => other.to_string(),
        }
    }

    /// Advice shown under the headline, if any.
    pub fn hint(&self) -> Option<String> {
        match self {
            Error::UnknownProperty { suggestions, .. }
            | Error::UnresolvedRawValue { suggestions, .. } => suggestion_hint(suggestions),
            Error::InvalidCoercionType { options, .. } => Some(coerced_hint(options)),
            Error::InvalidCoercedValue {
                value,
                explicit_type,
                ..
            } => Some(format!(
                "Replace “{value}” with a valid {explicit_type} based value"
            )),
            Error::AmbiguousValueUnresolved { value, types, .. } => Some(format!(
                "Replace “{value}” with a valid {} based value",
                types.join(" or ")
            )),
            _ => None,
        }
    }

    /// Near-match classes attached to the failure.
    pub fn suggestions(&self) -> &[String] {
        match self {
            Error::UnknownProperty { suggestions, .. }
            | Error::UnresolvedRawValue { suggestions, .. } => suggestions,
            Error::InvalidCoercionType { options, .. } => options,
            _ => &[],
        }
    }
}

fn unknown_headline(property: &str, value: &str, disabled: &bool) -> String {
    if *disabled {
        format!("There is no support for the arbitrary value “{property}” in “{property}-[{value}]”")
    } else {
        format!("The arbitrary class “{property}” in “{property}-[{value}]” wasn’t found")
    }
}

fn suggestion_hint(suggestions: &[String]) -> Option<String> {
    if suggestions.is_empty() {
        None
    } else {
        Some(format!("Try one of these:\n\n{}", suggestions.join(", ")))
    }
}

fn coerced_hint(options: &[String]) -> String {
    format!("Try one of these coerced classes:\n\n{}", options.join(", "))
}

fn render(headline: &str, hint: Option<&str>) -> String {
    match hint {
        Some(hint) => format!("{headline}\n\n{hint}"),
        None => headline.to_string(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
