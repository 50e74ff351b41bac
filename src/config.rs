//! Resolver options.

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::token::SPACE_PLACEHOLDER;

/// Which kind of output the surrounding engine is producing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Style objects embedded in a css-in-js call.
    #[default]
    Embedded,
    /// Classes written into a stylesheet.
    Stylesheet,
}

/// Knobs for a [`Resolver`](crate::Resolver).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Options {
    /// Stand-in for literal spaces inside brackets.
    pub space_placeholder: String,
    /// Suggestions must rate strictly above this.
    pub suggestion_threshold: f64,
    pub mode: OutputMode,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            space_placeholder: SPACE_PLACEHOLDER.to_string(),
            suggestion_threshold: 0.25,
            mode: OutputMode::default(),
        }
    }
}

impl Options {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.space_placeholder, "__SPACE_ID__");
        assert_eq!(options.suggestion_threshold, 0.25);
        assert_eq!(options.mode, OutputMode::Embedded);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options = Options::from_json_str(r#"{ "mode": "stylesheet" }"#).unwrap();
        assert_eq!(options.mode, OutputMode::Stylesheet);
        assert_eq!(options.space_placeholder, SPACE_PLACEHOLDER);
    }

    #[test]
    fn test_unknown_field_is_an_error() {
        assert!(Options::from_json_str(r#"{ "threshold": 0.5 }"#).is_err());
    }
}
