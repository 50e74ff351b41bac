//! # arbitrary-css
//!
//! Resolves arbitrary value utility classes such as `w-[13px]`,
//! `bg-[color:#f00]/50` or `text-[theme(colors.red.500)]` into style
//! declarations.
//!
//! ## Features
//!
//! - Explicit type coercion (`length:`, `color:`, `url:`, `lookup:`, `all:`)
//! - `theme(...)` references resolved through any [`Theme`]
//! - Multi-type rules tried in order, e.g. `text-[2rem]` vs `text-[red]`
//! - Alpha modifiers and opacity variables for colors
//! - "Did you mean" suggestions on every failure
//!
//! ## Quick Start
//!
//! ```
//! use arbitrary_css::{JsonTheme, Resolver, presets};
//!
//! let registry = presets::registry();
//! let theme = JsonTheme::default();
//! let resolver = Resolver::new(&registry, &theme);
//!
//! let fragment = resolver.resolve_class("mx-[4px]").unwrap();
//! assert_eq!(fragment.get_text("marginLeft"), Some("4px"));
//! assert_eq!(fragment.get_text("marginRight"), Some("4px"));
//!
//! let err = resolver.resolve_class("bgg-[red]").unwrap_err();
//! assert_eq!(err.suggestions(), ["bg-[red]"]);
//! ```
//!
//! ## Registries
//!
//! Rules can be built in code with [`StaticRule`] and [`PropertyRule`], or
//! loaded from JSON with [`Registry::from_json_str`]. Closures are only
//! available from code.

pub mod color;
pub mod config;
pub mod error;
pub mod presets;
pub mod registry;
pub mod resolve;
pub mod rule;
pub mod strategy;
pub mod style;
pub mod suggest;
pub mod theme;
pub mod token;
pub(crate) mod util;

pub use config::{Options, OutputMode};
pub use error::{Error, Result};
pub use registry::Registry;
pub use resolve::{Resolver, resolve_arbitrary};
pub use rule::{
    CoercedRule, PropertyRule, RuleValue, StaticRule, TargetProperty, ValueArgs, ValueType,
};
pub use style::{Fragment, Style, StyleValue, ToCss};
pub use theme::{JsonTheme, Theme};
pub use token::{ClassToken, Pieces};
