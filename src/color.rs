//! Color parsing and alpha helpers.
//!
//! Parsing covers what arbitrary values carry in practice: a handful of
//! named keywords, hex notation and `rgb()`/`rgba()`. Anything else
//! (`currentColor`, `var(...)`, `hsl(...)`) is passed through untouched
//! unless an alpha has to be blended in.

use cssparser::{ParseError, Parser, ParserInput, Token};

use crate::style::{Style, StyleValue};
use crate::token::Pieces;

/// RGBA color (8 bits per channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };
    pub const TRANSPARENT: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Create a new opaque color.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color with alpha.
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Parse a complete CSS color string.
    pub fn parse(value: &str) -> Option<Color> {
        let mut input = ParserInput::new(value.trim());
        let mut parser = Parser::new(&mut input);
        let color = parse_color(&mut parser)?;
        parser.is_exhausted().then_some(color)
    }

    /// `rgb(r g b / <alpha>)` with a caller-provided alpha expression.
    fn with_alpha_css(&self, alpha: &str) -> String {
        format!("rgb({} {} {} / {alpha})", self.r, self.g, self.b)
    }
}

fn parse_color(input: &mut Parser<'_, '_>) -> Option<Color> {
    // Keywords; anything without fixed channels is not a color here
    if let Ok(token) = input.try_parse(|i| i.expect_ident_cloned()) {
        let color = match token.to_ascii_lowercase().as_str() {
            "black" => Color::BLACK,
            "white" => Color::WHITE,
            "red" => Color::rgb(255, 0, 0),
            "green" => Color::rgb(0, 128, 0),
            "blue" => Color::rgb(0, 0, 255),
            "yellow" => Color::rgb(255, 255, 0),
            "cyan" | "aqua" => Color::rgb(0, 255, 255),
            "magenta" | "fuchsia" => Color::rgb(255, 0, 255),
            "gray" | "grey" => Color::rgb(128, 128, 128),
            "orange" => Color::rgb(255, 165, 0),
            "purple" => Color::rgb(128, 0, 128),
            "pink" => Color::rgb(255, 192, 203),
            "transparent" => Color::TRANSPARENT,
            _ => return None,
        };
        return Some(color);
    }

    // `#f00` lexes as IDHash, `#222` as Hash. Match the variant inside
    // try_parse or a wrong token is consumed.
    if let Ok(hash) = input.try_parse(|i| -> Result<_, ParseError<'_, ()>> {
        match i.next()? {
            Token::IDHash(h) | Token::Hash(h) => Ok(h.clone()),
            _ => Err(i.new_custom_error(())),
        }
    }) && let Some(color) = parse_hex_color(hash.as_ref())
    {
        return Some(color);
    }

    if let Ok(color) = input.try_parse(parse_rgb_function) {
        return Some(color);
    }

    None
}

fn parse_hex_color(hex: &str) -> Option<Color> {
    let digit = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok();
    let pair = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        3 => Some(Color::rgb(digit(0)? * 17, digit(1)? * 17, digit(2)? * 17)),
        4 => Some(Color::rgba(
            digit(0)? * 17,
            digit(1)? * 17,
            digit(2)? * 17,
            digit(3)? * 17,
        )),
        6 => Some(Color::rgb(pair(0)?, pair(2)?, pair(4)?)),
        8 => Some(Color::rgba(pair(0)?, pair(2)?, pair(4)?, pair(6)?)),
        _ => None,
    }
}

fn parse_rgb_function<'i>(input: &mut Parser<'i, '_>) -> Result<Color, ParseError<'i, ()>> {
    let name = input.expect_function()?.clone();
    if !name.eq_ignore_ascii_case("rgb") && !name.eq_ignore_ascii_case("rgba") {
        return Err(input.new_custom_error(()));
    }
    input.parse_nested_block(|input| {
        let r = parse_color_component(input)?;
        let comma = input.try_parse(|i| i.expect_comma()).is_ok();
        let g = parse_color_component(input)?;
        if comma {
            input.expect_comma()?;
        }
        let b = parse_color_component(input)?;

        let has_alpha = if comma {
            input.try_parse(|i| i.expect_comma()).is_ok()
        } else {
            input.try_parse(|i| i.expect_delim('/')).is_ok()
        };
        let a = if has_alpha {
            parse_alpha_component(input)?
        } else {
            255
        };
        Ok(Color::rgba(r, g, b, a))
    })
}

fn parse_color_component<'i>(input: &mut Parser<'i, '_>) -> Result<u8, ParseError<'i, ()>> {
    let location = input.current_source_location();
    match input.next()? {
        Token::Number { value, .. } => Ok(value.round().clamp(0.0, 255.0) as u8),
        Token::Percentage { unit_value, .. } => {
            Ok((unit_value * 255.0).round().clamp(0.0, 255.0) as u8)
        }
        _ => Err(location.new_custom_error(())),
    }
}

fn parse_alpha_component<'i>(input: &mut Parser<'i, '_>) -> Result<u8, ParseError<'i, ()>> {
    let location = input.current_source_location();
    match input.next()? {
        Token::Number { value, .. } => Ok((value * 255.0).round().clamp(0.0, 255.0) as u8),
        Token::Percentage { unit_value, .. } => {
            Ok((unit_value * 255.0).round().clamp(0.0, 255.0) as u8)
        }
        _ => Err(location.new_custom_error(())),
    }
}

/// Inputs for [`with_alpha`].
#[derive(Debug, Clone, Copy)]
pub struct AlphaRequest<'a> {
    pub color: &'a str,
    pub property: &'a str,
    pub pieces: &'a Pieces,
    /// Also emit `variable: 1` so the opacity variable has a value.
    pub has_fallback: bool,
    /// Opacity custom property, e.g. `--tw-bg-opacity`.
    pub variable: Option<&'a str>,
}

/// Build a color declaration, blending in the class alpha or opacity variable.
///
/// Returns `None` when there is no color, or when an alpha was requested
/// for a color whose channels can't be read.
pub fn with_alpha(request: AlphaRequest<'_>) -> Option<Style> {
    let AlphaRequest {
        color,
        property,
        pieces,
        has_fallback,
        variable,
    } = request;

    if color.is_empty() {
        return None;
    }

    let parsed = Color::parse(color);
    let mut style = Style::new();

    if pieces.has_alpha() {
        // An alpha that can't be read as a number is refused, not dropped
        let alpha = pieces.alpha_value()?;
        let parsed = parsed?;
        style.insert(property.to_string(), parsed.with_alpha_css(&alpha).into());
        return Some(style);
    }

    match (parsed, variable) {
        (Some(parsed), Some(variable)) if parsed.is_opaque() => {
            if has_fallback {
                style.insert(variable.to_string(), StyleValue::from("1"));
            }
            let value = parsed.with_alpha_css(&format!("var({variable})"));
            style.insert(property.to_string(), value.into());
        }
        _ => {
            style.insert(property.to_string(), color.into());
        }
    }
    Some(style)
}

/// The same color with zero alpha, for gradient stops fading out.
pub fn transparent_to(color: &str) -> String {
    match Color::parse(color) {
        Some(Color { r, g, b, .. }) => format!("rgba({r}, {g}, {b}, 0)"),
        None => "rgba(255, 255, 255, 0)".to_string(),
    }
}
