//! Color-string parser.
//!
//! Built on `winnow` 0.7. Accepts the forms a browser color picker or a
//! palette definition hands us: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`,
//! `rgb(r, g, b)`, `rgba(r, g, b, a)` and a few CSS names.

use crate::error::ConfigError;
use crate::model::Color;
use winnow::ascii::{float, multispace0};
use winnow::combinator::{alt, delimited, separated};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::take_while;

/// Parse a color string. Surrounding whitespace is ignored; anything
/// left over after the color is an error.
pub fn parse_color(input: &str) -> Result<Color, ConfigError> {
    let mut rest = input.trim();
    let color = parse_color_value
        .parse_next(&mut rest)
        .map_err(|_| ConfigError::InvalidColor(input.to_string()))?;
    if !rest.trim().is_empty() {
        return Err(ConfigError::InvalidColor(input.to_string()));
    }
    Ok(color)
}

fn backtrack<T>() -> ModalResult<T> {
    Err(ErrMode::Backtrack(ContextError::new()))
}

fn parse_color_value(input: &mut &str) -> ModalResult<Color> {
    alt((parse_hex_color, parse_rgb_function, parse_named_color)).parse_next(input)
}

fn parse_hex_color(input: &mut &str) -> ModalResult<Color> {
    let _ = '#'.parse_next(input)?;
    let digits: &str = take_while(3..=8, |c: char| c.is_ascii_hexdigit()).parse_next(input)?;
    match Color::from_hex(digits) {
        Some(color) => Ok(color),
        None => backtrack(),
    }
}

fn parse_word<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| c.is_ascii_alphabetic()).parse_next(input)
}

fn parse_number(input: &mut &str) -> ModalResult<f32> {
    let value: f32 = delimited(multispace0, float, multispace0).parse_next(input)?;
    if value.is_finite() {
        Ok(value)
    } else {
        backtrack()
    }
}

fn parse_rgb_function(input: &mut &str) -> ModalResult<Color> {
    let has_alpha = match parse_word.parse_next(input)?.to_ascii_lowercase().as_str() {
        "rgb" => false,
        "rgba" => true,
        _ => return backtrack(),
    };
    let _ = (multispace0, '(').parse_next(input)?;
    let values: Vec<f32> = separated(3..=4, parse_number, ',').parse_next(input)?;
    let _ = ')'.parse_next(input)?;

    let expected = if has_alpha { 4 } else { 3 };
    if values.len() != expected {
        return backtrack();
    }

    let rgb = |v: f32| v.clamp(0.0, 255.0) / 255.0;
    let alpha = values.get(3).map_or(1.0, |a| a.clamp(0.0, 1.0));
    Ok(Color::rgba(rgb(values[0]), rgb(values[1]), rgb(values[2]), alpha))
}

fn parse_named_color(input: &mut &str) -> ModalResult<Color> {
    match parse_word.parse_next(input)?.to_ascii_lowercase().as_str() {
        "black" => Ok(Color::BLACK),
        "white" => Ok(Color::WHITE),
        "transparent" => Ok(Color::TRANSPARENT),
        _ => backtrack(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_picker_hex() {
        let c = parse_color("#e11d48").unwrap();
        assert_eq!(c.to_rgba8(), [0xE1, 0x1D, 0x48, 255]);
    }

    #[test]
    fn parses_rgb_functions() {
        let c = parse_color("rgb(20, 184, 166)").unwrap();
        assert_eq!(c.to_rgba8(), [20, 184, 166, 255]);

        let c = parse_color("RGBA( 255 ,0, 0 , 0.5 )").unwrap();
        assert_eq!(c.to_rgba8(), [255, 0, 0, 128]);
    }

    #[test]
    fn clamps_out_of_range_channels() {
        let c = parse_color("rgb(300, -5, 128)").unwrap();
        assert_eq!(c.to_rgba8(), [255, 0, 128, 255]);
    }

    #[test]
    fn parses_names_with_whitespace() {
        assert_eq!(parse_color("  White ").unwrap(), Color::WHITE);
        assert_eq!(parse_color("transparent").unwrap(), Color::TRANSPARENT);
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "#12", "rgb(1, 2)", "rgba(1, 2, 3)", "rgb(1, 2, 3) x", "purple-ish", "#FFF #000"] {
            assert!(parse_color(bad).is_err(), "{bad:?} should not parse");
        }
    }
}
