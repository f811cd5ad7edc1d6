//! Color specification parser.
//!
//! Built on `winnow` 0.7. Accepts `#RRGGBB`, `#AARRGGBB`, and a fixed table
//! of color names (case-insensitive). Everything else is rejected as
//! `ColorError::InvalidColorFormat`.

use crate::error::ColorError;
use crate::model::Color;
use winnow::combinator::{alt, preceded};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::take_while;

/// Named colors, lowercase.
const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color(0xFF00_0000)),
    ("darkgray", Color(0xFF44_4444)),
    ("gray", Color(0xFF88_8888)),
    ("lightgray", Color(0xFFCC_CCCC)),
    ("white", Color(0xFFFF_FFFF)),
    ("red", Color(0xFFFF_0000)),
    ("green", Color(0xFF00_FF00)),
    ("blue", Color(0xFF00_00FF)),
    ("yellow", Color(0xFFFF_FF00)),
    ("cyan", Color(0xFF00_FFFF)),
    ("magenta", Color(0xFFFF_00FF)),
    ("aqua", Color(0xFF00_FFFF)),
    ("fuchsia", Color(0xFFFF_00FF)),
    ("darkgrey", Color(0xFF44_4444)),
    ("grey", Color(0xFF88_8888)),
    ("lightgrey", Color(0xFFCC_CCCC)),
    ("lime", Color(0xFF00_FF00)),
    ("maroon", Color(0xFF80_0000)),
    ("navy", Color(0xFF00_0080)),
    ("olive", Color(0xFF80_8000)),
    ("purple", Color(0xFF80_0080)),
    ("silver", Color(0xFFC0_C0C0)),
    ("teal", Color(0xFF00_8080)),
];

/// Parse a color specification into a packed ARGB `Color`.
///
/// ```
/// use kd_core::color::parse_color;
/// use kd_core::model::Color;
///
/// assert_eq!(parse_color("#FF0000"), Ok(Color::RED));
/// assert_eq!(parse_color("Teal").map(|c| c.argb()), Ok(0xFF00_8080));
/// assert!(parse_color("not-a-color").is_err());
/// ```
pub fn parse_color(spec: &str) -> Result<Color, ColorError> {
    alt((parse_hex_color, parse_named_color))
        .parse(spec)
        .map_err(|_| ColorError::InvalidColorFormat(spec.to_string()))
}

/// Look up a color name, ignoring ASCII case.
pub fn named_color(name: &str) -> Option<Color> {
    NAMED_COLORS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, c)| c)
}

fn parse_hex_color(input: &mut &str) -> ModalResult<Color> {
    let digits: &str =
        preceded('#', take_while(1.., |c: char| c.is_ascii_hexdigit())).parse_next(input)?;
    let value = u32::from_str_radix(digits, 16).map_err(|_| backtrack())?;
    match digits.len() {
        6 => Ok(Color(0xFF00_0000 | value)),
        8 => Ok(Color(value)),
        _ => Err(backtrack()),
    }
}

fn parse_named_color(input: &mut &str) -> ModalResult<Color> {
    let name: &str = take_while(1.., |c: char| c.is_ascii_alphabetic()).parse_next(input)?;
    named_color(name).ok_or_else(backtrack)
}

fn backtrack() -> ErrMode<ContextError> {
    ErrMode::Backtrack(ContextError::new())
}
