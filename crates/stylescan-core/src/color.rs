//! Color property detection and RGB to hex normalization.

use cssparser::{ParseError, Parser, ParserInput, Token};

/// Property name fragments that mark a color-valued property.
pub const COLOR_PROPERTIES: &[&str] = &[
    "color",
    "background-color",
    "border-color",
    "border-top-color",
    "border-right-color",
    "border-bottom-color",
    "border-left-color",
    "outline-color",
];

/// An `rgb()` / `rgba()` color as written in CSS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Alpha in `0.0..=1.0`, `None` when the source had no alpha channel.
    pub alpha: Option<f64>,
}

impl RgbColor {
    /// Format as `#rrggbb`, or `#rrggbbaa` when alpha is present and not 1.
    pub fn to_hex(&self) -> String {
        let mut hex = format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b);
        if let Some(alpha) = self.alpha {
            if alpha != 1.0 {
                let a = (alpha * 255.0).round().clamp(0.0, 255.0) as u8;
                hex.push_str(&format!("{:02x}", a));
            }
        }
        hex
    }
}

/// Check whether a property name is color-valued.
pub fn is_color_property(property: &str) -> bool {
    COLOR_PROPERTIES.iter().any(|c| property.contains(c))
}

/// Check whether a value is already written in a recognized color form.
pub fn is_color_value(value: &str) -> bool {
    ["#", "rgb", "rgba", "hsl", "hsla"]
        .iter()
        .any(|prefix| value.starts_with(prefix))
}

/// Convert the first `rgb()`/`rgba()` in `value` to hex.
///
/// Anything that does not contain a parseable rgb function is returned
/// unchanged, so hex input passes straight through.
pub fn to_hex(value: &str) -> String {
    match parse_rgb(value) {
        Some(color) => color.to_hex(),
        None => value.to_string(),
    }
}

/// Find and parse the first `rgb(r, g, b)` or `rgba(r, g, b, a)` in `value`,
/// including ones nested in other functions.
pub fn parse_rgb(value: &str) -> Option<RgbColor> {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    find_rgb(&mut parser)
}

fn find_rgb(parser: &mut Parser<'_, '_>) -> Option<RgbColor> {
    loop {
        let token = parser.next().ok()?.clone();
        let found: Result<Option<RgbColor>, ParseError<'_, ()>> = match token {
            Token::Function(ref name) if is_rgb_function(name) => {
                parser.parse_nested_block(|args| rgb_arguments(args).map(Some))
            }
            Token::Function(_) | Token::ParenthesisBlock | Token::SquareBracketBlock => {
                parser.parse_nested_block(|block| {
                    let found = find_rgb(block);
                    while block.next().is_ok() {}
                    Ok(found)
                })
            }
            _ => continue,
        };
        if let Ok(Some(color)) = found {
            return Some(color);
        }
    }
}

fn is_rgb_function(name: &str) -> bool {
    name.eq_ignore_ascii_case("rgb") || name.eq_ignore_ascii_case("rgba")
}

/// Comma-separated integer channels with an optional trailing alpha.
fn rgb_arguments<'i>(args: &mut Parser<'i, '_>) -> Result<RgbColor, ParseError<'i, ()>> {
    let r = channel(args)?;
    args.expect_comma()?;
    let g = channel(args)?;
    args.expect_comma()?;
    let b = channel(args)?;
    let alpha = match args.try_parse(|args| args.expect_comma()) {
        Ok(()) => Some(alpha_value(args)?),
        Err(_) => None,
    };
    Ok(RgbColor { r, g, b, alpha })
}

fn channel<'i>(args: &mut Parser<'i, '_>) -> Result<u8, ParseError<'i, ()>> {
    let location = args.current_source_location();
    match *args.next()? {
        // Out of range channels saturate.
        Token::Number {
            int_value: Some(value), ..
        } => Ok(u8::try_from(value.clamp(0, 255)).unwrap_or(u8::MAX)),
        ref token => Err(location.new_unexpected_token_error(token.clone())),
    }
}

fn alpha_value<'i>(args: &mut Parser<'i, '_>) -> Result<f64, ParseError<'i, ()>> {
    let location = args.current_source_location();
    match *args.next()? {
        Token::Number { value, .. } => Ok(f64::from(value)),
        Token::Percentage { unit_value, .. } => Ok(f64::from(unit_value)),
        ref token => Err(location.new_unexpected_token_error(token.clone())),
    }
}

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` into channels.
pub fn parse_hex(value: &str) -> Option<(u8, u8, u8, Option<u8>)> {
    let hex = value.strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => {
            let short = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some((short(0)?, short(1)?, short(2)?, None))
        }
        6 => Some((channel(0)?, channel(2)?, channel(4)?, None)),
        8 => Some((channel(0)?, channel(2)?, channel(4)?, Some(channel(6)?))),
        _ => None,
    }
}

/// Pull a color out of a possibly compound value such as a border shorthand.
///
/// Returns the color exactly as written in `value`.
pub fn extract_color(value: &str) -> Option<&str> {
    if value.is_empty() {
        return None;
    }
    if is_color_value(value) {
        return Some(value);
    }
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    find_color(&mut parser)
}

fn find_color<'i>(parser: &mut Parser<'i, '_>) -> Option<&'i str> {
    loop {
        parser.skip_whitespace();
        let start = parser.position();
        let token = parser.next().ok()?.clone();
        match token {
            Token::Hash(ref digits) | Token::IDHash(ref digits) if is_hex_digits(digits) => {
                return Some(parser.slice_from(start));
            }
            Token::Function(ref name) if is_color_function(name) => {
                let has_arguments: Result<bool, ParseError<'_, ()>> = parser.parse_nested_block(|args| {
                    let has_arguments = !args.is_exhausted();
                    while args.next().is_ok() {}
                    Ok(has_arguments)
                });
                if let Ok(true) = has_arguments {
                    return Some(parser.slice_from(start));
                }
            }
            Token::Function(_) | Token::ParenthesisBlock | Token::SquareBracketBlock => {
                let nested: Result<Option<&'i str>, ParseError<'_, ()>> = parser.parse_nested_block(|block| {
                    let found = find_color(block);
                    while block.next().is_ok() {}
                    Ok(found)
                });
                if let Ok(Some(color)) = nested {
                    return Some(color);
                }
            }
            _ => {}
        }
    }
}

fn is_hex_digits(digits: &str) -> bool {
    (3..=8).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

fn is_color_function(name: &str) -> bool {
    ["rgb", "rgba", "hsl", "hsla"]
        .iter()
        .any(|f| name.eq_ignore_ascii_case(f))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_color_property() {
        assert!(is_color_property("color"));
        assert!(is_color_property("background-color"));
        assert!(is_color_property("border-left-color"));
        assert!(is_color_property("text-decoration-color"));
        assert!(!is_color_property("width"));
        assert!(!is_color_property("background-image"));
    }

    #[test]
    fn test_to_hex_rgb() {
        assert_eq!(to_hex("rgb(255, 255, 255)"), "#ffffff");
        assert_eq!(to_hex("rgb(0, 128, 15)"), "#00800f");
        assert_eq!(to_hex("RGB(1,2,3)"), "#010203");
    }

    #[test]
    fn test_to_hex_rgba() {
        assert_eq!(to_hex("rgba(255, 0, 0, 0.5)"), "#ff000080");
        assert_eq!(to_hex("rgba(0, 0, 0, 0)"), "#00000000");
        assert_eq!(to_hex("rgba(10, 20, 30, 1)"), "#0a141e");
    }

    #[test]
    fn test_to_hex_passthrough() {
        assert_eq!(to_hex("#abcdef"), "#abcdef");
        assert_eq!(to_hex("red"), "red");
        assert_eq!(to_hex("rgb(1, 2)"), "rgb(1, 2)");
        assert_eq!(to_hex("rgb("), "rgb(");
        assert_eq!(to_hex(""), "");
        assert_eq!(to_hex("rgba(1, 2, 3, .)"), "rgba(1, 2, 3, .)");
    }

    #[test]
    fn test_to_hex_embedded() {
        assert_eq!(to_hex("1px solid rgb(17, 34, 51)"), "#112233");
    }

    #[test]
    fn test_to_hex_idempotent_on_output() {
        let once = to_hex("rgb(12, 200, 99)");
        assert_eq!(to_hex(&once), once);
    }

    #[test]
    fn test_to_hex_roundtrips_every_channel_value() {
        for v in 0..=255u8 {
            for (r, g, b) in [(v, 0, 0), (0, v, 0), (0, 0, v), (v, v, v), (v, 255 - v, v / 2)] {
                let hex = to_hex(&format!("rgb({}, {}, {})", r, g, b));
                assert_eq!(hex.len(), 7, "{}", hex);
                assert_eq!(parse_hex(&hex), Some((r, g, b, None)));
            }
        }
    }

    #[test]
    fn test_to_hex_roundtrips_every_alpha_byte() {
        for a in 0..255u8 {
            let css = format!("rgba(12, 34, 56, {})", f64::from(a) / 255.0);
            let hex = to_hex(&css);
            assert_eq!(parse_hex(&hex), Some((12, 34, 56, Some(a))), "{}", css);
        }
        assert_eq!(to_hex("rgba(12, 34, 56, 1.0)"), "#0c2238");
        assert_eq!(to_hex("rgba(12, 34, 56, 50%)"), "#0c223880");
    }

    #[test]
    fn test_to_hex_saturates_channels() {
        assert_eq!(to_hex("rgb(300, 256, 99999999999)"), "#ffffff");
    }

    #[test]
    fn test_to_hex_nested_and_commented() {
        assert_eq!(to_hex("drop-shadow(0 0 2px rgb(1, 2, 3))"), "#010203");
        assert_eq!(to_hex("rgb(1, /* green */ 2, 3)"), "#010203");
        assert_eq!(to_hex("rgb(1, 2) rgb(4, 5, 6)"), "#040506");
    }

    #[test]
    fn test_parse_hex_short() {
        assert_eq!(parse_hex("#fff"), Some((255, 255, 255, None)));
        assert_eq!(parse_hex("#12345"), None);
        assert_eq!(parse_hex("fff"), None);
    }

    #[test]
    fn test_extract_color_verbatim() {
        assert_eq!(extract_color("#fff"), Some("#fff"));
        assert_eq!(extract_color("rgba(0, 0, 0, 0.4)"), Some("rgba(0, 0, 0, 0.4)"));
        assert_eq!(extract_color("hsl(10, 50%, 50%)"), Some("hsl(10, 50%, 50%)"));
    }

    #[test]
    fn test_extract_color_embedded() {
        assert_eq!(extract_color("1px solid #ff0000"), Some("#ff0000"));
        assert_eq!(
            extract_color("0px 4px 20px rgba(0, 0, 0, 0.08)"),
            Some("rgba(0, 0, 0, 0.08)")
        );
        assert_eq!(extract_color("2px dashed HSLA(1, 2%, 3%, 0.5)"), Some("HSLA(1, 2%, 3%, 0.5)"));
        assert_eq!(extract_color("drop-shadow(0 0 2px #abc)"), Some("#abc"));
    }

    #[test]
    fn test_extract_color_none() {
        assert_eq!(extract_color("10px"), None);
        assert_eq!(extract_color(""), None);
        assert_eq!(extract_color("solid #zz"), None);
        assert_eq!(extract_color("1px solid rgb()"), None);
    }
}
