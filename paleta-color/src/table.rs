//! Deterministic stand-in for a platform color engine.
//!
//! [`CssColorTable`] knows the CSS named colors plus hex and functional
//! `rgb()`/`rgba()` literals, and answers both oracle traits the way a
//! browser does: the style engine falls back to black for unknown tokens,
//! the fill style echoes them back unchanged.

use crate::channels::Channels;
use crate::engine::{ColorNameTable, EngineError, FillStyle, StyleEngine};

/// Computed value reported by the style engine for unknown tokens.
const FALLBACK_COMPUTED: &str = "rgb(0, 0, 0)";

/// CSS named colors, sorted by name.
const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("aliceblue", [240, 248, 255]),
    ("antiquewhite", [250, 235, 215]),
    ("aqua", [0, 255, 255]),
    ("aquamarine", [127, 255, 212]),
    ("azure", [240, 255, 255]),
    ("beige", [245, 245, 220]),
    ("bisque", [255, 228, 196]),
    ("black", [0, 0, 0]),
    ("blanchedalmond", [255, 235, 205]),
    ("blue", [0, 0, 255]),
    ("blueviolet", [138, 43, 226]),
    ("brown", [165, 42, 42]),
    ("burlywood", [222, 184, 135]),
    ("cadetblue", [95, 158, 160]),
    ("chartreuse", [127, 255, 0]),
    ("chocolate", [210, 105, 30]),
    ("coral", [255, 127, 80]),
    ("cornflowerblue", [100, 149, 237]),
    ("cornsilk", [255, 248, 220]),
    ("crimson", [220, 20, 60]),
    ("cyan", [0, 255, 255]),
    ("darkblue", [0, 0, 139]),
    ("darkcyan", [0, 139, 139]),
    ("darkgoldenrod", [184, 134, 11]),
    ("darkgray", [169, 169, 169]),
    ("darkgreen", [0, 100, 0]),
    ("darkgrey", [169, 169, 169]),
    ("darkkhaki", [189, 183, 107]),
    ("darkmagenta", [139, 0, 139]),
    ("darkolivegreen", [85, 107, 47]),
    ("darkorange", [255, 140, 0]),
    ("darkorchid", [153, 50, 204]),
    ("darkred", [139, 0, 0]),
    ("darksalmon", [233, 150, 122]),
    ("darkseagreen", [143, 188, 143]),
    ("darkslateblue", [72, 61, 139]),
    ("darkslategray", [47, 79, 79]),
    ("darkslategrey", [47, 79, 79]),
    ("darkturquoise", [0, 206, 209]),
    ("darkviolet", [148, 0, 211]),
    ("deeppink", [255, 20, 147]),
    ("deepskyblue", [0, 191, 255]),
    ("dimgray", [105, 105, 105]),
    ("dimgrey", [105, 105, 105]),
    ("dodgerblue", [30, 144, 255]),
    ("firebrick", [178, 34, 34]),
    ("floralwhite", [255, 250, 240]),
    ("forestgreen", [34, 139, 34]),
    ("fuchsia", [255, 0, 255]),
    ("gainsboro", [220, 220, 220]),
    ("ghostwhite", [248, 248, 255]),
    ("gold", [255, 215, 0]),
    ("goldenrod", [218, 165, 32]),
    ("gray", [128, 128, 128]),
    ("green", [0, 128, 0]),
    ("greenyellow", [173, 255, 47]),
    ("grey", [128, 128, 128]),
    ("honeydew", [240, 255, 240]),
    ("hotpink", [255, 105, 180]),
    ("indianred", [205, 92, 92]),
    ("indigo", [75, 0, 130]),
    ("ivory", [255, 255, 240]),
    ("khaki", [240, 230, 140]),
    ("lavender", [230, 230, 250]),
    ("lavenderblush", [255, 240, 245]),
    ("lawngreen", [124, 252, 0]),
    ("lemonchiffon", [255, 250, 205]),
    ("lightblue", [173, 216, 230]),
    ("lightcoral", [240, 128, 128]),
    ("lightcyan", [224, 255, 255]),
    ("lightgoldenrodyellow", [250, 250, 210]),
    ("lightgray", [211, 211, 211]),
    ("lightgreen", [144, 238, 144]),
    ("lightgrey", [211, 211, 211]),
    ("lightpink", [255, 182, 193]),
    ("lightsalmon", [255, 160, 122]),
    ("lightseagreen", [32, 178, 170]),
    ("lightskyblue", [135, 206, 250]),
    ("lightslategray", [119, 136, 153]),
    ("lightslategrey", [119, 136, 153]),
    ("lightsteelblue", [176, 196, 222]),
    ("lightyellow", [255, 255, 224]),
    ("lime", [0, 255, 0]),
    ("limegreen", [50, 205, 50]),
    ("linen", [250, 240, 230]),
    ("magenta", [255, 0, 255]),
    ("maroon", [128, 0, 0]),
    ("mediumaquamarine", [102, 205, 170]),
    ("mediumblue", [0, 0, 205]),
    ("mediumorchid", [186, 85, 211]),
    ("mediumpurple", [147, 112, 219]),
    ("mediumseagreen", [60, 179, 113]),
    ("mediumslateblue", [123, 104, 238]),
    ("mediumspringgreen", [0, 250, 154]),
    ("mediumturquoise", [72, 209, 204]),
    ("mediumvioletred", [199, 21, 133]),
    ("midnightblue", [25, 25, 112]),
    ("mintcream", [245, 255, 250]),
    ("mistyrose", [255, 228, 225]),
    ("moccasin", [255, 228, 181]),
    ("navajowhite", [255, 222, 173]),
    ("navy", [0, 0, 128]),
    ("oldlace", [253, 245, 230]),
    ("olive", [128, 128, 0]),
    ("olivedrab", [107, 142, 35]),
    ("orange", [255, 165, 0]),
    ("orangered", [255, 69, 0]),
    ("orchid", [218, 112, 214]),
    ("palegoldenrod", [238, 232, 170]),
    ("palegreen", [152, 251, 152]),
    ("paleturquoise", [175, 238, 238]),
    ("palevioletred", [219, 112, 147]),
    ("papayawhip", [255, 239, 213]),
    ("peachpuff", [255, 218, 185]),
    ("peru", [205, 133, 63]),
    ("pink", [255, 192, 203]),
    ("plum", [221, 160, 221]),
    ("powderblue", [176, 224, 230]),
    ("purple", [128, 0, 128]),
    ("rebeccapurple", [102, 51, 153]),
    ("red", [255, 0, 0]),
    ("rosybrown", [188, 143, 143]),
    ("royalblue", [65, 105, 225]),
    ("saddlebrown", [139, 69, 19]),
    ("salmon", [250, 128, 114]),
    ("sandybrown", [244, 164, 96]),
    ("seagreen", [46, 139, 87]),
    ("seashell", [255, 245, 238]),
    ("sienna", [160, 82, 45]),
    ("silver", [192, 192, 192]),
    ("skyblue", [135, 206, 235]),
    ("slateblue", [106, 90, 205]),
    ("slategray", [112, 128, 144]),
    ("slategrey", [112, 128, 144]),
    ("snow", [255, 250, 250]),
    ("springgreen", [0, 255, 127]),
    ("steelblue", [70, 130, 180]),
    ("tan", [210, 180, 140]),
    ("teal", [0, 128, 128]),
    ("thistle", [216, 191, 216]),
    ("tomato", [255, 99, 71]),
    ("turquoise", [64, 224, 208]),
    ("violet", [238, 130, 238]),
    ("wheat", [245, 222, 179]),
    ("white", [255, 255, 255]),
    ("whitesmoke", [245, 245, 245]),
    ("yellow", [255, 255, 0]),
    ("yellowgreen", [154, 205, 50]),
];

/// Standard color table: CSS named colors, hex literals and functional
/// `rgb()`/`rgba()` literals.
#[derive(Debug, Clone, Copy, Default)]
pub struct CssColorTable;

impl CssColorTable {
    /// Look up a CSS color keyword. The name is matched case-insensitively.
    pub fn named(name: &str) -> Option<Channels> {
        let name = name.to_ascii_lowercase();
        if name == "transparent" {
            return Some(Channels::with_alpha(0, 0, 0, 0.0));
        }

        NAMED_COLORS
            .binary_search_by(|(candidate, _)| (*candidate).cmp(name.as_str()))
            .ok()
            .map(|index| {
                let [r, g, b] = NAMED_COLORS[index].1;
                Channels::opaque(r, g, b)
            })
    }
}

impl ColorNameTable for CssColorTable {
    fn normalize(&self, name: &str) -> Option<Channels> {
        let token = name.trim();
        if token.is_empty() {
            return None;
        }

        if let Some(digits) = token.strip_prefix('#') {
            return parse_hex(digits);
        }

        let lower = token.to_ascii_lowercase();
        if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_rgb_args(args);
        }

        Self::named(&lower)
    }
}

impl StyleEngine for CssColorTable {
    fn computed_color(&self, token: &str) -> Result<String, EngineError> {
        Ok(self
            .normalize(token)
            .map(|channels| channels.to_rgb_string())
            .unwrap_or_else(|| String::from(FALLBACK_COMPUTED)))
    }
}

impl FillStyle for CssColorTable {
    fn fill_style(&self, token: &str) -> Result<String, EngineError> {
        Ok(match self.normalize(token) {
            Some(channels) if channels.is_opaque() => channels.to_hex(),
            Some(channels) => channels.to_rgb_string(),
            None => token.to_string(),
        })
    }
}

/// Parse `RGB`, `RGBA`, `RRGGBB` or `RRGGBBAA` hex digits.
fn parse_hex(digits: &str) -> Option<Channels> {
    if !digits.is_ascii() {
        return None;
    }

    let nibble = |index: usize| -> Option<u8> {
        let digit = digits.get(index..=index)?;
        u8::from_str_radix(digit, 16).ok()
    };
    let byte = |index: usize| -> Option<u8> {
        let pair = digits.get(index..index + 2)?;
        u8::from_str_radix(pair, 16).ok()
    };

    match digits.len() {
        3 => Some(Channels::opaque(
            nibble(0)? * 17,
            nibble(1)? * 17,
            nibble(2)? * 17,
        )),
        4 => Some(Channels::with_alpha(
            nibble(0)? * 17,
            nibble(1)? * 17,
            nibble(2)? * 17,
            alpha_from_byte(nibble(3)? * 17),
        )),
        6 => Some(Channels::opaque(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Channels::with_alpha(
            byte(0)?,
            byte(2)?,
            byte(4)?,
            alpha_from_byte(byte(6)?),
        )),
        _ => None,
    }
}

/// Parse the arguments of `rgb()`/`rgba()`.
///
/// Accepts comma or whitespace separators and the `r g b / a` form.
/// Channels may be numbers or percentages and are clamped to `0..=255`;
/// alpha may be a number or a percentage and is clamped to `0..=1`.
fn parse_rgb_args(args: &str) -> Option<Channels> {
    let parts: Vec<&str> = args
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();

    let (r, g, b, alpha) = match parts.as_slice() {
        [r, g, b] => (r, g, b, None),
        [r, g, b, a] => (r, g, b, Some(a)),
        _ => return None,
    };

    let a = match alpha {
        Some(value) => parse_alpha(value)?,
        None => 1.0,
    };

    Some(Channels::with_alpha(
        parse_channel(r)?,
        parse_channel(g)?,
        parse_channel(b)?,
        a,
    ))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_channel(value: &str) -> Option<u8> {
    let scaled = match value.strip_suffix('%') {
        Some(percent) => percent.parse::<f64>().ok()? * 2.55,
        None => value.parse::<f64>().ok()?,
    };
    if !scaled.is_finite() {
        return None;
    }
    Some(scaled.round().clamp(0.0, 255.0) as u8)
}

fn parse_alpha(value: &str) -> Option<f64> {
    let alpha = match value.strip_suffix('%') {
        Some(percent) => percent.parse::<f64>().ok()? / 100.0,
        None => value.parse::<f64>().ok()?,
    };
    if !alpha.is_finite() {
        return None;
    }
    Some(alpha.clamp(0.0, 1.0))
}

/// Convert an 8-bit alpha to the shortest decimal that maps back to the
/// same byte, using at most three fractional digits.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn alpha_from_byte(byte: u8) -> f64 {
    let exact = f64::from(byte) / 255.0;
    let two_digits = (exact * 100.0).round() / 100.0;
    if (two_digits * 255.0).round() as u8 == byte {
        two_digits
    } else {
        (exact * 1000.0).round() / 1000.0
    }
}
