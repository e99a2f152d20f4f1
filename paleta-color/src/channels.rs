use std::fmt::{self, Display, Formatter};

/// Color channels as reported by a style engine.
///
/// `r`, `g` and `b` are 8-bit integers, `a` is the alpha value in the
/// `0.0..=1.0` range exactly as it was parsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Channels {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Channels {
    pub const BLACK: Channels = Channels::opaque(0, 0, 0);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Return whether the color channels are all zero, ignoring alpha.
    pub fn is_black(&self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }

    pub fn is_opaque(&self) -> bool {
        (self.a - 1.0).abs() < f64::EPSILON
    }

    /// Canonical `#rrggbb` form with lowercase digits. Alpha is dropped.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Canonical `rgb(r, g, b)` form, or `rgba(r, g, b, a)` when the
    /// color is not fully opaque.
    pub fn to_rgb_string(&self) -> String {
        if self.is_opaque() {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }

    /// Extract channels from a computed color value such as
    /// `rgb(0, 0, 255)` or `rgba(255, 0, 0, 0.5)`.
    ///
    /// Numbers are taken in order of appearance: the first three are the
    /// color channels (fractions are truncated), an optional fourth is the
    /// alpha value. Returns `None` when fewer than three numbers are found
    /// or a channel does not fit into a byte.
    pub fn from_computed(value: &str) -> Option<Self> {
        let numbers = numeric_tokens(value);
        let [r, g, b, rest @ ..] = numbers.as_slice() else {
            return None;
        };

        let a = match rest.first() {
            Some(alpha) => alpha.parse::<f64>().ok()?,
            None => 1.0,
        };

        Some(Self {
            r: channel(r)?,
            g: channel(g)?,
            b: channel(b)?,
            a,
        })
    }
}

impl Display for Channels {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rgb_string())
    }
}

fn channel(token: &str) -> Option<u8> {
    let integer = token.split('.').next().unwrap_or(token);
    integer.parse::<u8>().ok()
}

/// Split `value` into runs of digits, keeping a single decimal point
/// that is followed by a digit.
fn numeric_tokens(value: &str) -> Vec<&str> {
    let bytes = value.as_bytes();
    let mut tokens = Vec::new();
    let mut index = 0;

    while index < bytes.len() {
        let starts_number = bytes[index].is_ascii_digit()
            || (bytes[index] == b'.'
                && bytes.get(index + 1).is_some_and(u8::is_ascii_digit));
        if !starts_number {
            index += 1;
            continue;
        }

        let start = index;
        let mut seen_dot = false;
        while index < bytes.len() {
            let byte = bytes[index];
            if byte.is_ascii_digit() {
                index += 1;
            } else if byte == b'.'
                && !seen_dot
                && bytes.get(index + 1).is_some_and(u8::is_ascii_digit)
            {
                seen_dot = true;
                index += 1;
            } else {
                break;
            }
        }
        tokens.push(&value[start..index]);
    }

    tokens
}
