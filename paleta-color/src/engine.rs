use thiserror::Error;

use crate::channels::Channels;

/// Errors reported by a color engine while evaluating a token.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("color engine is unavailable")]
    Unavailable,
    #[error("malformed color token: {0}")]
    Malformed(String),
}

/// Primary color oracle: computes the `color` value an element would get
/// when styled with a token.
///
/// Implementations are allowed to behave like a browser style engine and
/// silently report `rgb(0, 0, 0)` for tokens they do not understand.
pub trait StyleEngine {
    fn computed_color(&self, token: &str) -> Result<String, EngineError>;
}

/// Secondary color oracle: assigns a token to a fresh fill style and
/// reports the resulting property value.
///
/// An accepted token comes back in normalized form; a rejected one is
/// returned unchanged.
pub trait FillStyle {
    fn fill_style(&self, token: &str) -> Result<String, EngineError>;
}

/// Lookup capability over a table of known colors.
pub trait ColorNameTable {
    /// Map a color token to its channels, or `None` if unrecognized.
    fn normalize(&self, name: &str) -> Option<Channels>;
}
