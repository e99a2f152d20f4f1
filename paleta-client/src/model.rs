use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Swatch shown for entries that carry neither a hex nor an rgb value.
pub const PLACEHOLDER_SWATCH: &str = "#ccc";

/// Opaque color identifier assigned by the remote store.
///
/// Kept exactly as received: numeric ids stay numbers, textual ids stay
/// strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorId {
    Number(u64),
    Text(String),
}

impl Display for ColorId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<u64> for ColorId {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ColorId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ColorId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl ColorId {
    /// Parse user input into an id, preferring the numeric form.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        Some(
            input
                .parse::<u64>()
                .map(Self::Number)
                .unwrap_or_else(|_| Self::Text(input.to_string())),
        )
    }
}

/// A palette color as stored remotely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorEntry {
    #[serde(alias = "_id")]
    pub id: ColorId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rgb: Option<String>,
}

impl ColorEntry {
    pub fn id(&self) -> &ColorId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hex(&self) -> Option<&str> {
        non_empty(self.hex.as_deref())
    }

    pub fn rgb(&self) -> Option<&str> {
        non_empty(self.rgb.as_deref())
    }

    /// Value used to paint the entry's swatch: hex, then rgb, then the
    /// neutral placeholder.
    pub fn swatch(&self) -> &str {
        self.hex().or_else(|| self.rgb()).unwrap_or(PLACEHOLDER_SWATCH)
    }
}

/// Fields submitted when creating or updating a color.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColorCandidate {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rgb: Option<String>,
}

impl ColorCandidate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hex: None,
            rgb: None,
        }
    }

    pub fn with_hex(mut self, hex: impl Into<String>) -> Self {
        self.hex = Some(hex.into());
        self
    }

    pub fn with_rgb(mut self, rgb: impl Into<String>) -> Self {
        self.rgb = Some(rgb.into());
        self
    }

    /// Build a candidate from raw form fields. Every field is trimmed and
    /// blank codes are dropped.
    pub fn from_fields(name: &str, hex: &str, rgb: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            hex: non_empty(Some(hex.trim())).map(str::to_string),
            rgb: non_empty(Some(rgb.trim())).map(str::to_string),
        }
    }

    /// Return whether the candidate carries a usable display name.
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Apply the candidate to an id, producing the entry the remote store
    /// is expected to hold afterwards.
    pub fn into_entry(self, id: ColorId) -> ColorEntry {
        ColorEntry {
            id,
            name: self.name,
            hex: self.hex,
            rgb: self.rgb,
        }
    }
}

/// `{ "data": ... }` response wrapper.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub(crate) data: Option<T>,
}

/// Error payload returned with non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    mensaje: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ErrorBody {
    pub(crate) fn into_message(self) -> Option<String> {
        self.mensaje.or(self.message).filter(|m| !m.trim().is_empty())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}
