use crate::channels::Channels;
use crate::engine::{EngineError, FillStyle, StyleEngine};
use crate::table::CssColorTable;

/// Canonical representations of a resolved color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// `#rrggbb`, lowercase.
    pub hex: String,
    /// `rgb(r, g, b)` or `rgba(r, g, b, a)`.
    pub rgb: String,
}

impl From<Channels> for Resolution {
    fn from(channels: Channels) -> Self {
        Self {
            hex: channels.to_hex(),
            rgb: channels.to_rgb_string(),
        }
    }
}

/// Turns free-text color names into canonical hex/rgb pairs.
///
/// The style engine is the primary oracle. Because style engines report
/// black for tokens they do not understand, a black result for anything
/// other than the word `black` is double-checked with the fill style
/// oracle before it is trusted.
#[derive(Debug, Clone)]
pub struct ColorResolver<E = CssColorTable, F = CssColorTable> {
    engine: E,
    fill: F,
}

impl ColorResolver {
    /// Resolver backed by the standard CSS color table.
    pub fn standard() -> Self {
        Self::new(CssColorTable, CssColorTable)
    }
}

impl Default for ColorResolver {
    fn default() -> Self {
        Self::standard()
    }
}

impl<E: StyleEngine, F: FillStyle> ColorResolver<E, F> {
    pub fn new(engine: E, fill: F) -> Self {
        Self { engine, fill }
    }

    #[cfg(test)]
    pub(crate) fn fill(&self) -> &F {
        &self.fill
    }

    /// Resolve `name` into a hex/rgb pair.
    ///
    /// Returns `None` for blank input, for tokens neither oracle accepts,
    /// and whenever an oracle fails. Never panics.
    pub fn resolve(&self, name: &str) -> Option<Resolution> {
        let token = name.trim();
        if token.is_empty() {
            return None;
        }

        match self.try_resolve(token) {
            Ok(resolution) => resolution,
            Err(err) => {
                log::debug!("color resolution for {token:?} failed: {err}");
                None
            },
        }
    }

    fn try_resolve(
        &self,
        token: &str,
    ) -> Result<Option<Resolution>, EngineError> {
        let computed = self.engine.computed_color(token)?;
        let Some(channels) = Channels::from_computed(&computed) else {
            return Ok(None);
        };

        if channels.is_black() && !token.eq_ignore_ascii_case("black") {
            return self.revalidate(token);
        }

        Ok(Some(Resolution::from(channels)))
    }

    /// Second opinion for a suspicious black result.
    fn revalidate(
        &self,
        token: &str,
    ) -> Result<Option<Resolution>, EngineError> {
        let normalized = self.fill.fill_style(token)?;
        if normalized == token {
            log::debug!("color token {token:?} rejected by fill style");
            return Ok(None);
        }

        let computed = self.engine.computed_color(&normalized)?;
        Ok(Channels::from_computed(&computed).map(Resolution::from))
    }
}

/// Resolve `name` with the standard CSS color table.
pub fn resolve(name: &str) -> Option<Resolution> {
    ColorResolver::standard().resolve(name)
}
