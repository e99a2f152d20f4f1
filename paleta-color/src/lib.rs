//! Color name resolution for the paleta workspace.
//!
//! The entry point is [`ColorResolver`], which maps a free-text color name
//! (`"navy"`, `"#0af"`, `"rgba(0, 0, 0, 0.5)"`) to a canonical
//! [`Resolution`] holding a `#rrggbb` hex string and an `rgb()`/`rgba()`
//! string.
//!
//! Resolution is driven by two injected oracles:
//! - a [`StyleEngine`], which computes the color value of a token the way a
//!   browser style engine would,
//! - a [`FillStyle`], which normalizes a token the way a canvas fill style
//!   assignment would and is only consulted to tell a genuine black from an
//!   unrecognized token.
//!
//! [`CssColorTable`] implements both deterministically over the CSS named
//! colors and hex/functional literals.

mod channels;
mod engine;
mod resolver;
mod table;

pub use channels::Channels;
pub use engine::{ColorNameTable, EngineError, FillStyle, StyleEngine};
pub use resolver::{ColorResolver, Resolution, resolve};
pub use table::CssColorTable;
