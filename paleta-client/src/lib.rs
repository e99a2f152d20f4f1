//! Client side of the remote color collection.
//!
//! [`RemoteColorService`] is the seam the palette store talks to.
//! [`HttpColorService`] implements it over the `/colores` REST resource;
//! with the `memory` feature, `MemoryColorService` provides an in-process
//! implementation for tests.

mod errors;
mod http;
#[cfg(any(test, feature = "memory"))]
mod memory;
mod model;
mod service;

pub use errors::{GENERIC_FAILURE, RemoteError};
pub use http::HttpColorService;
#[cfg(any(test, feature = "memory"))]
pub use memory::MemoryColorService;
pub use model::{ColorCandidate, ColorEntry, ColorId, PLACEHOLDER_SWATCH};
pub use service::RemoteColorService;
pub use url::{ParseError as UrlParseError, Url};
