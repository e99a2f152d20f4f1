use paleta_client::Url;
use thiserror::Error;

/// Environment variable naming the backend API base.
pub(crate) const API_URL_VAR: &str = "PALETA_API_URL";
pub(crate) const DEFAULT_API_URL: &str = "http://localhost:3001/api";

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("invalid PALETA_API_URL value {value:?}: {source}")]
    InvalidUrl {
        value: String,
        source: paleta_client::UrlParseError,
    },
}

/// Runtime configuration of the palette shell.
#[derive(Debug, Clone)]
pub(crate) struct AppConfig {
    api_base: Url,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub(crate) fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let raw = lookup(API_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| String::from(DEFAULT_API_URL));
        let api_base = parse_api_base(&raw)?;
        Ok(Self { api_base })
    }

    pub(crate) fn api_base(&self) -> &Url {
        &self.api_base
    }
}

/// A base ending in `/api` is kept, a trailing slash is dropped, and any
/// other base gets `/api` appended.
fn normalize_api_base(raw: &str) -> String {
    let raw = raw.trim();
    if raw.ends_with("/api") {
        raw.to_string()
    } else if let Some(stripped) = raw.strip_suffix('/') {
        stripped.to_string()
    } else {
        format!("{raw}/api")
    }
}

fn parse_api_base(raw: &str) -> Result<Url, ConfigError> {
    let value = normalize_api_base(raw);
    Url::parse(&value)
        .map_err(|source| ConfigError::InvalidUrl { value, source })
}
