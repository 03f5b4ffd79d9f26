use rescount_core::error::RescountError;
use thiserror::Error;

/// Errors from the Plex Media Server client.
#[derive(Debug, Error)]
pub enum PlexError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid server URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("auth error: {0}")]
    Auth(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("unexpected catalog shape: {0}")]
    Shape(String),
}

impl From<PlexError> for RescountError {
    fn from(e: PlexError) -> Self {
        RescountError::Catalog(e.to_string())
    }
}
