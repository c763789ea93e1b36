use thiserror::Error;

#[derive(Debug, Error)]
pub enum PkiscopeError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed response body: {0}")]
    MalformedResponse(String),

    #[error("Element not found: {0}")]
    MissingElement(String),

    #[error("No link bound at index {0}")]
    UnknownLink(usize),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PkiscopeError {
    /// True for failures that happen before an application-level payload is
    /// available: network errors, undecodable bodies, missing fields.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            PkiscopeError::Http(_)
                | PkiscopeError::Serialization(_)
                | PkiscopeError::MalformedResponse(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, PkiscopeError>;
