//! Error types for the catalogue client.

/// Failures raised by the client itself.
///
/// A non-success HTTP status is not one of these: lookups report it through
/// [`crate::ApiResponse`] and callers branch on it.
#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    #[error("Given API URL appears to be bad: {0}")]
    InvalidBaseUrl(String),

    #[error("Given API key appears to be bad. It should look like a UUID.")]
    InvalidApiKey,

    #[error("Given {what} appears to be bad: {value}")]
    InvalidIdentifier { what: &'static str, value: String },

    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CatalogueError {
    /// True for errors detected before any request is sent.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            CatalogueError::InvalidBaseUrl(_)
                | CatalogueError::InvalidApiKey
                | CatalogueError::InvalidIdentifier { .. }
        )
    }
}

pub type CatalogueResult<T> = Result<T, CatalogueError>;
