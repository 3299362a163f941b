use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Zendesk returned {status} for {url}: {message}")]
    Api {
        status: u16,
        url: String,
        message: String,
    },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("invalid subdomain {0:?}: expected lowercase letters, digits and inner hyphens")]
    InvalidSubdomain(String),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }
}
