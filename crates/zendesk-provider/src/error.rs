use thiserror::Error;
use zendesk_client::ClientError;
use zendesk_domain::DomainError;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("could not parse {kind} id {id:?}: {source}")]
    InvalidId {
        kind: &'static str,
        id: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("missing {attribute}: set it in the provider block or via {env}")]
    MissingConfig {
        attribute: &'static str,
        env: &'static str,
    },

    #[error("the provider has not been configured")]
    NotConfigured,

    #[error("invalid value for {attribute}: {message}")]
    InvalidValue {
        attribute: &'static str,
        message: String,
    },

    #[error("unable to locate any ticket field with type {0:?}")]
    NoTicketFieldOfType(String),

    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
