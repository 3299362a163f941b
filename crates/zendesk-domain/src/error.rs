use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("invalid action value {value:?}: {source}")]
    InvalidActionValue {
        value: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown locale: {0}")]
    UnknownLocale(String),

    #[error("unknown locale id: {0}")]
    UnknownLocaleId(i64),
}
