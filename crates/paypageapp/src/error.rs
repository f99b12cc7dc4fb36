use crate::model::CompositionId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaypageError {
    #[error("Composition not found: {0}")]
    CompositionNotFound(CompositionId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Terms of purchase must be accepted before paying")]
    TermsNotAccepted,

    #[error("Payment failed: {0}")]
    Payment(String),
}

pub type Result<T> = std::result::Result<T, PaypageError>;
