use thiserror::Error;

/// Error type that captures storage and reference failures.
#[derive(Debug, Error)]
pub enum CostingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Invalid reference: {0}")]
    InvalidRef(String),
}
