use thiserror::Error;

#[derive(Debug, Error)]
pub enum LeasePricerError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid configuration: {key} — {reason}")]
    InvalidConfiguration { key: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LeasePricerError {
    fn from(e: serde_json::Error) -> Self {
        LeasePricerError::SerializationError(e.to_string())
    }
}

pub(crate) fn overflow(context: &str) -> LeasePricerError {
    LeasePricerError::Overflow {
        context: context.to_string(),
    }
}
