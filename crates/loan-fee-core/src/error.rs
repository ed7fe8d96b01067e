use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanFeeError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LoanFeeError {
    fn from(e: serde_json::Error) -> Self {
        LoanFeeError::SerializationError(e.to_string())
    }
}
