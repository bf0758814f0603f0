use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepairError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("OTP does not match")]
    OtpMismatch,

    #[error("Config error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, RepairError>;

impl From<RepairError> for String {
    fn from(err: RepairError) -> Self {
        err.to_string()
    }
}

impl From<reqwest::Error> for RepairError {
    fn from(err: reqwest::Error) -> Self {
        RepairError::Network(err.to_string())
    }
}
