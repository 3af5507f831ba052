use thiserror::Error;

pub type Result<T> = std::result::Result<T, FarscoreError>;

#[derive(Debug, Error)]
pub enum FarscoreError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("No user data found")]
    NoProfileFound,
}

impl From<reqwest::Error> for FarscoreError {
    fn from(err: reqwest::Error) -> Self {
        FarscoreError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for FarscoreError {
    fn from(err: serde_json::Error) -> Self {
        FarscoreError::Parse(err.to_string())
    }
}
