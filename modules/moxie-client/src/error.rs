use thiserror::Error;

pub type Result<T> = std::result::Result<T, MoxieError>;

#[derive(Debug, Error)]
pub enum MoxieError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Moxie API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for MoxieError {
    fn from(err: reqwest::Error) -> Self {
        MoxieError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for MoxieError {
    fn from(err: serde_json::Error) -> Self {
        MoxieError::Parse(err.to_string())
    }
}
