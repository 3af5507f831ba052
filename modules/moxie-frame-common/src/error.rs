use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed request URL: {0}")]
    MalformedUrl(String),

    #[error("Invalid carried state: {0}")]
    InvalidState(String),
}

impl From<url::ParseError> for FrameError {
    fn from(err: url::ParseError) -> Self {
        FrameError::MalformedUrl(err.to_string())
    }
}
