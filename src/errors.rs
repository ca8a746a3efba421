use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Client-side form validation failed; the user can fix the inputs and resubmit
    #[error("{0}")]
    Validation(String),
    /// Network request failed before a response was received
    #[error("Network error: {0}")]
    NetworkError(String),
    /// Server answered with a non-2xx status and a JSON error body
    #[error("HTTP error {status} - {body}")]
    HttpStatus { status: u16, body: String },
    /// Failed to parse a JSON response body
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    UrlError(String),
    /// Invalid input format
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// IO operation failed
    #[error("IO error: {0}")]
    IoError(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::ParseError(err.to_string())
        } else {
            AppError::NetworkError(err.to_string())
        }
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::UrlError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

// Custom type alias for Results in this application
pub type AppResult<T> = Result<T, AppError>;
