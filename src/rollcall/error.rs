use thiserror::Error;

#[derive(Error, Debug)]
pub enum RollcallError {
    /// Transport failure: connection refused, timeout, non-HTTP garbage.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Application error: the server answered with an `{"error": ...}` payload.
    /// Displays as the bare server message so callers can add their own context.
    #[error("{0}")]
    Api(String),

    #[error("Student not found: {0}")]
    NotFound(i64),

    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RollcallError {
    /// True for errors the server reported, as opposed to transport failures.
    pub fn is_application(&self) -> bool {
        matches!(self, RollcallError::Api(_) | RollcallError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, RollcallError>;
