use thiserror::Error;

/// The only message ever shown to the user for a failed lookup.
pub const USER_FACING_ERROR: &str = "Movie not found or something went wrong !!";

#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Transport failure or non-success HTTP status
    #[error("request failed: {0}")]
    Network(String),

    /// The directory answered with `Response: "False"`
    #[error("not found: {0}")]
    NotFound(String),

    /// The body could not be decoded
    #[error("malformed response: {0}")]
    Decode(String),
}

impl DirectoryError {
    /// All variants collapse to one generic message.
    pub fn user_message(&self) -> &'static str {
        USER_FACING_ERROR
    }
}

impl From<reqwest::Error> for DirectoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DirectoryError::Decode(err.to_string())
        } else {
            DirectoryError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DirectoryError {
    fn from(err: serde_json::Error) -> Self {
        DirectoryError::Decode(err.to_string())
    }
}
