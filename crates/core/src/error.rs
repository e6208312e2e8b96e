/// Result alias that carries the custom [`CardError`] type.
pub type Result<T> = std::result::Result<T, CardError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum CardError {
    /// Catch-all variant for session-level failures that only need to surface
    /// a readable message (a poisoned lock, a failed audio handle).
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Cue sheets are interchanged as JSON; parse and encode failures land here.
    #[error("cue sheet JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CardError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}

impl From<&str> for CardError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for CardError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
