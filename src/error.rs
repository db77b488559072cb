//! Error types for the editor and gallery client

use thiserror::Error;

/// Result type alias for editor and gallery operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while editing, rasterizing or talking to the store
#[derive(Error, Debug)]
pub enum Error {
    /// The request never produced a response (DNS, connect, timeout, ...)
    #[error("Network error: {0}")]
    Transport(String),

    /// The store answered with a non-2xx status
    #[error("{message}")]
    RequestFailed { status: u16, message: String },

    /// The body was not the JSON we expected
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A color string that is not CSS hex notation
    #[error("Invalid color: {0:?}")]
    InvalidColor(String),

    /// Failed to rasterize or encode the grid
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// A drawing script line that could not be parsed
    #[error("Script error on line {line}: {message}")]
    ScriptError { line: usize, message: String },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP status for `RequestFailed`, `None` otherwise
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::MalformedResponse(err.to_string())
        } else {
            Error::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failed_displays_bare_message() {
        let e = Error::RequestFailed { status: 400, message: "too large".into() };
        assert_eq!(e.to_string(), "too large");
        assert_eq!(e.status(), Some(400));
    }

    #[test]
    fn transport_has_no_status() {
        assert_eq!(Error::Transport("refused".into()).status(), None);
    }
}
