//! Error types for the vizshot runtime.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving the headless browser.
#[derive(Debug, Error)]
pub enum Error {
    /// The chromedriver binary was not found.
    #[error("chromedriver not found. Install it or set CHROMEDRIVER to its path.")]
    DriverNotFound,

    /// Failed to launch the chromedriver process.
    #[error("Failed to launch chromedriver: {0}")]
    LaunchFailed(String),

    /// Failed to establish a WebDriver session with the driver.
    #[error("Failed to connect to chromedriver: {0}")]
    ConnectionFailed(String),

    /// Error reported by the remote end of the WebDriver session.
    #[error("{error}: {message}")]
    WebDriver {
        /// W3C error code (e.g. "no such element", "invalid session id")
        error: String,
        /// Human-readable message from the remote end
        message: String,
    },

    /// Navigation did not complete.
    #[error("Navigation failed for '{url}'")]
    NavigationFailed {
        /// The URL that could not be reached
        url: String,
    },

    /// The browser's current URL does not match the visualizer's base URL.
    #[error("Browser is at '{actual}' but the session reports '{expected}'")]
    UrlMismatch {
        /// The session's base URL
        expected: String,
        /// The browser's current URL
        actual: String,
    },

    /// Timeout waiting for a condition.
    #[error("Timeout after {ms}ms waiting for: {condition}")]
    Timeout {
        /// How long we waited
        ms: u64,
        /// What we were waiting for
        condition: String,
    },

    /// Element not found by selector.
    #[error("Element not found: selector '{0}'")]
    ElementNotFound(String),

    /// Script execution against the live page failed.
    #[error("Script execution failed: {0}")]
    ScriptFailed(String),

    /// Operation attempted on a disposed browser handle.
    #[error("Browser closed: cannot {operation} after disposal")]
    TargetClosed {
        /// The operation that was attempted
        operation: String,
    },

    /// Screenshot could not be written to disk.
    #[error("Screenshot failed at {path}")]
    Screenshot {
        /// Destination path
        path: PathBuf,
        /// Underlying filesystem error
        #[source]
        source: std::io::Error,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport error talking to the driver.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Returns true if this is a timeout error.
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Timeout { .. } => true,
            Error::WebDriver { error, .. } => error == "timeout",
            _ => false,
        }
    }

    /// Returns true if this error means the browser handle is gone.
    pub fn is_target_closed(&self) -> bool {
        match self {
            Error::TargetClosed { .. } => true,
            Error::WebDriver { error, .. } => error == "invalid session id",
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_timeout_is_timeout() {
        let err = Error::WebDriver {
            error: "timeout".to_string(),
            message: "page load strategy".to_string(),
        };
        assert!(err.is_timeout());
        assert!(!err.is_target_closed());
    }

    #[test]
    fn invalid_session_is_target_closed() {
        let err = Error::WebDriver {
            error: "invalid session id".to_string(),
            message: "session deleted".to_string(),
        };
        assert!(err.is_target_closed());
    }

    #[test]
    fn timeout_display_names_the_condition() {
        let err = Error::Timeout {
            ms: 10_000,
            condition: "element '#stats-plot'".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("10000ms"));
        assert!(msg.contains("#stats-plot"));
    }
}
