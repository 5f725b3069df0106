//! Error types for the skiff client

use reqwest::{Method, StatusCode};
use thiserror::Error;

/// Errors that can occur when talking to the API
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed; connection refused, DNS, TLS, and read
    /// failures are all collapsed into this one class
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The response status did not match the wanted one outside verbose
    /// mode; diagnostics have already been printed when this is returned
    #[error("unexpected status {got} (wanted {want}) for {method} {url}")]
    UnexpectedStatus {
        /// Method of the failing request
        method: Method,
        /// Full request URL
        url: String,
        /// Status the caller expected
        want: StatusCode,
        /// Status the server answered with
        got: StatusCode,
    },
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
