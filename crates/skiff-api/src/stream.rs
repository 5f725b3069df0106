//! NDJSON stream line shapes
//!
//! Streaming endpoints answer with newline-delimited JSON. Each line is
//! either a message meant for direct display or a structured API error.
//! Unknown fields are rejected so a line can never satisfy both shapes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A display line emitted by a streaming endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StreamMessage {
    /// Text meant for direct display to the operator.
    pub message: String,
}

/// An error line emitted by a streaming endpoint.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
#[error("error: {error}")]
pub struct StreamError {
    /// Error detail reported by the server.
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_line_parses() {
        let m: StreamMessage = serde_json::from_str(r#"{"message":"hello"}"#).unwrap();
        assert_eq!(m.message, "hello");
    }

    #[test]
    fn error_line_parses_and_displays() {
        let e: StreamError = serde_json::from_str(r#"{"error":"boom"}"#).unwrap();
        assert_eq!(e.to_string(), "error: boom");
    }

    #[test]
    fn shapes_are_mutually_exclusive() {
        assert!(serde_json::from_str::<StreamMessage>(r#"{"error":"boom"}"#).is_err());
        assert!(serde_json::from_str::<StreamError>(r#"{"message":"hello"}"#).is_err());
        // A line carrying both fields satisfies neither shape.
        let both = r#"{"message":"hello","error":"boom"}"#;
        assert!(serde_json::from_str::<StreamMessage>(both).is_err());
        assert!(serde_json::from_str::<StreamError>(both).is_err());
    }
}
