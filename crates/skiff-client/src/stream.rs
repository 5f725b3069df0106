//! Streamed responses: line framing, decoding, and consumers
//!
//! Streaming endpoints answer with NDJSON. The handle splits the chunked
//! body into lines in strict arrival order; each line is either echoed
//! verbatim or run through the decoder, depending on the consumer mode.

use std::pin::Pin;

use futures::{Stream, StreamExt};
use reqwest::{Response, StatusCode};

use skiff_api::{StreamError, StreamMessage};

use crate::error::Result;

/// Classification of one NDJSON line from a streamed body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedLine {
    /// A display message.
    Message(StreamMessage),
    /// A structured API error.
    ApiError(StreamError),
    /// Neither shape matched; ignorable, not an error.
    Unrecognized,
}

/// Decode one line of a streamed body.
///
/// Each shape is tried independently and a line can match at most one of
/// them; malformed bytes yield [`DecodedLine::Unrecognized`] and never
/// abort the stream.
#[must_use]
pub fn decode_line(line: &[u8]) -> DecodedLine {
    if let Ok(message) = serde_json::from_slice::<StreamMessage>(line) {
        return DecodedLine::Message(message);
    }
    if let Ok(error) = serde_json::from_slice::<StreamError>(line) {
        return DecodedLine::ApiError(error);
    }
    DecodedLine::Unrecognized
}

/// How a stream consumer renders lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamMode {
    /// Echo every non-empty line verbatim.
    Raw,
    /// Decode each line, printing message text and error renderings and
    /// skipping everything else.
    #[default]
    Decoded,
}

/// A live streaming response.
///
/// Owns the response body; dropping the handle, or consuming it to the
/// end, releases the underlying connection exactly once.
pub struct StreamHandle {
    status: StatusCode,
    lines: LineStream,
}

impl StreamHandle {
    pub(crate) fn new(status: StatusCode, response: Response) -> Self {
        Self {
            status,
            lines: LineStream::new(response),
        }
    }

    /// Status code the server answered with.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Next line of the body, without its trailing newline.
    ///
    /// `Ok(None)` is clean end-of-stream.
    ///
    /// # Errors
    /// Mid-stream read failures propagate; end-of-stream does not.
    pub async fn next_line(&mut self) -> Result<Option<String>> {
        self.lines.next_line().await
    }

    /// Drive the stream to completion with the chosen rendering mode.
    ///
    /// Lines are handled strictly in arrival order. End-of-stream
    /// terminates the loop cleanly.
    ///
    /// # Errors
    /// Mid-stream read failures propagate after the connection is
    /// released.
    pub async fn consume(mut self, mode: StreamMode) -> Result<()> {
        while let Some(line) = self.next_line().await? {
            if let Some(output) = render(mode, &line) {
                println!("{output}");
            }
        }
        Ok(())
    }
}

/// What one line prints under a consumer mode; `None` prints nothing.
///
/// Raw mode skips only truly empty lines and echoes everything else
/// verbatim, whitespace included.
fn render(mode: StreamMode, line: &str) -> Option<String> {
    match mode {
        StreamMode::Raw => (!line.is_empty()).then(|| line.to_string()),
        StreamMode::Decoded => match decode_line(line.as_bytes()) {
            DecodedLine::Message(message) => Some(message.message),
            DecodedLine::ApiError(error) => Some(error.to_string()),
            DecodedLine::Unrecognized => None,
        },
    }
}

type ChunkStream = Pin<Box<dyn Stream<Item = reqwest::Result<Vec<u8>>> + Send>>;

/// Newline framing over a chunked byte stream.
///
/// Chunk boundaries fall anywhere, including inside a multi-byte UTF-8
/// character, so bytes are buffered as-is and only converted to text once
/// a complete line is assembled.
struct LineStream {
    chunks: ChunkStream,
    buffer: Vec<u8>,
    done: bool,
}

impl LineStream {
    fn new(response: Response) -> Self {
        let chunks = response
            .bytes_stream()
            .map(|chunk| chunk.map(|bytes| bytes.to_vec()));
        Self::from_chunks(Box::pin(chunks))
    }

    fn from_chunks(chunks: ChunkStream) -> Self {
        Self {
            chunks,
            buffer: Vec::new(),
            done: false,
        }
    }

    async fn next_line(&mut self) -> Result<Option<String>> {
        loop {
            if let Some(pos) = self.buffer.iter().position(|&byte| byte == b'\n') {
                let rest = self.buffer.split_off(pos + 1);
                let mut line = std::mem::replace(&mut self.buffer, rest);
                line.pop();
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
                return Ok(Some(String::from_utf8_lossy(&line).into_owned()));
            }
            if self.done {
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                // Final line arrived without a trailing newline.
                let line = std::mem::take(&mut self.buffer);
                return Ok(Some(String::from_utf8_lossy(&line).into_owned()));
            }
            match self.chunks.next().await {
                Some(chunk) => self.buffer.extend_from_slice(&chunk?),
                None => self.done = true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_line_decodes_to_message_only() {
        let decoded = decode_line(br#"{"message":"hello"}"#);
        match decoded {
            DecodedLine::Message(message) => assert_eq!(message.message, "hello"),
            other => panic!("expected message, got {other:?}"),
        }
    }

    #[test]
    fn error_line_decodes_to_error_only() {
        let decoded = decode_line(br#"{"error":"boom"}"#);
        match decoded {
            DecodedLine::ApiError(error) => assert_eq!(error.error, "boom"),
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_shape_is_unrecognized() {
        assert_eq!(decode_line(br#"{"foo":"bar"}"#), DecodedLine::Unrecognized);
    }

    #[test]
    fn malformed_bytes_are_unrecognized() {
        assert_eq!(decode_line(b"not json at all"), DecodedLine::Unrecognized);
        assert_eq!(decode_line(b""), DecodedLine::Unrecognized);
    }

    #[test]
    fn line_matching_both_fields_is_unrecognized() {
        let line = br#"{"message":"hello","error":"boom"}"#;
        assert_eq!(decode_line(line), DecodedLine::Unrecognized);
    }

    #[test]
    fn raw_mode_echoes_whitespace_lines_verbatim() {
        assert_eq!(render(StreamMode::Raw, "   ").as_deref(), Some("   "));
        assert_eq!(render(StreamMode::Raw, "plain text"), Some("plain text".to_string()));
        assert_eq!(render(StreamMode::Raw, ""), None);
    }

    #[test]
    fn decoded_mode_renders_messages_and_errors_only() {
        assert_eq!(
            render(StreamMode::Decoded, r#"{"message":"hello"}"#).as_deref(),
            Some("hello")
        );
        assert_eq!(
            render(StreamMode::Decoded, r#"{"error":"boom"}"#).as_deref(),
            Some("error: boom")
        );
        assert_eq!(render(StreamMode::Decoded, r#"{"foo":"bar"}"#), None);
    }

    fn line_stream(chunks: Vec<reqwest::Result<Vec<u8>>>) -> LineStream {
        LineStream::from_chunks(Box::pin(futures::stream::iter(chunks)))
    }

    #[tokio::test]
    async fn multibyte_character_split_across_chunks_survives() {
        // "é" is 0xC3 0xA9; the chunk boundary falls between the two bytes.
        let mut lines = line_stream(vec![
            Ok(b"{\"message\":\"h\xc3".to_vec()),
            Ok(b"\xa9\"}\n".to_vec()),
        ]);

        let line = lines.next_line().await.unwrap().unwrap();
        assert_eq!(line, "{\"message\":\"h\u{e9}\"}");
        match decode_line(line.as_bytes()) {
            DecodedLine::Message(message) => assert_eq!(message.message, "h\u{e9}"),
            other => panic!("expected message, got {other:?}"),
        }
        assert!(lines.next_line().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn lines_split_anywhere_across_chunks_reassemble() {
        let mut lines = line_stream(vec![
            Ok(b"{\"message\":\"one\"}\n{\"mess".to_vec()),
            Ok(b"age\":\"two\"}".to_vec()),
            Ok(b"\r\n   \n{\"message\":\"three\"}".to_vec()),
        ]);

        let mut collected = Vec::new();
        while let Some(line) = lines.next_line().await.unwrap() {
            collected.push(line);
        }
        assert_eq!(
            collected,
            [
                "{\"message\":\"one\"}",
                "{\"message\":\"two\"}",
                "   ",
                "{\"message\":\"three\"}",
            ]
        );
    }
}
