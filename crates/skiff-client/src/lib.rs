//! skiff-client: authenticated HTTP request layer for the skiff CLI
//!
//! Talks to a remote application-management API with injected basic-auth
//! credentials and headers, enforcing an expected status code on buffered
//! calls and exposing streamed NDJSON bodies line by line.
//!
//! # Examples
//!
//! ## Buffered request
//!
//! ```no_run
//! use skiff_client::{ConnectionConfig, HttpClient};
//!
//! # async fn example() -> skiff_client::Result<()> {
//! let client = HttpClient::new(ConnectionConfig {
//!     host: "https://api.example.net".into(),
//!     user: "me".into(),
//!     password: "secret".into(),
//!     verbose: false,
//!     pretty: true,
//! })?;
//!
//! let apps = client.get_json("/applications").await?;
//! println!("{apps}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Streamed request
//!
//! ```no_run
//! use skiff_client::{HttpClient, Method, StreamMode};
//!
//! # async fn example(client: HttpClient) -> skiff_client::Result<()> {
//! let stream = client
//!     .stream(Method::POST, "/applications/web/deploy", None)
//!     .await?;
//! stream.consume(StreamMode::Decoded).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
mod diag;
pub mod error;
pub mod http;
pub mod present;
pub mod stream;

pub use config::ConnectionConfig;
pub use error::{ClientError, Result};
pub use http::HttpClient;
pub use present::present;
pub use stream::{DecodedLine, StreamHandle, StreamMode, decode_line};

pub use reqwest::{Method, StatusCode};
