//! skiff-api: Shared wire types
//!
//! Defines the JSON shapes exchanged with the application-management API,
//! used by both the client library and the CLI. The field names here ARE the
//! wire contract; nothing else in the workspace hardcodes them.

pub mod stream;

pub use stream::{StreamError, StreamMessage};
