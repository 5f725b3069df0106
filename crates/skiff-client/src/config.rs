//! Connection settings for the remote API

use serde::{Deserialize, Serialize};

/// Connection settings resolved once at startup and injected into
/// [`HttpClient::new`](crate::HttpClient::new).
///
/// The client never re-reads configuration mid-request; whoever builds
/// this value (flags, environment, config file) owns its lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Base URL of the API, e.g. `https://api.example.net`. Request URLs
    /// are formed by appending the call path to this string.
    pub host: String,
    /// Basic-auth user.
    pub user: String,
    /// Basic-auth password.
    pub password: String,
    /// Print full request/response diagnostics. Also downgrades status
    /// mismatches from errors to reports, so callers keep the body.
    #[serde(default)]
    pub verbose: bool,
    /// Re-indent JSON bodies for display.
    #[serde(default)]
    pub pretty: bool,
}
