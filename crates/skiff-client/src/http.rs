//! HTTP client for the application-management API

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, Response, StatusCode};
use url::Url;

use crate::config::ConnectionConfig;
use crate::diag::{self, RequestReport};
use crate::error::{ClientError, Result};
use crate::present::present;
use crate::stream::{StreamHandle, StreamMode};

/// Fixed user agent attached to every outbound request.
pub const USER_AGENT_VALUE: &str = concat!("skiff CLI/", env!("CARGO_PKG_VERSION"));

/// Authenticated HTTP client for the application-management API.
///
/// Cheap to clone and free of per-request state, so one client may serve
/// any number of concurrent calls. Transport settings are the platform
/// defaults: no timeouts, no retry, default pooling.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    config: ConnectionConfig,
}

impl HttpClient {
    /// Create a client from resolved connection settings.
    ///
    /// # Errors
    /// Returns an error if `config.host` is not a well-formed base URL.
    pub fn new(config: ConnectionConfig) -> Result<Self> {
        Self::with_client(config, Client::new())
    }

    /// Create a client with a custom `reqwest::Client`.
    ///
    /// # Errors
    /// Returns an error if `config.host` is not a well-formed base URL.
    pub fn with_client(config: ConnectionConfig, client: Client) -> Result<Self> {
        // Request URLs are built by concatenating host and path, so the
        // host is only checked for being parseable on its own.
        Url::parse(&config.host)?;
        Ok(Self { client, config })
    }

    /// Connection settings this client was built with.
    #[must_use]
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Full request URL for a path: host and path joined by concatenation.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.host, path)
    }

    /// Execute one authenticated request and hand back the live response
    /// together with a report of what was sent.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&[u8]>,
    ) -> Result<(RequestReport, Response)> {
        let url = self.url(path);
        let mut builder = self
            .client
            .request(method.clone(), url.as_str())
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, USER_AGENT_VALUE)
            .basic_auth(&self.config.user, Some(&self.config.password));
        if let Some(body) = body {
            builder = builder.body(body.to_vec());
        }
        let request = builder.build()?;
        let report = RequestReport {
            method,
            url,
            headers: request.headers().clone(),
            body: body.map(<[u8]>::to_vec),
        };

        tracing::debug!(method = %report.method, url = %report.url, "sending request");
        let response = self.client.execute(request).await?;
        Ok((report, response))
    }

    /// Buffered request enforcing an expected status code.
    ///
    /// Reads the whole body. On a status mismatch the full exchange is
    /// printed; outside verbose mode the call then fails with
    /// [`ClientError::UnexpectedStatus`], which the CLI maps to exit
    /// code 1. In verbose mode the mismatch is only reported and the body
    /// is still returned: verbosity changes control flow, not just output.
    ///
    /// # Errors
    /// Transport failures and, outside verbose mode, status mismatches.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        want: StatusCode,
        body: Option<&[u8]>,
    ) -> Result<Vec<u8>> {
        let (report, response) = self.send(method, path, body).await?;
        let got = response.status();
        let response_headers = response.headers().clone();
        let bytes = response.bytes().await?.to_vec();

        if got != want || self.config.verbose {
            diag::print_exchange(&report, got, &response_headers, Some(&bytes));
            if got != want && !self.config.verbose {
                return Err(ClientError::UnexpectedStatus {
                    method: report.method,
                    url: report.url,
                    want,
                    got,
                });
            }
        }

        Ok(bytes)
    }

    /// Any verb, any wanted status, returning the presented JSON body.
    ///
    /// # Errors
    /// See [`HttpClient::request`].
    pub async fn request_json(
        &self,
        method: Method,
        want: StatusCode,
        path: &str,
        body: Option<&[u8]>,
    ) -> Result<String> {
        let bytes = self.request(method, path, want, body).await?;
        Ok(present(&bytes, self.config.pretty))
    }

    /// GET expecting 200, returning the presented JSON body.
    ///
    /// # Errors
    /// See [`HttpClient::request`].
    pub async fn get_json(&self, path: &str) -> Result<String> {
        self.request_json(Method::GET, StatusCode::OK, path, None)
            .await
    }

    /// POST expecting 201, returning the presented JSON body.
    ///
    /// # Errors
    /// See [`HttpClient::request`].
    pub async fn post_json(&self, path: &str) -> Result<String> {
        self.request_json(Method::POST, StatusCode::CREATED, path, None)
            .await
    }

    /// POST a JSON body expecting 201, returning the presented JSON body.
    ///
    /// # Errors
    /// See [`HttpClient::request`].
    pub async fn post_body_json(&self, path: &str, body: &[u8]) -> Result<String> {
        self.request_json(Method::POST, StatusCode::CREATED, path, Some(body))
            .await
    }

    /// DELETE expecting 200, returning the presented JSON body.
    ///
    /// # Errors
    /// See [`HttpClient::request`].
    pub async fn delete_json(&self, path: &str) -> Result<String> {
        self.request_json(Method::DELETE, StatusCode::OK, path, None)
            .await
    }

    /// DELETE with a JSON body expecting 200, returning the presented
    /// JSON body.
    ///
    /// # Errors
    /// See [`HttpClient::request`].
    pub async fn delete_body_json(&self, path: &str, body: &[u8]) -> Result<String> {
        self.request_json(Method::DELETE, StatusCode::OK, path, Some(body))
            .await
    }

    /// Open a streaming request and return the live line stream.
    ///
    /// The status carried by the handle is advisory; interpreting it is
    /// the caller's business. In verbose mode the exchange metadata is
    /// printed before the handle is returned.
    ///
    /// # Errors
    /// Transport failures only; no status is enforced here.
    pub async fn stream(
        &self,
        method: Method,
        path: &str,
        body: Option<&[u8]>,
    ) -> Result<StreamHandle> {
        let (report, response) = self.send(method, path, body).await?;
        let status = response.status();
        if self.config.verbose {
            diag::print_exchange(&report, status, response.headers(), None);
        }
        Ok(StreamHandle::new(status, response))
    }

    /// Streaming request that enforces `want` like [`HttpClient::request`]
    /// and then echoes every non-empty line as it arrives.
    ///
    /// # Errors
    /// Transport failures, mid-stream read failures, and, outside verbose
    /// mode, status mismatches.
    pub async fn stream_want(
        &self,
        method: Method,
        path: &str,
        want: StatusCode,
        body: Option<&[u8]>,
    ) -> Result<()> {
        let (report, response) = self.send(method, path, body).await?;
        let got = response.status();
        if got != want || self.config.verbose {
            diag::print_exchange(&report, got, response.headers(), None);
            if got != want && !self.config.verbose {
                return Err(ClientError::UnexpectedStatus {
                    method: report.method,
                    url: report.url,
                    want,
                    got,
                });
            }
        }
        StreamHandle::new(got, response)
            .consume(StreamMode::Raw)
            .await
    }
}
