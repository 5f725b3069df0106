//! Request/response diagnostics
//!
//! Plain stdout printing of the full exchange, triggered by verbose mode
//! or a status mismatch. This is an operator-facing debugging aid, not
//! structured logging; the field order is kept stable for familiarity.

use reqwest::Method;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;

/// Everything about an outbound request worth replaying in a diagnostic.
#[derive(Debug, Clone)]
pub(crate) struct RequestReport {
    pub(crate) method: Method,
    pub(crate) url: String,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Option<Vec<u8>>,
}

/// Print the exchange; the response body is included only when the caller
/// has already read it (buffered path).
pub(crate) fn print_exchange(
    report: &RequestReport,
    status: StatusCode,
    response_headers: &HeaderMap,
    response_body: Option<&[u8]>,
) {
    println!("Response Status : {status}");
    println!("Request path : {}", report.url);
    println!("Request Headers : {:?}", report.headers);
    let request_body = report
        .body
        .as_deref()
        .map(String::from_utf8_lossy)
        .unwrap_or_default();
    println!("Request Body : {request_body}");
    println!("Response Headers : {response_headers:?}");
    if let Some(body) = response_body {
        println!("Response Body : {}", String::from_utf8_lossy(body));
    }
}
