//! Endpoint commands
//!
//! Thin wrappers mapping each subcommand onto the client's buffered or
//! streaming request surface.

use color_eyre::Result;
use skiff_client::{HttpClient, Method, StatusCode, StreamMode};

/// GET `/applications`, printing one application name per line.
pub(crate) async fn apps_list(client: &HttpClient) -> Result<()> {
    let body = client
        .request(Method::GET, "/applications", StatusCode::OK, None)
        .await?;
    let apps: Vec<String> = serde_json::from_slice(&body)?;
    for app in apps {
        println!("{app}");
    }
    Ok(())
}

/// POST `/applications/<app>/deploy`, rendering the NDJSON deployment
/// stream with the structured decoder.
pub(crate) async fn apps_deploy(client: &HttpClient, app: &str) -> Result<()> {
    let handle = client
        .stream(Method::POST, &format!("/applications/{app}/deploy"), None)
        .await?;
    if !handle.status().is_success() {
        tracing::warn!(status = %handle.status(), "deploy stream opened with non-success status");
    }
    handle.consume(StreamMode::Decoded).await?;
    Ok(())
}

/// GET `/applications/<app>/logs`, echoing the stream verbatim.
pub(crate) async fn apps_logs(client: &HttpClient, app: &str) -> Result<()> {
    client
        .stream_want(
            Method::GET,
            &format!("/applications/{app}/logs"),
            StatusCode::OK,
            None,
        )
        .await?;
    Ok(())
}

/// Escape hatch: any method, any path, any wanted status, printing the
/// presented JSON body.
pub(crate) async fn raw_request(
    client: &HttpClient,
    method: &str,
    want: u16,
    path: &str,
    data: Option<&str>,
) -> Result<()> {
    let method = Method::from_bytes(method.to_uppercase().as_bytes())?;
    let want = StatusCode::from_u16(want)?;
    let body = client
        .request_json(method, want, path, data.map(str::as_bytes))
        .await?;
    println!("{body}");
    Ok(())
}
