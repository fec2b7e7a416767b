//! Streaming relay of one backup request to the WebDAV provider.
//!
//! Neither direction is buffered: the inbound body is piped into the upstream
//! request and the upstream body is piped back to the caller. Dropping the
//! returned response (caller hung up) drops the upstream call with it.

use std::time::Instant;

use axum::body::{Body, HttpBody};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use http::header::AUTHORIZATION;
use tracing::Instrument;

use super::target::BackupTarget;
use crate::error::ProxyError;

/// Connection-management headers owned by the HTTP stack on each hop; they are
/// not copied from the provider's response.
const HOP_BY_HOP_HEADERS: &[&str] = &[
    "connection",
    "keep-alive",
    "transfer-encoding",
    "upgrade",
    "te",
    "trailers",
];

/// Send `body` to `target` with only the caller's `Authorization` header and
/// stream the provider's answer back.
pub async fn forward_backup(
    client: &reqwest::Client,
    target: BackupTarget,
    authorization: Option<HeaderValue>,
    body: Body,
    request_id: &str,
) -> Result<Response, ProxyError> {
    let span = webdav_tracing::upstream_forward_span!(request_id, &target.url);
    let start = Instant::now();

    async {
        let mut req_builder = client.request(target.method.clone(), target.url.as_str());
        // An inbound request without a body (plain GET) stays bodyless upstream.
        if !body.is_end_stream() {
            req_builder = req_builder.body(reqwest::Body::wrap_stream(body.into_data_stream()));
        }
        if let Some(value) = authorization {
            req_builder = req_builder.header(AUTHORIZATION, value);
        }

        let request = req_builder.build().map_err(|e| {
            tracing::error!(error = %e, "Failed to build upstream request");
            ProxyError::RequestConstruction(e)
        })?;

        let upstream_resp = client.execute(request).await.map_err(|e| {
            tracing::Span::current().record("latency_ms", start.elapsed().as_millis() as u64);
            tracing::error!(error = %e, "Upstream request failed");
            ProxyError::Transport(e)
        })?;

        let status = upstream_resp.status();
        let latency = start.elapsed().as_millis() as u64;
        tracing::Span::current().record("latency_ms", latency);
        tracing::Span::current().record("status", status.as_u16());

        tracing::info!(
            url = %target.url,
            method = %target.method,
            status = %status,
            latency_ms = latency,
            "Relayed WebDAV request"
        );

        Ok::<_, ProxyError>(build_response(upstream_resp))
    }
    .instrument(span)
    .await
}

/// Mirror the provider's status, headers (every value, in order) and body.
fn build_response(upstream_resp: reqwest::Response) -> Response {
    let mut response_builder = Response::builder().status(upstream_resp.status());

    for (name, value) in upstream_resp.headers().iter() {
        if HOP_BY_HOP_HEADERS.contains(&name.as_str()) {
            continue;
        }
        response_builder = response_builder.header(name, value);
    }

    let body = Body::from_stream(upstream_resp.bytes_stream());

    response_builder.body(body).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to build response");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
    })
}
