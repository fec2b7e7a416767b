//! Span builder helpers for webdav-proxy instrumentation.

/// Create a span for one inbound request on the WebDAV proxy route.
///
/// `target` and `status` are recorded once the endpoint has been validated
/// and the upstream has answered.
#[macro_export]
macro_rules! proxy_request_span {
    ($request_id:expr, $method:expr) => {
        tracing::info_span!(
            "proxy_request",
            request_id = %$request_id,
            method = %$method,
            proxy_method = tracing::field::Empty,
            target = tracing::field::Empty,
            status = tracing::field::Empty,
        )
    };
}

/// Create a span for the outbound call to the WebDAV provider.
#[macro_export]
macro_rules! upstream_forward_span {
    ($request_id:expr, $target:expr) => {
        tracing::info_span!(
            "upstream_forward",
            request_id = %$request_id,
            target = %$target,
            status = tracing::field::Empty,
            latency_ms = tracing::field::Empty,
        )
    };
}
