//! Axum HTTP server: router, listener, graceful shutdown.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Request, State};
use axum::http::{HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use http::header::AUTHORIZATION;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Instrument;

use crate::allowlist::AllowList;
use crate::bundle;
use crate::config::ProxyConfig;
use crate::error::ProxyError;
use crate::proxy::{correlation, forward, target};
use crate::stats::ProxyStats;

/// Shared application state. Read-only after startup apart from the counters.
#[derive(Clone)]
pub struct AppState {
    pub config: ProxyConfig,
    pub client: reqwest::Client,
    pub allow_list: AllowList,
    pub stats: ProxyStats,
    /// Static web client directory; `None` disables bundle serving.
    pub bundle_dir: Option<PathBuf>,
}

impl AppState {
    /// Parse the allow-list and build the upstream client.
    pub fn new(config: ProxyConfig, bundle_dir: Option<PathBuf>) -> anyhow::Result<Self> {
        let allow_list = AllowList::new(config.webdav.allowed_endpoints.as_slice())?;
        if allow_list.is_empty() {
            tracing::warn!("webdav.allowed_endpoints is empty, every proxy request will be rejected");
        }

        // Redirects are returned to the caller rather than followed, so the
        // provider cannot send the relayed credentials somewhere unvetted.
        let mut client_builder =
            reqwest::Client::builder().redirect(reqwest::redirect::Policy::none());
        if !config.webdav.use_env_proxy {
            client_builder = client_builder.no_proxy();
        }
        if let Some(secs) = config.webdav.timeout_secs {
            client_builder = client_builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            config,
            client: client_builder.build()?,
            allow_list,
            stats: ProxyStats::new(),
            bundle_dir,
        })
    }
}

/// Query parameters of the WebDAV proxy route.
#[derive(Debug, Default, PartialEq, Eq)]
struct WebDavQuery {
    endpoint: Option<String>,
    proxy_method: Option<String>,
}

impl WebDavQuery {
    /// Read the parameters, keeping the first value of a repeated key.
    fn from_uri(uri: &Uri) -> Self {
        let mut query = Self::default();
        let pairs = url::form_urlencoded::parse(uri.query().unwrap_or_default().as_bytes());
        for (key, value) in pairs {
            let slot = match &*key {
                "endpoint" => &mut query.endpoint,
                "proxy_method" => &mut query.proxy_method,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        query
    }
}

/// Assemble the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let webdav_base = format!("/api/webdav/{}", state.config.webdav.storage_key);
    let webdav = get(handle_webdav).put(handle_webdav).options(handle_webdav);

    // The bare folder, the folder with a trailing slash and anything below it
    // all reach the same handler.
    let mut app = Router::new()
        .route(&webdav_base, webdav.clone())
        .route(&format!("{webdav_base}/"), webdav.clone())
        .route(&format!("{webdav_base}/{{*filepath}}"), webdav)
        .route("/health", get(handle_health))
        .route("/api/stats", get(handle_get_stats));

    app = match &state.bundle_dir {
        Some(dir) => bundle::serve_bundle(app, dir),
        None => app.fallback(bundle::handle_not_found),
    };

    let mut app = app.layer(TraceLayer::new_for_http());
    if let Some(cors) = build_cors_layer(&state.config.server.cors_allow_origins) {
        app = app.layer(cors);
    }

    app.with_state(state)
}

/// Build and run the HTTP server.
pub async fn run(state: AppState) -> anyhow::Result<()> {
    let listen_addr = state.config.server.listen_address.clone();
    let app = router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    tracing::info!(address = %listen_addr, "webdav-proxy listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("webdav-proxy shut down gracefully");
    Ok(())
}

/// Handler for `GET|PUT|OPTIONS /api/webdav/<storage-key>[/*filepath]`.
///
/// The path suffix is ignored: the upstream URL is always rebuilt from the
/// `endpoint` query parameter, the storage key and the backup file name.
async fn handle_webdav(State(state): State<Arc<AppState>>, request: Request) -> Response {
    // axum answers HEAD through the GET route; it is not a proxied method.
    if request.method() == Method::HEAD {
        return bundle::handle_not_found().await;
    }

    state.stats.inc_requests();

    if request.method() == Method::OPTIONS {
        state.stats.inc_preflights();
        return (
            StatusCode::OK,
            axum::Json(serde_json::json!({ "body": "OK" })),
        )
            .into_response();
    }

    let request_id = correlation::generate_id();
    let span = webdav_tracing::proxy_request_span!(&request_id, request.method());

    async {
        match relay(&state, request, &request_id).await {
            Ok(response) => {
                tracing::Span::current().record("status", response.status().as_u16());
                response
            }
            Err(e) => {
                match &e {
                    ProxyError::InvalidEndpoint => state.stats.inc_rejected_endpoints(),
                    ProxyError::MethodNotAllowed { .. } => state.stats.inc_rejected_methods(),
                    ProxyError::RequestConstruction(_) | ProxyError::Transport(_) => {
                        state.stats.inc_upstream_failures()
                    }
                }
                let status = e.status();
                tracing::Span::current().record("status", status.as_u16());
                if status.is_server_error() {
                    tracing::error!(error = %e, "WebDAV relay failed");
                } else {
                    tracing::warn!(error = %e, "WebDAV request rejected");
                }
                e.into_response()
            }
        }
    }
    .instrument(span)
    .await
}

/// Validate, resolve and forward one proxy request.
async fn relay(
    state: &AppState,
    request: Request,
    request_id: &str,
) -> Result<Response, ProxyError> {
    let query = WebDavQuery::from_uri(request.uri());

    let endpoint = query.endpoint.unwrap_or_default();
    let proxy_method = query
        .proxy_method
        .unwrap_or_else(|| request.method().as_str().to_string());

    let target = target::resolve(
        &state.allow_list,
        &state.config.webdav.storage_key,
        &endpoint,
        &proxy_method,
    )?;

    let span = tracing::Span::current();
    span.record("proxy_method", target.method.as_str());
    span.record("target", target.url.as_str());

    let authorization: Option<HeaderValue> = request.headers().get(AUTHORIZATION).cloned();

    state.stats.inc_forwarded();
    forward::forward_backup(
        &state.client,
        target,
        authorization,
        request.into_body(),
        request_id,
    )
    .await
}

/// GET /api/stats: return current proxy statistics.
async fn handle_get_stats(State(state): State<Arc<AppState>>) -> Response {
    axum::Json(state.stats.snapshot()).into_response()
}

/// Health check endpoint.
async fn handle_health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// CORS for the browser client. `*` grants any origin.
fn build_cors_layer(origins: &[String]) -> Option<CorsLayer> {
    if origins.is_empty() {
        return None;
    }

    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let values = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect::<Vec<_>>();
        if values.is_empty() {
            return None;
        }
        AllowOrigin::list(values)
    };

    Some(
        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods(Any)
            .allow_headers(Any)
            .expose_headers(Any),
    )
}

/// Wait for SIGINT (Ctrl+C) for graceful shutdown.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install CTRL+C signal handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::sync::Mutex;

    use axum::http::{HeaderMap, Uri};
    use bytes::Bytes;

    use super::*;

    /// One call seen by the mock WebDAV provider.
    #[derive(Debug, Clone)]
    struct RecordedCall {
        method: String,
        path: String,
        authorization: Option<String>,
        header_names: Vec<String>,
        body: Bytes,
    }

    #[derive(Clone, Default)]
    struct MockProvider {
        calls: Arc<Mutex<Vec<RecordedCall>>>,
    }

    impl MockProvider {
        fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    async fn provider_handler(
        State(provider): State<MockProvider>,
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: Bytes,
    ) -> Response {
        provider.calls.lock().unwrap().push(RecordedCall {
            method: method.as_str().to_string(),
            path: uri.path().to_string(),
            authorization: headers
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            header_names: headers.keys().map(|k| k.as_str().to_string()).collect(),
            body,
        });

        let (status, body) = match method.as_str() {
            "GET" => (StatusCode::OK, r#"{"restored":true}"#),
            _ => (StatusCode::CREATED, ""),
        };

        Response::builder()
            .status(status)
            .header("set-cookie", "session=one")
            .header("set-cookie", "region=two")
            .header("x-provider", "mock-dav")
            .body(axum::body::Body::from(body))
            .unwrap()
    }

    async fn spawn(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    async fn spawn_provider() -> (MockProvider, SocketAddr) {
        let provider = MockProvider::default();
        let app = Router::new()
            .fallback(provider_handler)
            .with_state(provider.clone());
        let addr = spawn(app).await;
        (provider, addr)
    }

    /// Proxy trusting `http://127.0.0.1/dav` (any port).
    async fn spawn_proxy() -> (Arc<AppState>, SocketAddr) {
        let mut config = ProxyConfig::default();
        config.server.serve_bundle = false;
        config.webdav.allowed_endpoints = vec!["http://127.0.0.1/dav".to_string()];
        config.webdav.use_env_proxy = false;

        let state = Arc::new(AppState::new(config, None).unwrap());
        let addr = spawn(router(state.clone())).await;
        (state, addr)
    }

    fn proxy_url(proxy: SocketAddr, params: &[(&str, &str)]) -> url::Url {
        folder_url(proxy, "/backup.json", params)
    }

    /// URL under the storage-key folder with the given path suffix.
    fn folder_url(proxy: SocketAddr, suffix: &str, params: &[(&str, &str)]) -> url::Url {
        url::Url::parse_with_params(
            &format!("http://{proxy}/api/webdav/chatgpt-next-web{suffix}"),
            params,
        )
        .unwrap()
    }

    fn client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    #[tokio::test]
    async fn test_put_is_relayed_to_backup_file() {
        let (provider, provider_addr) = spawn_provider().await;
        let (state, proxy) = spawn_proxy().await;
        let endpoint = format!("http://{provider_addr}/dav");

        let resp = client()
            .put(proxy_url(proxy, &[("endpoint", &endpoint)]))
            .header("authorization", "Bearer xyz")
            .header("x-not-relayed", "1")
            .body(r#"{"a":1}"#)
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 201);
        assert_eq!(resp.headers()["x-provider"], "mock-dav");
        let cookies: Vec<_> = resp
            .headers()
            .get_all("set-cookie")
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect();
        assert_eq!(cookies, vec!["session=one", "region=two"]);
        assert!(resp.bytes().await.unwrap().is_empty());

        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "PUT");
        assert_eq!(calls[0].path, "/dav/chatgpt-next-web/backup.json");
        assert_eq!(calls[0].authorization.as_deref(), Some("Bearer xyz"));
        assert_eq!(calls[0].body, Bytes::from_static(br#"{"a":1}"#));
        assert!(!calls[0].header_names.iter().any(|h| h == "x-not-relayed"));

        assert_eq!(state.stats.snapshot().forwarded, 1);
    }

    #[tokio::test]
    async fn test_get_streams_body_back() {
        let (provider, provider_addr) = spawn_provider().await;
        let (_state, proxy) = spawn_proxy().await;
        let endpoint = format!("http://{provider_addr}/dav/");

        let resp = client()
            .get(proxy_url(proxy, &[("endpoint", &endpoint)]))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);
        assert_eq!(resp.text().await.unwrap(), r#"{"restored":true}"#);

        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "GET");
        assert_eq!(calls[0].path, "/dav/chatgpt-next-web/backup.json");
        assert_eq!(calls[0].authorization, None);
    }

    #[tokio::test]
    async fn test_proxy_method_overrides_inbound_method() {
        let (provider, provider_addr) = spawn_provider().await;
        let (_state, proxy) = spawn_proxy().await;
        let endpoint = format!("http://{provider_addr}/dav/sub");

        let resp = client()
            .get(proxy_url(
                proxy,
                &[("endpoint", &endpoint), ("proxy_method", "MKCOL")],
            ))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 201);
        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "MKCOL");
        assert_eq!(calls[0].path, "/dav/sub/chatgpt-next-web/backup.json");
    }

    #[tokio::test]
    async fn test_untrusted_endpoint_is_rejected_without_upstream_call() {
        let (provider, provider_addr) = spawn_provider().await;
        let (state, proxy) = spawn_proxy().await;
        let wrong_path = format!("http://{provider_addr}/other");

        for endpoint in [
            "https://evil.example.com/",
            "not a url",
            "",
            wrong_path.as_str(),
        ] {
            let resp = client()
                .get(proxy_url(proxy, &[("endpoint", endpoint)]))
                .send()
                .await
                .unwrap();
            assert_eq!(resp.status(), 400, "endpoint {endpoint:?}");
            let body: serde_json::Value = resp.json().await.unwrap();
            assert_eq!(
                body,
                serde_json::json!({ "error": true, "msg": "Invalid endpoint" })
            );
        }

        let resp = client()
            .put(proxy_url(proxy, &[]))
            .body("data")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);

        assert!(provider.calls().is_empty());
        let stats = state.stats.snapshot();
        assert_eq!(stats.rejected_endpoints, 5);
        assert_eq!(stats.forwarded, 0);
    }

    #[tokio::test]
    async fn test_disallowed_methods_are_forbidden() {
        let (provider, provider_addr) = spawn_provider().await;
        let (state, proxy) = spawn_proxy().await;
        let endpoint = format!("http://{provider_addr}/dav");
        let expected_msg = format!(
            "you are not allowed to request http://{provider_addr}/dav/chatgpt-next-web/backup.json"
        );

        for method in ["DELETE", "POST", "PROPFIND", "get", "SOMETHING"] {
            let resp = client()
                .put(proxy_url(
                    proxy,
                    &[("endpoint", &endpoint), ("proxy_method", method)],
                ))
                .body("payload")
                .send()
                .await
                .unwrap();
            assert_eq!(resp.status(), 403, "method {method}");
            let body: serde_json::Value = resp.json().await.unwrap();
            assert_eq!(body["error"], true);
            assert_eq!(body["msg"], expected_msg.as_str());
        }

        assert!(provider.calls().is_empty());
        assert_eq!(state.stats.snapshot().rejected_methods, 5);
    }

    #[tokio::test]
    async fn test_options_short_circuits() {
        let (provider, provider_addr) = spawn_provider().await;
        let (state, proxy) = spawn_proxy().await;
        let endpoint = format!("http://{provider_addr}/dav");

        let cases = [
            vec![("endpoint", endpoint.as_str())],
            vec![("endpoint", "https://evil.example.com/")],
            vec![],
        ];
        for params in cases {
            let resp = client()
                .request(Method::OPTIONS, proxy_url(proxy, &params))
                .send()
                .await
                .unwrap();
            assert_eq!(resp.status(), 200);
            let body: serde_json::Value = resp.json().await.unwrap();
            assert_eq!(body, serde_json::json!({ "body": "OK" }));
        }

        assert!(provider.calls().is_empty());
        let stats = state.stats.snapshot();
        assert_eq!(stats.preflights, 3);
        assert_eq!(stats.forwarded, 0);
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_server_error() {
        // Reserve a port, then free it so nothing is listening there.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let dead_addr = listener.local_addr().unwrap();
        drop(listener);

        let (state, proxy) = spawn_proxy().await;
        let endpoint = format!("http://{dead_addr}/dav");

        let resp = client()
            .get(proxy_url(proxy, &[("endpoint", &endpoint)]))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 500);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "error": true, "msg": "Failed to send request" })
        );
        assert_eq!(state.stats.snapshot().upstream_failures, 1);
    }

    #[tokio::test]
    async fn test_bare_and_slash_folder_paths_reach_handler() {
        let (provider, provider_addr) = spawn_provider().await;
        let (state, proxy) = spawn_proxy().await;
        let endpoint = format!("http://{provider_addr}/dav");

        for suffix in ["", "/"] {
            let resp = client()
                .get(folder_url(proxy, suffix, &[("endpoint", "https://evil.example.com/")]))
                .send()
                .await
                .unwrap();
            assert_eq!(resp.status(), 400, "suffix {suffix:?}");
            let body: serde_json::Value = resp.json().await.unwrap();
            assert_eq!(
                body,
                serde_json::json!({ "error": true, "msg": "Invalid endpoint" })
            );

            let resp = client()
                .request(Method::OPTIONS, folder_url(proxy, suffix, &[]))
                .send()
                .await
                .unwrap();
            assert_eq!(resp.status(), 200, "suffix {suffix:?}");

            let resp = client()
                .put(folder_url(
                    proxy,
                    suffix,
                    &[("endpoint", &endpoint), ("proxy_method", "MKCOL")],
                ))
                .header("authorization", "Basic dXNlcjpwYXNz")
                .send()
                .await
                .unwrap();
            assert_eq!(resp.status(), 201, "suffix {suffix:?}");
        }

        let calls = provider.calls();
        assert_eq!(calls.len(), 2);
        for call in &calls {
            assert_eq!(call.method, "MKCOL");
            assert_eq!(call.path, "/dav/chatgpt-next-web/backup.json");
            assert_eq!(call.authorization.as_deref(), Some("Basic dXNlcjpwYXNz"));
        }

        let stats = state.stats.snapshot();
        assert_eq!(stats.rejected_endpoints, 2);
        assert_eq!(stats.preflights, 2);
        assert_eq!(stats.forwarded, 2);
    }

    #[tokio::test]
    async fn test_repeated_query_keys_use_first_value() {
        let (provider, provider_addr) = spawn_provider().await;
        let (_state, proxy) = spawn_proxy().await;
        let endpoint = format!("http://{provider_addr}/dav");

        let resp = client()
            .get(proxy_url(
                proxy,
                &[
                    ("endpoint", &endpoint),
                    ("endpoint", "https://evil.example.com/"),
                    ("proxy_method", "DELETE"),
                    ("proxy_method", "GET"),
                ],
            ))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 403);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(
            body["msg"],
            format!(
                "you are not allowed to request http://{provider_addr}/dav/chatgpt-next-web/backup.json"
            )
            .as_str()
        );
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn test_head_is_not_proxied() {
        let (provider, provider_addr) = spawn_provider().await;
        let (state, proxy) = spawn_proxy().await;
        let endpoint = format!("http://{provider_addr}/dav");

        let resp = client()
            .head(proxy_url(proxy, &[("endpoint", &endpoint)]))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 404);
        assert!(provider.calls().is_empty());
        assert_eq!(state.stats.snapshot().total_requests, 0);
    }

    #[test]
    fn test_query_parsing() {
        let uri: Uri = "/x?proxy_method=PUT&endpoint=https%3A%2F%2Fdav.box.com%2Fdav&endpoint=other&extra=1"
            .parse()
            .unwrap();
        assert_eq!(
            WebDavQuery::from_uri(&uri),
            WebDavQuery {
                endpoint: Some("https://dav.box.com/dav".to_string()),
                proxy_method: Some("PUT".to_string()),
            }
        );

        let uri: Uri = "/x".parse().unwrap();
        assert_eq!(WebDavQuery::from_uri(&uri), WebDavQuery::default());

        let uri: Uri = "/x?endpoint=&proxy_method".parse().unwrap();
        assert_eq!(
            WebDavQuery::from_uri(&uri),
            WebDavQuery {
                endpoint: Some(String::new()),
                proxy_method: Some(String::new()),
            }
        );
    }

    #[tokio::test]
    async fn test_unrouted_paths_and_methods() {
        let (_state, proxy) = spawn_proxy().await;

        let resp = client()
            .get(format!("http://{proxy}/api/webdav/other-app/backup.json"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 404);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body, serde_json::json!({ "message": "Not Found" }));

        let resp = client()
            .delete(proxy_url(proxy, &[("endpoint", "http://127.0.0.1/dav")]))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 405);
    }

    #[tokio::test]
    async fn test_health_and_stats() {
        let (_state, proxy) = spawn_proxy().await;

        let resp = client()
            .get(format!("http://{proxy}/health"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.text().await.unwrap(), "ok");

        client()
            .get(proxy_url(proxy, &[("endpoint", "https://evil.example.com/")]))
            .send()
            .await
            .unwrap();

        let stats: serde_json::Value = client()
            .get(format!("http://{proxy}/api/stats"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(stats["total_requests"], 1);
        assert_eq!(stats["rejected_endpoints"], 1);
    }

    #[tokio::test]
    async fn test_cors_preflight_when_origins_configured() {
        let mut config = ProxyConfig::default();
        config.server.serve_bundle = false;
        config.server.cors_allow_origins = vec!["http://localhost:3000".to_string()];
        config.webdav.use_env_proxy = false;
        let state = Arc::new(AppState::new(config, None).unwrap());
        let proxy = spawn(router(state)).await;

        let resp = client()
            .request(
                Method::OPTIONS,
                format!("http://{proxy}/api/webdav/chatgpt-next-web/backup.json"),
            )
            .header("origin", "http://localhost:3000")
            .header("access-control-request-method", "PUT")
            .send()
            .await
            .unwrap();

        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers()["access-control-allow-origin"],
            "http://localhost:3000"
        );
    }

    #[test]
    fn test_cors_layer_disabled_without_origins() {
        assert!(build_cors_layer(&[]).is_none());
        assert!(build_cors_layer(&["bad\norigin".to_string()]).is_none());
        assert!(build_cors_layer(&["*".to_string()]).is_some());
    }

    #[test]
    fn test_malformed_allow_list_fails_startup() {
        let mut config = ProxyConfig::default();
        config.webdav.allowed_endpoints = vec!["::not a url::".to_string()];
        assert!(AppState::new(config, None).is_err());
    }
}
