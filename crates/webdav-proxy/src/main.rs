//! webdav-proxy: relays backup sync requests from the browser client to an
//! allow-listed WebDAV provider, and serves the client bundle.

mod allowlist;
mod bundle;
mod config;
mod error;
mod proxy;
mod server;
mod stats;

use config::ProxyConfig;
use server::AppState;

fn main() -> anyhow::Result<()> {
    // Determine config path
    let config_path = {
        let args: Vec<String> = std::env::args().collect();
        // Check for --config flag first
        args.iter()
            .position(|a| a == "--config")
            .and_then(|i| args.get(i + 1).cloned())
            // Fall back to positional arg
            .or_else(|| args.get(1).filter(|a| !a.starts_with('-')).cloned())
            .or_else(|| std::env::var("WEBDAV_PROXY_CONFIG").ok())
            .unwrap_or_else(|| "webdav-proxy.toml".to_string())
    };

    let config = ProxyConfig::load(&config_path)?;

    // Build the tokio runtime first: the tonic gRPC exporter needs a reactor context
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let tracing_guard = webdav_tracing::init_tracing(&config.tracing);

        tracing::info!(
            config_path = %config_path,
            listen_address = %config.server.listen_address,
            storage_key = %config.webdav.storage_key,
            otlp_export = tracing_guard.is_exporting(),
            "Starting webdav-proxy"
        );

        run(config).await
    })
}

async fn run(config: ProxyConfig) -> anyhow::Result<()> {
    // Missing bundle is fatal before the listener is bound
    let bundle_dir = if config.server.serve_bundle {
        Some(bundle::resolve_bundle_dir(config.server.bundle_dir.as_deref())?)
    } else {
        None
    };

    let state = AppState::new(config, bundle_dir)?;

    tracing::info!(
        allowed_endpoints = state.allow_list.len(),
        bundle_dir = ?state.bundle_dir,
        timeout_secs = ?state.config.webdav.timeout_secs,
        "Proxy state initialized"
    );

    server::run(state).await
}
