//! Configuration types and loading logic.

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::Deserialize;
use webdav_tracing::TracingConfig;

/// Providers the proxy relays to when no `allowed_endpoints` are configured.
pub const DEFAULT_ALLOWED_ENDPOINTS: &[&str] = &[
    "https://dav.jianguoyun.com/dav/",
    "https://dav.dropdav.com/",
    "https://dav.box.com/dav",
    "https://nanao.teracloud.jp/dav/",
    "https://bora.teracloud.jp/dav/",
    "https://webdav.4shared.com/",
    "https://dav.idrivesync.com",
    "https://webdav.yandex.com",
    "https://app.koofr.net/dav/Koofr",
];

/// Characters a storage key cannot hold: it becomes a literal route segment.
const ROUTE_RESERVED_CHARS: &[char] = &['/', '{', '}', '*', '?', '#'];

/// Top-level proxy configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProxyConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub webdav: WebDavConfig,
    #[serde(default)]
    pub tracing: TracingConfig,
}

/// Listener, static bundle and CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen_address")]
    pub listen_address: String,

    /// Directory holding the prebuilt web client. Defaults to `out/` next to
    /// the executable.
    #[serde(default)]
    pub bundle_dir: Option<String>,

    #[serde(default = "default_true")]
    pub serve_bundle: bool,

    /// Origins granted CORS access. Empty disables the CORS layer.
    #[serde(default)]
    pub cors_allow_origins: Vec<String>,
}

/// Upstream WebDAV relay configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebDavConfig {
    /// Namespace under which the backup file lives on every provider.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    #[serde(default = "default_allowed_endpoints")]
    pub allowed_endpoints: Vec<String>,

    /// Upstream request timeout. Unset means the client default (none).
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Route upstream calls through `HTTP_PROXY`/`HTTPS_PROXY` when set.
    #[serde(default = "default_true")]
    pub use_env_proxy: bool,
}

fn default_listen_address() -> String {
    "0.0.0.0:30000".to_string()
}

fn default_true() -> bool {
    true
}

fn default_storage_key() -> String {
    "chatgpt-next-web".to_string()
}

fn default_allowed_endpoints() -> Vec<String> {
    DEFAULT_ALLOWED_ENDPOINTS
        .iter()
        .map(|e| e.to_string())
        .collect()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
            bundle_dir: None,
            serve_bundle: true,
            cors_allow_origins: Vec::new(),
        }
    }
}

impl Default for WebDavConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            allowed_endpoints: default_allowed_endpoints(),
            timeout_secs: None,
            use_env_proxy: true,
        }
    }
}

impl ProxyConfig {
    /// Load configuration from a TOML file and environment variables.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (WEBDAV_PROXY_ prefix, __ for nesting)
    /// 2. TOML config file (a missing file contributes nothing)
    /// 3. Defaults
    pub fn load(config_path: &str) -> anyhow::Result<Self> {
        let figment = Figment::new()
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("WEBDAV_PROXY_").split("__"));
        Self::from_figment(figment)
    }

    pub fn from_figment(figment: Figment) -> anyhow::Result<Self> {
        let config: ProxyConfig = figment.extract()?;
        let key = &config.webdav.storage_key;
        if key.is_empty() || key.contains(ROUTE_RESERVED_CHARS) {
            anyhow::bail!(
                "webdav.storage_key must be a single non-empty path segment without any of {:?}, got {:?}",
                ROUTE_RESERVED_CHARS,
                key
            );
        }
        Ok(config)
    }
}
