//! Resolution of the upstream backup URL and the effective method.
//!
//! Order matters: the endpoint is checked against the allow-list before any
//! target path is built, so a rejected endpoint never shows up in a response.

use axum::http::Method;

use crate::allowlist::AllowList;
use crate::error::ProxyError;

/// File name of the backup document inside the storage-key folder.
pub const BACKUP_FILE_NAME: &str = "backup.json";

/// Methods relayed to the provider. Matching is exact and case-sensitive.
pub const FORWARDED_METHODS: &[&str] = &["MKCOL", "GET", "PUT"];

/// Fully resolved upstream call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupTarget {
    pub method: Method,
    pub url: String,
}

/// Build `<endpoint>/<storage_key>/backup.json`, with exactly one slash
/// between the endpoint and the storage key.
pub fn backup_url(endpoint: &str, storage_key: &str) -> String {
    format!(
        "{}/{storage_key}/{BACKUP_FILE_NAME}",
        endpoint.trim_end_matches('/')
    )
}

pub fn is_forwarded_method(method: &str) -> bool {
    FORWARDED_METHODS.contains(&method)
}

/// Validate `endpoint`, build the backup URL and check `proxy_method`.
pub fn resolve(
    allow_list: &AllowList,
    storage_key: &str,
    endpoint: &str,
    proxy_method: &str,
) -> Result<BackupTarget, ProxyError> {
    if !allow_list.is_allowed(endpoint) {
        return Err(ProxyError::InvalidEndpoint);
    }

    let url = backup_url(endpoint, storage_key);

    if !is_forwarded_method(proxy_method) {
        return Err(ProxyError::MethodNotAllowed { target_path: url });
    }

    let method = Method::from_bytes(proxy_method.as_bytes())
        .map_err(|_| ProxyError::MethodNotAllowed {
            target_path: url.clone(),
        })?;

    Ok(BackupTarget { method, url })
}
