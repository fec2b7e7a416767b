//! Static web client bundle served for every path the API does not claim.

use std::path::{Path, PathBuf};

use anyhow::Context;
use axum::handler::HandlerWithoutStateExt;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower_http::services::ServeDir;

/// Bundle directory name next to the executable.
const DEFAULT_BUNDLE_DIR: &str = "out";

/// Resolve the bundle directory, failing if it does not exist.
///
/// Without an explicit path, `out/` in the directory of the running
/// executable is used.
pub fn resolve_bundle_dir(configured: Option<&str>) -> anyhow::Result<PathBuf> {
    let dir = match configured {
        Some(path) => PathBuf::from(path),
        None => {
            let exe = std::env::current_exe().context("failed to locate the running executable")?;
            exe.parent()
                .context("executable path has no parent directory")?
                .join(DEFAULT_BUNDLE_DIR)
        }
    };

    if !dir.is_dir() {
        anyhow::bail!("bundle directory does not exist: {}", dir.display());
    }
    Ok(dir)
}

/// Route unmatched requests to files under `dir`; `/` serves `index.html`.
pub fn serve_bundle<S>(router: Router<S>, dir: &Path) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let serve_dir = ServeDir::new(dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(handle_not_found.into_service());
    router.fallback_service(serve_dir)
}

/// `404 {"message":"Not Found"}` for paths with no file behind them.
pub async fn handle_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        axum::Json(serde_json::json!({ "message": "Not Found" })),
    )
        .into_response()
}
