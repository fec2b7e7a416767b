//! Endpoint allow-list: decides whether a caller-supplied WebDAV endpoint
//! belongs to one of the trusted storage providers.
//!
//! Entries are parsed once at startup and shared read-only by every request.
//! A candidate matches an entry when the hostnames are equal and the candidate
//! path is rooted under the entry path. Scheme and port are not compared.

use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum AllowListError {
    #[error("invalid allow-list entry {entry:?}: {source}")]
    InvalidEntry {
        entry: String,
        #[source]
        source: url::ParseError,
    },

    #[error("allow-list entry {entry:?} has no host")]
    MissingHost { entry: String },
}

/// One trusted provider base URL, pre-split for matching.
#[derive(Debug, Clone)]
struct AllowedEndpoint {
    host: String,
    /// Entry path without trailing slashes; empty for a host-wide entry.
    root: String,
}

impl AllowedEndpoint {
    fn parse(entry: &str) -> Result<Self, AllowListError> {
        let url = Url::parse(entry).map_err(|source| AllowListError::InvalidEntry {
            entry: entry.to_string(),
            source,
        })?;
        let host = url
            .host_str()
            .ok_or_else(|| AllowListError::MissingHost {
                entry: entry.to_string(),
            })?
            .to_string();
        let root = url.path().trim_end_matches('/').to_string();
        Ok(Self { host, root })
    }

    fn matches(&self, candidate: &Url) -> bool {
        if candidate.host_str() != Some(self.host.as_str()) {
            return false;
        }
        is_path_under(candidate.path(), &self.root)
    }
}

/// `/dav` is under `/dav` and `/dav/x`, but not under `/davx`.
fn is_path_under(path: &str, root: &str) -> bool {
    match path.strip_prefix(root) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Immutable set of trusted WebDAV provider base URLs.
#[derive(Debug, Clone)]
pub struct AllowList {
    entries: Vec<AllowedEndpoint>,
}

impl AllowList {
    /// Parse every entry. A malformed entry is a configuration bug and fails
    /// the whole list.
    pub fn new<S: AsRef<str>>(entries: &[S]) -> Result<Self, AllowListError> {
        let entries = entries
            .iter()
            .map(|e| AllowedEndpoint::parse(e.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `candidate` is rooted under any trusted provider URL.
    ///
    /// Unparseable candidates are rejected.
    pub fn is_allowed(&self, candidate: &str) -> bool {
        let candidate = match Url::parse(candidate) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!(error = %e, candidate = %candidate, "Rejecting unparseable endpoint");
                return false;
            }
        };
        self.entries.iter().any(|entry| entry.matches(&candidate))
    }
}
