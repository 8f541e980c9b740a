//! Configuration schema for config.toml.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OsintConfig {
    /// Path to the JSON tool registry. Relative paths resolve against the
    /// working directory.
    pub registry_path: String,

    /// Per-request timeout for `api` tools, in seconds.
    pub timeout_secs: u64,

    /// Maximum number of tools queried at once. `1` keeps dispatch strictly
    /// sequential.
    pub concurrency: usize,

    /// Log level (debug, info, warn, error).
    pub log_level: String,
}

impl Default for OsintConfig {
    fn default() -> Self {
        Self {
            registry_path: "registry/tools.json".into(),
            timeout_secs: crate::tools::http::DEFAULT_TIMEOUT.as_secs(),
            concurrency: 1,
            log_level: "warn".into(),
        }
    }
}

impl OsintConfig {
    /// Resolve a path that may contain `~` to an absolute path.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).into_owned())
    }

    /// Resolved registry path.
    pub fn resolved_registry_path(&self) -> PathBuf {
        self.resolve_path(&self.registry_path)
    }

    /// Request timeout; zero is treated as one second.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}
