//
//  config.rs
//  Ghostbusters
//

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{GhostError, Result};

/// Default config file name, looked up in the project root.
pub const CONFIG_FILE: &str = "ghostbusters.toml";

/// Top-level Ghostbusters configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GhostConfig {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Which files belong to the frontend and backend groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Globs for client-side files, relative to the project root.
    #[serde(default = "default_frontend")]
    pub frontend: Vec<String>,
    /// Globs for server-side files.
    #[serde(default = "default_backend")]
    pub backend: Vec<String>,
    /// Globs excluded from both groups.
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,
}

/// How outbound HTTP calls are recognized in client code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Global fetch-style function.
    #[serde(default = "default_fetch")]
    pub fetch: String,
    /// Client modules/identifiers whose verb members issue requests.
    #[serde(default = "default_clients")]
    pub clients: Vec<String>,
    /// Member that creates a configured client instance (`axios.create`).
    #[serde(default = "default_factory")]
    pub factory: String,
}

/// How route declarations are recognized in server code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Member that mounts a sub-router under a prefix (`app.use`).
    #[serde(default = "default_mount")]
    pub mount: String,
}

fn default_frontend() -> Vec<String> {
    vec!["**/*.{js,jsx,ts,tsx}".to_string()]
}

fn default_backend() -> Vec<String> {
    vec!["**/*.{js,ts}".to_string()]
}

fn default_ignore() -> Vec<String> {
    vec![
        "**/node_modules/**".to_string(),
        "**/dist/**".to_string(),
        "**/build/**".to_string(),
    ]
}

fn default_fetch() -> String {
    "fetch".to_string()
}

fn default_clients() -> Vec<String> {
    vec!["axios".to_string()]
}

fn default_factory() -> String {
    "create".to_string()
}

fn default_mount() -> String {
    "use".to_string()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            frontend: default_frontend(),
            backend: default_backend(),
            ignore: default_ignore(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            fetch: default_fetch(),
            clients: default_clients(),
            factory: default_factory(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            mount: default_mount(),
        }
    }
}

impl GhostConfig {
    /// Load config from a TOML file. A missing file yields the defaults;
    /// an unreadable or malformed one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents).map_err(|e| GhostError::Config(path.to_path_buf(), e))
    }

    /// Load `ghostbusters.toml` from a project root.
    pub fn load_from_root(root: &Path) -> Result<Self> {
        Self::load(&root.join(CONFIG_FILE))
    }

    pub fn from_toml(contents: &str) -> std::result::Result<Self, String> {
        toml::from_str(contents).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = GhostConfig::default();
        assert_eq!(config.client.fetch, "fetch");
        assert_eq!(config.client.clients, vec!["axios"]);
        assert_eq!(config.client.factory, "create");
        assert_eq!(config.server.mount, "use");
        assert_eq!(config.scan.ignore.len(), 3);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GhostConfig::from_toml(
            r#"
[scan]
frontend = ["web/src/**/*.tsx"]

[client]
clients = ["axios", "http"]
"#,
        )
        .unwrap();
        assert_eq!(config.scan.frontend, vec!["web/src/**/*.tsx"]);
        assert_eq!(config.scan.backend, default_backend());
        assert_eq!(config.client.clients, vec!["axios", "http"]);
        assert_eq!(config.client.fetch, "fetch");
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_load_missing_and_malformed() {
        let dir = tempdir().unwrap();
        assert_eq!(
            GhostConfig::load_from_root(dir.path()).unwrap(),
            GhostConfig::default()
        );

        std::fs::write(dir.path().join(CONFIG_FILE), "[scan\nfrontend = 3").unwrap();
        let err = GhostConfig::load_from_root(dir.path()).unwrap_err();
        assert!(matches!(err, GhostError::Config(..)));
    }
}
