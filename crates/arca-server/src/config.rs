use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Server configuration, loadable from a TOML file.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Root directory of the sharded object store.
    pub data_root: PathBuf,
    /// Directory uploads are staged into before ingestion. Must live on
    /// the same filesystem as `data_root` so the final move is an atomic
    /// rename.
    pub upload_dir: PathBuf,
    /// Default tracing filter, overridable with `RUST_LOG`.
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".parse().expect("valid literal addr"),
            data_root: PathBuf::from("data/objects"),
            upload_dir: PathBuf::from("data/uploads"),
            log_filter: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file. Missing keys fall back to
    /// defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.data_root, PathBuf::from("data/objects"));
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn load_with_partial_keys_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arca.toml");
        std::fs::write(&path, "bind_addr = \"0.0.0.0:9090\"\n").unwrap();

        let config = ServerConfig::load(&path).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:9090".parse::<SocketAddr>().unwrap());
        assert_eq!(config.upload_dir, PathBuf::from("data/uploads"));
    }

    #[test]
    fn load_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arca.toml");
        std::fs::write(&path, "bind_addr = not-quoted").unwrap();
        assert!(ServerConfig::load(&path).is_err());
    }
}
