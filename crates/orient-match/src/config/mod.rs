//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `ORIENT_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::constants::DEFAULT_TOP_K;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `ORIENT_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Path to the occupation catalog JSON. Default: `./data/occupations.json`.
    pub catalog_path: PathBuf,

    /// Path to the embedding model directory (safetensors + tokenizer).
    /// Absent means the embedder runs in stub mode.
    pub model_path: Option<PathBuf>,

    /// Path to the career-paths JSON map. Absent means an empty store.
    pub career_paths_path: Option<PathBuf>,

    /// Path to the audit log file. Default: `./.data/audit_log.json`.
    pub audit_log_path: PathBuf,

    /// Candidates retrieved before reduction. Default: `20`.
    pub top_k: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            catalog_path: PathBuf::from("./data/occupations.json"),
            model_path: None,
            career_paths_path: None,
            audit_log_path: PathBuf::from("./.data/audit_log.json"),
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "ORIENT_PORT";
    const ENV_BIND_ADDR: &'static str = "ORIENT_BIND_ADDR";
    const ENV_CATALOG_PATH: &'static str = "ORIENT_CATALOG_PATH";
    const ENV_MODEL_PATH: &'static str = "ORIENT_MODEL_PATH";
    const ENV_CAREER_PATHS_PATH: &'static str = "ORIENT_CAREER_PATHS_PATH";
    const ENV_AUDIT_LOG_PATH: &'static str = "ORIENT_AUDIT_LOG_PATH";
    const ENV_TOP_K: &'static str = "ORIENT_TOP_K";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let catalog_path = Self::parse_path_from_env(Self::ENV_CATALOG_PATH, defaults.catalog_path);
        let model_path = Self::parse_optional_path_from_env(Self::ENV_MODEL_PATH);
        let career_paths_path = Self::parse_optional_path_from_env(Self::ENV_CAREER_PATHS_PATH);
        let audit_log_path =
            Self::parse_path_from_env(Self::ENV_AUDIT_LOG_PATH, defaults.audit_log_path);
        let top_k = Self::parse_usize_from_env(Self::ENV_TOP_K, defaults.top_k);

        if top_k == 0 {
            return Err(ConfigError::InvalidTopK);
        }

        Ok(Self {
            port,
            bind_addr,
            catalog_path,
            model_path,
            career_paths_path,
            audit_log_path,
            top_k,
        })
    }

    /// Validates paths and basic invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.catalog_path.exists() {
            return Err(ConfigError::PathNotFound {
                path: self.catalog_path.clone(),
            });
        }
        if !self.catalog_path.is_file() {
            return Err(ConfigError::NotAFile {
                path: self.catalog_path.clone(),
            });
        }

        if let Some(ref path) = self.model_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if let Some(ref path) = self.career_paths_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_usize_from_env(var_name: &str, default: usize) -> usize {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}
