use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Env var naming an optional TOML config file.
pub const CONFIG_PATH_ENV: &str = "KUEUE_MCP_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{0} binary must not be empty")]
    EmptyBinary(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub oc_bin: String,
    pub kubectl_bin: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            oc_bin: "oc".into(),
            kubectl_bin: "kubectl".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    commands: CommandsSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CommandsSection {
    oc: Option<String>,
    kubectl: Option<String>,
}

impl AppConfig {
    /// Defaults, then the TOML file named by `KUEUE_MCP_CONFIG`, then
    /// `OC_BIN` / `KUBECTL_BIN`.
    pub fn from_env_and_toml() -> Result<Self, ConfigError> {
        let mut cfg = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) if !path.is_empty() => Self::from_toml_file(Path::new(&path))?,
            _ => Self::default(),
        };
        if let Ok(oc) = std::env::var("OC_BIN") {
            cfg.oc_bin = oc;
        }
        if let Ok(kubectl) = std::env::var("KUBECTL_BIN") {
            cfg.kubectl_bin = kubectl;
        }
        Ok(cfg)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(raw)?;
        let defaults = Self::default();
        Ok(Self {
            oc_bin: file.commands.oc.unwrap_or(defaults.oc_bin),
            kubectl_bin: file.commands.kubectl.unwrap_or(defaults.kubectl_bin),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.oc_bin.trim().is_empty() {
            return Err(ConfigError::EmptyBinary("oc"));
        }
        if self.kubectl_bin.trim().is_empty() {
            return Err(ConfigError::EmptyBinary("kubectl"));
        }
        Ok(())
    }
}
