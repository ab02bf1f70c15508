//! Configuration I/O (YAML/Env loading)

use super::error::{ConfigError, ConfigResult};
use super::section_configs::{GraphConfig, ReaderConfig};
use super::validation::Validatable;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Current YAML schema version
pub const CONFIG_VERSION: u32 = 1;

const SUPPORTED_VERSIONS: &[u32] = &[CONFIG_VERSION];

/// Environment variable overriding `reader.git_executable`
pub const ENV_GIT: &str = "COMMITGRAPH_GIT";
/// Environment variable overriding `reader.block_size`
pub const ENV_BLOCK_SIZE: &str = "COMMITGRAPH_BLOCK_SIZE";

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitGraphConfig {
    /// Schema version (always 1 for v1)
    pub version: u32,

    #[serde(default)]
    pub reader: ReaderConfig,

    #[serde(default)]
    pub graph: GraphConfig,
}

/// On-disk shape; `version` is optional here so its absence can be reported
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFileV1 {
    version: Option<u32>,
    #[serde(default)]
    reader: ReaderConfig,
    #[serde(default)]
    graph: GraphConfig,
}

impl Default for CommitGraphConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            reader: ReaderConfig::default(),
            graph: GraphConfig::default(),
        }
    }
}

impl CommitGraphConfig {
    /// Load from a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load from YAML text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;
        let version = file.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let config = Self {
            version,
            reader: file.reader,
            graph: file.graph,
        };
        config.validate()?;
        Ok(config)
    }

    /// Export as YAML
    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Apply `COMMITGRAPH_*` overrides from the process environment
    pub fn apply_env(self) -> ConfigResult<Self> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup (tests pass a map)
    pub fn apply_env_from<F>(mut self, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(git) = lookup(ENV_GIT) {
            self.reader.git_executable = git;
        }

        if let Some(raw) = lookup(ENV_BLOCK_SIZE) {
            self.reader.block_size =
                raw.trim()
                    .parse::<usize>()
                    .map_err(|e| ConfigError::InvalidEnv {
                        var: ENV_BLOCK_SIZE.to_string(),
                        value: raw.clone(),
                        reason: e.to_string(),
                    })?;
        }

        self.validate()?;
        Ok(self)
    }
}

impl Validatable for CommitGraphConfig {
    fn validate(&self) -> ConfigResult<()> {
        let sections: [&dyn Validatable; 2] = [&self.reader, &self.graph];
        for section in sections {
            section.validate()?;
            debug!("{} valid", section.config_name());
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "CommitGraphConfig"
    }
}
