//! Per-section configuration types
//!
//! Each section has its own struct with validation and builder setters.

use super::error::{ConfigError, ConfigResult};
use super::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Default number of commits returned per reader block
pub const DEFAULT_BLOCK_SIZE: usize = 100;
const MAX_BLOCK_SIZE: usize = 10_000;

// ============================================================================
// Reader Configuration
// ============================================================================

/// Git log reader configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Executable used to spawn git
    pub git_executable: String,

    /// Commits per block (1..=10000)
    pub block_size: usize,

    /// Lines between "Read N commits" progress reports (>= 1)
    pub progress_step: usize,

    /// Read every ref (`--all`) instead of HEAD only
    pub all_refs: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            git_executable: "git".to_string(),
            block_size: DEFAULT_BLOCK_SIZE,
            progress_step: DEFAULT_BLOCK_SIZE,
            all_refs: true,
        }
    }
}

impl ReaderConfig {
    /// Builder: Set git executable
    pub fn git_executable(mut self, v: impl Into<String>) -> Self {
        self.git_executable = v.into();
        self
    }

    /// Builder: Set block_size
    pub fn block_size(mut self, v: usize) -> Self {
        self.block_size = v;
        self
    }

    /// Builder: Set progress_step
    pub fn progress_step(mut self, v: usize) -> Self {
        self.progress_step = v;
        self
    }

    /// Builder: Set all_refs
    pub fn all_refs(mut self, v: bool) -> Self {
        self.all_refs = v;
        self
    }
}

impl Validatable for ReaderConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.git_executable.trim().is_empty() {
            return Err(ConfigError::Custom(
                "reader.git_executable must not be empty".to_string(),
            ));
        }

        if self.block_size == 0 || self.block_size > MAX_BLOCK_SIZE {
            return Err(ConfigError::range_with_hint(
                "block_size",
                self.block_size,
                1,
                MAX_BLOCK_SIZE,
                "Blocks must hold at least one commit",
            ));
        }

        if self.progress_step == 0 {
            return Err(ConfigError::range_with_hint(
                "progress_step",
                self.progress_step,
                1,
                usize::MAX,
                "Progress step of 0 would report on every line forever",
            ));
        }

        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "ReaderConfig"
    }
}

// ============================================================================
// Graph Configuration
// ============================================================================

/// Commit graph configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Collapse every fragment right after the graph is built
    pub collapse_on_load: bool,
}

impl GraphConfig {
    /// Builder: Set collapse_on_load
    pub fn collapse_on_load(mut self, v: bool) -> Self {
        self.collapse_on_load = v;
        self
    }
}

impl Validatable for GraphConfig {
    fn validate(&self) -> ConfigResult<()> {
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "GraphConfig"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_defaults_are_valid() {
        let config = ReaderConfig::default();
        assert_eq!(config.block_size, 100);
        assert_eq!(config.git_executable, "git");
        assert!(config.all_refs);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_reader_block_size_range() {
        assert!(ReaderConfig::default().block_size(0).validate().is_err());
        assert!(ReaderConfig::default().block_size(10_001).validate().is_err());
        assert!(ReaderConfig::default().block_size(1).validate().is_ok());
        assert!(ReaderConfig::default().block_size(10_000).validate().is_ok());
    }

    #[test]
    fn test_reader_progress_step_zero() {
        let err = ReaderConfig::default().progress_step(0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::Range { ref field, .. } if field == "progress_step"));
    }

    #[test]
    fn test_reader_empty_executable() {
        assert!(ReaderConfig::default().git_executable(" ").validate().is_err());
    }

    #[test]
    fn test_graph_builder_setter() {
        let config = GraphConfig::default().collapse_on_load(true);
        assert!(config.collapse_on_load);
        assert!(config.validate().is_ok());
    }
}
