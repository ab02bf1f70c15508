//! Configuration System
//!
//! Two sources, applied in order:
//! - Defaults / YAML file (`version: 1` schema)
//! - Environment overrides (`COMMITGRAPH_GIT`, `COMMITGRAPH_BLOCK_SIZE`)
//!
//! # Examples
//!
//! ```rust,ignore
//! use commitgraph_core::config::CommitGraphConfig;
//!
//! let config = CommitGraphConfig::from_yaml("commitgraph.yaml")?.apply_env()?;
//! config.validate()?;
//! ```

pub mod error;
pub mod io;
pub mod section_configs;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use io::{CommitGraphConfig, CONFIG_VERSION};
pub use section_configs::{GraphConfig, ReaderConfig};
pub use validation::Validatable;
