//! Error types for commitgraph-core
//!
//! Each feature keeps its own error enum; this one wraps them for callers
//! that drive the whole pipeline.

use thiserror::Error;

use crate::config::ConfigError;
use crate::features::git_reader::{ErrorCategory, GitReaderError};
use crate::features::graph::GraphError;

#[derive(Debug, Error)]
pub enum CommitGraphError {
    /// Reading the log failed
    #[error(transparent)]
    Reader(#[from] GitReaderError),

    /// Illegal graph mutation
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CommitGraphError {
    /// Reader failure class, if this came from the reader
    pub fn reader_category(&self) -> Option<ErrorCategory> {
        match self {
            CommitGraphError::Reader(e) => Some(e.category()),
            _ => None,
        }
    }
}

/// Result type alias for commitgraph operations
pub type Result<T> = std::result::Result<T, CommitGraphError>;
