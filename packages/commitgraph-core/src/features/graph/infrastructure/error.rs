/// Graph mutation errors
use thiserror::Error;

use crate::features::graph::domain::{EdgeId, NodeId};

#[derive(Debug, Error)]
pub enum GraphError {
    /// Operation not valid in the current graph state (programming error)
    #[error("Illegal graph state: {0}")]
    IllegalState(String),

    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("Unknown edge: {0}")]
    UnknownEdge(EdgeId),
}

impl GraphError {
    pub fn illegal_state(msg: impl Into<String>) -> Self {
        Self::IllegalState(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
