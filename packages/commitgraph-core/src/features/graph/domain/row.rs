/// Graph rows
use serde::{Deserialize, Serialize};

use super::node::NodeId;

/// One horizontal slice of the graph
///
/// Nodes are kept sorted by their build-time column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRow {
    pub(crate) log_index: usize,
    pub(crate) nodes: Vec<NodeId>,
}

impl NodeRow {
    pub(crate) fn new(log_index: usize) -> Self {
        Self {
            log_index,
            nodes: Vec::new(),
        }
    }

    /// Position of this row's commit in the linear history
    pub fn log_index(&self) -> usize {
        self.log_index
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
