/// Fragment handles
use serde::{Deserialize, Serialize};

use super::edge::EdgeId;
use super::node::NodeId;

/// Something a user can point at in the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraphElement {
    Node(NodeId),
    Edge(EdgeId),
}

/// A straight chain between two boundary nodes
///
/// Computed on demand, never stored by the graph. `slot` is the index of
/// the chain's first edge in `up_node.down_edges`; collapsing and expanding
/// swap edges in place, so the slot keeps naming the same chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphFragment {
    pub up_node: NodeId,
    pub down_node: NodeId,
    pub slot: usize,
}
