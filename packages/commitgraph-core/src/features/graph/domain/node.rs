/// Graph nodes
use serde::{Deserialize, Serialize};
use std::fmt;

use super::branch::Branch;
use super::edge::EdgeId;
use crate::shared::models::CommitHash;

/// Stable arena index of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// What a node stands for; each variant carries a differently-meant commit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "commit", rename_all = "snake_case")]
pub enum NodeKind {
    /// The commit rendered on this row
    Commit(CommitHash),
    /// A lane passing through this row; carries the commit the lane leads to
    EdgeJunction(CommitHash),
    /// A parent outside the loaded history, ending a lane
    TruncatedParent(CommitHash),
}

/// Discriminant of [`NodeKind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    CommitNode,
    EdgeNode,
    EndCommitNode,
}

impl NodeKind {
    /// The commit this node refers to (meaning depends on the variant)
    pub fn commit(&self) -> &CommitHash {
        match self {
            NodeKind::Commit(hash)
            | NodeKind::EdgeJunction(hash)
            | NodeKind::TruncatedParent(hash) => hash,
        }
    }

    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Commit(_) => NodeType::CommitNode,
            NodeKind::EdgeJunction(_) => NodeType::EdgeNode,
            NodeKind::TruncatedParent(_) => NodeType::EndCommitNode,
        }
    }

    pub fn is_commit(&self) -> bool {
        matches!(self, NodeKind::Commit(_))
    }
}

/// A vertex of the rendered graph
///
/// `up_edges`/`down_edges` are ordered left to right; layout depends on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) branch: Branch,
    pub(crate) log_index: usize,
    pub(crate) column: usize,
    pub(crate) up_edges: Vec<EdgeId>,
    pub(crate) down_edges: Vec<EdgeId>,
    pub(crate) hidden: bool,
}

impl Node {
    pub(crate) fn new(kind: NodeKind, branch: Branch, log_index: usize, column: usize) -> Self {
        Self {
            kind,
            branch,
            log_index,
            column,
            up_edges: Vec::new(),
            down_edges: Vec::new(),
            hidden: false,
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    pub fn commit(&self) -> &CommitHash {
        self.kind.commit()
    }

    pub fn branch(&self) -> Branch {
        self.branch
    }

    /// Position of this node's row in the full (uncollapsed) history
    pub fn log_index(&self) -> usize {
        self.log_index
    }

    /// Left-to-right position inside the row, fixed at build time
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn up_edges(&self) -> &[EdgeId] {
        &self.up_edges
    }

    pub fn down_edges(&self) -> &[EdgeId] {
        &self.down_edges
    }

    /// Absorbed into a collapsed fragment
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Exactly one edge in and one edge out
    pub fn is_simple(&self) -> bool {
        self.up_edges.len() == 1 && self.down_edges.len() == 1
    }
}
