/// Graph edges
use serde::{Deserialize, Serialize};
use std::fmt;

use super::branch::Branch;
use super::node::NodeId;

/// Stable arena index of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub(crate) u32);

impl EdgeId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Real adjacency between neighbouring rows
    Usual,
    /// Stands in for a whole collapsed fragment
    HideBranch,
}

/// Lifecycle of an arena edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeState {
    /// Part of the current graph
    Visible,
    /// Absorbed by a `HideBranch` edge; restored on expand
    Hidden,
    /// A `HideBranch` edge whose fragment was expanded again
    Retired,
}

/// Connects an up node (newer row) to a down node (older row)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub(crate) up: NodeId,
    pub(crate) down: NodeId,
    pub(crate) kind: EdgeKind,
    pub(crate) branch: Branch,
    pub(crate) state: EdgeState,
}

impl Edge {
    pub(crate) fn new(up: NodeId, down: NodeId, kind: EdgeKind, branch: Branch) -> Self {
        Self {
            up,
            down,
            kind,
            branch,
            state: EdgeState::Visible,
        }
    }

    pub fn up(&self) -> NodeId {
        self.up
    }

    pub fn down(&self) -> NodeId {
        self.down
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    pub fn branch(&self) -> Branch {
        self.branch
    }

    pub fn state(&self) -> EdgeState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == EdgeState::Visible
    }
}
