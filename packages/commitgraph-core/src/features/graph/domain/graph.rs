/// Node/edge arena plus the ordered row list
///
/// Nodes and edges are never removed from the arena: collapsing hides them,
/// expanding brings the same ids back. A retired `HideBranch` edge is kept
/// per chain and revived by the next collapse of that chain, so toggling a
/// fragment does not grow the arena. Rows are sorted by `log_index`, so the
/// visible row of a node is a binary search away.
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::branch::{Branch, BranchId};
use super::edge::{Edge, EdgeId, EdgeKind, EdgeState};
use super::node::{Node, NodeId, NodeKind};
use super::row::NodeRow;
use crate::shared::models::CommitHash;

/// What a `HideBranch` edge absorbed
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HiddenChain {
    /// Intermediate nodes, top to bottom
    pub(crate) nodes: Vec<NodeId>,
    /// Chain edges, top to bottom
    pub(crate) edges: Vec<EdgeId>,
}

#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    rows: Vec<NodeRow>,
    commit_index: FxHashMap<CommitHash, NodeId>,
    pub(crate) hidden_chains: FxHashMap<EdgeId, HiddenChain>,
    /// First chain edge -> retired hide edge of that chain
    retired_hides: FxHashMap<EdgeId, EdgeId>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Queries
    // ═══════════════════════════════════════════════════════════════════

    pub fn rows(&self) -> &[NodeRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&NodeRow> {
        self.rows.get(index)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Node by id; ids come from this graph
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Edge by id; ids come from this graph
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    /// Commit node rendering `hash`
    pub fn commit_node(&self, hash: &CommitHash) -> Option<NodeId> {
        self.commit_index.get(hash).copied()
    }

    /// Current row index of the row with this log index
    pub fn row_index_by_log_index(&self, log_index: usize) -> Option<usize> {
        self.rows
            .binary_search_by_key(&log_index, |row| row.log_index)
            .ok()
    }

    /// Current row index of a visible node
    pub fn row_index_of(&self, id: NodeId) -> Option<usize> {
        let node = self.get_node(id)?;
        if node.hidden {
            return None;
        }
        self.row_index_by_log_index(node.log_index)
    }

    pub fn is_simple(&self, id: NodeId) -> bool {
        self.node(id).is_simple()
    }

    /// Edges currently part of the graph
    pub fn visible_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, edge)| edge.is_visible())
            .map(|(i, _)| EdgeId(i as u32))
    }

    /// Nodes currently part of the graph, in row order
    pub fn visible_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.rows.iter().flat_map(|row| row.nodes.iter().copied())
    }

    /// `HideBranch` edges currently in the graph
    pub fn hide_edges(&self) -> Vec<EdgeId> {
        let mut edges: Vec<EdgeId> = self.hidden_chains.keys().copied().collect();
        edges.sort();
        edges
    }

    /// Structural description of the visible graph, for comparison and export
    pub fn snapshot(&self) -> GraphSnapshot {
        let rows = self
            .rows
            .iter()
            .map(|row| RowSnapshot {
                log_index: row.log_index,
                nodes: row
                    .nodes
                    .iter()
                    .map(|&id| {
                        let node = self.node(id);
                        NodeSnapshot {
                            id,
                            kind: node.kind.clone(),
                            branch: node.branch.id(),
                            up_edges: node.up_edges.iter().map(|&e| self.edge_snapshot(e)).collect(),
                            down_edges: node
                                .down_edges
                                .iter()
                                .map(|&e| self.edge_snapshot(e))
                                .collect(),
                        }
                    })
                    .collect(),
            })
            .collect();
        GraphSnapshot { rows }
    }

    fn edge_snapshot(&self, id: EdgeId) -> EdgeSnapshot {
        let edge = self.edge(id);
        EdgeSnapshot {
            id,
            up: edge.up,
            down: edge.down,
            kind: edge.kind,
            branch: edge.branch.id(),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Mutation (builder and fragment controller only)
    // ═══════════════════════════════════════════════════════════════════

    pub(crate) fn add_node(
        &mut self,
        kind: NodeKind,
        branch: Branch,
        log_index: usize,
        column: usize,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        if let NodeKind::Commit(hash) = &kind {
            self.commit_index.insert(hash.clone(), id);
        }
        self.nodes.push(Node::new(kind, branch, log_index, column));
        id
    }

    /// New edge appended to the right of both endpoints' edge lists
    pub(crate) fn connect(
        &mut self,
        up: NodeId,
        down: NodeId,
        kind: EdgeKind,
        branch: Branch,
    ) -> EdgeId {
        let id = self.add_detached_edge(up, down, kind, branch);
        self.nodes[up.index()].down_edges.push(id);
        self.nodes[down.index()].up_edges.push(id);
        id
    }

    /// New edge not yet listed on its endpoints
    pub(crate) fn add_detached_edge(
        &mut self,
        up: NodeId,
        down: NodeId,
        kind: EdgeKind,
        branch: Branch,
    ) -> EdgeId {
        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(Edge::new(up, down, kind, branch));
        id
    }

    /// `HideBranch` edge for the chain starting with `first`, not yet listed
    /// on its endpoints
    pub(crate) fn hide_edge_for(
        &mut self,
        first: EdgeId,
        up: NodeId,
        down: NodeId,
        branch: Branch,
    ) -> EdgeId {
        if let Some(id) = self.retired_hides.remove(&first) {
            let edge = &mut self.edges[id.index()];
            if edge.up == up && edge.down == down {
                edge.branch = branch;
                edge.state = EdgeState::Visible;
                return id;
            }
        }
        self.add_detached_edge(up, down, EdgeKind::HideBranch, branch)
    }

    /// Retire a hide edge whose chain (starting with `first`) is shown again
    pub(crate) fn retire_hide_edge(&mut self, hide: EdgeId, first: EdgeId) {
        self.set_edge_state(hide, EdgeState::Retired);
        self.retired_hides.insert(first, hide);
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub(crate) fn set_edge_state(&mut self, id: EdgeId, state: EdgeState) {
        self.edges[id.index()].state = state;
    }

    /// Append a row; rows must be pushed in increasing log index order
    pub(crate) fn push_row(&mut self, row: NodeRow) {
        debug_assert!(self
            .rows
            .last()
            .map_or(true, |last| last.log_index < row.log_index));
        self.rows.push(row);
    }

    /// Put a node back into its row (recreating the row if needed)
    pub(crate) fn insert_into_row(&mut self, id: NodeId) {
        let (log_index, column) = {
            let node = &self.nodes[id.index()];
            (node.log_index, node.column)
        };
        let row_pos = match self
            .rows
            .binary_search_by_key(&log_index, |row| row.log_index)
        {
            Ok(pos) => pos,
            Err(pos) => {
                self.rows.insert(pos, NodeRow::new(log_index));
                pos
            }
        };

        let nodes = &self.nodes;
        let row = &mut self.rows[row_pos];
        let at = row
            .nodes
            .partition_point(|other| nodes[other.index()].column < column);
        row.nodes.insert(at, id);
    }

    /// Take a node out of its row, dropping the row once it is empty
    pub(crate) fn remove_from_row(&mut self, id: NodeId) {
        let log_index = self.nodes[id.index()].log_index;
        if let Ok(row_pos) = self
            .rows
            .binary_search_by_key(&log_index, |row| row.log_index)
        {
            let row = &mut self.rows[row_pos];
            row.nodes.retain(|&n| n != id);
            if row.nodes.is_empty() {
                self.rows.remove(row_pos);
            }
        }
    }
}

/// Visible graph as plain data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub rows: Vec<RowSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSnapshot {
    pub log_index: usize,
    pub nodes: Vec<NodeSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: NodeId,
    pub kind: NodeKind,
    pub branch: BranchId,
    pub up_edges: Vec<EdgeSnapshot>,
    pub down_edges: Vec<EdgeSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    pub id: EdgeId,
    pub up: NodeId,
    pub down: NodeId,
    pub kind: EdgeKind,
    pub branch: BranchId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::graph::domain::branch::BranchIdAllocator;

    fn hash(s: &str) -> CommitHash {
        CommitHash::new(s)
    }

    #[test]
    fn test_connect_orders_edges() {
        let mut allocator = BranchIdAllocator::new();
        let branch = allocator.next_branch();
        let mut graph = Graph::new();
        let a = graph.add_node(NodeKind::Commit(hash("a")), branch, 0, 0);
        let b = graph.add_node(NodeKind::Commit(hash("b")), branch, 1, 0);
        let c = graph.add_node(NodeKind::Commit(hash("c")), branch, 1, 1);
        let ab = graph.connect(a, b, EdgeKind::Usual, branch);
        let ac = graph.connect(a, c, EdgeKind::Usual, branch);

        assert_eq!(graph.node(a).down_edges(), &[ab, ac]);
        assert_eq!(graph.node(b).up_edges(), &[ab]);
        assert_eq!(graph.commit_node(&hash("c")), Some(c));
        assert_eq!(graph.visible_edges().count(), 2);
    }

    #[test]
    fn test_row_removal_and_reinsertion_keeps_columns() {
        let mut allocator = BranchIdAllocator::new();
        let branch = allocator.next_branch();
        let mut graph = Graph::new();
        let top = graph.add_node(NodeKind::Commit(hash("a")), branch, 0, 0);
        let left = graph.add_node(NodeKind::Commit(hash("b")), branch, 1, 0);
        let right = graph.add_node(NodeKind::EdgeJunction(hash("c")), branch, 1, 1);
        graph.push_row(NodeRow {
            log_index: 0,
            nodes: vec![top],
        });
        graph.push_row(NodeRow {
            log_index: 1,
            nodes: vec![left, right],
        });

        graph.remove_from_row(left);
        assert_eq!(graph.row(1).unwrap().nodes(), &[right]);
        graph.remove_from_row(right);
        assert_eq!(graph.row_count(), 1);

        graph.insert_into_row(right);
        graph.insert_into_row(left);
        assert_eq!(graph.row(1).unwrap().nodes(), &[left, right]);
        assert_eq!(graph.row_index_of(right), Some(1));
    }

    #[test]
    fn test_hidden_node_has_no_row() {
        let mut allocator = BranchIdAllocator::new();
        let mut graph = Graph::new();
        let a = graph.add_node(NodeKind::Commit(hash("a")), allocator.next_branch(), 0, 0);
        graph.push_row(NodeRow {
            log_index: 0,
            nodes: vec![a],
        });
        graph.node_mut(a).hidden = true;
        assert_eq!(graph.row_index_of(a), None);
    }
}
