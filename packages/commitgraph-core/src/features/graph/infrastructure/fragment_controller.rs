//! Fragment collapse/expand
//!
//! A fragment is the chain of edges between two boundary nodes whose
//! intermediate nodes all have one edge up and one edge down. Collapsing
//! hides the intermediate nodes and swaps a single `HideBranch` edge into
//! the chain's slots on both boundary nodes; expanding swaps the chain back.
//! Boundary nodes never change degree, so fragment slots stay valid.

use tracing::debug;

use super::error::{GraphError, Result};
use crate::features::graph::domain::graph::HiddenChain;
use crate::features::graph::domain::{
    EdgeId, EdgeKind, EdgeState, Graph, GraphElement, GraphFragment, NodeId, Replace,
};

/// Chain found by walking down from a boundary slot
struct Chain {
    down: NodeId,
    nodes: Vec<NodeId>,
    edges: Vec<EdgeId>,
}

/// Stateless visibility controller; all state lives in the [`Graph`]
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphFragmentController;

impl GraphFragmentController {
    pub fn new() -> Self {
        Self
    }

    /// Fragment containing `element`, if it lies on a collapsible chain
    pub fn relate_fragment(&self, graph: &Graph, element: GraphElement) -> Option<GraphFragment> {
        match element {
            GraphElement::Edge(edge) => {
                let e = graph.get_edge(edge)?;
                if !e.is_visible() {
                    return None;
                }
                self.fragment_of_edge(graph, edge)
            }
            GraphElement::Node(node) => {
                let n = graph.get_node(node)?;
                if n.is_hidden() {
                    return None;
                }
                let edge = if n.is_simple() {
                    n.up_edges()[0]
                } else if let [down] = n.down_edges() {
                    *down
                } else if let [up] = n.up_edges() {
                    *up
                } else {
                    return None;
                };
                self.fragment_of_edge(graph, edge)
            }
        }
    }

    /// `true` unless the fragment is collapsed
    pub fn is_visible(&self, graph: &Graph, fragment: &GraphFragment) -> bool {
        self.slot_edge(graph, fragment)
            .map_or(true, |edge| graph.edge(edge).kind() == EdgeKind::Usual)
    }

    /// Expand (`true`) or collapse (`false`) a fragment
    ///
    /// Already in the requested state: returns an empty [`Replace`].
    pub fn set_visible(
        &self,
        graph: &mut Graph,
        fragment: &GraphFragment,
        visible: bool,
    ) -> Result<Replace> {
        let edge = self.slot_edge(graph, fragment).ok_or_else(|| {
            GraphError::illegal_state(format!(
                "no edge at slot {} of {}",
                fragment.slot, fragment.up_node
            ))
        })?;

        match (graph.edge(edge).kind(), visible) {
            (EdgeKind::Usual, true) | (EdgeKind::HideBranch, false) => Ok(Replace::empty()),
            (EdgeKind::HideBranch, true) => {
                if graph.edge(edge).down() != fragment.down_node {
                    return Err(GraphError::illegal_state(format!(
                        "{} does not end at {}",
                        edge, fragment.down_node
                    )));
                }
                self.show_branch(graph, edge)
            }
            (EdgeKind::Usual, false) => {
                self.check_boundary(graph, fragment.up_node)?;
                let chain = self.walk_chain(graph, fragment.up_node, fragment.slot)?;
                if chain.down != fragment.down_node {
                    return Err(GraphError::illegal_state(format!(
                        "chain from {} ends at {}, not {}",
                        fragment.up_node, chain.down, fragment.down_node
                    )));
                }
                Ok(self.collapse(graph, fragment.up_node, fragment.slot, chain))
            }
        }
    }

    /// Collapse the chain running from `up` to `down` into one edge
    pub fn hide_branch(&self, graph: &mut Graph, up: NodeId, down: NodeId) -> Result<Replace> {
        let up_node = graph.get_node(up).ok_or(GraphError::UnknownNode(up))?;
        graph.get_node(down).ok_or(GraphError::UnknownNode(down))?;
        self.check_boundary(graph, up)?;

        for slot in 0..up_node.down_edges().len() {
            if graph.edge(graph.node(up).down_edges()[slot]).kind() != EdgeKind::Usual {
                continue;
            }
            if let Ok(chain) = self.walk_chain(graph, up, slot) {
                if chain.down == down {
                    return Ok(self.collapse(graph, up, slot, chain));
                }
            }
        }
        Err(GraphError::illegal_state(format!(
            "{} and {} are not joined by a collapsible chain",
            up, down
        )))
    }

    /// Expand the fragment behind a `HideBranch` edge
    pub fn show_branch(&self, graph: &mut Graph, edge: EdgeId) -> Result<Replace> {
        let e = graph.get_edge(edge).ok_or(GraphError::UnknownEdge(edge))?;
        if e.kind() != EdgeKind::HideBranch || !e.is_visible() {
            return Err(GraphError::illegal_state(format!(
                "{} is not a visible hide edge",
                edge
            )));
        }
        let (up, down) = (e.up(), e.down());
        let up_row = self.row_of(graph, up)?;
        let down_row = self.row_of(graph, down)?;

        let chain = graph
            .hidden_chains
            .remove(&edge)
            .ok_or_else(|| GraphError::illegal_state(format!("{} has no hidden chain", edge)))?;

        let (first, last) = match (chain.edges.first(), chain.edges.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return Err(GraphError::illegal_state(format!("{} hides no edges", edge))),
        };
        replace_edge(&mut graph.node_mut(up).down_edges, edge, first);
        replace_edge(&mut graph.node_mut(down).up_edges, edge, last);

        for &hidden in &chain.edges {
            graph.set_edge_state(hidden, EdgeState::Visible);
        }
        for &node in &chain.nodes {
            graph.node_mut(node).hidden = false;
            graph.insert_into_row(node);
        }
        graph.retire_hide_edge(edge, first);

        let new_down_row = self.row_of(graph, down)?;
        let replace = Replace::between(up_row, down_row, new_down_row);
        debug!(
            "expanded {} ({} nodes) between {} and {}: {:?}",
            edge,
            chain.nodes.len(),
            up,
            down,
            replace
        );
        Ok(replace)
    }

    /// Every collapsible or collapsed fragment, top to bottom
    pub fn fragments(&self, graph: &Graph) -> Vec<GraphFragment> {
        let mut fragments = Vec::new();
        for up in graph.visible_nodes() {
            let node = graph.node(up);
            if node.is_simple() {
                continue;
            }
            for (slot, &edge) in node.down_edges().iter().enumerate() {
                let fragment = match graph.edge(edge).kind() {
                    EdgeKind::HideBranch => Some(GraphFragment {
                        up_node: up,
                        down_node: graph.edge(edge).down(),
                        slot,
                    }),
                    EdgeKind::Usual => self.walk_chain(graph, up, slot).ok().map(|chain| {
                        GraphFragment {
                            up_node: up,
                            down_node: chain.down,
                            slot,
                        }
                    }),
                };
                fragments.extend(fragment);
            }
        }
        fragments
    }

    // ═══════════════════════════════════════════════════════════════════
    // Internals
    // ═══════════════════════════════════════════════════════════════════

    fn slot_edge(&self, graph: &Graph, fragment: &GraphFragment) -> Option<EdgeId> {
        graph
            .get_node(fragment.up_node)?
            .down_edges()
            .get(fragment.slot)
            .copied()
    }

    /// Fragments start at nodes that are not in the middle of a chain
    fn check_boundary(&self, graph: &Graph, up: NodeId) -> Result<()> {
        if graph.is_simple(up) {
            return Err(GraphError::illegal_state(format!(
                "{} lies inside a chain and cannot bound a fragment",
                up
            )));
        }
        Ok(())
    }

    fn row_of(&self, graph: &Graph, node: NodeId) -> Result<usize> {
        graph
            .row_index_of(node)
            .ok_or_else(|| GraphError::illegal_state(format!("{} is not on any row", node)))
    }

    fn fragment_of_edge(&self, graph: &Graph, edge: EdgeId) -> Option<GraphFragment> {
        let mut first = edge;
        let mut up = graph.edge(first).up();
        while graph.is_simple(up) {
            first = graph.node(up).up_edges()[0];
            up = graph.edge(first).up();
        }
        let slot = graph.node(up).down_edges().iter().position(|&e| e == first)?;

        if graph.edge(first).kind() == EdgeKind::HideBranch {
            return Some(GraphFragment {
                up_node: up,
                down_node: graph.edge(first).down(),
                slot,
            });
        }
        let chain = self.walk_chain(graph, up, slot).ok()?;
        Some(GraphFragment {
            up_node: up,
            down_node: chain.down,
            slot,
        })
    }

    /// Follow the usual chain starting at `up.down_edges[slot]`
    fn walk_chain(&self, graph: &Graph, up: NodeId, slot: usize) -> Result<Chain> {
        let first = graph
            .get_node(up)
            .ok_or(GraphError::UnknownNode(up))?
            .down_edges()
            .get(slot)
            .copied()
            .ok_or_else(|| GraphError::illegal_state(format!("no edge at slot {} of {}", slot, up)))?;

        let mut edges = vec![first];
        let mut nodes = Vec::new();
        let mut node = graph.edge(first).down();
        while graph.is_simple(node) {
            let next = graph.node(node).down_edges()[0];
            if graph.edge(next).kind() != EdgeKind::Usual {
                return Err(GraphError::illegal_state(format!(
                    "chain from {} runs into hide edge {}",
                    up, next
                )));
            }
            nodes.push(node);
            edges.push(next);
            node = graph.edge(next).down();
        }

        if !nodes.iter().any(|&n| graph.node(n).kind().is_commit()) {
            return Err(GraphError::illegal_state(format!(
                "chain from {} to {} has no commits to hide",
                up, node
            )));
        }
        Ok(Chain {
            down: node,
            nodes,
            edges,
        })
    }

    fn collapse(&self, graph: &mut Graph, up: NodeId, slot: usize, chain: Chain) -> Replace {
        let Chain { down, nodes, edges } = chain;
        // Rows of boundary nodes: both are visible, the chain was walked from them
        let up_row = graph.row_index_of(up).unwrap_or_default();
        let down_row = graph.row_index_of(down).unwrap_or_default();

        for &node in &nodes {
            graph.node_mut(node).hidden = true;
            graph.remove_from_row(node);
        }
        for &edge in &edges {
            graph.set_edge_state(edge, EdgeState::Hidden);
        }

        let first = edges[0];
        let last = edges[edges.len() - 1];
        let branch = graph.edge(first).branch();
        let hide = graph.hide_edge_for(first, up, down, branch);
        graph.node_mut(up).down_edges[slot] = hide;
        replace_edge(&mut graph.node_mut(down).up_edges, last, hide);

        let hidden_count = nodes.len();
        graph.hidden_chains.insert(hide, HiddenChain { nodes, edges });

        let new_down_row = graph.row_index_of(down).unwrap_or(up_row + 1);
        let replace = Replace::between(up_row, down_row, new_down_row);
        debug!(
            "collapsed {} nodes between {} and {} into {}: {:?}",
            hidden_count, up, down, hide, replace
        );
        replace
    }
}

fn replace_edge(edges: &mut [EdgeId], old: EdgeId, new: EdgeId) {
    if let Some(slot) = edges.iter_mut().find(|e| **e == old) {
        *slot = new;
    }
}
