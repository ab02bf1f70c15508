//! Graph builder
//!
//! Turns commits in log order (children before parents) into rows of nodes.
//! Active lanes are tracked left to right; each lane is an edge waiting for
//! the commit it leads to. Every row either ends a lane in the row's commit
//! node or passes it through an `EdgeJunction` node.

use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use crate::features::git_reader::domain::CommitParents;
use crate::features::graph::domain::{
    Branch, BranchIdAllocator, EdgeKind, Graph, NodeId, NodeKind, NodeRow,
};
use crate::shared::models::CommitHash;

/// An edge started on an earlier row, not yet attached below
#[derive(Debug, Clone)]
struct Lane {
    target: CommitHash,
    branch: Branch,
    from: NodeId,
}

/// Builds a [`Graph`] from commit/parent records
pub struct GraphBuilder<'a> {
    allocator: &'a mut BranchIdAllocator,
    graph: Graph,
    lanes: Vec<Lane>,
    seen: FxHashSet<CommitHash>,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(allocator: &'a mut BranchIdAllocator) -> Self {
        Self {
            allocator,
            graph: Graph::new(),
            lanes: Vec::new(),
            seen: FxHashSet::default(),
        }
    }

    pub fn build<C: CommitParents>(mut self, commits: &[C]) -> Graph {
        let mut log_index = 0;
        for commit in commits {
            if !self.seen.insert(commit.hash().clone()) {
                warn!("duplicate commit {} in history, skipped", commit.hash());
                continue;
            }
            self.add_commit_row(commit, log_index);
            log_index += 1;
        }
        self.add_truncated_row(log_index);

        debug!(
            "built graph: {} rows, {} nodes, {} edges",
            self.graph.row_count(),
            self.graph.node_count(),
            self.graph.edge_count()
        );
        self.graph
    }

    fn add_commit_row<C: CommitParents>(&mut self, commit: &C, log_index: usize) {
        let hash = commit.hash();
        let lanes = std::mem::take(&mut self.lanes);
        let commit_lane = lanes.iter().position(|lane| &lane.target == hash);

        let commit_branch = match commit_lane {
            Some(i) => lanes[i].branch,
            None => self.allocator.next_branch(),
        };

        let mut row = NodeRow::new(log_index);
        let mut next_lanes = Vec::with_capacity(lanes.len() + commit.parents().len());
        let mut commit_node = None;

        // Commit node first so its id precedes the junctions of this row
        let commit_column = commit_lane.unwrap_or(lanes.len());
        let node = self.graph.add_node(
            NodeKind::Commit(hash.clone()),
            commit_branch,
            log_index,
            commit_column,
        );

        for (column, lane) in lanes.into_iter().enumerate() {
            if &lane.target == hash {
                self.graph.connect(lane.from, node, EdgeKind::Usual, lane.branch);
                if commit_node.is_none() {
                    commit_node = Some(node);
                    row.nodes.push(node);
                    self.push_parent_lanes(commit, node, commit_branch, true, &mut next_lanes);
                }
                continue;
            }

            let junction = self.graph.add_node(
                NodeKind::EdgeJunction(lane.target.clone()),
                lane.branch,
                log_index,
                column,
            );
            self.graph.connect(lane.from, junction, EdgeKind::Usual, lane.branch);
            row.nodes.push(junction);
            next_lanes.push(Lane {
                from: junction,
                ..lane
            });
        }

        if commit_node.is_none() {
            row.nodes.push(node);
            self.push_parent_lanes(commit, node, commit_branch, true, &mut next_lanes);
        }
        self.push_parent_lanes(commit, node, commit_branch, false, &mut next_lanes);

        self.graph.push_row(row);
        self.lanes = next_lanes;
    }

    /// First parent continues the commit's branch; the rest open new lanes
    fn push_parent_lanes<C: CommitParents>(
        &mut self,
        commit: &C,
        node: NodeId,
        branch: Branch,
        first: bool,
        lanes: &mut Vec<Lane>,
    ) {
        let parents = commit.parents();
        if first {
            if let Some(parent) = parents.first() {
                lanes.push(Lane {
                    target: parent.clone(),
                    branch,
                    from: node,
                });
            }
            return;
        }
        for parent in parents.iter().skip(1) {
            lanes.push(Lane {
                target: parent.clone(),
                branch: self.allocator.next_branch(),
                from: node,
            });
        }
    }

    /// Lanes still open after the last commit end in truncated-parent nodes
    fn add_truncated_row(&mut self, log_index: usize) {
        if self.lanes.is_empty() {
            return;
        }
        let lanes = std::mem::take(&mut self.lanes);
        let mut row = NodeRow::new(log_index);
        let mut ends: Vec<(CommitHash, NodeId)> = Vec::new();

        for lane in lanes {
            let end = match ends.iter().find(|(target, _)| target == &lane.target) {
                Some((_, node)) => *node,
                None => {
                    let node = self.graph.add_node(
                        NodeKind::TruncatedParent(lane.target.clone()),
                        lane.branch,
                        log_index,
                        ends.len(),
                    );
                    row.nodes.push(node);
                    ends.push((lane.target.clone(), node));
                    node
                }
            };
            self.graph.connect(lane.from, end, EdgeKind::Usual, lane.branch);
        }

        debug!("{} parents outside loaded history", ends.len());
        self.graph.push_row(row);
    }
}
