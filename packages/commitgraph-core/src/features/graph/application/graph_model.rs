//! Graph model use case
//!
//! Owns a [`Graph`], routes visibility requests through the
//! [`GraphFragmentController`] and tells listeners which rows changed.

use tracing::info;

use crate::features::git_reader::domain::CommitParents;
use crate::features::graph::domain::{
    BranchIdAllocator, EdgeId, Graph, GraphElement, GraphFragment, NodeId, Replace,
};
use crate::features::graph::infrastructure::{GraphBuilder, GraphFragmentController, Result};

pub type UpdateListener = Box<dyn FnMut(&Replace)>;

pub struct GraphModel {
    graph: Graph,
    controller: GraphFragmentController,
    listeners: Vec<UpdateListener>,
}

impl GraphModel {
    pub fn new(graph: Graph) -> Self {
        Self {
            graph,
            controller: GraphFragmentController::new(),
            listeners: Vec::new(),
        }
    }

    pub fn build<C: CommitParents>(commits: &[C], allocator: &mut BranchIdAllocator) -> Self {
        Self::new(GraphBuilder::new(allocator).build(commits))
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn add_update_listener(&mut self, listener: UpdateListener) {
        self.listeners.push(listener);
    }

    pub fn relate_fragment(&self, element: GraphElement) -> Option<GraphFragment> {
        self.controller.relate_fragment(&self.graph, element)
    }

    pub fn is_visible(&self, fragment: &GraphFragment) -> bool {
        self.controller.is_visible(&self.graph, fragment)
    }

    pub fn set_visible(&mut self, fragment: &GraphFragment, visible: bool) -> Result<Replace> {
        let replace = self
            .controller
            .set_visible(&mut self.graph, fragment, visible)?;
        self.notify(&replace);
        Ok(replace)
    }

    pub fn hide_branch(&mut self, up: NodeId, down: NodeId) -> Result<Replace> {
        let replace = self.controller.hide_branch(&mut self.graph, up, down)?;
        self.notify(&replace);
        Ok(replace)
    }

    pub fn show_branch(&mut self, edge: EdgeId) -> Result<Replace> {
        let replace = self.controller.show_branch(&mut self.graph, edge)?;
        self.notify(&replace);
        Ok(replace)
    }

    /// Collapsible and collapsed fragments, top to bottom
    pub fn fragments(&self) -> Vec<GraphFragment> {
        self.controller.fragments(&self.graph)
    }

    /// Collapse every expanded fragment
    pub fn hide_all(&mut self) -> Result<Replace> {
        let old_len = self.graph.row_count();
        let mut hidden = 0;
        for fragment in self.fragments() {
            if self.controller.is_visible(&self.graph, &fragment) {
                self.controller
                    .set_visible(&mut self.graph, &fragment, false)?;
                hidden += 1;
            }
        }
        info!("collapsed {} fragments", hidden);
        Ok(self.finish_bulk(old_len, hidden))
    }

    /// Expand every collapsed fragment
    pub fn show_all(&mut self) -> Result<Replace> {
        let old_len = self.graph.row_count();
        let edges = self.graph.hide_edges();
        for &edge in &edges {
            self.controller.show_branch(&mut self.graph, edge)?;
        }
        info!("expanded {} fragments", edges.len());
        Ok(self.finish_bulk(old_len, edges.len()))
    }

    fn finish_bulk(&mut self, old_len: usize, changed: usize) -> Replace {
        let replace = if changed == 0 {
            Replace::empty()
        } else {
            Replace::whole(old_len, self.graph.row_count())
        };
        self.notify(&replace);
        replace
    }

    fn notify(&mut self, replace: &Replace) {
        if replace.is_empty() {
            return;
        }
        for listener in &mut self.listeners {
            listener(replace);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::git_reader::domain::TimestampCommitParents;
    use crate::shared::models::CommitHash;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn commit(hash: &str, parents: &[&str]) -> TimestampCommitParents {
        TimestampCommitParents::new(
            CommitHash::new(hash),
            0,
            parents.iter().map(|p| CommitHash::new(*p)).collect(),
        )
    }

    fn model() -> GraphModel {
        let mut allocator = BranchIdAllocator::new();
        GraphModel::build(
            &[
                commit("m", &["a1", "b1"]),
                commit("a1", &["a2"]),
                commit("b1", &["b2"]),
                commit("a2", &["base"]),
                commit("b2", &["base"]),
                commit("base", &[]),
            ],
            &mut allocator,
        )
    }

    #[test]
    fn test_listener_sees_effective_changes_only() {
        let mut model = model();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        model.add_update_listener(Box::new(move |replace: &Replace| {
            sink.borrow_mut().push(*replace)
        }));

        let fragment = model.fragments()[0];
        let collapsed = model.set_visible(&fragment, false).unwrap();
        model.set_visible(&fragment, false).unwrap();

        assert_eq!(seen.borrow().as_slice(), &[collapsed]);
    }

    #[test]
    fn test_hide_all_show_all() {
        let mut model = model();
        let rows_before = model.graph().row_count();
        let snapshot = model.graph().snapshot();

        let hidden = model.hide_all().unwrap();
        assert_eq!(hidden, Replace::whole(rows_before, model.graph().row_count()));
        assert!(model.fragments().iter().all(|f| !model.is_visible(f)));
        assert_eq!(model.graph().row_count(), 2);

        assert!(model.hide_all().unwrap().is_empty());

        model.show_all().unwrap();
        assert_eq!(model.graph().snapshot(), snapshot);
        assert!(model.show_all().unwrap().is_empty());
    }
}
