use flowroute_core::{Model, NodeId};

use crate::SearchSpace;
use crate::endpoints::find_start;
use crate::error::SearchError;
use crate::space::edge_target;

impl SearchSpace {
    /// Breadth-first traversal along outgoing edges.
    ///
    /// Returns every node reachable from `start` exactly once, in the order
    /// it was first discovered, `start` included. No costs are computed.
    pub fn bfs_order(&mut self, model: &Model, start: NodeId) -> Result<Vec<NodeId>, SearchError> {
        if !model.contains(start) {
            return Err(SearchError::UnknownNode(start));
        }
        self.begin_traversal(model);
        let cur_gen = self.seen_generation;

        let mut order = Vec::new();
        self.seen[start.index()] = cur_gen;
        self.queue.push_back(start);

        while let Some(ci) = self.queue.pop_front() {
            order.push(ci);
            for &eid in model.nodes()[ci.index()].out_edges() {
                let ni = edge_target(model, ci, eid)?;
                if self.seen[ni.index()] == cur_gen {
                    continue;
                }
                self.seen[ni.index()] = cur_gen;
                self.queue.push_back(ni);
            }
        }

        log::debug!("BFS from {start} visited {} nodes", order.len());
        Ok(order)
    }

    /// Breadth-first traversal from the inferred start node.
    pub fn traverse(&mut self, model: &Model) -> Result<Vec<NodeId>, SearchError> {
        let start = find_start(model)?;
        self.bfs_order(model, start)
    }

    /// Whether the last traversal visited `node`.
    pub fn visited(&self, node: NodeId) -> bool {
        self.seen_generation != 0
            && self.seen.get(node.index()) == Some(&self.seen_generation)
    }
}
