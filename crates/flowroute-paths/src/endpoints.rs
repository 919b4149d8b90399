//! Start/goal selection from graph topology and node placement.
//!
//! Diagrams are laid out from the top-left corner, so the entry point is the
//! source node closest to the origin and the exit is the sink node farthest
//! from it.

use flowroute_core::{Model, Node, NodeId};

use crate::error::SearchError;

/// The inferred start and goal of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Endpoints {
    pub start: NodeId,
    pub goal: NodeId,
}

/// Nodes with outgoing edges and no incoming ones.
pub fn start_candidates(model: &Model) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
    model
        .iter_nodes()
        .filter(|(_, n)| n.in_edges().is_empty() && !n.out_edges().is_empty())
}

/// Nodes with incoming edges and no outgoing ones.
pub fn goal_candidates(model: &Model) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
    model
        .iter_nodes()
        .filter(|(_, n)| !n.in_edges().is_empty() && n.out_edges().is_empty())
}

/// The start candidate closest to the origin. Ties go to the earlier node.
pub fn find_start(model: &Model) -> Result<NodeId, SearchError> {
    pick(start_candidates(model), |best, d| d < best).ok_or(SearchError::NoStartNode)
}

/// The goal candidate farthest from the origin. Ties go to the earlier node.
pub fn find_goal(model: &Model) -> Result<NodeId, SearchError> {
    pick(goal_candidates(model), |best, d| d > best).ok_or(SearchError::NoGoalNode)
}

/// Infer both endpoints, failing before any search if either is missing.
pub fn infer_endpoints(model: &Model) -> Result<Endpoints, SearchError> {
    let start = find_start(model)?;
    let goal = find_goal(model)?;
    log::debug!("inferred endpoints: start {start}, goal {goal}");
    Ok(Endpoints { start, goal })
}

fn pick<'a>(
    candidates: impl Iterator<Item = (NodeId, &'a Node)>,
    better: impl Fn(f64, f64) -> bool,
) -> Option<NodeId> {
    let mut best: Option<(NodeId, f64)> = None;
    for (id, node) in candidates {
        let d = node.origo_distance();
        match best {
            Some((_, bd)) if !better(bd, d) => {}
            _ => best = Some((id, d)),
        }
    }
    best.map(|(id, _)| id)
}
