use std::fmt;

use flowroute_core::{EdgeId, ModelError, NodeId};

/// Fatal conditions that abort a search or traversal.
///
/// An unreachable goal is not an error: [`astar_route`](crate::SearchSpace::astar_route)
/// reports it as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// No node has outgoing edges but no incoming ones.
    NoStartNode,
    /// No node has incoming edges but no outgoing ones.
    NoGoalNode,
    /// A node handle that does not belong to the searched model.
    UnknownNode(NodeId),
    /// An edge listed by `node` whose target cannot be resolved.
    DanglingEdge { node: NodeId, edge: EdgeId },
    /// The configured expansion budget ran out before the search finished.
    ExpansionLimit { limit: usize },
    /// The model itself could not be assembled.
    Model(ModelError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoStartNode => {
                f.write_str("no start node: no node has outgoing edges and no incoming edges")
            }
            Self::NoGoalNode => {
                f.write_str("no goal node: no node has incoming edges and no outgoing edges")
            }
            Self::UnknownNode(n) => write!(f, "node {n} is not part of the model"),
            Self::DanglingEdge { node, edge } => {
                write!(f, "edge {edge} leaving node {node} has no target node")
            }
            Self::ExpansionLimit { limit } => {
                write!(f, "search gave up after expanding {limit} nodes")
            }
            Self::Model(e) => write!(f, "invalid model: {e}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Model(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ModelError> for SearchError {
    fn from(e: ModelError) -> Self {
        Self::Model(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowroute_core::EdgeSide;
    use std::error::Error;

    #[test]
    fn messages_name_the_culprit() {
        let e = SearchError::DanglingEdge {
            node: NodeId(2),
            edge: EdgeId(5),
        };
        assert_eq!(e.to_string(), "edge e5 leaving node n2 has no target node");
        assert_eq!(
            SearchError::UnknownNode(NodeId(9)).to_string(),
            "node n9 is not part of the model"
        );
        assert_eq!(
            SearchError::ExpansionLimit { limit: 3 }.to_string(),
            "search gave up after expanding 3 nodes"
        );
        assert!(SearchError::NoStartNode.to_string().starts_with("no start node"));
        assert!(SearchError::NoGoalNode.to_string().starts_with("no goal node"));
        assert!(e.source().is_none());
    }

    #[test]
    fn model_errors_are_chained() {
        let inner = ModelError::DanglingEdge {
            edge: EdgeId(0),
            side: EdgeSide::Target,
        };
        let e = SearchError::from(inner.clone());
        assert_eq!(e, SearchError::Model(inner.clone()));
        assert_eq!(e.to_string(), "invalid model: edge e0 has no target node");
        let source = e.source().unwrap();
        assert_eq!(source.to_string(), inner.to_string());
    }
}
