use std::fmt;

use crate::edge::EdgeId;
use crate::node::NodeId;

/// Errors raised while assembling a [`Model`](crate::Model).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A node handle that does not belong to the model.
    UnknownNode(NodeId),
    /// An edge handle that does not belong to the model.
    UnknownEdge(EdgeId),
    /// An edge path with fewer than two points.
    ShortPath { edge: EdgeId, points: usize },
    /// An edge that no node lists as outgoing or incoming.
    DanglingEdge { edge: EdgeId, side: EdgeSide },
    /// An edge listed as outgoing (or incoming) by more than one node.
    AmbiguousEdge {
        edge: EdgeId,
        side: EdgeSide,
        first: NodeId,
        second: NodeId,
    },
}

/// Which end of an edge a topology error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSide {
    Source,
    Target,
}

impl fmt::Display for EdgeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode(n) => write!(f, "unknown node {n}"),
            Self::UnknownEdge(e) => write!(f, "unknown edge {e}"),
            Self::ShortPath { edge, points } => {
                write!(f, "edge {edge} has {points} path point(s), need at least 2")
            }
            Self::DanglingEdge { edge, side } => {
                write!(f, "edge {edge} has no {side} node")
            }
            Self::AmbiguousEdge {
                edge,
                side,
                first,
                second,
            } => write!(
                f,
                "edge {edge} has more than one {side} node ({first} and {second})"
            ),
        }
    }
}

impl std::error::Error for ModelError {}
