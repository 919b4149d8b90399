//! Graph vertices placed on the diagram.

use std::fmt;

use crate::edge::EdgeId;
use crate::geom::{Point, Size};

/// Handle of a [`Node`] inside a [`Model`](crate::Model).
///
/// Nodes are compared by handle, never by attributes: two nodes with the same
/// kind and geometry are still distinct.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub usize);

impl NodeId {
    /// Index into the model's node arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// A diagram box with its incoming and outgoing edges.
///
/// Edge membership is fixed once the owning model is built.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    kind: String,
    location: Point,
    size: Size,
    pub(crate) out_edges: Vec<EdgeId>,
    pub(crate) in_edges: Vec<EdgeId>,
}

impl Node {
    pub(crate) fn new(kind: String, location: Point, size: Size) -> Self {
        Self {
            kind,
            location,
            size,
            out_edges: Vec::new(),
            in_edges: Vec::new(),
        }
    }

    /// The node type label.
    #[inline]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Top-left corner of the node's box.
    #[inline]
    pub fn location(&self) -> Point {
        self.location
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Edges leaving this node.
    #[inline]
    pub fn out_edges(&self) -> &[EdgeId] {
        &self.out_edges
    }

    /// Edges arriving at this node.
    #[inline]
    pub fn in_edges(&self) -> &[EdgeId] {
        &self.in_edges
    }

    /// Straight-line distance from `location` to the coordinate origin.
    #[inline]
    pub fn origo_distance(&self) -> f64 {
        self.location.norm()
    }
}
