//! Directed, polyline-shaped connectors between nodes.

use std::fmt;

use crate::geom::Point;
use crate::node::{Node, NodeId};

/// Handle of an [`Edge`] inside a [`Model`](crate::Model).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeId(pub usize);

impl EdgeId {
    /// Index into the model's edge arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// How the length of an edge path is measured.
///
/// Search heuristics are straight-line distances, which never exceed the
/// Manhattan or Euclidean length of a path between the same two points. They
/// are measured between node locations while paths run between box borders,
/// so optimality is only guaranteed when both agree on the anchor points.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeMetric {
    /// Manhattan sum for polylines; a two-point edge counts only when it is
    /// axis-aligned and measures 0 when diagonal.
    Reference,
    /// Manhattan sum over every segment, diagonal two-point edges included.
    #[default]
    Manhattan,
    /// Sum of straight segment lengths.
    Euclidean,
}

/// A typed directed connector from `source` to `target`, drawn as a polyline.
///
/// The path always holds at least two points; [`ModelBuilder`](crate::ModelBuilder)
/// and [`Model::from_parts`](crate::Model::from_parts) reject anything shorter.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    kind: String,
    path: Vec<Point>,
    pub(crate) source: NodeId,
    pub(crate) target: NodeId,
}

impl Edge {
    pub(crate) fn new(kind: String, path: Vec<Point>, source: NodeId, target: NodeId) -> Self {
        Self {
            kind,
            path,
            source,
            target,
        }
    }

    /// The edge type label.
    #[inline]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The polyline from source to target.
    #[inline]
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// Node the edge leaves from.
    #[inline]
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Node the edge points to.
    #[inline]
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Length of the path under `metric`.
    pub fn length(&self, metric: EdgeMetric) -> f64 {
        match metric {
            EdgeMetric::Reference => self.reference_length(),
            EdgeMetric::Manhattan => self
                .segments()
                .map(|(a, b)| (a.x - b.x).abs() + (a.y - b.y).abs())
                .sum(),
            EdgeMetric::Euclidean => self.segments().map(|(a, b)| (b - a).norm()).sum(),
        }
    }

    fn reference_length(&self) -> f64 {
        if self.path.len() > 2 {
            return self.length(EdgeMetric::Manhattan);
        }
        let (a, b) = (self.path[0], self.path[1]);
        if a.y == b.y {
            (b.x - a.x).abs()
        } else if a.x == b.x {
            (b.y - a.y).abs()
        } else {
            log::warn!("diagonal two-point edge {} -> {} measured as 0", a, b);
            0.0
        }
    }

    fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.path.windows(2).map(|w| (w[0], w[1]))
    }

    /// Move the first point to the right-middle of `node`'s box.
    pub(crate) fn snap_start(&mut self, node: &Node) {
        let loc = node.location();
        let size = node.size();
        self.path[0] = Point::new(loc.x + size.width, loc.y + size.height / 2.0);
    }

    /// Move the last point to the left-middle of `node`'s box.
    pub(crate) fn snap_end(&mut self, node: &Node) {
        let loc = node.location();
        let size = node.size();
        let last = self.path.len() - 1;
        self.path[last] = Point::new(loc.x, loc.y + size.height / 2.0);
    }
}
