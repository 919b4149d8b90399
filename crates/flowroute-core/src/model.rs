//! The [`Model`] arena and its two construction routes.
//!
//! [`ModelBuilder`] connects nodes edge by edge. [`Model::from_parts`] accepts
//! the node-centric form where every node lists the edges it owns, and
//! resolves each edge's endpoints from that listing.

use crate::edge::{Edge, EdgeId};
use crate::error::{EdgeSide, ModelError};
use crate::geom::{Point, Size};
use crate::node::{Node, NodeId};

/// An immutable directed graph of diagram nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    kind: String,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Model {
    /// The model type label.
    #[inline]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// All nodes, indexed by [`NodeId`].
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges, indexed by [`EdgeId`].
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0)
    }

    /// Iterate over node handles in model order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Iterate over `(handle, node)` pairs in model order.
    pub fn iter_nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Build a model from nodes that list their own edges.
    ///
    /// Each edge must appear in exactly one node's `out_edges` and exactly one
    /// node's `in_edges`. Listing the same edge twice on one node counts once.
    pub fn from_parts(
        kind: impl Into<String>,
        nodes: Vec<NodeSpec>,
        edges: Vec<EdgeSpec>,
    ) -> Result<Self, ModelError> {
        let mut sources: Vec<Option<NodeId>> = vec![None; edges.len()];
        let mut targets: Vec<Option<NodeId>> = vec![None; edges.len()];

        let mut built = Vec::with_capacity(nodes.len());
        for (i, spec) in nodes.into_iter().enumerate() {
            let id = NodeId(i);
            let mut node = Node::new(spec.kind, spec.location, spec.size);
            for e in spec.out_edges {
                if claim(&mut sources, e, id, EdgeSide::Source)? {
                    node.out_edges.push(e);
                }
            }
            for e in spec.in_edges {
                if claim(&mut targets, e, id, EdgeSide::Target)? {
                    node.in_edges.push(e);
                }
            }
            built.push(node);
        }

        let mut built_edges = Vec::with_capacity(edges.len());
        for (i, spec) in edges.into_iter().enumerate() {
            let id = EdgeId(i);
            check_path(id, &spec.path)?;
            let source = sources[i].ok_or(ModelError::DanglingEdge {
                edge: id,
                side: EdgeSide::Source,
            })?;
            let target = targets[i].ok_or(ModelError::DanglingEdge {
                edge: id,
                side: EdgeSide::Target,
            })?;
            built_edges.push(Edge::new(spec.kind, spec.path, source, target));
        }

        Ok(Self {
            kind: kind.into(),
            nodes: built,
            edges: built_edges,
        })
    }
}

/// Record `node` as the owner of `edge` on one side. Returns `false` when the
/// node already owns it.
fn claim(
    owners: &mut [Option<NodeId>],
    edge: EdgeId,
    node: NodeId,
    side: EdgeSide,
) -> Result<bool, ModelError> {
    let slot = owners
        .get_mut(edge.0)
        .ok_or(ModelError::UnknownEdge(edge))?;
    match *slot {
        None => {
            *slot = Some(node);
            Ok(true)
        }
        Some(owner) if owner == node => Ok(false),
        Some(owner) => Err(ModelError::AmbiguousEdge {
            edge,
            side,
            first: owner,
            second: node,
        }),
    }
}

fn check_path(edge: EdgeId, path: &[Point]) -> Result<(), ModelError> {
    if path.len() < 2 {
        return Err(ModelError::ShortPath {
            edge,
            points: path.len(),
        });
    }
    Ok(())
}

/// Node description for [`Model::from_parts`].
#[derive(Clone, Debug, PartialEq)]
pub struct NodeSpec {
    pub kind: String,
    pub location: Point,
    pub size: Size,
    pub out_edges: Vec<EdgeId>,
    pub in_edges: Vec<EdgeId>,
}

/// Edge description for [`Model::from_parts`].
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeSpec {
    pub kind: String,
    pub path: Vec<Point>,
}

// ---------------------------------------------------------------------------
// ModelBuilder
// ---------------------------------------------------------------------------

/// Incremental construction of a [`Model`].
#[derive(Clone, Debug)]
pub struct ModelBuilder {
    kind: String,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl ModelBuilder {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Add a node and return its handle.
    pub fn add_node(&mut self, kind: impl Into<String>, location: Point, size: Size) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind.into(), location, size));
        id
    }

    /// Add a directed edge `from -> to` drawn along `path`.
    pub fn connect(
        &mut self,
        kind: impl Into<String>,
        from: NodeId,
        to: NodeId,
        path: impl IntoIterator<Item = Point>,
    ) -> Result<EdgeId, ModelError> {
        for n in [from, to] {
            if n.0 >= self.nodes.len() {
                return Err(ModelError::UnknownNode(n));
            }
        }
        let id = EdgeId(self.edges.len());
        let path: Vec<Point> = path.into_iter().collect();
        check_path(id, &path)?;

        self.edges.push(Edge::new(kind.into(), path, from, to));
        self.nodes[from.0].out_edges.push(id);
        self.nodes[to.0].in_edges.push(id);
        Ok(id)
    }

    /// Align every edge with the boxes it connects: the first point moves to
    /// the right-middle of the source, the last to the left-middle of the
    /// target.
    pub fn snap_edges(&mut self) -> &mut Self {
        for edge in &mut self.edges {
            edge.snap_start(&self.nodes[edge.source.0]);
            edge.snap_end(&self.nodes[edge.target.0]);
        }
        self
    }

    pub fn build(self) -> Model {
        log::debug!(
            "built model {:?}: {} nodes, {} edges",
            self.kind,
            self.nodes.len(),
            self.edges.len()
        );
        Model {
            kind: self.kind,
            nodes: self.nodes,
            edges: self.edges,
        }
    }
}
