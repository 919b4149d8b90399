//! JSON-style interchange form of a model snapshot.
//!
//! ```text
//! {"type": kind, "nodes": [
//!     {"type": kind, "outEdges": [edge..], "inEdges": [edge..],
//!      "location": [x, y], "size": [w, h]}, ..]}
//! edge = {"type": kind, "path": [[x, y], ..]}
//! ```
//!
//! Edges are written inline on both nodes they touch.

use serde::ser::{Serialize, SerializeSeq, SerializeStruct, Serializer};

use crate::edge::{Edge, EdgeId};
use crate::model::Model;
use crate::node::Node;

struct Pair(f64, f64);

impl Serialize for Pair {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.0, self.1).serialize(serializer)
    }
}

struct Polyline<'a>(&'a Edge);

impl Serialize for Polyline<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let path = self.0.path();
        let mut seq = serializer.serialize_seq(Some(path.len()))?;
        for p in path {
            seq.serialize_element(&Pair(p.x, p.y))?;
        }
        seq.end()
    }
}

impl Serialize for Edge {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Edge", 2)?;
        s.serialize_field("type", self.kind())?;
        s.serialize_field("path", &Polyline(self))?;
        s.end()
    }
}

struct EdgeList<'a> {
    model: &'a Model,
    ids: &'a [EdgeId],
}

impl Serialize for EdgeList<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.ids.len()))?;
        for &id in self.ids {
            if let Some(edge) = self.model.edge(id) {
                seq.serialize_element(edge)?;
            }
        }
        seq.end()
    }
}

struct NodeView<'a> {
    model: &'a Model,
    node: &'a Node,
}

impl Serialize for NodeView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let node = self.node;
        let loc = node.location();
        let size = node.size();
        let mut s = serializer.serialize_struct("Node", 5)?;
        s.serialize_field("type", node.kind())?;
        s.serialize_field(
            "outEdges",
            &EdgeList {
                model: self.model,
                ids: node.out_edges(),
            },
        )?;
        s.serialize_field(
            "inEdges",
            &EdgeList {
                model: self.model,
                ids: node.in_edges(),
            },
        )?;
        s.serialize_field("location", &Pair(loc.x, loc.y))?;
        s.serialize_field("size", &Pair(size.width, size.height))?;
        s.end()
    }
}

struct NodeList<'a>(&'a Model);

impl Serialize for NodeList<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let model = self.0;
        let mut seq = serializer.serialize_seq(Some(model.len()))?;
        for node in model.nodes() {
            seq.serialize_element(&NodeView { model, node })?;
        }
        seq.end()
    }
}

impl Serialize for Model {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Model", 2)?;
        s.serialize_field("type", self.kind())?;
        s.serialize_field("nodes", &NodeList(self))?;
        s.end()
    }
}
