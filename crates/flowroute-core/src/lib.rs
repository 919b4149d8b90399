//! **flowroute-core** — the diagram graph model used by *flowroute*.
//!
//! A [`Model`] is an arena of [`Node`]s (boxes placed at 2-D coordinates) and
//! [`Edge`]s (directed polylines between them). Both are addressed by copyable
//! handles, [`NodeId`] and [`EdgeId`], and every edge records its source and
//! target node so that no lookup ever scans the node set.
//!
//! With the `serde` feature, a model serializes to its JSON interchange form.

pub mod edge;
pub mod error;
pub mod geom;
#[cfg(feature = "serde")]
mod interchange;
pub mod model;
pub mod node;

pub use edge::{Edge, EdgeId, EdgeMetric};
pub use error::{EdgeSide, ModelError};
pub use geom::{Point, Size};
pub use model::{EdgeSpec, Model, ModelBuilder, NodeSpec};
pub use node::{Node, NodeId};
