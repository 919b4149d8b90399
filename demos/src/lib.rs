//! Sample diagrams shared by the demo binaries.
//!
//! Demonstrates: building a model, snapping edges to node borders, endpoint
//! inference, A* routing, breadth-first traversal and the JSON snapshot.

use flowroute_core::{EdgeMetric, Model, ModelBuilder, ModelError, NodeId, Point, Size};
use flowroute_paths::{Route, SearchConfig, SearchError, SearchSpace};
use clap::ValueEnum;
use rand::{RngExt, SeedableRng};

pub const BOX: Size = Size::new(80.0, 40.0);

/// An approval flowchart with a short and a long branch.
///
/// ```text
/// submit -> review -> approve ---------> archive
///             |                            ^
///             +-> escalate -> committee ---+
/// ```
pub fn approval_flow() -> Result<Model, ModelError> {
    let mut b = ModelBuilder::new("flowchart");
    let submit = b.add_node("start", Point::new(20.0, 20.0), BOX);
    let review = b.add_node("task", Point::new(160.0, 20.0), BOX);
    let approve = b.add_node("task", Point::new(300.0, 20.0), BOX);
    let escalate = b.add_node("task", Point::new(160.0, 140.0), BOX);
    let committee = b.add_node("task", Point::new(300.0, 140.0), BOX);
    let archive = b.add_node("end", Point::new(440.0, 80.0), BOX);
    b.add_node("annotation", Point::new(20.0, 200.0), BOX);

    b.connect("sequence", submit, review, straight())?;
    b.connect("sequence", review, approve, straight())?;
    b.connect("sequence", approve, archive, elbow(410.0, 40.0, 100.0))?;
    b.connect("conditional", review, escalate, elbow(260.0, 40.0, 160.0))?;
    b.connect("sequence", escalate, committee, straight())?;
    b.connect("sequence", committee, archive, elbow(410.0, 160.0, 100.0))?;

    b.snap_edges();
    Ok(b.build())
}

/// Two-point placeholder path; [`ModelBuilder::snap_edges`] moves both ends.
fn straight() -> [Point; 2] {
    [Point::ZERO, Point::ZERO]
}

/// Path with a vertical jog at `x` from `y0` to `y1`; the ends are snapped.
fn elbow(x: f64, y0: f64, y1: f64) -> [Point; 4] {
    [Point::ZERO, Point::new(x, y0), Point::new(x, y1), Point::ZERO]
}

/// A random layered diagram with `layers` columns of up to `width` nodes.
pub fn layered(seed: u64, layers: usize, width: usize) -> Result<Model, ModelError> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut b = ModelBuilder::new("layered");
    let mut columns: Vec<Vec<NodeId>> = Vec::new();

    for layer in 0..layers {
        let count = if layer == 0 || layer + 1 == layers {
            1
        } else {
            rng.random_range(1..=width)
        };
        let column = (0..count)
            .map(|row| {
                let p = Point::new(20.0 + layer as f64 * 140.0, 20.0 + row as f64 * 80.0);
                b.add_node("task", p, BOX)
            })
            .collect();
        columns.push(column);
    }

    for pair in columns.windows(2) {
        let (left, right) = (&pair[0], &pair[1]);
        for (i, &from) in left.iter().enumerate() {
            // Every node keeps at least one outgoing edge.
            let first = right[i % right.len()];
            b.connect("sequence", from, first, straight())?;
            for &to in right {
                if to != first && rng.random_range(0..100) < 35 {
                    b.connect("sequence", from, to, straight())?;
                }
            }
        }
    }

    b.snap_edges();
    Ok(b.build())
}

/// Edge metric as chosen on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Metric {
    /// Axis-aligned two-point edges only; diagonals cost nothing.
    Reference,
    #[default]
    Manhattan,
    Euclidean,
}

impl From<Metric> for EdgeMetric {
    fn from(m: Metric) -> Self {
        match m {
            Metric::Reference => EdgeMetric::Reference,
            Metric::Manhattan => EdgeMetric::Manhattan,
            Metric::Euclidean => EdgeMetric::Euclidean,
        }
    }
}

/// Plan a route and print it together with the traversal order.
pub fn report(model: &Model, metric: EdgeMetric) -> Result<Option<Route>, SearchError> {
    let mut space = SearchSpace::new(SearchConfig {
        edge_metric: metric,
        ..SearchConfig::default()
    });

    let order = space.traverse(model)?;
    println!(
        "traversal: {}",
        order.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(" ")
    );

    let route = space.plan(model)?;
    match &route {
        Some(route) => {
            let names: Vec<String> = route
                .nodes
                .iter()
                .map(|&n| describe(model, n))
                .collect();
            println!("route ({metric:?}): {}", names.join(" -> "));
            println!("cost {} over {} hops, {} expanded", route.cost, route.hops(), route.expanded);
        }
        None => println!("route ({metric:?}): no path"),
    }
    Ok(route)
}

fn describe(model: &Model, id: NodeId) -> String {
    match model.node(id) {
        Some(node) => format!("{id}:{}@{}", node.kind(), node.location()),
        None => id.to_string(),
    }
}
