use flowroute_core::{EdgeId, Model, NodeId};

use crate::SearchSpace;
use crate::distance::euclidean;
use crate::endpoints::infer_endpoints;
use crate::error::SearchError;
use crate::space::edge_target;

/// A start-to-goal route found by A*.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Nodes from start to goal, both included.
    pub nodes: Vec<NodeId>,
    /// `edges[i]` leads from `nodes[i]` to `nodes[i + 1]`.
    pub edges: Vec<EdgeId>,
    /// Sum of the traversed edge lengths.
    pub cost: f64,
    /// Number of nodes expanded to find the route.
    pub expanded: usize,
}

impl Route {
    #[inline]
    pub fn start(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    #[inline]
    pub fn goal(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// Number of edges traversed.
    #[inline]
    pub fn hops(&self) -> usize {
        self.edges.len()
    }
}

impl SearchSpace {
    /// Compute the cheapest route from `start` to `goal` using A*.
    ///
    /// Step costs are edge lengths under the configured
    /// [`EdgeMetric`](flowroute_core::EdgeMetric); the heuristic is the
    /// straight-line distance between node locations.
    ///
    /// Returns `Ok(None)` when the goal cannot be reached from the start.
    pub fn astar_route(
        &mut self,
        model: &Model,
        start: NodeId,
        goal: NodeId,
    ) -> Result<Option<Route>, SearchError> {
        for n in [start, goal] {
            if !model.contains(n) {
                return Err(SearchError::UnknownNode(n));
            }
        }

        self.begin_search(model);
        let metric = self.config.edge_metric;
        let limit = self.config.max_expansions;
        let goal_at = model.nodes()[goal.index()].location();

        {
            let rec = self.record_mut(start);
            rec.g = 0.0;
            rec.h = 0.0;
            rec.f = 0.0;
            rec.open = true;
        }
        let seq = self.push_open(start, 0.0);
        self.record_mut(start).seq = seq;

        log::debug!("A* from {start} to {goal} over {} nodes", model.len());

        let mut expanded = 0usize;
        while let Some(entry) = self.open.pop() {
            let ci = entry.node;
            let current_g = {
                let rec = self.record_mut(ci);
                // Skip entries superseded by a cheaper reinsertion.
                if !rec.open || rec.seq != entry.seq {
                    continue;
                }
                rec.open = false;
                rec.closed = true;
                rec.g
            };

            if ci == goal {
                let route = self.reconstruct(goal, expanded);
                log::debug!(
                    "A* reached {goal}: cost {}, {} hops, {} expanded",
                    route.cost,
                    route.hops(),
                    route.expanded
                );
                return Ok(Some(route));
            }

            if let Some(limit) = limit {
                if expanded >= limit {
                    log::debug!("A* stopped at the expansion limit ({limit})");
                    return Err(SearchError::ExpansionLimit { limit });
                }
            }
            expanded += 1;
            log::trace!("expand {ci} (g = {current_g}, f = {})", entry.f);

            let node = &model.nodes()[ci.index()];
            for &eid in node.out_edges() {
                let ni = edge_target(model, ci, eid)?;
                let length = model.edges()[eid.index()].length(metric);
                let tentative_g = current_g + length;

                let n = self.record_mut(ni);
                if (n.closed || n.open) && n.g <= tentative_g {
                    continue;
                }

                let h = euclidean(model.nodes()[ni.index()].location(), goal_at);
                n.g = tentative_g;
                n.h = h;
                n.f = tentative_g + h;
                n.parent = Some(ci);
                n.parent_edge = Some(eid);
                n.parent_edge_length = length;
                n.open = true;
                n.closed = false;
                let f = n.f;

                let seq = self.push_open(ni, f);
                self.record_mut(ni).seq = seq;
            }
        }

        log::debug!("A* found no path from {start} to {goal} ({expanded} expanded)");
        Ok(None)
    }

    /// Infer the endpoints of `model` and route between them.
    pub fn plan(&mut self, model: &Model) -> Result<Option<Route>, SearchError> {
        let ends = infer_endpoints(model)?;
        self.astar_route(model, ends.start, ends.goal)
    }

    fn reconstruct(&self, goal: NodeId, expanded: usize) -> Route {
        let cost = self.records[goal.index()].g;
        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        let mut current = Some(goal);
        while let Some(ci) = current {
            nodes.push(ci);
            let rec = &self.records[ci.index()];
            if let Some(e) = rec.parent_edge {
                edges.push(e);
            }
            current = rec.parent;
        }
        nodes.reverse();
        edges.reverse();
        Route {
            nodes,
            edges,
            cost,
            expanded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SearchConfig;
    use flowroute_core::{EdgeMetric, ModelBuilder, Point, Size};
    use rand::{RngExt, SeedableRng};

    const BOX: Size = Size::new(2.0, 2.0);

    fn at(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn link(b: &mut ModelBuilder, from: NodeId, to: NodeId, path: &[Point]) -> EdgeId {
        b.connect("seq", from, to, path.iter().copied()).unwrap()
    }

    fn check_route(model: &Model, route: &Route, metric: EdgeMetric) {
        assert_eq!(route.nodes.len(), route.edges.len() + 1);
        let mut sum = 0.0;
        for (i, &e) in route.edges.iter().enumerate() {
            let edge = model.edge(e).unwrap();
            assert_eq!(edge.source(), route.nodes[i]);
            assert_eq!(edge.target(), route.nodes[i + 1]);
            assert!(model.node(route.nodes[i]).unwrap().out_edges().contains(&e));
            sum += edge.length(metric);
        }
        assert!((sum - route.cost).abs() < 1e-9);
    }

    /// Diamond: s -> a -> g is short, s -> l -> g is long.
    fn diamond() -> (Model, [NodeId; 4]) {
        let mut b = ModelBuilder::new("flow");
        let s = b.add_node("start", at(0.0, 10.0), BOX);
        let a = b.add_node("task", at(10.0, 10.0), BOX);
        let l = b.add_node("task", at(10.0, 30.0), BOX);
        let g = b.add_node("end", at(20.0, 10.0), BOX);
        link(&mut b, s, a, &[at(2.0, 11.0), at(10.0, 11.0)]);
        link(&mut b, a, g, &[at(12.0, 11.0), at(20.0, 11.0)]);
        link(&mut b, s, l, &[at(2.0, 11.0), at(5.0, 11.0), at(5.0, 31.0), at(10.0, 31.0)]);
        link(&mut b, l, g, &[at(12.0, 31.0), at(15.0, 31.0), at(15.0, 11.0), at(20.0, 11.0)]);
        (b.build(), [s, a, l, g])
    }

    #[test]
    fn shortest_branch_wins() {
        let (m, [s, a, _, g]) = diamond();
        let mut space = SearchSpace::default();
        let route = space.astar_route(&m, s, g).unwrap().unwrap();
        assert_eq!(route.nodes, vec![s, a, g]);
        assert_eq!(route.cost, 16.0);
        assert_eq!(route.start(), Some(s));
        assert_eq!(route.goal(), Some(g));
        assert_eq!(route.hops(), 2);
        check_route(&m, &route, EdgeMetric::Manhattan);
        assert_eq!(space.g_cost(g), Some(16.0));
        assert_eq!(space.parent(g), Some(a));
        assert_eq!(space.parent(s), None);
        assert_eq!(space.parent_edge(a), Some(route.edges[0]));
        assert_eq!(space.parent_edge_length(a), Some(8.0));
        assert_eq!(space.parent_edge_length(s), None);
        assert_eq!(space.h_cost(g), Some(0.0));
        assert_eq!(space.f_cost(g), Some(16.0));
    }

    #[test]
    fn plan_infers_endpoints() {
        let (m, [s, a, _, g]) = diamond();
        let route = SearchSpace::default().plan(&m).unwrap().unwrap();
        assert_eq!(route.nodes, vec![s, a, g]);
    }

    #[test]
    fn repeated_runs_agree() {
        let (m, _) = diamond();
        let mut space = SearchSpace::default();
        let first = space.plan(&m).unwrap();
        let second = space.plan(&m).unwrap();
        assert_eq!(first, second);
        let fresh = SearchSpace::default().plan(&m).unwrap();
        assert_eq!(first, fresh);
    }

    #[test]
    fn unreachable_goal_is_no_path() {
        let mut b = ModelBuilder::new("flow");
        let s = b.add_node("start", at(0.0, 0.0), BOX);
        let a = b.add_node("task", at(10.0, 0.0), BOX);
        let x = b.add_node("task", at(0.0, 20.0), BOX);
        let g = b.add_node("end", at(20.0, 20.0), BOX);
        link(&mut b, s, a, &[at(2.0, 1.0), at(10.0, 1.0)]);
        link(&mut b, x, g, &[at(2.0, 21.0), at(20.0, 21.0)]);
        let m = b.build();

        let mut space = SearchSpace::default();
        assert_eq!(space.astar_route(&m, s, g), Ok(None));
        assert_eq!(space.g_cost(g), None);
        // Reverse direction is not a path either.
        assert_eq!(space.astar_route(&m, a, s), Ok(None));
    }

    #[test]
    fn start_equals_goal() {
        let (m, [s, ..]) = diamond();
        let route = SearchSpace::default().astar_route(&m, s, s).unwrap().unwrap();
        assert_eq!(route.nodes, vec![s]);
        assert!(route.edges.is_empty());
        assert_eq!(route.cost, 0.0);
    }

    #[test]
    fn empty_route_has_no_ends() {
        let route = Route {
            nodes: Vec::new(),
            edges: Vec::new(),
            cost: 0.0,
            expanded: 0,
        };
        assert_eq!(route.start(), None);
        assert_eq!(route.goal(), None);
        assert_eq!(route.hops(), 0);
    }

    #[test]
    fn wide_goal_box_does_not_inflate_estimates() {
        let mut b = ModelBuilder::new("flow");
        let s = b.add_node("start", at(0.0, 0.0), BOX);
        let a = b.add_node("task", at(10.0, 0.0), BOX);
        let g = b.add_node("end", at(20.0, 0.0), Size::new(200.0, 2.0));
        link(&mut b, s, a, &[at(2.0, 1.0), at(10.0, 1.0)]);
        link(&mut b, a, g, &[at(12.0, 1.0), at(20.0, 1.0)]);
        // Detour into the goal's left border.
        link(&mut b, s, g, &[at(2.0, 1.0), at(2.0, 50.0), at(20.0, 50.0), at(20.0, 1.0)]);
        let m = b.build();

        let mut space = SearchSpace::default();
        let route = space.astar_route(&m, s, g).unwrap().unwrap();
        assert_eq!(route.nodes, vec![s, a, g]);
        assert_eq!(route.cost, 16.0);
        assert_eq!(space.h_cost(a), Some(10.0));
    }

    #[test]
    fn unknown_endpoint_is_an_error() {
        let (m, [s, ..]) = diamond();
        let mut space = SearchSpace::default();
        assert_eq!(
            space.astar_route(&m, s, NodeId(99)),
            Err(SearchError::UnknownNode(NodeId(99)))
        );
        assert_eq!(
            space.astar_route(&m, NodeId(42), s),
            Err(SearchError::UnknownNode(NodeId(42)))
        );
    }

    #[test]
    fn cheapest_parallel_edge_is_used() {
        let mut b = ModelBuilder::new("flow");
        let s = b.add_node("start", at(0.0, 0.0), BOX);
        let g = b.add_node("end", at(10.0, 0.0), BOX);
        link(&mut b, s, g, &[at(2.0, 1.0), at(2.0, 9.0), at(10.0, 9.0), at(10.0, 1.0)]);
        let direct = link(&mut b, s, g, &[at(2.0, 1.0), at(10.0, 1.0)]);
        link(&mut b, s, g, &[at(2.0, 1.0), at(6.0, 1.0), at(6.0, 5.0), at(10.0, 5.0), at(10.0, 1.0)]);
        let m = b.build();

        let route = SearchSpace::default().astar_route(&m, s, g).unwrap().unwrap();
        assert_eq!(route.edges, vec![direct]);
        assert_eq!(route.cost, 8.0);
    }

    #[test]
    fn cycles_do_not_trap_the_search() {
        let mut b = ModelBuilder::new("flow");
        let s = b.add_node("start", at(0.0, 0.0), BOX);
        let a = b.add_node("task", at(10.0, 0.0), BOX);
        let c = b.add_node("task", at(10.0, 10.0), BOX);
        let g = b.add_node("end", at(30.0, 0.0), BOX);
        link(&mut b, s, a, &[at(2.0, 1.0), at(10.0, 1.0)]);
        link(&mut b, a, c, &[at(11.0, 2.0), at(11.0, 10.0)]);
        link(&mut b, c, a, &[at(10.0, 11.0), at(9.0, 11.0), at(9.0, 1.0), at(10.0, 1.0)]);
        link(&mut b, c, g, &[at(12.0, 11.0), at(30.0, 11.0), at(30.0, 1.0)]);
        let m = b.build();

        let route = SearchSpace::default().plan(&m).unwrap().unwrap();
        assert_eq!(route.nodes, vec![s, a, c, g]);
        check_route(&m, &route, EdgeMetric::Manhattan);
    }

    #[test]
    fn expansion_limit_aborts() {
        let (m, [s, _, _, g]) = diamond();
        let mut space = SearchSpace::new(SearchConfig {
            max_expansions: Some(1),
            ..SearchConfig::default()
        });
        assert_eq!(
            space.astar_route(&m, s, g),
            Err(SearchError::ExpansionLimit { limit: 1 })
        );

        space.set_config(SearchConfig {
            max_expansions: Some(10),
            ..SearchConfig::default()
        });
        assert!(space.astar_route(&m, s, g).unwrap().is_some());
    }

    #[test]
    fn reference_metric_keeps_free_diagonals() {
        let mut b = ModelBuilder::new("flow");
        let s = b.add_node("start", at(0.0, 0.0), BOX);
        let a = b.add_node("task", at(10.0, 10.0), BOX);
        let g = b.add_node("end", at(20.0, 0.0), BOX);
        let diag = link(&mut b, s, a, &[at(2.0, 2.0), at(10.0, 10.0)]);
        link(&mut b, a, g, &[at(12.0, 11.0), at(20.0, 11.0)]);
        link(&mut b, s, g, &[at(2.0, 1.0), at(20.0, 1.0)]);
        let m = b.build();

        let mut space = SearchSpace::new(SearchConfig {
            edge_metric: EdgeMetric::Reference,
            ..SearchConfig::default()
        });
        let route = space.astar_route(&m, s, g).unwrap().unwrap();
        assert_eq!(route.edges[0], diag);
        assert_eq!(route.cost, 8.0);

        space.set_config(SearchConfig::default());
        let route = space.astar_route(&m, s, g).unwrap().unwrap();
        assert_eq!(route.nodes, vec![s, g]);
        assert_eq!(route.cost, 18.0);
    }

    fn exhaustive_best(model: &Model, metric: EdgeMetric, start: NodeId, goal: NodeId) -> Option<f64> {
        fn walk(
            model: &Model,
            metric: EdgeMetric,
            at: NodeId,
            goal: NodeId,
            cost: f64,
            on_path: &mut Vec<bool>,
            best: &mut Option<f64>,
        ) {
            if at == goal {
                if best.is_none_or(|b| cost < b) {
                    *best = Some(cost);
                }
                return;
            }
            on_path[at.index()] = true;
            for &e in model.node(at).unwrap().out_edges() {
                let edge = model.edge(e).unwrap();
                let next = edge.target();
                if !on_path[next.index()] {
                    walk(model, metric, next, goal, cost + edge.length(metric), on_path, best);
                }
            }
            on_path[at.index()] = false;
        }

        let mut best = None;
        let mut on_path = vec![false; model.len()];
        walk(model, metric, start, goal, 0.0, &mut on_path, &mut best);
        best
    }

    #[test]
    fn matches_exhaustive_search_on_small_graphs() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let mut space = SearchSpace::default();
        let mut found = 0;

        for round in 0..200 {
            let n = rng.random_range(2..=10usize);
            let mut b = ModelBuilder::new("random");
            let ids: Vec<NodeId> = (0..n)
                .map(|_| {
                    let p = at(
                        rng.random_range(0..50) as f64,
                        rng.random_range(0..50) as f64,
                    );
                    b.add_node("task", p, BOX)
                })
                .collect();
            // Edges run between node locations so the heuristic stays consistent.
            let snapshot = b.clone().build();
            for &from in &ids {
                for &to in &ids {
                    if from != to && rng.random_range(0..100) < 30 {
                        let a = snapshot.node(from).unwrap().location();
                        let c = snapshot.node(to).unwrap().location();
                        // Route some edges through an elbow.
                        if rng.random_range(0..2) == 0 {
                            b.connect("seq", from, to, vec![a, c]).unwrap();
                        } else {
                            b.connect("seq", from, to, vec![a, at(c.x, a.y), c]).unwrap();
                        }
                    }
                }
            }
            let m = b.build();
            let (start, goal) = (ids[0], ids[n - 1]);

            for metric in [EdgeMetric::Manhattan, EdgeMetric::Euclidean] {
                space.set_config(SearchConfig {
                    edge_metric: metric,
                    ..SearchConfig::default()
                });
                let route = space.astar_route(&m, start, goal).unwrap();
                let best = exhaustive_best(&m, metric, start, goal);
                match (route, best) {
                    (Some(route), Some(best)) => {
                        assert!(
                            (route.cost - best).abs() < 1e-6,
                            "round {round}: A* cost {} vs exhaustive {best}",
                            route.cost
                        );
                        assert_eq!(route.start(), Some(start));
                        assert_eq!(route.goal(), Some(goal));
                        check_route(&m, &route, metric);
                        found += 1;
                    }
                    (None, None) => {}
                    (route, best) => panic!("round {round}: A* {route:?} vs exhaustive {best:?}"),
                }
            }
        }
        assert!(found > 0);
    }
}
