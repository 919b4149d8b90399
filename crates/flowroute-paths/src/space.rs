use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use flowroute_core::{EdgeId, Model, NodeId};

use crate::config::SearchConfig;
use crate::error::SearchError;

// ---------------------------------------------------------------------------
// Per-run scratch record
// ---------------------------------------------------------------------------

/// Cost accounting for one node during one A* run.
#[derive(Clone, Debug)]
pub(crate) struct Record {
    pub(crate) g: f64,
    pub(crate) h: f64,
    pub(crate) f: f64,
    pub(crate) parent: Option<NodeId>,
    pub(crate) parent_edge: Option<EdgeId>,
    pub(crate) parent_edge_length: f64,
    pub(crate) generation: u32,
    /// Sequence number of the live open-list entry.
    pub(crate) seq: u64,
    pub(crate) open: bool,
    pub(crate) closed: bool,
}

impl Default for Record {
    fn default() -> Self {
        Self {
            g: f64::INFINITY,
            h: 0.0,
            f: f64::INFINITY,
            parent: None,
            parent_edge: None,
            parent_edge_length: 0.0,
            generation: 0,
            seq: 0,
            open: false,
            closed: false,
        }
    }
}

/// Open-list entry, ordered by `f` then by insertion sequence.
#[derive(Clone, Copy, Debug)]
pub(crate) struct OpenEntry {
    pub(crate) node: NodeId,
    pub(crate) f: f64,
    pub(crate) seq: u64,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f, then oldest entry.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// SearchSpace
// ---------------------------------------------------------------------------

/// Owner of all per-run search state.
///
/// The model stays immutable: costs, parent links and visited flags live in
/// arrays indexed by [`NodeId`] and are invalidated lazily with generation
/// counters, so a `SearchSpace` can be reused across runs and models without
/// resets, and several spaces can search the same model at once.
#[derive(Debug, Default)]
pub struct SearchSpace {
    pub(crate) config: SearchConfig,
    // A* caches
    pub(crate) records: Vec<Record>,
    pub(crate) generation: u32,
    pub(crate) open: BinaryHeap<OpenEntry>,
    pub(crate) next_seq: u64,
    // BFS caches
    pub(crate) seen: Vec<u32>,
    pub(crate) seen_generation: u32,
    pub(crate) queue: VecDeque<NodeId>,
}

impl SearchSpace {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
    }

    /// Prepare the A* caches for a run over `model`.
    pub(crate) fn begin_search(&mut self, model: &Model) {
        if self.records.len() < model.len() {
            self.records.resize(model.len(), Record::default());
        }
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: old generation tags could collide.
            self.records.fill(Record::default());
            self.generation = 1;
        }
        self.open.clear();
        self.next_seq = 0;
    }

    /// Prepare the traversal caches for a run over `model`.
    pub(crate) fn begin_traversal(&mut self, model: &Model) {
        if self.seen.len() < model.len() {
            self.seen.resize(model.len(), 0);
        }
        self.seen_generation = self.seen_generation.wrapping_add(1);
        if self.seen_generation == 0 {
            self.seen.fill(0);
            self.seen_generation = 1;
        }
        self.queue.clear();
    }

    /// The record of `node` for the current run, fresh if untouched.
    pub(crate) fn record_mut(&mut self, node: NodeId) -> &mut Record {
        let generation = self.generation;
        let rec = &mut self.records[node.index()];
        if rec.generation != generation {
            *rec = Record {
                generation,
                ..Record::default()
            };
        }
        rec
    }

    /// The record of `node` if the last A* run touched it.
    pub(crate) fn record(&self, node: NodeId) -> Option<&Record> {
        self.records
            .get(node.index())
            .filter(|r| r.generation == self.generation && self.generation != 0)
    }

    pub(crate) fn push_open(&mut self, node: NodeId, f: f64) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.open.push(OpenEntry { node, f, seq });
        seq
    }

    /// Accumulated cost from the start of the last A* run, if `node` was
    /// reached.
    pub fn g_cost(&self, node: NodeId) -> Option<f64> {
        self.record(node).map(|r| r.g)
    }

    /// Heuristic estimate from `node` to the goal of the last A* run.
    pub fn h_cost(&self, node: NodeId) -> Option<f64> {
        self.record(node).map(|r| r.h)
    }

    /// Total estimated cost `g + h` recorded for `node` in the last A* run.
    pub fn f_cost(&self, node: NodeId) -> Option<f64> {
        self.record(node).map(|r| r.f)
    }

    /// Node `node` was reached from in the last A* run.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.record(node).and_then(|r| r.parent)
    }

    /// Edge `node` was reached through in the last A* run.
    pub fn parent_edge(&self, node: NodeId) -> Option<EdgeId> {
        self.record(node).and_then(|r| r.parent_edge)
    }

    /// Length of [`parent_edge`](Self::parent_edge) under the configured metric.
    pub fn parent_edge_length(&self, node: NodeId) -> Option<f64> {
        self.record(node)
            .filter(|r| r.parent_edge.is_some())
            .map(|r| r.parent_edge_length)
    }
}

/// Resolve the node `edge` points to, checking that `from` really owns it.
pub(crate) fn edge_target(model: &Model, from: NodeId, edge: EdgeId) -> Result<NodeId, SearchError> {
    let dangling = SearchError::DanglingEdge { node: from, edge };
    let e = model.edge(edge).ok_or_else(|| dangling.clone())?;
    if e.source() != from || !model.contains(e.target()) {
        return Err(dangling);
    }
    Ok(e.target())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowroute_core::{ModelBuilder, Point, Size};

    fn model(n: usize) -> Model {
        let mut b = ModelBuilder::new("flow");
        for i in 0..n {
            b.add_node("task", Point::new(i as f64, 0.0), Size::new(1.0, 1.0));
        }
        b.build()
    }

    #[test]
    fn open_entries_pop_by_f_then_insertion() {
        let mut heap = BinaryHeap::new();
        heap.push(OpenEntry { node: NodeId(0), f: 3.0, seq: 0 });
        heap.push(OpenEntry { node: NodeId(1), f: 1.0, seq: 1 });
        heap.push(OpenEntry { node: NodeId(2), f: 1.0, seq: 2 });
        heap.push(OpenEntry { node: NodeId(3), f: 2.0, seq: 3 });
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop())
            .map(|e| e.node.index())
            .collect();
        assert_eq!(order, vec![1, 2, 3, 0]);
    }

    #[test]
    fn caches_grow_with_model() {
        let mut space = SearchSpace::default();
        space.begin_search(&model(3));
        assert_eq!(space.records.len(), 3);
        space.begin_search(&model(10));
        assert_eq!(space.records.len(), 10);
        // Smaller models keep the capacity.
        space.begin_search(&model(2));
        assert_eq!(space.records.len(), 10);
    }

    #[test]
    fn new_generation_hides_old_records() {
        let m = model(2);
        let mut space = SearchSpace::default();
        space.begin_search(&m);
        space.record_mut(NodeId(1)).g = 4.0;
        assert_eq!(space.g_cost(NodeId(1)), Some(4.0));

        space.begin_search(&m);
        assert_eq!(space.g_cost(NodeId(1)), None);
        assert_eq!(space.record_mut(NodeId(1)).g, f64::INFINITY);
    }

    #[test]
    fn generation_wrap_resets_records() {
        let m = model(1);
        let mut space = SearchSpace::default();
        space.begin_search(&m);
        space.record_mut(NodeId(0)).g = 1.0;
        space.generation = u32::MAX;
        space.begin_search(&m);
        assert_eq!(space.generation, 1);
        assert_eq!(space.g_cost(NodeId(0)), None);
    }

    #[test]
    fn edge_target_checks_ownership() {
        let mut b = ModelBuilder::new("flow");
        let a = b.add_node("a", Point::ZERO, Size::new(1.0, 1.0));
        let c = b.add_node("c", Point::new(5.0, 0.0), Size::new(1.0, 1.0));
        let e = b
            .connect("seq", a, c, vec![Point::ZERO, Point::new(5.0, 0.0)])
            .unwrap();
        let m = b.build();
        assert_eq!(edge_target(&m, a, e), Ok(c));
        assert_eq!(
            edge_target(&m, c, e),
            Err(SearchError::DanglingEdge { node: c, edge: e })
        );
        assert_eq!(
            edge_target(&m, a, EdgeId(9)),
            Err(SearchError::DanglingEdge {
                node: a,
                edge: EdgeId(9)
            })
        );
    }
}
