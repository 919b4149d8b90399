use flowroute_core::EdgeMetric;

/// Settings shared by every run of a [`SearchSpace`](crate::SearchSpace).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// How edge paths are measured into step costs.
    pub edge_metric: EdgeMetric,
    /// Upper bound on A* expansions per run. `None` searches until the open
    /// list is exhausted.
    pub max_expansions: Option<usize>,
}
