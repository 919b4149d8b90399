//! Route planning over flowroute diagram graphs.
//!
//! This crate searches a [`Model`](flowroute_core::Model) built with
//! `flowroute-core`:
//!
//! - **Endpoint inference** ([`infer_endpoints`]): the start is the source
//!   node closest to the origin, the goal the sink node farthest from it
//! - **A\*** cheapest route ([`SearchSpace::astar_route`], [`SearchSpace::plan`])
//! - **BFS** reachability order ([`SearchSpace::bfs_order`], [`SearchSpace::traverse`])
//!
//! All searches run through [`SearchSpace`], which keeps per-run costs and
//! parent links outside the model and reuses its buffers between runs.
//!
//! # Outcomes
//!
//! | Situation | Result |
//! |---|---|
//! | route found | `Ok(Some(Route))` |
//! | goal unreachable | `Ok(None)` |
//! | no start/goal candidate, unknown node, dangling edge, budget exhausted | `Err(SearchError)` |

mod astar;
mod bfs;
mod config;
mod distance;
mod endpoints;
mod error;
mod space;

pub use astar::Route;
pub use config::SearchConfig;
pub use distance::euclidean;
pub use endpoints::{
    Endpoints, find_goal, find_start, goal_candidates, infer_endpoints, start_candidates,
};
pub use error::SearchError;
pub use space::SearchSpace;
