//! Single-agent pathfinding over an [`Environment`](crate::env::Environment),
//! plus the agent-versus-obstacle planner.
//!
//! Every engine returns a [`SearchResult`]; running out of frontier is a
//! failed result, never an error.

mod frontier;
mod hybrid;
mod informed;
mod registry;
mod result;
mod uninformed;

pub use hybrid::{minmax_search, HybridConfig};
pub use informed::{a_star_search, greedy_best_first_search};
pub use registry::{Algorithm, SearchConfig};
pub use result::{ResultSummary, SearchResult};
pub use uninformed::{
    breadth_first_search, depth_first_search, iterative_deepening_search, uniform_cost_search,
    DEFAULT_DFS_MAX_DEPTH, DEFAULT_IDS_MAX_DEPTH,
};
