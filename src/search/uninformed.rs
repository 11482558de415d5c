//! Breadth-first, depth-first, uniform-cost and iterative-deepening search.

use std::collections::{HashSet, VecDeque};
use std::mem::size_of;

use tracing::debug;

use crate::env::Environment;

use super::frontier::{best_first, Arena};
use super::result::{Meter, SearchResult, Solution};

/// Default depth cutoff for [`depth_first_search`].
pub const DEFAULT_DFS_MAX_DEPTH: usize = 10_000;
/// Default deepest limit tried by [`iterative_deepening_search`].
pub const DEFAULT_IDS_MAX_DEPTH: usize = 1_000;

/// FIFO search, states marked visited when enqueued.
///
/// Returns the path with the fewest steps, which is the cheapest path only
/// when every step costs the same.
pub fn breadth_first_search<E: Environment>(env: &E) -> SearchResult<E::State, E::Action> {
    let mut meter = Meter::start("bfs");
    let mut arena = Arena::new();
    let initial = env.initial_state();
    let mut visited = HashSet::from([initial.clone()]);
    let mut queue = VecDeque::from([arena.root(initial)]);
    meter.generated = 1;

    while let Some(idx) = queue.pop_front() {
        meter.expanded += 1;
        let node = arena.node(idx);
        if env.is_goal_state(&node.state) {
            let solution = arena.solution(idx);
            return meter.finish(Some(solution), visited);
        }

        for (next, action, step_cost) in env.successors(&node.state) {
            if visited.insert(next.clone()) {
                meter.generated += 1;
                queue.push_back(arena.child(idx, next, action, step_cost));
            }
        }
        meter.observe(
            arena.bytes() + queue.len() * size_of::<usize>() + visited.len() * size_of::<E::State>(),
        );
    }

    meter.finish(None, visited)
}

/// LIFO search with a depth cutoff, states marked visited when pushed.
///
/// Successors are pushed in enumeration order, so the last one is explored
/// first.
pub fn depth_first_search<E: Environment>(
    env: &E,
    max_depth: usize,
) -> SearchResult<E::State, E::Action> {
    let mut meter = Meter::start("dfs");
    let mut arena = Arena::new();
    let initial = env.initial_state();
    let mut visited = HashSet::from([initial.clone()]);
    let mut stack = vec![arena.root(initial)];
    meter.generated = 1;

    while let Some(idx) = stack.pop() {
        meter.expanded += 1;
        let node = arena.node(idx);
        if env.is_goal_state(&node.state) {
            let solution = arena.solution(idx);
            return meter.finish(Some(solution), visited);
        }

        if node.depth < max_depth {
            for (next, action, step_cost) in env.successors(&node.state) {
                if visited.insert(next.clone()) {
                    meter.generated += 1;
                    stack.push(arena.child(idx, next, action, step_cost));
                }
            }
        }
        meter.observe(
            arena.bytes() + stack.len() * size_of::<usize>() + visited.len() * size_of::<E::State>(),
        );
    }

    meter.finish(None, visited)
}

/// Cheapest-first search; ties pop in generation order.
///
/// States are marked visited when popped, and stale duplicates are skipped,
/// which keeps the result optimal for any non-negative step costs.
pub fn uniform_cost_search<E: Environment>(env: &E) -> SearchResult<E::State, E::Action> {
    best_first(env, "ucs", |g, _| g)
}

enum Pass<S, A> {
    Found(Solution<S, A>),
    /// Some state at the limit still had unexplored successors.
    CutOff,
    /// The whole reachable space was explored without hitting the limit.
    Exhausted,
}

/// Depth-limited DFS with limits `0, 1, ..., max_depth`.
///
/// Counters accumulate over every pass. Each pass keeps its own visited set;
/// `visited_states` of the result is the union over all passes.
///
/// A pass marks states when they are generated, so a state first reached by
/// a long route is not revisited by a shorter one and the returned path can
/// be longer than the shallowest solution.
pub fn iterative_deepening_search<E: Environment>(
    env: &E,
    max_depth: usize,
) -> SearchResult<E::State, E::Action> {
    let mut meter = Meter::start("ids");
    let mut all_visited = HashSet::new();

    for limit in 0..=max_depth {
        match depth_limited_search(env, limit, &mut meter, &mut all_visited) {
            Pass::Found(solution) => return meter.finish(Some(solution), all_visited),
            Pass::CutOff => {
                debug!(limit, expanded = meter.expanded, "ids pass cut off, deepening");
            }
            Pass::Exhausted => {
                debug!(limit, "ids pass exhausted the reachable states");
                break;
            }
        }
    }

    meter.finish(None, all_visited)
}

fn depth_limited_search<E: Environment>(
    env: &E,
    limit: usize,
    meter: &mut Meter,
    all_visited: &mut HashSet<E::State>,
) -> Pass<E::State, E::Action> {
    let mut arena = Arena::new();
    let initial = env.initial_state();
    let mut visited = HashSet::from([initial.clone()]);
    let mut stack = vec![arena.root(initial)];
    meter.generated += 1;
    let mut cut_off = false;

    while let Some(idx) = stack.pop() {
        meter.expanded += 1;
        let node = arena.node(idx);
        all_visited.insert(node.state.clone());
        if env.is_goal_state(&node.state) {
            return Pass::Found(arena.solution(idx));
        }

        let depth = node.depth;
        let successors = env.successors(&node.state);
        if depth < limit {
            for (next, action, step_cost) in successors {
                if visited.insert(next.clone()) {
                    meter.generated += 1;
                    stack.push(arena.child(idx, next, action, step_cost));
                }
            }
        } else if successors.iter().any(|(next, _, _)| !visited.contains(next)) {
            cut_off = true;
        }
        meter.observe(
            arena.bytes() + stack.len() * size_of::<usize>() + visited.len() * size_of::<E::State>(),
        );
    }

    if cut_off {
        Pass::CutOff
    } else {
        Pass::Exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Weighted directed graph over integer nodes.
    struct Graph {
        edges: Vec<Vec<(u32, f64)>>,
        start: u32,
        goal: u32,
    }

    impl Environment for Graph {
        type State = u32;
        type Action = u32;

        fn initial_state(&self) -> u32 {
            self.start
        }

        fn is_goal_state(&self, state: &u32) -> bool {
            *state == self.goal
        }

        fn successors(&self, state: &u32) -> Vec<(u32, u32, f64)> {
            self.edges[*state as usize]
                .iter()
                .map(|&(to, cost)| (to, to, cost))
                .collect()
        }
    }

    /// 0 -> 1 -> 3 costs 10; 0 -> 2 -> 4 -> 3 costs 3.
    fn weighted() -> Graph {
        Graph {
            edges: vec![
                vec![(1, 1.0), (2, 1.0)],
                vec![(3, 9.0)],
                vec![(4, 1.0)],
                vec![],
                vec![(3, 1.0)],
            ],
            start: 0,
            goal: 3,
        }
    }

    #[test]
    fn bfs_finds_fewest_steps_not_cheapest() {
        let result = breadth_first_search(&weighted());
        assert!(result.success());
        assert_eq!(result.path(), &[0, 1, 3]);
        assert_eq!(result.path_cost(), 10.0);
    }

    #[test]
    fn ucs_finds_cheapest_path() {
        let result = uniform_cost_search(&weighted());
        assert!(result.success());
        assert_eq!(result.path(), &[0, 2, 4, 3]);
        assert_eq!(result.actions(), &[2, 4, 3]);
        assert_eq!(result.path_cost(), 3.0);
    }

    #[test]
    fn dfs_explores_last_successor_first() {
        let result = depth_first_search(&weighted(), DEFAULT_DFS_MAX_DEPTH);
        assert!(result.success());
        assert_eq!(result.path(), &[0, 2, 4, 3]);
        // 0, 2, 4, 3; node 1 is generated but never popped.
        assert_eq!(result.nodes_expanded(), 4);
        assert_eq!(result.nodes_generated(), 5);
    }

    #[test]
    fn dfs_respects_depth_cutoff() {
        let result = depth_first_search(&weighted(), 1);
        assert!(!result.success());
        assert_eq!(result.nodes_expanded(), 3);
    }

    #[test]
    fn ids_returns_shallowest_solution_and_sums_passes() {
        let result = iterative_deepening_search(&weighted(), DEFAULT_IDS_MAX_DEPTH);
        assert!(result.success());
        assert_eq!(result.path(), &[0, 1, 3]);
        // limit 0: {0}; limit 1: {0, 2, 1}; limit 2: {0, 2, 4, 1, 3}
        assert_eq!(result.nodes_expanded(), 1 + 3 + 5);
        assert_eq!(result.nodes_generated(), 1 + 3 + 5);
        assert_eq!(result.visited_states().len(), 5);
    }

    #[test]
    fn ids_fails_when_limit_too_small() {
        let result = iterative_deepening_search(&weighted(), 1);
        assert!(!result.success());
        assert_eq!(result.nodes_expanded(), 1 + 3);
    }

    #[test]
    fn ids_stops_once_space_is_exhausted() {
        let mut graph = weighted();
        graph.goal = 99;
        let result = iterative_deepening_search(&graph, DEFAULT_IDS_MAX_DEPTH);
        assert!(!result.success());
        // limits 0..=3; the pass at limit 3 finds nothing left to cut off
        assert_eq!(result.nodes_expanded(), 1 + 3 + 5 + 5);
        assert_eq!(result.visited_states().len(), 5);
    }

    #[test]
    fn unreachable_goal_exhausts_frontier() {
        let mut graph = weighted();
        graph.goal = 99;
        for result in [
            breadth_first_search(&graph),
            depth_first_search(&graph, DEFAULT_DFS_MAX_DEPTH),
            uniform_cost_search(&graph),
        ] {
            assert!(!result.success());
            assert!(result.path().is_empty());
            assert_eq!(result.nodes_expanded(), 5);
            assert!(result.nodes_generated() >= result.nodes_expanded());
        }
    }

    #[test]
    fn ucs_skips_stale_duplicates() {
        // 0 reaches 2 directly (cost 5) and via 1 (cost 2); 2 is the goal.
        let graph = Graph {
            edges: vec![vec![(2, 5.0), (1, 1.0)], vec![(2, 1.0)], vec![]],
            start: 0,
            goal: 2,
        };
        let result = uniform_cost_search(&graph);
        assert_eq!(result.path(), &[0, 1, 2]);
        assert_eq!(result.path_cost(), 2.0);
        assert_eq!(result.nodes_generated(), 4);
    }
}
