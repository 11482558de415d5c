//! Heuristic-guided best-first search.

use crate::env::Environment;

use super::frontier::best_first;
use super::result::SearchResult;

/// Expand the state with the lowest `h(state)`, ignoring path cost.
///
/// Fast on open maps but gives no optimality guarantee.
pub fn greedy_best_first_search<E, H>(env: &E, heuristic: H) -> SearchResult<E::State, E::Action>
where
    E: Environment,
    H: Fn(&E::State) -> f64,
{
    best_first(env, "greedy", |_, state| heuristic(state))
}

/// Expand the state with the lowest `g + h(state)`.
///
/// Optimal when `h` never overestimates the remaining cost.
pub fn a_star_search<E, H>(env: &E, heuristic: H) -> SearchResult<E::State, E::Action>
where
    E: Environment,
    H: Fn(&E::State) -> f64,
{
    best_first(env, "astar", |g, state| g + heuristic(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{HeuristicKind, KeyMaze};
    use crate::search::uniform_cost_search;

    const DETOUR: &str = "\
S....
.###.
.#K#.
.#.#.
...#G";

    #[test]
    fn astar_matches_ucs_cost_on_key_maze() {
        let maze: KeyMaze = DETOUR.parse().unwrap();
        let ucs = uniform_cost_search(&maze);
        for kind in HeuristicKind::ALL {
            let astar = a_star_search(&maze, maze.heuristic(kind));
            assert!(astar.success());
            assert_eq!(astar.path_cost(), ucs.path_cost(), "{kind}");
            assert!(astar.nodes_expanded() <= ucs.nodes_expanded(), "{kind}");
        }
    }

    #[test]
    fn greedy_reaches_goal_with_key() {
        let maze: KeyMaze = DETOUR.parse().unwrap();
        let result = greedy_best_first_search(&maze, maze.heuristic(HeuristicKind::Manhattan));
        assert!(result.success());
        let last = result.path().last().unwrap();
        assert!(last.has_key);
        assert_eq!(last.pos, maze.goal());
        assert!(result.path().iter().any(|s| s.pos == maze.key()));
    }

    #[test]
    fn zero_heuristic_astar_is_ucs() {
        let maze: KeyMaze = DETOUR.parse().unwrap();
        let ucs = uniform_cost_search(&maze);
        let astar = a_star_search(&maze, |_: &_| 0.0);
        assert_eq!(astar.path(), ucs.path());
        assert_eq!(astar.nodes_expanded(), ucs.nodes_expanded());
    }
}
