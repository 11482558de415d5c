//! Named algorithms runnable on a [`KeyMaze`], keyed the way the CLI and
//! config files refer to them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::SearchError;
use crate::maze::{Direction, HeuristicKind, KeyMaze, MazeState};

use super::hybrid::minmax_search;
use super::informed::{a_star_search, greedy_best_first_search};
use super::result::SearchResult;
use super::uninformed::{
    breadth_first_search, depth_first_search, iterative_deepening_search, uniform_cost_search,
    DEFAULT_DFS_MAX_DEPTH, DEFAULT_IDS_MAX_DEPTH,
};

/// Pathfinding parameters shared by the registry entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub dfs_max_depth: usize,
    pub ids_max_depth: usize,
    /// Used by `greedy` and `astar` when the key names no heuristic.
    pub heuristic: HeuristicKind,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            dfs_max_depth: DEFAULT_DFS_MAX_DEPTH,
            ids_max_depth: DEFAULT_IDS_MAX_DEPTH,
            heuristic: HeuristicKind::Manhattan,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bfs,
    Dfs,
    Ucs,
    Ids,
    /// `None` defers to [`SearchConfig::heuristic`].
    Greedy(Option<HeuristicKind>),
    AStar(Option<HeuristicKind>),
    Minmax,
}

impl Algorithm {
    /// Every named entry, in report order.
    pub const ALL: [Algorithm; 9] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Ucs,
        Algorithm::Ids,
        Algorithm::Greedy(Some(HeuristicKind::Manhattan)),
        Algorithm::Greedy(Some(HeuristicKind::Euclidean)),
        Algorithm::AStar(Some(HeuristicKind::Manhattan)),
        Algorithm::AStar(Some(HeuristicKind::Euclidean)),
        Algorithm::Minmax,
    ];

    /// The comparison suite run when no algorithms are named.
    pub fn default_suite() -> Vec<Algorithm> {
        vec![
            Algorithm::Bfs,
            Algorithm::Dfs,
            Algorithm::Ucs,
            Algorithm::Ids,
            Algorithm::Greedy(Some(HeuristicKind::Manhattan)),
            Algorithm::AStar(Some(HeuristicKind::Manhattan)),
            Algorithm::AStar(Some(HeuristicKind::Euclidean)),
        ]
    }

    pub fn key(&self) -> String {
        match self {
            Algorithm::Bfs => "bfs".into(),
            Algorithm::Dfs => "dfs".into(),
            Algorithm::Ucs => "ucs".into(),
            Algorithm::Ids => "ids".into(),
            Algorithm::Greedy(None) => "greedy".into(),
            Algorithm::Greedy(Some(kind)) => format!("greedy_{kind}"),
            Algorithm::AStar(None) => "astar".into(),
            Algorithm::AStar(Some(kind)) => format!("astar_{kind}"),
            Algorithm::Minmax => "minmax".into(),
        }
    }

    pub fn display_name(&self) -> String {
        fn titled(kind: HeuristicKind) -> &'static str {
            match kind {
                HeuristicKind::Manhattan => "Manhattan",
                HeuristicKind::Euclidean => "Euclidean",
                HeuristicKind::Zero => "Zero",
            }
        }
        match self {
            Algorithm::Bfs => "BFS".into(),
            Algorithm::Dfs => "DFS".into(),
            Algorithm::Ucs => "UCS".into(),
            Algorithm::Ids => "IDS".into(),
            Algorithm::Greedy(None) => "Greedy".into(),
            Algorithm::Greedy(Some(kind)) => format!("Greedy ({})", titled(*kind)),
            Algorithm::AStar(None) => "A*".into(),
            Algorithm::AStar(Some(kind)) => format!("A* ({})", titled(*kind)),
            Algorithm::Minmax => "MinMax".into(),
        }
    }

    /// Runs this algorithm on `maze` with the parameters from `config`.
    pub fn run(
        &self,
        maze: &KeyMaze,
        config: &AppConfig,
    ) -> Result<SearchResult<MazeState, Direction>, SearchError> {
        let search = &config.search;
        let result = match *self {
            Algorithm::Bfs => breadth_first_search(maze),
            Algorithm::Dfs => depth_first_search(maze, search.dfs_max_depth),
            Algorithm::Ucs => uniform_cost_search(maze),
            Algorithm::Ids => iterative_deepening_search(maze, search.ids_max_depth),
            Algorithm::Greedy(kind) => {
                greedy_best_first_search(maze, maze.heuristic(kind.unwrap_or(search.heuristic)))
            }
            Algorithm::AStar(kind) => {
                a_star_search(maze, maze.heuristic(kind.unwrap_or(search.heuristic)))
            }
            Algorithm::Minmax => {
                let hybrid = &config.hybrid;
                minmax_search(maze, maze.heuristic(hybrid.heuristic), hybrid)?
            }
        };
        Ok(result)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let unknown = || SearchError::UnknownAlgorithm {
            key: s.to_string(),
            expected: Algorithm::ALL.map(|a| a.key()).join(", "),
        };
        let algorithm = match key.as_str() {
            "bfs" => Algorithm::Bfs,
            "dfs" => Algorithm::Dfs,
            "ucs" => Algorithm::Ucs,
            "ids" => Algorithm::Ids,
            "greedy" => Algorithm::Greedy(None),
            "astar" => Algorithm::AStar(None),
            "minmax" => Algorithm::Minmax,
            other => {
                let (family, heuristic) = other.split_once('_').ok_or_else(unknown)?;
                let kind = heuristic.parse::<HeuristicKind>().map_err(|_| unknown())?;
                match family {
                    "greedy" => Algorithm::Greedy(Some(kind)),
                    "astar" => Algorithm::AStar(Some(kind)),
                    _ => return Err(unknown()),
                }
            }
        };
        Ok(algorithm)
    }
}
