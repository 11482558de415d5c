//! Reference pathfinding environment: a grid maze with a key that must be
//! collected before the goal counts as reached.

mod grid;
mod heuristic;

pub use grid::{Direction, KeyMaze, MazeInfo, MazeState, Pos};
pub use heuristic::{euclidean, manhattan, HeuristicKind};
