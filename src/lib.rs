//! # Search Arena
//!
//! State-space search in two flavours: single-agent pathfinding over an
//! abstract transition model, and two-player game-tree search over a board
//! mutated in place.
//!
//! ## Modules
//!
//! - [`env`]: Environment contracts the engines consume
//! - [`search`]: BFS, DFS, UCS, IDS, greedy, A*, the obstacle-adversary planner and the algorithm registry
//! - [`adversarial`]: Negamax minimax, alpha-beta, board evaluators, performance tracking
//! - [`maze`]: Grid maze with a key, used as the reference pathfinding environment
//! - [`game`]: Connect-Four style board with undo, players, random openings
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod adversarial;
pub mod config;
pub mod env;
pub mod error;
pub mod game;
pub mod maze;
pub mod search;
