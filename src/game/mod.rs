//! Connect-Four style game: a gravity board with an undo stack, the two
//! players, and seeded random openings.

mod board;
mod opening;
mod player;

pub use board::{Board, Cell, GameComplexity, COLS, CONNECT, ROWS, WIN_UTILITY};
pub(crate) use board::DIRECTIONS;
pub use opening::random_opening;
pub use player::Player;
