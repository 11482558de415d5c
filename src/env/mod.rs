//! Environment contracts consumed by the search engines.
//!
//! Pathfinding engines only need [`Environment`]. Game-tree search drives an
//! [`AdversarialGame`] in place through `make_move`/`undo_move`, and the
//! hybrid planner additionally needs an [`ObstacleEnvironment`] it can block
//! temporarily.

use std::fmt::Debug;
use std::hash::Hash;

use crate::game::Player;

/// A single-agent transition model.
pub trait Environment {
    /// Structural identity: equal fields mean the same search node.
    type State: Clone + Eq + Hash + Debug;
    /// Transition label.
    type Action: Clone + PartialEq + Debug;

    fn initial_state(&self) -> Self::State;

    fn is_goal_state(&self, state: &Self::State) -> bool;

    /// Successors as `(state, action, step_cost)` with `step_cost >= 0`.
    ///
    /// The returned order is the expansion and tie-break order.
    fn successors(&self, state: &Self::State) -> Vec<(Self::State, Self::Action, f64)>;
}

/// Terminal outcome of a two-player game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Outcome {
    Winner(Player),
    Draw,
}

/// A two-player game mutated in place by the adversarial engine.
///
/// Every successful `make_move` must be reversible by exactly one
/// `undo_move`, restoring cells and the player to move.
pub trait AdversarialGame: Clone {
    type Action: Copy + PartialEq + Debug;

    fn current_player(&self) -> Player;

    /// Legal actions in enumeration order.
    fn valid_actions(&self) -> Vec<Self::Action>;

    /// Applies `action` for the player to move. Returns false if illegal.
    fn make_move(&mut self, action: Self::Action) -> bool;

    /// Reverts the most recent move. Returns false if there is none.
    fn undo_move(&mut self) -> bool;

    fn check_winner(&self) -> Option<Outcome>;

    /// Utility of a finished game for `player`, `None` while the game is on.
    fn utility(&self, player: Player) -> Option<f64>;

    fn is_terminal(&self) -> bool {
        self.check_winner().is_some()
    }
}

/// An environment whose cells an adversary can block for the duration of a
/// probe.
pub trait ObstacleEnvironment: Environment + Clone {
    type Placement: Copy + PartialEq + Debug;

    /// Candidate obstacle placements near `state`, within `radius`.
    fn adversary_actions(&self, state: &Self::State, radius: usize) -> Vec<Self::Placement>;

    /// Places a temporary wall. Returns false if nothing was placed.
    fn add_temporary_wall(&mut self, placement: Self::Placement) -> bool;

    fn remove_temporary_wall(&mut self, placement: Self::Placement);
}
