//! Depth-limited negamax, with and without alpha-beta pruning.
//!
//! Both searches drive the game in place: every applied move is undone
//! before the call returns, so the caller gets its position back unchanged.

use tracing::debug;

use crate::env::AdversarialGame;

use super::evaluation::Evaluator;
use super::tracker::PerformanceTracker;

/// Value of a leaf from the point of view of the player to move, or `None`
/// if the node must be expanded.
///
/// Decided games keep their utility, pushed away from zero by the plies left
/// so that quicker wins and slower losses score better.
fn leaf_value<G, E>(game: &G, depth: usize, max_depth: usize, evaluator: &E) -> Option<f64>
where
    G: AdversarialGame,
    E: Evaluator<G> + ?Sized,
{
    let player = game.current_player();
    if let Some(utility) = game.utility(player) {
        let remaining = max_depth.saturating_sub(depth) as f64;
        let value = if utility > 0.0 {
            utility + remaining
        } else if utility < 0.0 {
            utility - remaining
        } else {
            utility
        };
        return Some(value);
    }
    if depth >= max_depth {
        return Some(evaluator.evaluate(game, player, depth));
    }
    None
}

fn minimax<G, E>(
    game: &mut G,
    depth: usize,
    max_depth: usize,
    evaluator: &E,
    tracker: &mut PerformanceTracker<G::Action>,
) -> (f64, Option<G::Action>)
where
    G: AdversarialGame,
    E: Evaluator<G> + ?Sized,
{
    tracker.record_node(depth);
    if let Some(value) = leaf_value(game, depth, max_depth, evaluator) {
        return (value, None);
    }
    let actions = game.valid_actions();
    if actions.is_empty() {
        return (evaluator.evaluate(game, game.current_player(), depth), None);
    }

    let mut best_value = f64::NEG_INFINITY;
    let mut best_move = None;
    for action in actions {
        if !game.make_move(action) {
            continue;
        }
        let (child, _) = minimax(game, depth + 1, max_depth, evaluator, tracker);
        game.undo_move();

        let value = -child;
        if value > best_value {
            best_value = value;
            best_move = Some(action);
        }
    }
    (best_value, best_move)
}

fn alphabeta<G, E>(
    game: &mut G,
    depth: usize,
    max_depth: usize,
    mut alpha: f64,
    beta: f64,
    evaluator: &E,
    tracker: &mut PerformanceTracker<G::Action>,
) -> (f64, Option<G::Action>)
where
    G: AdversarialGame,
    E: Evaluator<G> + ?Sized,
{
    tracker.record_node(depth);
    if let Some(value) = leaf_value(game, depth, max_depth, evaluator) {
        return (value, None);
    }
    let actions = game.valid_actions();
    if actions.is_empty() {
        return (evaluator.evaluate(game, game.current_player(), depth), None);
    }

    let mut best_value = f64::NEG_INFINITY;
    let mut best_move = None;
    for action in actions {
        if !game.make_move(action) {
            continue;
        }
        let (child, _) = alphabeta(game, depth + 1, max_depth, -beta, -alpha, evaluator, tracker);
        game.undo_move();

        let value = -child;
        if value > best_value {
            best_value = value;
            best_move = Some(action);
        }
        alpha = alpha.max(value);
        if alpha >= beta {
            tracker.record_prune();
            break;
        }
    }
    (best_value, best_move)
}

/// Best move for the player to move, searching every line to `max_depth`
/// plies. `None` if the position is decided or has no legal move.
pub fn minimax_search<G, E>(
    game: &mut G,
    max_depth: usize,
    evaluator: &E,
) -> (Option<G::Action>, PerformanceTracker<G::Action>)
where
    G: AdversarialGame,
    E: Evaluator<G> + ?Sized,
{
    let mut tracker = PerformanceTracker::new();
    tracker.start_timer();
    let (value, best) = minimax(game, 0, max_depth, evaluator, &mut tracker);
    tracker.stop_timer();
    finish(best, value, "minimax", tracker)
}

/// Same move as [`minimax_search`], skipping lines that cannot change it.
pub fn alphabeta_search<G, E>(
    game: &mut G,
    max_depth: usize,
    evaluator: &E,
) -> (Option<G::Action>, PerformanceTracker<G::Action>)
where
    G: AdversarialGame,
    E: Evaluator<G> + ?Sized,
{
    let mut tracker = PerformanceTracker::new();
    tracker.start_timer();
    let (value, best) = alphabeta(
        game,
        0,
        max_depth,
        f64::NEG_INFINITY,
        f64::INFINITY,
        evaluator,
        &mut tracker,
    );
    tracker.stop_timer();
    finish(best, value, "alphabeta", tracker)
}

fn finish<A: Copy + std::fmt::Debug>(
    best: Option<A>,
    value: f64,
    algorithm: &'static str,
    mut tracker: PerformanceTracker<A>,
) -> (Option<A>, PerformanceTracker<A>) {
    if let Some(action) = best {
        tracker.record_move(action);
    }
    debug!(
        algorithm,
        ?best,
        value,
        expanded = tracker.nodes_expanded(),
        pruned = tracker.nodes_pruned(),
        "game-tree search finished"
    );
    (best, tracker)
}
