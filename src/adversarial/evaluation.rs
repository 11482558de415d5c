use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::env::AdversarialGame;
use crate::error::SearchError;
use crate::game::{Board, Cell, Player, CONNECT, DIRECTIONS};

/// Static score of a position from `player`'s point of view.
///
/// Called by the game-tree search at its depth cutoff, never on positions it
/// already recognised as decided.
pub trait Evaluator<G: AdversarialGame> {
    fn evaluate(&self, game: &G, player: Player, depth: usize) -> f64;
}

impl<G, F> Evaluator<G> for F
where
    G: AdversarialGame,
    F: Fn(&G, Player, usize) -> f64,
{
    fn evaluate(&self, game: &G, player: Player, depth: usize) -> f64 {
        self(game, player, depth)
    }
}

/// Decided positions score ±(utility + depth), so later wins and earlier
/// losses rank lower.
fn decided_score(board: &Board, player: Player, depth: usize) -> Option<f64> {
    board.utility(player).map(|u| {
        if u > 0.0 {
            u + depth as f64
        } else if u < 0.0 {
            u - depth as f64
        } else {
            0.0
        }
    })
}

/// Counts playable three-in-a-row threats, pieces near the centre and
/// adjacent pairs.
///
/// A threat only counts when its empty cell could be filled on the next
/// move, i.e. it sits on the bottom row or on top of a piece.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreatEvaluator;

impl ThreatEvaluator {
    const THREAT_WEIGHT: f64 = 100.0;
    const PAIR_WEIGHT: f64 = 5.0;
    const CENTER_WEIGHT: f64 = 2.0;

    /// The `i`-th cell from `(row, col)` along `(dr, dc)`, if on the board.
    fn cell_at(
        board: &Board,
        (row, col): (usize, usize),
        (dr, dc): (isize, isize),
        i: isize,
    ) -> Option<(usize, usize)> {
        let r = row as isize + dr * i;
        let c = col as isize + dc * i;
        board.in_bounds(r, c).then(|| (r as usize, c as usize))
    }

    fn playable(board: &Board, row: usize, col: usize) -> bool {
        row + 1 == board.rows() || board.get(row + 1, col) != Cell::Empty
    }

    /// At most one threat is counted per starting cell.
    fn threats(board: &Board, player: Player) -> usize {
        let mut threats = 0;
        for row in 0..board.rows() {
            for col in 0..board.cols() {
                for (dr, dc) in DIRECTIONS {
                    let mut count = 0;
                    let mut empty = None;
                    for i in 0..CONNECT as isize {
                        let Some((r, c)) = Self::cell_at(board, (row, col), (dr, dc), i) else {
                            break;
                        };
                        match board.get(r, c) {
                            Cell::Occupied(p) if p == player => count += 1,
                            Cell::Empty => empty = Some((r, c)),
                            Cell::Occupied(_) => break,
                        }
                    }
                    if count == CONNECT - 1 {
                        if let Some((r, c)) = empty {
                            if Self::playable(board, r, c) {
                                threats += 1;
                                break;
                            }
                        }
                    }
                }
            }
        }
        threats
    }

    /// At most one pair is counted per starting cell.
    fn pairs(board: &Board, player: Player) -> usize {
        let own = Cell::Occupied(player);
        let mut pairs = 0;
        for row in 0..board.rows() {
            for col in 0..board.cols() {
                if board.get(row, col) != own {
                    continue;
                }
                let paired = DIRECTIONS.into_iter().any(|(dr, dc)| {
                    Self::cell_at(board, (row, col), (dr, dc), 1)
                        .is_some_and(|(r, c)| board.get(r, c) == own)
                });
                if paired {
                    pairs += 1;
                }
            }
        }
        pairs
    }

    /// Own pieces within one column of the centre, weighted by closeness.
    fn center(board: &Board, player: Player) -> f64 {
        let own = Cell::Occupied(player);
        let middle = board.cols() / 2;
        let mut score = 0.0;
        for col in middle.saturating_sub(1)..(middle + 2).min(board.cols()) {
            let weight = (3 - col.abs_diff(middle)) as f64 * Self::CENTER_WEIGHT;
            for row in 0..board.rows() {
                if board.get(row, col) == own {
                    score += weight;
                }
            }
        }
        score
    }
}

impl Evaluator<Board> for ThreatEvaluator {
    fn evaluate(&self, board: &Board, player: Player, depth: usize) -> f64 {
        if let Some(score) = decided_score(board, player, depth) {
            return score;
        }
        let opponent = player.other();
        let threats = Self::threats(board, player) as f64 - Self::threats(board, opponent) as f64;
        let pairs = Self::pairs(board, player) as f64 - Self::pairs(board, opponent) as f64;
        threats * Self::THREAT_WEIGHT + pairs * Self::PAIR_WEIGHT + Self::center(board, player)
    }
}

/// Scores every four-cell window plus a centre-column bonus, weighting the
/// opponent's open threes above our own.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowEvaluator;

impl WindowEvaluator {
    fn score_window(own: usize, opp: usize, empty: usize) -> f64 {
        if own == 3 && empty == 1 {
            50.0
        } else if own == 2 && empty == 2 {
            10.0
        } else if opp == 3 && empty == 1 {
            -80.0
        } else if opp == 2 && empty == 2 {
            -10.0
        } else {
            0.0
        }
    }
}

impl Evaluator<Board> for WindowEvaluator {
    fn evaluate(&self, board: &Board, player: Player, depth: usize) -> f64 {
        if let Some(score) = decided_score(board, player, depth) {
            return score;
        }
        let own_cell = Cell::Occupied(player);
        let opp_cell = Cell::Occupied(player.other());
        let mut score = 0.0;

        let middle = board.cols() / 2;
        for row in 0..board.rows() {
            let cell = board.get(row, middle);
            if cell == own_cell {
                score += 3.0;
            } else if cell == opp_cell {
                score -= 3.0;
            }
        }

        let span = CONNECT as isize - 1;
        for row in 0..board.rows() {
            for col in 0..board.cols() {
                for (dr, dc) in DIRECTIONS {
                    let (r0, c0) = (row as isize, col as isize);
                    if !board.in_bounds(r0 + dr * span, c0 + dc * span) {
                        continue;
                    }
                    let (mut own, mut opp, mut empty) = (0, 0, 0);
                    for i in 0..CONNECT as isize {
                        match board.get((r0 + dr * i) as usize, (c0 + dc * i) as usize) {
                            c if c == own_cell => own += 1,
                            c if c == opp_cell => opp += 1,
                            _ => empty += 1,
                        }
                    }
                    score += Self::score_window(own, opp, empty);
                }
            }
        }

        score
    }
}

/// Board evaluators selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluatorKind {
    #[default]
    Threats,
    Windows,
}

impl EvaluatorKind {
    pub const ALL: [EvaluatorKind; 2] = [EvaluatorKind::Threats, EvaluatorKind::Windows];

    pub fn name(self) -> &'static str {
        match self {
            EvaluatorKind::Threats => "threats",
            EvaluatorKind::Windows => "windows",
        }
    }
}

impl Evaluator<Board> for EvaluatorKind {
    fn evaluate(&self, board: &Board, player: Player, depth: usize) -> f64 {
        match self {
            EvaluatorKind::Threats => ThreatEvaluator.evaluate(board, player, depth),
            EvaluatorKind::Windows => WindowEvaluator.evaluate(board, player, depth),
        }
    }
}

impl fmt::Display for EvaluatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EvaluatorKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        EvaluatorKind::ALL
            .into_iter()
            .find(|kind| kind.name() == lowered)
            .ok_or_else(|| {
                SearchError::InvalidParameter(format!(
                    "unknown evaluator '{s}' (expected one of: threats, windows)"
                ))
            })
    }
}
