use std::fmt;
use std::str::FromStr;

use crate::error::SearchError;

use super::{MazeState, Pos};

/// Named distance estimates for the "reach the key, then reach the goal"
/// objective.
///
/// Without the key the estimate is `d(pos, key) + d(key, goal)`; with it,
/// `d(pos, goal)`. Both metrics are admissible for unit-cost grid moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeuristicKind {
    #[default]
    Manhattan,
    Euclidean,
    Zero,
}

impl HeuristicKind {
    pub const ALL: [HeuristicKind; 3] = [
        HeuristicKind::Manhattan,
        HeuristicKind::Euclidean,
        HeuristicKind::Zero,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HeuristicKind::Manhattan => "manhattan",
            HeuristicKind::Euclidean => "euclidean",
            HeuristicKind::Zero => "zero",
        }
    }

    pub fn estimate(self, state: &MazeState, goal: Pos, key: Pos) -> f64 {
        let distance = match self {
            HeuristicKind::Manhattan => manhattan,
            HeuristicKind::Euclidean => euclidean,
            HeuristicKind::Zero => return 0.0,
        };
        if state.has_key {
            distance(state.pos, goal)
        } else {
            distance(state.pos, key) + distance(key, goal)
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HeuristicKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        HeuristicKind::ALL
            .into_iter()
            .find(|kind| kind.name() == lowered)
            .ok_or_else(|| SearchError::UnknownHeuristic {
                name: s.to_string(),
                expected: HeuristicKind::ALL.map(HeuristicKind::name).join(", "),
            })
    }
}

pub fn manhattan(a: Pos, b: Pos) -> f64 {
    (a.row.abs_diff(b.row) + a.col.abs_diff(b.col)) as f64
}

pub fn euclidean(a: Pos, b: Pos) -> f64 {
    let dr = a.row.abs_diff(b.row) as f64;
    let dc = a.col.abs_diff(b.col) as f64;
    dr.hypot(dc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(row: usize, col: usize, has_key: bool) -> MazeState {
        MazeState {
            pos: Pos::new(row, col),
            has_key,
        }
    }

    #[test]
    fn zero_at_goal_with_key() {
        let goal = Pos::new(4, 4);
        let key = Pos::new(2, 2);
        for kind in HeuristicKind::ALL {
            assert_eq!(kind.estimate(&state(4, 4, true), goal, key), 0.0);
        }
    }

    #[test]
    fn manhattan_goes_through_key() {
        let h = HeuristicKind::Manhattan.estimate(&state(0, 0, false), Pos::new(4, 4), Pos::new(2, 2));
        assert_eq!(h, 8.0);
    }

    #[test]
    fn euclidean_never_exceeds_manhattan() {
        let goal = Pos::new(9, 3);
        let key = Pos::new(1, 7);
        for row in 0..10 {
            for col in 0..10 {
                for has_key in [false, true] {
                    let s = state(row, col, has_key);
                    let e = HeuristicKind::Euclidean.estimate(&s, goal, key);
                    let m = HeuristicKind::Manhattan.estimate(&s, goal, key);
                    assert!(e <= m + 1e-9, "euclidean {e} > manhattan {m} at {s:?}");
                    assert!(e >= 0.0);
                }
            }
        }
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Manhattan".parse::<HeuristicKind>().unwrap(), HeuristicKind::Manhattan);
        assert_eq!(" euclidean ".parse::<HeuristicKind>().unwrap(), HeuristicKind::Euclidean);
        assert_eq!("ZERO".parse::<HeuristicKind>().unwrap(), HeuristicKind::Zero);
    }

    #[test]
    fn rejects_unknown_name() {
        let err = "octile".parse::<HeuristicKind>().unwrap_err();
        assert!(matches!(err, SearchError::UnknownHeuristic { ref name, .. } if name == "octile"));
    }
}
