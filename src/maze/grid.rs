use std::fmt;
use std::str::FromStr;

use crate::env::{Environment, ObstacleEnvironment};
use crate::error::MazeError;

use super::HeuristicKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Pos { row, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Agent position plus whether the key has been collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct MazeState {
    pub pos: Pos,
    pub has_key: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Successor enumeration order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Summary of a maze layout.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MazeInfo {
    pub rows: usize,
    pub cols: usize,
    pub state_space_size: usize,
    pub wall_count: usize,
    pub passable_cells: usize,
    pub wall_density: f64,
    pub start: Pos,
    pub goal: Pos,
    pub key: Pos,
}

/// A grid maze where the agent must pick up a key before reaching the goal.
///
/// Moves cost 1. The key is collected when the agent stands on or enters the
/// key cell. Temporary walls are kept apart from the layout so that an
/// adversary's probe can be reverted exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMaze {
    rows: usize,
    cols: usize,
    walls: Vec<bool>,
    temporary: Vec<bool>,
    start: Pos,
    goal: Pos,
    key: Pos,
}

impl KeyMaze {
    /// A maze without walls.
    pub fn open(rows: usize, cols: usize, start: Pos, goal: Pos, key: Pos) -> Result<Self, MazeError> {
        Self::with_walls(rows, cols, &[], start, goal, key)
    }

    pub fn with_walls(
        rows: usize,
        cols: usize,
        walls: &[Pos],
        start: Pos,
        goal: Pos,
        key: Pos,
    ) -> Result<Self, MazeError> {
        if rows == 0 || cols == 0 {
            return Err(MazeError::Empty);
        }
        let mut maze = KeyMaze {
            rows,
            cols,
            walls: vec![false; rows * cols],
            temporary: vec![false; rows * cols],
            start,
            goal,
            key,
        };
        for &wall in walls {
            let idx = maze.index(wall).ok_or(MazeError::BadPosition {
                row: wall.row,
                col: wall.col,
            })?;
            maze.walls[idx] = true;
        }
        for pos in [start, goal, key] {
            if !maze.is_passable(pos) {
                return Err(MazeError::BadPosition {
                    row: pos.row,
                    col: pos.col,
                });
            }
        }
        Ok(maze)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    pub fn goal(&self) -> Pos {
        self.goal
    }

    pub fn key(&self) -> Pos {
        self.key
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        (pos.row < self.rows && pos.col < self.cols).then(|| pos.row * self.cols + pos.col)
    }

    /// True for permanent and temporary walls alike.
    pub fn is_wall(&self, pos: Pos) -> bool {
        self.index(pos)
            .map(|idx| self.walls[idx] || self.temporary[idx])
            .unwrap_or(true)
    }

    pub fn is_passable(&self, pos: Pos) -> bool {
        !self.is_wall(pos)
    }

    fn neighbor(&self, pos: Pos, dir: Direction) -> Option<Pos> {
        let (dr, dc) = dir.delta();
        let row = pos.row.checked_add_signed(dr)?;
        let col = pos.col.checked_add_signed(dc)?;
        let next = Pos::new(row, col);
        self.is_passable(next).then_some(next)
    }

    /// Closure form of a named heuristic, bound to this maze's goal and key.
    pub fn heuristic(&self, kind: HeuristicKind) -> impl Fn(&MazeState) -> f64 {
        let goal = self.goal;
        let key = self.key;
        move |state: &MazeState| kind.estimate(state, goal, key)
    }

    pub fn info(&self) -> MazeInfo {
        let wall_count = self.walls.iter().filter(|&&w| w).count();
        let cells = self.rows * self.cols;
        MazeInfo {
            rows: self.rows,
            cols: self.cols,
            state_space_size: cells * 2,
            wall_count,
            passable_cells: cells - wall_count,
            wall_density: wall_count as f64 / cells as f64,
            start: self.start,
            goal: self.goal,
            key: self.key,
        }
    }
}

impl Environment for KeyMaze {
    type State = MazeState;
    type Action = Direction;

    fn initial_state(&self) -> MazeState {
        MazeState {
            pos: self.start,
            has_key: self.start == self.key,
        }
    }

    fn is_goal_state(&self, state: &MazeState) -> bool {
        state.has_key && state.pos == self.goal
    }

    fn successors(&self, state: &MazeState) -> Vec<(MazeState, Direction, f64)> {
        let carrying = state.has_key || state.pos == self.key;
        Direction::ALL
            .into_iter()
            .filter_map(|dir| {
                let next = self.neighbor(state.pos, dir)?;
                let next_state = MazeState {
                    pos: next,
                    has_key: carrying || next == self.key,
                };
                Some((next_state, dir, 1.0))
            })
            .collect()
    }
}

impl ObstacleEnvironment for KeyMaze {
    type Placement = Pos;

    /// Open cells within Chebyshev distance `radius` of the agent, row-major,
    /// never the agent's own cell, start, goal or key.
    fn adversary_actions(&self, state: &MazeState, radius: usize) -> Vec<Pos> {
        let center = state.pos;
        let row_end = center.row.saturating_add(radius).min(self.rows - 1);
        let col_end = center.col.saturating_add(radius).min(self.cols - 1);
        let mut candidates = Vec::new();
        for row in center.row.saturating_sub(radius)..=row_end {
            for col in center.col.saturating_sub(radius)..=col_end {
                let pos = Pos::new(row, col);
                if pos == center || pos == self.start || pos == self.goal || pos == self.key {
                    continue;
                }
                if self.is_passable(pos) {
                    candidates.push(pos);
                }
            }
        }
        candidates
    }

    fn add_temporary_wall(&mut self, pos: Pos) -> bool {
        if pos == self.start || pos == self.goal || pos == self.key || self.is_wall(pos) {
            return false;
        }
        match self.index(pos) {
            Some(idx) => {
                self.temporary[idx] = true;
                true
            }
            None => false,
        }
    }

    fn remove_temporary_wall(&mut self, pos: Pos) {
        if let Some(idx) = self.index(pos) {
            self.temporary[idx] = false;
        }
    }
}

impl FromStr for KeyMaze {
    type Err = MazeError;

    /// `#` wall, `.` open, `S` start, `G` goal, `K` key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let first = lines.first().ok_or(MazeError::Empty)?;
        let cols = first.chars().count();

        let mut walls = Vec::new();
        let (mut start, mut goal, mut key) = (None, None, None);
        for (row, line) in lines.iter().enumerate() {
            let width = line.chars().count();
            if width != cols {
                return Err(MazeError::Ragged {
                    row,
                    expected: cols,
                    got: width,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let pos = Pos::new(row, col);
                let slot = match ch {
                    '#' => {
                        walls.push(pos);
                        continue;
                    }
                    '.' => continue,
                    'S' => &mut start,
                    'G' => &mut goal,
                    'K' => &mut key,
                    other => return Err(MazeError::UnknownCell { ch: other, row, col }),
                };
                if slot.replace(pos).is_some() {
                    return Err(MazeError::Duplicate(ch));
                }
            }
        }

        KeyMaze::with_walls(
            lines.len(),
            cols,
            &walls,
            start.ok_or(MazeError::Missing('S'))?,
            goal.ok_or(MazeError::Missing('G'))?,
            key.ok_or(MazeError::Missing('K'))?,
        )
    }
}

impl fmt::Display for KeyMaze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let pos = Pos::new(row, col);
                let ch = if pos == self.start {
                    'S'
                } else if pos == self.goal {
                    'G'
                } else if pos == self.key {
                    'K'
                } else if self.is_wall(pos) {
                    '#'
                } else {
                    '.'
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "
        S.#..
        .##.G
        ...K.
    ";

    #[test]
    fn test_parse_layout() {
        let maze: KeyMaze = SMALL.parse().unwrap();
        assert_eq!((maze.rows(), maze.cols()), (3, 5));
        assert_eq!(maze.start(), Pos::new(0, 0));
        assert_eq!(maze.goal(), Pos::new(1, 4));
        assert_eq!(maze.key(), Pos::new(2, 3));
        assert!(maze.is_wall(Pos::new(0, 2)));
        assert!(maze.is_wall(Pos::new(9, 9)));
        assert_eq!(maze.info().wall_count, 3);
        assert_eq!(maze.info().passable_cells, 12);
    }

    #[test]
    fn test_display_roundtrips_layout() {
        let maze: KeyMaze = SMALL.parse().unwrap();
        let again: KeyMaze = maze.to_string().parse().unwrap();
        assert_eq!(maze, again);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<KeyMaze>(), Err(MazeError::Empty));
        assert_eq!("S.G\n.K".parse::<KeyMaze>(), Err(MazeError::Ragged { row: 1, expected: 3, got: 2 }));
        assert_eq!("S.G\n.Kx".parse::<KeyMaze>(), Err(MazeError::UnknownCell { ch: 'x', row: 1, col: 2 }));
        assert_eq!("S.G\n...".parse::<KeyMaze>(), Err(MazeError::Missing('K')));
        assert_eq!("SSG\n..K".parse::<KeyMaze>(), Err(MazeError::Duplicate('S')));
    }

    #[test]
    fn test_successor_order_and_bounds() {
        let maze = KeyMaze::open(3, 3, Pos::new(1, 1), Pos::new(2, 2), Pos::new(0, 0)).unwrap();
        let dirs: Vec<Direction> = maze
            .successors(&maze.initial_state())
            .into_iter()
            .map(|(_, dir, cost)| {
                assert_eq!(cost, 1.0);
                dir
            })
            .collect();
        assert_eq!(dirs, Direction::ALL.to_vec());

        let corner = MazeState {
            pos: Pos::new(0, 0),
            has_key: true,
        };
        let dirs: Vec<Direction> = maze.successors(&corner).into_iter().map(|(_, d, _)| d).collect();
        assert_eq!(dirs, vec![Direction::Down, Direction::Right]);
    }

    #[test]
    fn test_key_pickup() {
        let maze = KeyMaze::open(3, 3, Pos::new(0, 0), Pos::new(2, 2), Pos::new(1, 1)).unwrap();
        let at_key = MazeState {
            pos: Pos::new(1, 1),
            has_key: false,
        };
        assert!(maze.successors(&at_key).iter().all(|(s, _, _)| s.has_key));

        let before_key = MazeState {
            pos: Pos::new(0, 1),
            has_key: false,
        };
        let entered: Vec<_> = maze
            .successors(&before_key)
            .into_iter()
            .filter(|(s, _, _)| s.pos == Pos::new(1, 1))
            .collect();
        assert!(entered[0].0.has_key);
    }

    #[test]
    fn test_goal_requires_key() {
        let maze = KeyMaze::open(2, 2, Pos::new(0, 0), Pos::new(1, 1), Pos::new(0, 1)).unwrap();
        let without = MazeState {
            pos: Pos::new(1, 1),
            has_key: false,
        };
        assert!(!maze.is_goal_state(&without));
        assert!(maze.is_goal_state(&MazeState {
            has_key: true,
            ..without
        }));
    }

    #[test]
    fn test_temporary_walls_are_reversible() {
        let mut maze = KeyMaze::open(4, 4, Pos::new(0, 0), Pos::new(3, 3), Pos::new(0, 3)).unwrap();
        let before = maze.clone();
        assert!(maze.add_temporary_wall(Pos::new(1, 1)));
        assert!(maze.is_wall(Pos::new(1, 1)));
        assert!(!maze.add_temporary_wall(Pos::new(1, 1)));
        assert!(!maze.add_temporary_wall(Pos::new(3, 3)));
        maze.remove_temporary_wall(Pos::new(1, 1));
        assert_eq!(maze, before);
    }

    #[test]
    fn test_adversary_candidates_exclude_special_cells() {
        let maze = KeyMaze::open(5, 5, Pos::new(0, 0), Pos::new(4, 4), Pos::new(1, 1)).unwrap();
        let state = MazeState {
            pos: Pos::new(0, 1),
            has_key: false,
        };
        let candidates = maze.adversary_actions(&state, 1);
        assert_eq!(
            candidates,
            vec![Pos::new(0, 2), Pos::new(1, 0), Pos::new(1, 2)]
        );
    }

    #[test]
    fn test_huge_radius_covers_the_whole_grid() {
        let maze: KeyMaze = "S.#\n.K.\n..G".parse().unwrap();
        let state = maze.initial_state();
        let candidates = maze.adversary_actions(&state, usize::MAX);
        assert_eq!(
            candidates,
            vec![
                Pos::new(0, 1),
                Pos::new(1, 0),
                Pos::new(1, 2),
                Pos::new(2, 0),
                Pos::new(2, 1),
            ]
        );
    }
}
