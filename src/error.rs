use std::path::PathBuf;

/// Errors raised before any search work begins.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("unknown heuristic '{name}' (expected one of: {expected})")]
    UnknownHeuristic { name: String, expected: String },

    #[error("unknown algorithm '{key}' (expected one of: {expected})")]
    UnknownAlgorithm { key: String, expected: String },

    #[error("invalid search parameter: {0}")]
    InvalidParameter(String),
}

/// Errors from placing a piece on a [`Board`](crate::game::Board).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column is full")]
    ColumnFull,

    #[error("column is out of range")]
    InvalidColumn,

    #[error("game is already decided")]
    GameOver,
}

/// Errors that can occur when parsing a maze description.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MazeError {
    #[error("maze text is empty")]
    Empty,

    #[error("row {row} has {got} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("unknown cell '{ch}' at row {row}, column {col}")]
    UnknownCell { ch: char, row: usize, col: usize },

    #[error("maze has no '{0}' cell")]
    Missing(char),

    #[error("maze has more than one '{0}' cell")]
    Duplicate(char),

    #[error("position ({row}, {col}) is outside the maze or blocked")]
    BadPosition { row: usize, col: usize },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_heuristic_display() {
        let err = SearchError::UnknownHeuristic {
            name: "chebyshev".to_string(),
            expected: "manhattan, euclidean, zero".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unknown heuristic 'chebyshev' (expected one of: manhattan, euclidean, zero)"
        );
    }

    #[test]
    fn test_maze_error_display() {
        let err = MazeError::Ragged {
            row: 2,
            expected: 5,
            got: 4,
        };
        assert_eq!(err.to_string(), "row 2 has 4 cells, expected 5");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("hybrid.adversary_frequency must be >= 1".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: hybrid.adversary_frequency must be >= 1"
        );
    }
}
