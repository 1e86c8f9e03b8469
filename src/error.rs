use std::path::PathBuf;

/// Rule violations and misuse reported by the game engine.
///
/// Every variant is raised before any state changes, so the engine is
/// unchanged after an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Invalid rows or columns: {rows}x{columns} (minimum is 4x4)")]
    Configuration { rows: usize, columns: usize },

    #[error("Game over")]
    GameOver,

    #[error("Invalid column {column} (expected 0..{columns})")]
    InvalidColumn { column: isize, columns: usize },

    #[error("Column full: {column}")]
    ColumnFull { column: usize },
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

/// Errors that end a console or terminal session early.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("game error: {0}")]
    Game(#[from] GameError),

    #[error("game session disconnected")]
    Disconnected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_error_display() {
        assert_eq!(GameError::GameOver.to_string(), "Game over");
        assert_eq!(
            GameError::ColumnFull { column: 2 }.to_string(),
            "Column full: 2"
        );
        assert_eq!(
            GameError::InvalidColumn {
                column: -1,
                columns: 7
            }
            .to_string(),
            "Invalid column -1 (expected 0..7)"
        );
        assert_eq!(
            GameError::Configuration { rows: 3, columns: 7 }.to_string(),
            "Invalid rows or columns: 3x7 (minimum is 4x4)"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("board.rows must be >= 4".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: board.rows must be >= 4"
        );
    }

    #[test]
    fn test_driver_error_wraps_game_error() {
        let err: DriverError = GameError::GameOver.into();
        assert_eq!(err.to_string(), "game error: Game over");
    }
}
