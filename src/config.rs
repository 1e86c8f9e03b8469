use std::path::Path;

use log::warn;

use crate::error::ConfigError;
use crate::game::MIN_DIMENSION;

/// Widest board the terminal UI supports (columns are picked with keys 1-9).
pub const MAX_TUI_COLUMNS: usize = 9;

/// Board dimensions.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub columns: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig { rows: 6, columns: 7 }
    }
}

/// Which front-end drives the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrontendKind {
    #[default]
    Console,
    Tui,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    pub kind: FrontendKind,
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub frontend: FrontendConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.rows < MIN_DIMENSION {
            return Err(ConfigError::Validation(format!(
                "board.rows must be >= {MIN_DIMENSION}"
            )));
        }
        if self.board.columns < MIN_DIMENSION {
            return Err(ConfigError::Validation(format!(
                "board.columns must be >= {MIN_DIMENSION}"
            )));
        }
        if self.frontend.kind == FrontendKind::Tui && self.board.columns > MAX_TUI_COLUMNS {
            return Err(ConfigError::Validation(format!(
                "board.columns must be <= {MAX_TUI_COLUMNS} for the tui frontend"
            )));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
