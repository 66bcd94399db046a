//! Configuration loading from `chess.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::domain::{Difficulty, GameMode, PieceColor};
use crate::error::ConfigError;

const CONFIG_FILE: &str = "chess.toml";

/// Environment variable that overrides `engine_path`
const ENGINE_PATH_ENV: &str = "CHESS_ENGINE_PATH";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// UCI engine executable; a bare name is looked up on PATH
    pub engine_path: PathBuf,
    pub game_mode: GameMode,
    pub difficulty: Difficulty,
    /// Color the human plays in engine mode
    pub human_color: PieceColor,
    /// Animation speed in pixels per tick
    pub animation_speed: f32,
    /// Pause before the engine is asked for a move
    pub engine_delay_ms: u64,
    /// Directory holding the piece images
    pub assets_dir: PathBuf,
    /// Play from this FEN instead of the standard starting position
    pub start_fen: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            engine_path: PathBuf::from("stockfish"),
            game_mode: GameMode::default(),
            difficulty: Difficulty::default(),
            human_color: PieceColor::White,
            animation_speed: 30.0,
            engine_delay_ms: 500,
            assets_dir: PathBuf::from("assets"),
            start_fen: None,
        }
    }
}

impl Settings {
    pub fn engine_delay(&self) -> Duration {
        Duration::from_millis(self.engine_delay_ms)
    }

    /// Load settings from the first `chess.toml` found, falling back to
    /// defaults. A broken file is reported and ignored.
    pub fn load() -> Self {
        let mut settings = match Self::find_config() {
            Some(path) => match Self::from_file(&path) {
                Ok(settings) => {
                    tracing::info!("Loaded config from {}", path.display());
                    settings
                }
                Err(e) => {
                    tracing::warn!("{e}; using defaults");
                    Self::default()
                }
            },
            None => {
                tracing::info!("No {CONFIG_FILE} found, using defaults");
                Self::default()
            }
        };
        if let Some(path) = std::env::var_os(ENGINE_PATH_ENV) {
            settings.engine_path = PathBuf::from(path);
        }
        settings
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn find_config() -> Option<PathBuf> {
        let mut candidates = vec![
            PathBuf::from(CONFIG_FILE),
            PathBuf::from("..").join(CONFIG_FILE),
        ];
        if let Some(dir) = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(Path::to_path_buf))
        {
            candidates.push(dir.join(CONFIG_FILE));
        }
        candidates.into_iter().find(|p| p.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings.game_mode, GameMode::HumanVsHuman);
        assert_eq!(settings.difficulty, Difficulty::Medium);
        assert_eq!(settings.human_color, PieceColor::White);
        assert_eq!(settings.engine_delay(), Duration::from_millis(500));
        assert_eq!(settings.animation_speed, 30.0);
    }

    #[test]
    fn test_full_file() {
        let settings = Settings::from_toml(
            r#"
            engine_path = "/usr/games/stockfish"
            game_mode = "engine"
            difficulty = "unbeatable"
            human_color = "black"
            animation_speed = 45.0
            engine_delay_ms = 250
            start_fen = "8/P7/8/8/8/8/8/k6K w - - 0 1"
            "#,
        )
        .unwrap();
        assert_eq!(settings.engine_path, PathBuf::from("/usr/games/stockfish"));
        assert_eq!(settings.game_mode, GameMode::HumanVsEngine);
        assert_eq!(settings.difficulty, Difficulty::Unbeatable);
        assert_eq!(settings.human_color, PieceColor::Black);
        assert_eq!(settings.animation_speed, 45.0);
        assert_eq!(settings.engine_delay_ms, 250);
        assert_eq!(
            settings.start_fen.as_deref(),
            Some("8/P7/8/8/8/8/8/k6K w - - 0 1")
        );
    }

    #[test]
    fn test_unknown_difficulty_is_rejected() {
        assert!(Settings::from_toml(r#"difficulty = "grandmaster""#).is_err());
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = Settings::from_file(Path::new("/nonexistent/chess.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
