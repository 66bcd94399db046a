//! Text of the UCI protocol: the commands sent to an engine and the few
//! replies the adapter cares about. The process itself is driven from
//! `models::engine`.

use std::fmt;
use std::time::Duration;

/// Lines the application writes to an engine
#[derive(Debug, Clone)]
pub enum UciCommand {
    Uci,
    IsReady,
    SetOption { name: String, value: String },
    /// `None` means the standard starting position
    Position { fen: Option<String>, moves: Vec<String> },
    /// Search for a fixed amount of time
    GoMoveTime(Duration),
    /// Stop searching and report the best move so far
    Stop,
    Quit,
}

impl fmt::Display for UciCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UciCommand::Uci => f.write_str("uci"),
            UciCommand::IsReady => f.write_str("isready"),
            UciCommand::SetOption { name, value } => write!(f, "setoption name {name} value {value}"),
            UciCommand::Position { fen, moves } => {
                match fen {
                    Some(fen) => write!(f, "position fen {fen}")?,
                    None => f.write_str("position startpos")?,
                }
                if !moves.is_empty() {
                    write!(f, " moves {}", moves.join(" "))?;
                }
                Ok(())
            }
            // movetime 0 means "no limit" to some engines
            UciCommand::GoMoveTime(budget) => write!(f, "go movetime {}", budget.as_millis().max(1)),
            UciCommand::Stop => f.write_str("stop"),
            UciCommand::Quit => f.write_str("quit"),
        }
    }
}

/// The engine output lines the adapter waits for
#[derive(Debug, Clone, PartialEq)]
pub enum UciOutputKind {
    UciOk,
    ReadyOk,
    /// Everything after `bestmove `
    BestMove(String),
    /// `info`, `id`, `option` and anything else; logged, never acted on
    Other,
}

impl UciOutputKind {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "uciok" => UciOutputKind::UciOk,
            "readyok" => UciOutputKind::ReadyOk,
            line => match line.strip_prefix("bestmove") {
                Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => {
                    UciOutputKind::BestMove(rest.trim().to_string())
                }
                _ => UciOutputKind::Other,
            },
        }
    }
}

/// Extract the move from the payload of a `bestmove` line.
///
/// Returns None when the engine reports `(none)` or `0000`, which it does
/// for positions without legal moves.
pub fn best_move_text(payload: &str) -> Option<&str> {
    let mv = payload.split_whitespace().next()?;
    match mv {
        "(none)" | "0000" => None,
        other => Some(other),
    }
}

/// What the engine needs to reconstruct the game: a starting FEN (None for
/// the standard start) and the moves played since, in UCI notation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnginePosition {
    pub fen: Option<String>,
    pub moves: Vec<String>,
}

impl EnginePosition {
    pub fn command(&self) -> UciCommand {
        UciCommand::Position {
            fen: self.fen.clone(),
            moves: self.moves.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_startpos() {
        let cmd = UciCommand::Position {
            fen: None,
            moves: vec![],
        };
        assert_eq!(cmd.to_string(), "position startpos");
    }

    #[test]
    fn test_position_with_moves() {
        let cmd = UciCommand::Position {
            fen: None,
            moves: vec!["e2e4".to_string(), "e7e5".to_string()],
        };
        assert_eq!(cmd.to_string(), "position startpos moves e2e4 e7e5");
    }

    #[test]
    fn test_position_fen() {
        let position = EnginePosition {
            fen: Some("8/P7/8/8/8/8/8/k6K w - - 0 1".to_string()),
            moves: vec!["a7a8q".to_string()],
        };
        assert_eq!(
            position.command().to_string(),
            "position fen 8/P7/8/8/8/8/8/k6K w - - 0 1 moves a7a8q"
        );
    }

    #[test]
    fn test_go_movetime() {
        let cmd = UciCommand::GoMoveTime(Duration::from_millis(1500));
        assert_eq!(cmd.to_string(), "go movetime 1500");
        // a zero budget still asks for a search
        assert_eq!(
            UciCommand::GoMoveTime(Duration::ZERO).to_string(),
            "go movetime 1"
        );
    }

    #[test]
    fn test_skill_option() {
        let cmd = UciCommand::SetOption {
            name: "Skill Level".to_string(),
            value: "10".to_string(),
        };
        assert_eq!(cmd.to_string(), "setoption name Skill Level value 10");
    }

    #[test]
    fn test_parse_ignores_chatter() {
        for line in [
            "info depth 20 score cp 35 pv e2e4 e7e5",
            "id name Stockfish 16",
            "option name Skill Level type spin default 20 min 0 max 20",
            "bestmovefoo",
        ] {
            assert_eq!(UciOutputKind::parse(line), UciOutputKind::Other, "{line}");
        }
    }

    #[test]
    fn test_parse_handshake() {
        assert_eq!(UciOutputKind::parse("uciok\r"), UciOutputKind::UciOk);
        assert_eq!(UciOutputKind::parse("readyok"), UciOutputKind::ReadyOk);
    }

    #[test]
    fn test_parse_bestmove() {
        let kind = UciOutputKind::parse("bestmove e2e4 ponder e7e5");
        assert_eq!(kind, UciOutputKind::BestMove("e2e4 ponder e7e5".to_string()));
        assert_eq!(best_move_text("e2e4 ponder e7e5"), Some("e2e4"));
        assert_eq!(best_move_text("a7a8q"), Some("a7a8q"));
    }

    #[test]
    fn test_bestmove_none() {
        assert_eq!(
            UciOutputKind::parse("bestmove (none)"),
            UciOutputKind::BestMove("(none)".to_string())
        );
        assert_eq!(best_move_text("(none)"), None);
        assert_eq!(best_move_text("0000"), None);
        assert_eq!(best_move_text(""), None);
    }
}
