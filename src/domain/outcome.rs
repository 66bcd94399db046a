//! Terminal game results.

use crate::domain::chess::PieceColor;

/// How a finished game ended
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameOutcome {
    Checkmate { winner: PieceColor },
    Stalemate,
    InsufficientMaterial,
    /// Seventy-five moves without a capture or pawn move
    SeventyFiveMoves,
    FivefoldRepetition,
    OtherDraw,
}

impl GameOutcome {
    pub fn winner(&self) -> Option<PieceColor> {
        match self {
            GameOutcome::Checkmate { winner } => Some(*winner),
            _ => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        self.winner().is_none()
    }

    /// Final message shown over the frozen board
    pub fn message(&self) -> String {
        match self {
            GameOutcome::Checkmate { winner } => format!("Checkmate! {} wins", winner.name()),
            GameOutcome::Stalemate => "Stalemate! It's a draw".to_string(),
            GameOutcome::InsufficientMaterial => "Draw by insufficient material".to_string(),
            GameOutcome::SeventyFiveMoves => "Draw by the 75-move rule".to_string(),
            GameOutcome::FivefoldRepetition => "Draw by fivefold repetition".to_string(),
            GameOutcome::OtherDraw => "Game drawn".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkmate_has_winner() {
        let outcome = GameOutcome::Checkmate {
            winner: PieceColor::Black,
        };
        assert_eq!(outcome.winner(), Some(PieceColor::Black));
        assert!(!outcome.is_draw());
        assert_eq!(outcome.message(), "Checkmate! Black wins");
    }

    #[test]
    fn test_draws_have_no_winner() {
        for outcome in [
            GameOutcome::Stalemate,
            GameOutcome::InsufficientMaterial,
            GameOutcome::SeventyFiveMoves,
            GameOutcome::FivefoldRepetition,
            GameOutcome::OtherDraw,
        ] {
            assert!(outcome.is_draw());
            assert!(!outcome.message().is_empty());
        }
    }
}
