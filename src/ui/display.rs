//! Display generation for the move list.
//!
//! This module transforms game state into display-ready view models.
//! It lives in the UI layer and depends on domain + models, not vice versa.

use shakmaty::{Chess, Color as SColor, Position};

use crate::domain::rules::PlayedMove;
use crate::ui::view_models::{MoveDisplay, MovePairDisplay};

/// Group the played moves into numbered White/Black pairs.
///
/// `current` is the position after the last move; the check markers of each
/// move are read from the position that follows it.
pub fn move_pairs(history: &[PlayedMove], current: &Chess) -> Vec<MovePairDisplay> {
    let mut pairs: Vec<MovePairDisplay> = Vec::new();

    for (i, played) in history.iter().enumerate() {
        let after = history.get(i + 1).map_or(current, |next| &next.before);
        let display = MoveDisplay {
            san: played.san.clone(),
            is_check: after.is_check(),
            is_checkmate: after.is_checkmate(),
        };
        let number = played.before.fullmoves().get();

        match played.before.turn() {
            SColor::White => pairs.push(MovePairDisplay {
                number,
                white: Some(display),
                black: None,
            }),
            SColor::Black => match pairs.last_mut() {
                Some(pair) if pair.number == number && pair.black.is_none() => {
                    pair.black = Some(display);
                }
                _ => pairs.push(MovePairDisplay {
                    number,
                    white: None,
                    black: Some(display),
                }),
            },
        }
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MoveRequest, Rules};

    fn play_all(rules: &mut Rules, moves: &[&str]) {
        for uci in moves {
            rules.push(&MoveRequest::parse_uci(uci).unwrap()).unwrap();
        }
    }

    #[test]
    fn test_pairs_from_start() {
        let mut rules = Rules::new();
        play_all(&mut rules, &["e2e4", "e7e5", "g1f3"]);
        let pairs = move_pairs(rules.history(), rules.position());
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].number, 1);
        assert_eq!(pairs[0].white.as_ref().unwrap().text(), "e4");
        assert_eq!(pairs[0].black.as_ref().unwrap().text(), "e5");
        assert_eq!(pairs[1].number, 2);
        assert_eq!(pairs[1].white.as_ref().unwrap().text(), "Nf3");
        assert!(pairs[1].black.is_none());
    }

    #[test]
    fn test_black_first_leaves_white_empty() {
        let mut rules =
            Rules::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1")
                .unwrap();
        play_all(&mut rules, &["e7e5", "g1f3"]);
        let pairs = move_pairs(rules.history(), rules.position());
        assert_eq!(pairs.len(), 2);
        assert!(pairs[0].white.is_none());
        assert_eq!(pairs[0].black.as_ref().unwrap().san, "e5");
        assert_eq!(pairs[1].number, 2);
    }

    #[test]
    fn test_check_markers() {
        let mut rules = Rules::new();
        play_all(&mut rules, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        let pairs = move_pairs(rules.history(), rules.position());
        assert_eq!(pairs[1].black.as_ref().unwrap().text(), "Qh4#");
        assert!(!pairs[0].white.as_ref().unwrap().is_check);
    }
}
