//! Rules adapter over shakmaty.
//!
//! Owns the authoritative position plus the stack of positions that led to
//! it, so moves can be undone and repetitions counted. Everything else in the
//! application reads the game through this type and only changes it through
//! [`Rules::push`], [`Rules::pop`] and [`Rules::reset`].

use std::collections::HashSet;

use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{CastlingMode, Chess, EnPassantMode, File, Move, Position, Square};

use crate::domain::chess::{
    Coord, MoveRequest, Piece, PieceColor, PieceKind, PromotionKind, from_square,
    shakmaty_to_piece, to_square,
};
use crate::domain::outcome::GameOutcome;
use crate::domain::uci::EnginePosition;
use crate::error::GameError;

/// Halfmove clock value at which the 75-move rule ends the game
const SEVENTY_FIVE_MOVE_PLIES: u32 = 150;

/// Number of occurrences of one position that ends the game
const FIVEFOLD: usize = 5;

/// A committed move together with the position it was played from
#[derive(Clone, Debug)]
pub struct PlayedMove {
    pub before: Chess,
    pub request: MoveRequest,
    pub san: String,
    pub capture: bool,
}

#[derive(Clone, Debug)]
pub struct Rules {
    start: Chess,
    start_fen: Option<String>,
    position: Chess,
    history: Vec<PlayedMove>,
}

/// Origin and destination of a legal move as the user would click them.
///
/// Castling is clicked as the king's destination (g1/g8 or c1/c8) rather than
/// shakmaty's king-takes-rook encoding.
fn move_endpoints(m: &Move) -> Option<(Square, Square)> {
    match m {
        Move::Normal { from, to, .. } => Some((*from, *to)),
        Move::EnPassant { from, to, .. } => Some((*from, *to)),
        Move::Castle { king, rook } => {
            let king_dest = if rook.file() == File::H {
                Square::from_coords(File::G, rook.rank())
            } else {
                Square::from_coords(File::C, rook.rank())
            };
            Some((*king, king_dest))
        }
        Move::Put { .. } => None,
    }
}

impl Rules {
    /// Standard starting position
    pub fn new() -> Self {
        Self {
            start: Chess::default(),
            start_fen: None,
            position: Chess::default(),
            history: Vec::new(),
        }
    }

    /// Start from an arbitrary position given as FEN
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        let parsed: Fen = fen
            .parse()
            .map_err(|e| GameError::InvalidFen(format!("{fen}: {e}")))?;
        let position: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| GameError::InvalidFen(format!("{fen}: {e}")))?;
        Ok(Self {
            start: position.clone(),
            start_fen: Some(fen.trim().to_string()),
            position,
            history: Vec::new(),
        })
    }

    /// Return to the starting arrangement and forget all moves
    pub fn reset(&mut self) {
        self.position = self.start.clone();
        self.history.clear();
    }

    pub fn position(&self) -> &Chess {
        &self.position
    }

    pub fn piece_at(&self, (row, col): Coord) -> Option<Piece> {
        if row >= 8 || col >= 8 {
            return None;
        }
        self.position
            .board()
            .piece_at(to_square(row, col))
            .map(shakmaty_to_piece)
    }

    pub fn side_to_move(&self) -> PieceColor {
        self.position.turn().into()
    }

    pub fn is_check(&self) -> bool {
        self.position.is_check()
    }

    /// All legal moves, one entry per promotion choice
    pub fn legal_moves(&self) -> Vec<MoveRequest> {
        self.position
            .legal_moves()
            .iter()
            .filter_map(|m| {
                let (from, to) = move_endpoints(m)?;
                let request = MoveRequest::new(from_square(from), from_square(to));
                Some(match m.promotion().and_then(PromotionKind::from_role) {
                    Some(kind) => request.with_promotion(kind),
                    None => request,
                })
            })
            .collect()
    }

    /// Destination squares of the legal moves starting at `from`
    pub fn destinations_from(&self, from: Coord) -> HashSet<Coord> {
        self.legal_moves()
            .into_iter()
            .filter(|m| m.from == from)
            .map(|m| m.to)
            .collect()
    }

    /// Whether moving `from` -> `to` is a pawn reaching the back rank
    pub fn is_promotion(&self, from: Coord, to: Coord) -> bool {
        let is_pawn = self
            .piece_at(from)
            .is_some_and(|p| p.kind == PieceKind::Pawn);
        is_pawn
            && self
                .legal_moves()
                .iter()
                .any(|m| m.from == from && m.to == to && m.promotion.is_some())
    }

    fn find_move(&self, request: &MoveRequest) -> Option<Move> {
        let from = to_square(request.from.0, request.from.1);
        let to = to_square(request.to.0, request.to.1);
        let promotion = request.promotion.map(PromotionKind::role);
        self.position
            .legal_moves()
            .into_iter()
            .find(|m| move_endpoints(m) == Some((from, to)) && m.promotion() == promotion)
    }

    /// Whether the fully specified move is legal right now
    pub fn is_legal(&self, request: &MoveRequest) -> bool {
        self.find_move(request).is_some()
    }

    /// Apply a fully specified move
    pub fn push(&mut self, request: &MoveRequest) -> Result<&PlayedMove, GameError> {
        let illegal = || GameError::IllegalMove {
            uci: request.to_uci(),
        };
        let m = self.find_move(request).ok_or_else(illegal)?;
        let san = San::from_move(&self.position, m.clone()).to_string();
        let capture = m.is_capture();
        let next = self.position.clone().play(m).map_err(|_| illegal())?;
        let before = std::mem::replace(&mut self.position, next);
        self.history.push(PlayedMove {
            before,
            request: *request,
            san,
            capture,
        });
        Ok(&self.history[self.history.len() - 1])
    }

    /// Take back the last move, returning it
    pub fn pop(&mut self) -> Option<PlayedMove> {
        let played = self.history.pop()?;
        self.position = played.before.clone();
        Some(played)
    }

    /// Number of moves played since the start
    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &[PlayedMove] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&PlayedMove> {
        self.history.last()
    }

    /// The game as an engine should see it
    pub fn engine_position(&self) -> EnginePosition {
        EnginePosition {
            fen: self.start_fen.clone(),
            moves: self.history.iter().map(|m| m.request.to_uci()).collect(),
        }
    }

    fn repetitions(&self) -> usize {
        let key = |pos: &Chess| pos.zobrist_hash::<Zobrist64>(EnPassantMode::Legal);
        let current = key(&self.position);
        1 + self
            .history
            .iter()
            .filter(|m| key(&m.before) == current)
            .count()
    }

    /// Terminal result of the current position, if the game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        let pos = &self.position;
        if pos.is_checkmate() {
            Some(GameOutcome::Checkmate {
                winner: self.side_to_move().opposite(),
            })
        } else if pos.is_stalemate() {
            Some(GameOutcome::Stalemate)
        } else if pos.is_insufficient_material() {
            Some(GameOutcome::InsufficientMaterial)
        } else if pos.halfmoves() >= SEVENTY_FIVE_MOVE_PLIES {
            Some(GameOutcome::SeventyFiveMoves)
        } else if self.repetitions() >= FIVEFOLD {
            Some(GameOutcome::FivefoldRepetition)
        } else if pos.is_game_over() {
            Some(GameOutcome::OtherDraw)
        } else {
            None
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}
