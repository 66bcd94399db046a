//! Pure chess domain: pieces, squares, rules, outcomes and UCI text.
//! No GPUI dependencies live here.

pub mod board;
pub mod chess;
pub mod mode;
pub mod outcome;
pub mod rules;
pub mod uci;

pub use board::VisualBoard;
pub use chess::{Coord, MoveRequest, Piece, PieceColor, PieceKind, PromotionKind};
pub use mode::{Difficulty, GameMode};
pub use outcome::GameOutcome;
pub use rules::Rules;
pub use uci::EnginePosition;
