mod piece;
mod square;

pub use piece::{piece_visual, render_piece};
pub use square::{SquareState, render_square};
