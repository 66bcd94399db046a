//! Read-only 8x8 snapshot of piece placement used for drawing.

use shakmaty::{Chess, Position};

use crate::domain::chess::{Coord, Piece, shakmaty_to_piece, to_square};

/// Grid of pieces indexed by (row, col), row 0 = rank 8
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct VisualBoard {
    cells: [[Option<Piece>; 8]; 8],
}

impl VisualBoard {
    /// Build the grid from a position
    pub fn from_position(position: &Chess) -> Self {
        let mut cells = [[None; 8]; 8];
        for (row, cells_row) in cells.iter_mut().enumerate() {
            for (col, cell) in cells_row.iter_mut().enumerate() {
                *cell = position
                    .board()
                    .piece_at(to_square(row, col))
                    .map(shakmaty_to_piece);
            }
        }
        Self { cells }
    }

    pub fn get(&self, (row, col): Coord) -> Option<Piece> {
        self.cells.get(row)?.get(col).copied().flatten()
    }

    /// Show `piece` moved from `from` to `to` without touching the position.
    ///
    /// Used while a promotion choice is pending: the pawn sits on the back
    /// rank until the user picks its final identity.
    pub fn with_tentative_move(mut self, from: Coord, to: Coord, piece: Piece) -> Self {
        self.cells[from.0][from.1] = None;
        self.cells[to.0][to.1] = Some(piece);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chess::{PieceColor, PieceKind};

    fn occupied(board: &VisualBoard) -> usize {
        (0..8)
            .flat_map(|row| (0..8).map(move |col| (row, col)))
            .filter(|&coord| board.get(coord).is_some())
            .count()
    }

    #[test]
    fn test_initial_arrangement() {
        let board = VisualBoard::from_position(&Chess::default());
        assert_eq!(occupied(&board), 32);
        assert_eq!(
            board.get((0, 4)),
            Some(Piece::new(PieceColor::Black, PieceKind::King))
        );
        assert_eq!(
            board.get((7, 3)),
            Some(Piece::new(PieceColor::White, PieceKind::Queen))
        );
        assert_eq!(board.get((4, 4)), None);
    }

    #[test]
    fn test_out_of_range_is_empty() {
        let board = VisualBoard::from_position(&Chess::default());
        assert_eq!(board.get((8, 0)), None);
        assert_eq!(board.get((0, 8)), None);
    }

    #[test]
    fn test_tentative_move_replaces_target() {
        let pawn = Piece::new(PieceColor::White, PieceKind::Pawn);
        let board = VisualBoard::from_position(&Chess::default()).with_tentative_move(
            (6, 0),
            (0, 1),
            pawn,
        );
        assert_eq!(board.get((6, 0)), None);
        assert_eq!(board.get((0, 1)), Some(pawn));
        assert_eq!(occupied(&board), 31);
    }
}
