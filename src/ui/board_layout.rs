//! Pixel geometry of the board panel.
//!
//! Board coordinates are always canonical (row 0 = rank 8). When the layout is
//! flipped the board is drawn from Black's side, so display cells and pixel
//! positions are mirrored while the coordinates handed to the controller are
//! not.

use crate::domain::Coord;
use crate::ui::theme::{BOARD_PADDING, PIECE_SCALE};
use gpui::{Pixels, Size, px, size};

/// A point in board-panel pixels (origin at the panel's top-left corner)
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct BoardPoint {
    pub x: f32,
    pub y: f32,
}

impl BoardPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: BoardPoint) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Smallest square edge the board shrinks to
const MIN_SQUARE_SIZE: f32 = 30.0;

/// Geometry of the board inside its panel. The board is square, starts at
/// the top-left padding corner and fills the shorter panel side.
#[derive(Clone, Copy, Debug)]
pub struct BoardLayout {
    pub panel_size: Size<Pixels>,
    /// Draw the board from Black's side
    pub flipped: bool,
}

impl BoardLayout {
    pub fn new(panel_size: Size<Pixels>) -> Self {
        Self {
            panel_size,
            flipped: false,
        }
    }

    pub fn square_size(&self) -> f32 {
        let width: f32 = self.panel_size.width.into();
        let height: f32 = self.panel_size.height.into();
        let usable = width.min(height) - 2.0 * BOARD_PADDING;
        (usable / 8.0).max(MIN_SQUARE_SIZE)
    }

    pub fn piece_size(&self) -> f32 {
        self.square_size() * PIECE_SCALE
    }

    pub fn board_total_size(&self) -> f32 {
        8.0 * self.square_size()
    }

    /// Map a board coordinate to the cell it is drawn in, and back
    /// (the mapping is its own inverse)
    pub fn display_cell(&self, (row, col): Coord) -> Coord {
        if self.flipped {
            (7 - row, 7 - col)
        } else {
            (row, col)
        }
    }

    /// The square under a panel-relative point, if any
    pub fn pos_to_square(&self, x: f32, y: f32) -> Option<Coord> {
        let square = self.square_size();
        let cell = |offset: f32| {
            let index = ((offset - BOARD_PADDING) / square).floor();
            (0.0..8.0).contains(&index).then_some(index as usize)
        };
        Some(self.display_cell((cell(y)?, cell(x)?)))
    }

    /// Top-left corner of a square, in panel pixels
    pub fn square_origin(&self, coord: Coord) -> BoardPoint {
        let (row, col) = self.display_cell(coord);
        let square = self.square_size();
        BoardPoint::new(
            BOARD_PADDING + square * col as f32,
            BOARD_PADDING + square * row as f32,
        )
    }

    pub fn square_center(&self, coord: Coord) -> BoardPoint {
        let BoardPoint { x, y } = self.square_origin(coord);
        let half = self.square_size() / 2.0;
        BoardPoint::new(x + half, y + half)
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::new(size(px(450.0), px(600.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> BoardLayout {
        // 8 * 50 plus padding on both sides
        let side = 400.0 + BOARD_PADDING * 2.0;
        BoardLayout::new(Size {
            width: px(side),
            height: px(side),
        })
    }

    #[test]
    fn test_square_size_from_panel() {
        assert_eq!(layout().square_size(), 50.0);
        assert_eq!(layout().board_total_size(), 400.0);
    }

    #[test]
    fn test_pos_to_square() {
        let layout = layout();
        assert_eq!(layout.pos_to_square(BOARD_PADDING + 1.0, BOARD_PADDING + 1.0), Some((0, 0)));
        assert_eq!(
            layout.pos_to_square(BOARD_PADDING + 399.0, BOARD_PADDING + 399.0),
            Some((7, 7))
        );
        assert_eq!(layout.pos_to_square(5.0, 5.0), None);
        assert_eq!(layout.pos_to_square(BOARD_PADDING + 401.0, BOARD_PADDING), None);
    }

    #[test]
    fn test_flipped_mapping() {
        let mut layout = layout();
        layout.flipped = true;
        assert_eq!(layout.pos_to_square(BOARD_PADDING + 1.0, BOARD_PADDING + 1.0), Some((7, 7)));
        let center = layout.square_center((7, 7));
        assert_eq!(center, BoardPoint::new(BOARD_PADDING + 25.0, BOARD_PADDING + 25.0));
        assert_eq!(layout.pos_to_square(center.x, center.y), Some((7, 7)));
    }

    #[test]
    fn test_square_center_round_trips() {
        let layout = layout();
        for row in 0..8 {
            for col in 0..8 {
                let c = layout.square_center((row, col));
                assert_eq!(layout.pos_to_square(c.x, c.y), Some((row, col)));
            }
        }
    }

    #[test]
    fn test_distance() {
        let a = BoardPoint::new(0.0, 0.0);
        assert_eq!(a.distance_to(BoardPoint::new(3.0, 4.0)), 5.0);
    }
}
