//! Piece rendering component.

use crate::domain::{Piece, PieceColor, PieceKind};
use crate::ui::assets::PieceImages;
use gpui::{AnyElement, Div, div, img, prelude::*, px, rgb};

/// Unicode chess glyph, used when a piece image is missing
pub fn piece_glyph(piece: Piece) -> &'static str {
    match (piece.color, piece.kind) {
        (PieceColor::White, PieceKind::King) => "♔",
        (PieceColor::White, PieceKind::Queen) => "♕",
        (PieceColor::White, PieceKind::Rook) => "♖",
        (PieceColor::White, PieceKind::Bishop) => "♗",
        (PieceColor::White, PieceKind::Knight) => "♘",
        (PieceColor::White, PieceKind::Pawn) => "♙",
        (PieceColor::Black, PieceKind::King) => "♚",
        (PieceColor::Black, PieceKind::Queen) => "♛",
        (PieceColor::Black, PieceKind::Rook) => "♜",
        (PieceColor::Black, PieceKind::Bishop) => "♝",
        (PieceColor::Black, PieceKind::Knight) => "♞",
        (PieceColor::Black, PieceKind::Pawn) => "♟",
    }
}

/// The image for a piece, or its glyph
pub fn piece_visual(piece: Piece, images: &PieceImages, piece_size: f32) -> AnyElement {
    match images.image_for(piece) {
        Some(path) => img(path).size(px(piece_size)).into_any_element(),
        None => div()
            .text_size(px(piece_size * 0.8))
            .text_color(rgb(0x000000))
            .child(piece_glyph(piece))
            .into_any_element(),
    }
}

/// Render a chess piece centered in its container
pub fn render_piece(piece: Piece, images: &PieceImages, piece_size: f32) -> Div {
    div()
        .size_full()
        .flex()
        .items_center()
        .justify_center()
        .child(piece_visual(piece, images, piece_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyphs_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for color in [PieceColor::White, PieceColor::Black] {
            for kind in [
                PieceKind::Pawn,
                PieceKind::Rook,
                PieceKind::Knight,
                PieceKind::Bishop,
                PieceKind::Queen,
                PieceKind::King,
            ] {
                assert!(seen.insert(piece_glyph(Piece::new(color, kind))));
            }
        }
    }
}
