//! Square rendering component.

use crate::domain::{Coord, Piece};
use crate::ui::assets::PieceImages;
use crate::ui::components::render_piece;
use crate::ui::theme::{
    DESTINATION_DOT, DESTINATION_DOT_SCALE, HOVER_BORDER, LAST_MOVE_SQUARE, SELECTED_SQUARE,
    square_color,
};
use gpui::{Div, div, prelude::*, px, rgb};

/// Everything needed to draw one square
#[derive(Clone, Copy, Debug, Default)]
pub struct SquareState {
    /// Board coordinate (not the display cell)
    pub coord: Coord,
    /// Piece to draw; None also while the piece is in flight
    pub piece: Option<Piece>,
    pub selected: bool,
    pub destination: bool,
    pub last_move: bool,
    pub hovered: bool,
}

/// Render a single board square with optional piece
pub fn render_square(
    state: SquareState,
    images: &PieceImages,
    square_size: f32,
    piece_size: f32,
) -> Div {
    let background = if state.selected {
        rgb(SELECTED_SQUARE)
    } else if state.last_move {
        rgb(LAST_MOVE_SQUARE)
    } else {
        square_color(state.coord)
    };
    let dot_size = square_size * DESTINATION_DOT_SCALE;

    div()
        .flex_shrink_0() // never shrink - maintain aspect ratio
        .relative()
        .size(px(square_size))
        .bg(background)
        .flex()
        .items_center()
        .justify_center()
        .when(state.hovered, |el| el.border_2().border_color(rgb(HOVER_BORDER)))
        .when_some(state.piece, |el, p| el.child(render_piece(p, images, piece_size)))
        .when(state.destination, |el| {
            el.child(
                div()
                    .absolute()
                    .size_full()
                    .flex()
                    .items_center()
                    .justify_center()
                    .child(
                        div()
                            .size(px(dot_size))
                            .rounded_full()
                            .bg(rgb(DESTINATION_DOT))
                            .opacity(0.6),
                    ),
            )
        })
}
