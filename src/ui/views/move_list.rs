//! Move list - the game's move history as numbered pairs.

use gpui::{Div, SharedString, div, prelude::*, px, rgb};

use crate::ui::theme::{BORDER_COLOR, MOVE_LIST_BG, TEXT_PRIMARY, TEXT_SECONDARY};
use crate::ui::view_models::{MoveDisplay, MovePairDisplay};

const LAST_MOVE_BG: u32 = 0x4a6da7;
const NUMBER_WIDTH: f32 = 36.0;
const MOVE_WIDTH: f32 = 72.0;

/// Render the move history box
pub fn render_move_list(pairs: &[MovePairDisplay]) -> Div {
    let last_index = pairs.len().checked_sub(1);

    let moves_content = if pairs.is_empty() {
        div().text_color(rgb(TEXT_SECONDARY)).child("No moves yet")
    } else {
        div()
            .flex()
            .flex_col()
            .gap_1()
            .children(pairs.iter().enumerate().map(|(i, pair)| {
                let is_last_row = Some(i) == last_index;
                // the most recent move is the black one if present
                let white_is_last = is_last_row && pair.black.is_none();
                div()
                    .flex()
                    .child(
                        div()
                            .w(px(NUMBER_WIDTH))
                            .text_color(rgb(TEXT_SECONDARY))
                            .child(format!("{}.", pair.number)),
                    )
                    .child(render_move_cell(pair.white.as_ref(), white_is_last, "..."))
                    .child(render_move_cell(
                        pair.black.as_ref(),
                        is_last_row && pair.black.is_some(),
                        "",
                    ))
            }))
    };

    div()
        .flex_1()
        .min_h_0()
        .flex()
        .flex_col()
        .bg(rgb(MOVE_LIST_BG))
        .border_1()
        .border_color(rgb(BORDER_COLOR))
        .rounded_md()
        .overflow_hidden()
        // Header (fixed)
        .child(
            div()
                .p_4()
                .pb_2()
                .text_color(rgb(TEXT_PRIMARY))
                .border_b_1()
                .border_color(rgb(BORDER_COLOR))
                .child("Move History"),
        )
        // Scrollable moves content
        .child(
            div()
                .id("move-list-scroll")
                .flex_1()
                .overflow_y_scroll()
                .p_4()
                .pt_2()
                .child(moves_content),
        )
}

fn render_move_cell(mv: Option<&MoveDisplay>, is_last: bool, placeholder: &'static str) -> Div {
    let text = mv.map_or_else(
        || SharedString::from(placeholder),
        |m| SharedString::from(m.text()),
    );
    div()
        .w(px(MOVE_WIDTH))
        .px_1()
        .rounded(px(3.0))
        .text_color(if mv.is_some() {
            rgb(TEXT_PRIMARY)
        } else {
            rgb(TEXT_SECONDARY)
        })
        .when(is_last, |el| el.bg(rgb(LAST_MOVE_BG)))
        .child(text)
}
