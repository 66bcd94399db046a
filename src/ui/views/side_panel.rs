//! Side panel - status line, game controls and the move list.

use gpui::{App, Div, Entity, SharedString, div, prelude::*, px, rgb};

use crate::domain::GameMode;
use crate::models::GameModel;
use crate::ui::display::move_pairs;
use crate::ui::theme::{
    BOARD_PADDING, BORDER_COLOR, MOVE_LIST_BG, PANEL_BG, TEXT_PRIMARY, TEXT_SECONDARY,
    TEXT_WARNING,
};
use crate::ui::views::render_move_list;

const CONTROL_BG: u32 = 0x3a3a3a;
const CONTROL_HOVER_BG: u32 = 0x4a4a4a;
const CONTROL_DISABLED: u32 = 0x555555;

/// Render the side panel for a given game model.
pub fn render_side_panel(model: &Entity<GameModel>, cx: &App) -> Div {
    let game = model.read(cx);
    let options = *game.options();
    let status = game.status_text();
    let engine_status = game.engine_status();
    let engine_ok = game.engine_ready();
    let pairs = move_pairs(game.history(), game.position());
    let can_undo = game.can_undo();

    let model_mode = model.clone();
    let model_difficulty = model.clone();
    let model_color = model.clone();
    let model_undo = model.clone();
    let model_new = model.clone();

    let status_box = div()
        .flex()
        .flex_col()
        .gap_1()
        .p_4()
        .bg(rgb(MOVE_LIST_BG))
        .border_1()
        .border_color(rgb(BORDER_COLOR))
        .rounded_md()
        .child(div().text_color(rgb(TEXT_PRIMARY)).child(status))
        .child(
            div()
                .text_sm()
                .text_color(if engine_ok {
                    rgb(TEXT_SECONDARY)
                } else {
                    rgb(TEXT_WARNING)
                })
                .child(engine_status),
        );

    let engine_mode = options.mode == GameMode::HumanVsEngine;
    let settings = div()
        .flex()
        .flex_col()
        .gap_2()
        .child(render_control_button(
            "mode",
            options.mode.label().into(),
            true,
            move |cx| {
                model_mode.update(cx, |game, cx| {
                    game.toggle_mode();
                    cx.notify();
                });
            },
        ))
        .child(render_control_button(
            "difficulty",
            format!("Difficulty: {}", options.difficulty.label()).into(),
            engine_mode,
            move |cx| {
                model_difficulty.update(cx, |game, cx| {
                    game.cycle_difficulty();
                    cx.notify();
                });
            },
        ))
        .child(render_control_button(
            "color",
            format!("Play as {}", options.human_color.name()).into(),
            engine_mode,
            move |cx| {
                model_color.update(cx, |game, cx| {
                    game.toggle_human_color();
                    cx.notify();
                });
            },
        ));

    let actions = div()
        .flex()
        .gap_2()
        .child(render_control_button("undo", "Undo".into(), can_undo, move |cx| {
            model_undo.update(cx, |game, cx| {
                if game.undo_last_move() {
                    cx.notify();
                }
            });
        }))
        .child(render_control_button("new-game", "New Game".into(), true, move |cx| {
            model_new.update(cx, |game, cx| {
                if game.request_new_game() {
                    cx.notify();
                }
            });
        }));

    div()
        .size_full()
        .flex()
        .flex_col()
        .gap_3()
        .bg(rgb(PANEL_BG))
        .p(px(BOARD_PADDING))
        .child(status_box)
        .child(settings)
        .child(actions)
        .child(render_move_list(&pairs))
}

/// Render a panel button
fn render_control_button(
    id: &'static str,
    label: SharedString,
    enabled: bool,
    on_click: impl Fn(&mut App) + 'static,
) -> impl IntoElement {
    div()
        .id(id)
        .px_4()
        .py_2()
        .rounded(px(4.0))
        .text_color(if enabled {
            rgb(TEXT_PRIMARY)
        } else {
            rgb(CONTROL_DISABLED)
        })
        .when(enabled, |el| {
            el.bg(rgb(CONTROL_BG))
                .cursor_pointer()
                .hover(|s| s.bg(rgb(CONTROL_HOVER_BG)))
                .on_click(move |_ev, _window, cx| {
                    on_click(cx);
                })
        })
        .when(!enabled, |el| el.bg(rgb(PANEL_BG)))
        .child(label)
}
