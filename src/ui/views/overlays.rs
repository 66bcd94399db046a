//! Modal overlays drawn on top of the board.

use gpui::{AnyElement, Entity, div, prelude::*, px, rgb, rgba};
use gpui_component::button::{Button, ButtonVariants};

use crate::domain::{GameOutcome, Piece, PieceColor, PromotionKind};
use crate::models::{GameModel, OverlayKind};
use crate::ui::assets::PieceImages;
use crate::ui::components::piece_visual;
use crate::ui::theme::{BOARD_PADDING, MOVE_LIST_BG, OVERLAY_BG, TEXT_PRIMARY, TEXT_SECONDARY};

/// Translucent layer covering exactly the board
fn backdrop(board_size: f32) -> gpui::Div {
    div()
        .absolute()
        .top(px(BOARD_PADDING))
        .left(px(BOARD_PADDING))
        .size(px(board_size))
        .flex()
        .items_center()
        .justify_center()
        .bg(rgba(OVERLAY_BG))
}

fn dialog() -> gpui::Div {
    div()
        .flex()
        .flex_col()
        .items_center()
        .gap_3()
        .p_4()
        .bg(rgb(MOVE_LIST_BG))
        .rounded_md()
        .text_color(rgb(TEXT_PRIMARY))
}

fn promotion_label(kind: PromotionKind) -> &'static str {
    match kind {
        PromotionKind::Queen => "Queen (Q)",
        PromotionKind::Rook => "Rook (R)",
        PromotionKind::Bishop => "Bishop (B)",
        PromotionKind::Knight => "Knight (N)",
    }
}

fn promotion_id(kind: PromotionKind) -> &'static str {
    match kind {
        PromotionKind::Queen => "promote-queen",
        PromotionKind::Rook => "promote-rook",
        PromotionKind::Bishop => "promote-bishop",
        PromotionKind::Knight => "promote-knight",
    }
}

/// Four buttons for picking the promoted piece
pub fn render_promotion_chooser(
    model: &Entity<GameModel>,
    color: PieceColor,
    images: &PieceImages,
    board_size: f32,
    piece_size: f32,
) -> AnyElement {
    let choices = PromotionKind::ALL.into_iter().map(|kind| {
        let model = model.clone();
        div()
            .flex()
            .flex_col()
            .items_center()
            .gap_1()
            .child(piece_visual(
                Piece::new(color, kind.piece_kind()),
                images,
                piece_size,
            ))
            .child(
                Button::new(promotion_id(kind))
                    .label(promotion_label(kind))
                    .compact()
                    .on_click(move |_, _, cx| {
                        model.update(cx, |game, cx| {
                            if game.choose_promotion(kind) {
                                cx.notify();
                            }
                        });
                    }),
            )
    });

    backdrop(board_size)
        .child(
            dialog()
                .child("Promote pawn to:")
                .child(div().flex().gap_3().children(choices)),
        )
        .into_any_element()
}

/// Confirmation prompt for restart or for letting the engine open the game
pub fn render_confirmation(
    model: &Entity<GameModel>,
    kind: OverlayKind,
    message: String,
    board_size: f32,
) -> AnyElement {
    let confirm_label = match kind {
        OverlayKind::ConfirmRestart => "New Game",
        OverlayKind::ConfirmEngineStart => "OK",
    };

    let model_confirm = model.clone();
    let model_cancel = model.clone();
    let mut buttons = div().flex().gap_2().child(
        Button::new("overlay-confirm")
            .label(confirm_label)
            .primary()
            .on_click(move |_, _, cx| {
                model_confirm.update(cx, |game, cx| {
                    if game.confirm_overlay() {
                        cx.notify();
                    }
                });
            }),
    );
    if kind == OverlayKind::ConfirmRestart {
        buttons = buttons.child(Button::new("overlay-cancel").label("Cancel").on_click(
            move |_, _, cx| {
                model_cancel.update(cx, |game, cx| {
                    if game.cancel_overlay() {
                        cx.notify();
                    }
                });
            },
        ));
    }

    backdrop(board_size)
        .child(dialog().child(message).child(buttons))
        .into_any_element()
}

/// Final result banner with a way to play again
pub fn render_game_over(
    model: &Entity<GameModel>,
    outcome: GameOutcome,
    board_size: f32,
) -> AnyElement {
    let model = model.clone();
    let heading = if outcome.is_draw() { "Draw" } else { "Game over" };
    backdrop(board_size)
        .child(
            dialog()
                .child(div().text_sm().text_color(rgb(TEXT_SECONDARY)).child(heading))
                .child(div().text_xl().child(outcome.message()))
                .child(
                    Button::new("game-over-new-game")
                        .label("New Game")
                        .primary()
                        .on_click(move |_, _, cx| {
                            model.update(cx, |game, cx| {
                                if game.request_new_game() {
                                    cx.notify();
                                }
                            });
                        }),
                ),
        )
        .into_any_element()
}
