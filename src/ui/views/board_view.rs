//! Chess board view - the board, its overlays and the side panel.
//!
//! The view owns the frame loop: every 16ms it ticks the [`GameModel`],
//! which advances animations and picks up engine replies.

use std::time::{Duration, Instant};

use gpui::{
    Action, AsyncApp, Context, Entity, FocusHandle, MouseButton, MouseDownEvent, MouseMoveEvent,
    Pixels, Subscription, Task, WeakEntity, Window, actions, canvas, div, prelude::*, px, rgb,
};
use gpui_component::resizable::{h_resizable, resizable_panel};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domain::PromotionKind;
use crate::models::{GameModel, GameSignal};
use crate::ui::assets::PieceImages;
use crate::ui::components::{SquareState, piece_visual, render_square};
use crate::ui::theme::{BOARD_PADDING, INITIAL_LEFT_PANEL, INITIAL_RIGHT_PANEL, PANEL_BG};
use crate::ui::views::overlays::{render_confirmation, render_game_over, render_promotion_chooser};
use crate::ui::views::render_side_panel;

/// Key context the board's bindings are registered under
pub const KEY_CONTEXT: &str = "ChessBoard";

const FRAME_INTERVAL: Duration = Duration::from_millis(16); // ~60fps

actions!(chess, [Undo, NewGame, Confirm, Cancel]);

/// Finish a pending promotion with the given piece
#[derive(Clone, Debug, PartialEq, Deserialize, JsonSchema, Action)]
#[action(namespace = chess)]
pub struct Promote {
    pub kind: PromotionKind,
}

/// The main chess board view that observes a GameModel
pub struct ChessBoardView {
    model: Entity<GameModel>,
    images: PieceImages,
    focus_handle: FocusHandle,
    _subscription: Subscription,
    _frame_task: Task<()>,
}

impl ChessBoardView {
    pub fn new(
        model: Entity<GameModel>,
        images: PieceImages,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let _subscription = cx.observe(&model, |_, _, cx| cx.notify());
        let focus_handle = cx.focus_handle();
        window.focus(&focus_handle);

        let _frame_task = cx.spawn(async move |weak_view: WeakEntity<Self>, cx: &mut AsyncApp| {
            Self::run_frame_loop(weak_view, cx).await;
        });

        Self {
            model,
            images,
            focus_handle,
            _subscription,
            _frame_task,
        }
    }

    /// Tick the model until the view goes away
    async fn run_frame_loop(weak_view: WeakEntity<Self>, cx: &mut AsyncApp) {
        loop {
            cx.background_executor().timer(FRAME_INTERVAL).await;
            if weak_view.update(cx, |view, cx| view.tick(cx)).is_err() {
                break;
            }
        }
    }

    fn tick(&mut self, cx: &mut Context<Self>) {
        let now = Instant::now();
        let signals = self.model.update(cx, |game, cx| {
            if game.on_tick(now) {
                cx.notify();
            }
            game.drain_signals()
        });
        for signal in signals {
            play_signal(signal);
        }
    }

    fn update_model(&mut self, cx: &mut Context<Self>, f: impl FnOnce(&mut GameModel) -> bool) {
        self.model.update(cx, |game, cx| {
            if f(game) {
                cx.notify();
            }
        });
    }

    fn undo(&mut self, _: &Undo, _window: &mut Window, cx: &mut Context<Self>) {
        self.update_model(cx, GameModel::undo_last_move);
    }

    fn new_game(&mut self, _: &NewGame, _window: &mut Window, cx: &mut Context<Self>) {
        self.update_model(cx, GameModel::request_new_game);
    }

    fn confirm(&mut self, _: &Confirm, _window: &mut Window, cx: &mut Context<Self>) {
        self.update_model(cx, GameModel::confirm_overlay);
    }

    fn cancel(&mut self, _: &Cancel, _window: &mut Window, cx: &mut Context<Self>) {
        self.update_model(cx, |game| game.cancel_promotion() || game.cancel_overlay());
    }

    fn promote(&mut self, action: &Promote, _window: &mut Window, cx: &mut Context<Self>) {
        let kind = action.kind;
        self.update_model(cx, |game| game.choose_promotion(kind));
    }
}

/// Sound hook. No audio backend is wired in; the events are only traced.
fn play_signal(signal: GameSignal) {
    tracing::trace!("signal: {signal:?}");
}

impl Render for ChessBoardView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let model = self.model.clone();
        let model_down = model.clone();
        let model_move = model.clone();
        let model_measure = model.clone();

        let game = self.model.read(cx);
        let layout = *game.layout();

        // Sizing based on measured panel dimensions
        let square_size = layout.square_size();
        let piece_size = layout.piece_size();
        let board_total_size = layout.board_total_size();

        let animation = game.animation().copied();
        let vacated = animation.map(|a| a.origin());
        let selected = game.selected_square();
        let destinations = game.destinations().cloned().unwrap_or_default();
        let last_move = game.last_move();
        let hovered = game.hovered();
        let visual = *game.visual_board();

        // Collect square states in display order (can't borrow game in closure)
        let squares: Vec<SquareState> = (0..8)
            .flat_map(|row| (0..8).map(move |col| (row, col)))
            .map(|cell| {
                let coord = layout.display_cell(cell);
                SquareState {
                    coord,
                    piece: visual.get(coord).filter(|_| vacated != Some(coord)),
                    selected: selected == Some(coord),
                    destination: destinations.contains(&coord),
                    last_move: last_move.is_some_and(|(from, to)| from == coord || to == coord),
                    hovered: hovered == Some(coord),
                }
            })
            .collect();

        // The moving piece, drawn above the board
        let flying_piece = animation.map(|a| {
            div()
                .absolute()
                .left(px(a.current.x - piece_size / 2.0))
                .top(px(a.current.y - piece_size / 2.0))
                .size(px(piece_size))
                .child(piece_visual(a.piece, &self.images, piece_size))
        });

        let overlay = if let Some(outcome) = game.outcome() {
            Some(render_game_over(&model, outcome, board_total_size))
        } else if let Some(pending) = game.pending_promotion() {
            Some(render_promotion_chooser(
                &model,
                pending.color,
                &self.images,
                board_total_size,
                piece_size,
            ))
        } else {
            game.overlay()
                .zip(game.overlay_prompt())
                .map(|(kind, prompt)| render_confirmation(&model, kind, prompt, board_total_size))
        };

        // Board element with fixed size - always maintains 1:1 aspect ratio
        let images = &self.images;
        let board = div()
            .flex_shrink_0()
            .flex()
            .flex_col()
            .w(px(board_total_size))
            .h(px(board_total_size))
            .overflow_hidden()
            .rounded_md()
            .children(squares.chunks(8).map(|row| {
                div().flex().flex_shrink_0().children(
                    row.iter()
                        .map(|state| render_square(*state, images, square_size, piece_size)),
                )
            }));

        let board_panel_content = div()
            .id("board-panel")
            .relative()
            .size_full()
            .overflow_hidden()
            .bg(rgb(PANEL_BG))
            .p(px(BOARD_PADDING))
            .child(board)
            .when_some(flying_piece, |el, fp| el.child(fp))
            .when_some(overlay, |el, overlay| el.child(overlay))
            .on_mouse_down(
                MouseButton::Left,
                move |ev: &MouseDownEvent, _window, cx| {
                    model_down.update(cx, |game, cx| {
                        let pos = ev.position;
                        if game.on_pointer_down(pos.x.into(), pos.y.into()) {
                            cx.notify();
                        }
                    });
                },
            )
            .on_mouse_move(move |ev: &MouseMoveEvent, _, cx| {
                model_move.update(cx, |game, cx| {
                    let pos = ev.position;
                    if game.on_pointer_move(pos.x.into(), pos.y.into()) {
                        cx.notify();
                    }
                });
            });

        // Canvas to measure actual panel size
        let measure_canvas = canvas(
            move |bounds, _window, cx| {
                model_measure.update(cx, |game, cx| {
                    if game.set_panel_size(bounds.size) {
                        cx.notify();
                    }
                });
            },
            |_, _, _, _| {},
        )
        .absolute()
        .top_0()
        .left_0()
        .size_full();

        // Wrap board panel content with measuring canvas
        let board_panel_with_measure = div()
            .relative()
            .size_full()
            .child(measure_canvas)
            .child(board_panel_content);

        let side_panel_content = render_side_panel(&model, cx);

        // Main resizable layout
        div()
            .size_full()
            .track_focus(&self.focus_handle)
            .key_context(KEY_CONTEXT)
            .on_action(cx.listener(Self::undo))
            .on_action(cx.listener(Self::new_game))
            .on_action(cx.listener(Self::confirm))
            .on_action(cx.listener(Self::cancel))
            .on_action(cx.listener(Self::promote))
            .child(
                h_resizable("chess-layout")
                    .child(
                        resizable_panel()
                            .size(px(INITIAL_LEFT_PANEL))
                            .size_range(px(320.)..px(1200.))
                            .child(board_panel_with_measure),
                    )
                    .child(
                        resizable_panel()
                            .size(px(INITIAL_RIGHT_PANEL))
                            .size_range(px(220.)..Pixels::MAX)
                            .child(side_panel_content),
                    ),
            )
    }
}
