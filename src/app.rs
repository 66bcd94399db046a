//! Application setup and window creation.

use anyhow::Context as _;
use gpui::{App, Bounds, Entity, KeyBinding, WindowBounds, WindowOptions, prelude::*, px, size};
use gpui_component::Root;

use crate::config::Settings;
use crate::domain::{PromotionKind, Rules};
use crate::models::{EngineBackend, GameModel, GameOptions, UciEngine};
use crate::ui::views::{Cancel, ChessBoardView, Confirm, KEY_CONTEXT, NewGame, Promote, Undo};
use crate::ui::{FileAssets, PieceImages};

fn bind_keys(cx: &mut App) {
    let context = Some(KEY_CONTEXT);
    cx.bind_keys([
        KeyBinding::new("ctrl-z", Undo, context),
        KeyBinding::new("cmd-z", Undo, context),
        KeyBinding::new("ctrl-n", NewGame, context),
        KeyBinding::new("cmd-n", NewGame, context),
        KeyBinding::new("enter", Confirm, context),
        KeyBinding::new("escape", Cancel, context),
        KeyBinding::new("q", Promote { kind: PromotionKind::Queen }, context),
        KeyBinding::new("r", Promote { kind: PromotionKind::Rook }, context),
        KeyBinding::new("b", Promote { kind: PromotionKind::Bishop }, context),
        KeyBinding::new("n", Promote { kind: PromotionKind::Knight }, context),
    ]);
}

/// Initialize and run the chess application
pub fn run(cx: &mut App, settings: Settings) {
    gpui_component::init(cx);
    bind_keys(cx);

    // Everything the game needs from disk is resolved before the first frame
    let images = PieceImages::load(&FileAssets::new(), &settings.assets_dir);
    let engine = UciEngine::start(&settings.engine_path)
        .map(|engine| Box::new(engine) as Box<dyn EngineBackend>);
    if let Err(e) = &engine {
        tracing::warn!("Starting without an engine: {e}");
    }

    let rules = match settings.start_fen.as_deref() {
        Some(fen) => Rules::from_fen(fen).unwrap_or_else(|e| {
            tracing::warn!("{e}; starting from the standard position");
            Rules::new()
        }),
        None => Rules::new(),
    };

    let options = GameOptions::from_settings(&settings);
    let model = cx.new(|_| GameModel::new(options, engine, rules));

    if let Err(e) = open_main_window(cx, model, images) {
        tracing::error!("{e:#}");
        cx.quit();
    }
}

fn open_main_window(
    cx: &mut App,
    model: Entity<GameModel>,
    images: PieceImages,
) -> anyhow::Result<()> {
    let bounds = Bounds::centered(None, size(px(900.0), px(600.0)), cx);
    cx.open_window(
        WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(bounds)),
            ..Default::default()
        },
        |window, cx| {
            let view = cx.new(|cx| ChessBoardView::new(model, images, window, cx));
            cx.new(|cx| Root::new(view, window, cx))
        },
    )
    .context("failed to open the main window")?;
    Ok(())
}
