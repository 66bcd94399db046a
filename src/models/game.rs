//! Game state model - the interaction controller.
//!
//! `GameModel` turns pointer events and frame ticks into chess moves. All of
//! its transient state lives in a single [`Phase`]; every entry point matches
//! on the current phase, so states such as "animating while a promotion is
//! pending" cannot be represented.
//!
//! The position is only changed from here, through [`Rules`]. Engine moves
//! are computed on the engine worker thread and picked up by `on_tick`.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use gpui::{Pixels, Size};
use shakmaty::Chess;

use crate::config::Settings;
use crate::domain::rules::PlayedMove;
use crate::domain::{
    Coord, Difficulty, GameMode, GameOutcome, MoveRequest, PieceColor, PromotionKind, Rules,
    VisualBoard,
};
use crate::error::EngineError;
use crate::models::animation::Animation;
use crate::models::engine::EngineBackend;
use crate::models::engine_worker::{EngineJob, EngineReply, EngineWorker};
use crate::models::schedule::DelayedTask;
use crate::ui::BoardLayout;

/// Player-facing settings that shape a game
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameOptions {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    /// Color the human plays in engine mode
    pub human_color: PieceColor,
    /// Pixels travelled per tick by a moving piece
    pub animation_speed: f32,
    /// Pause before the engine is asked for its move
    pub engine_delay: Duration,
}

impl GameOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            mode: settings.game_mode,
            difficulty: settings.difficulty,
            human_color: settings.human_color,
            animation_speed: settings.animation_speed,
            engine_delay: settings.engine_delay(),
        }
    }
}

impl Default for GameOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Events worth a sound effect, drained by the view once per frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameSignal {
    Select,
    Deselect,
    Move,
    Capture,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayKind {
    /// The engine moves first; wait for the user before starting it
    ConfirmEngineStart,
    /// "New Game" pressed mid-game
    ConfirmRestart,
}

/// A picked-up piece and where it may go
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub square: Coord,
    pub destinations: HashSet<Coord>,
}

/// A pawn on the back rank waiting for the human to pick its new identity
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingPromotion {
    pub from: Coord,
    pub to: Coord,
    pub color: PieceColor,
}

/// What the controller is doing right now
#[derive(Clone, Debug)]
pub enum Phase {
    Idle,
    Selecting(Selection),
    Animating(Animation),
    PromotionPending(PendingPromotion),
    /// A search is running on the engine worker
    EngineThinking { generation: u64 },
    Overlay(OverlayKind),
    Frozen(GameOutcome),
}

enum EngineSlot {
    Ready(EngineWorker),
    Unavailable(String),
    Terminated,
}

/// The main game model containing all chess game state
pub struct GameModel {
    rules: Rules,
    visual: VisualBoard,
    phase: Phase,
    options: GameOptions,
    engine: EngineSlot,
    engine_trigger: Option<DelayedTask>,
    /// Bumped on every restart and undo; engine replies from older
    /// generations are dropped
    generation: u64,
    /// Set when the engine answered without a usable move
    engine_note: Option<String>,
    hovered: Option<Coord>,
    signals: Vec<GameSignal>,
    layout: BoardLayout,
}

impl GameModel {
    /// A controller playing from `rules`' starting position. A failed engine
    /// start leaves engine turns to be played by hand.
    pub fn new(
        options: GameOptions,
        engine: Result<Box<dyn EngineBackend>, EngineError>,
        rules: Rules,
    ) -> Self {
        let engine = match engine.and_then(EngineWorker::spawn) {
            Ok(worker) => EngineSlot::Ready(worker),
            Err(e) => {
                tracing::warn!("{e}; engine turns will be played by hand");
                EngineSlot::Unavailable(e.to_string())
            }
        };
        let mut model = Self {
            visual: VisualBoard::from_position(rules.position()),
            rules,
            phase: Phase::Idle,
            options,
            engine,
            engine_trigger: None,
            generation: 0,
            engine_note: None,
            hovered: None,
            signals: Vec::new(),
            layout: BoardLayout::default(),
        };
        model.restart();
        model
    }

    // ---- input ----

    /// A press at panel-relative pixel coordinates
    pub fn on_pointer_down(&mut self, x: f32, y: f32) -> bool {
        match self.layout.pos_to_square(x, y) {
            Some(coord) => self.handle_square_activated(coord),
            None => false,
        }
    }

    /// Track the hovered square. Returns true if it changed.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) -> bool {
        let hovered = self.layout.pos_to_square(x, y);
        let changed = hovered != self.hovered;
        self.hovered = hovered;
        changed
    }

    /// Click on a board square. Returns true if anything changed.
    pub fn handle_square_activated(&mut self, coord: Coord) -> bool {
        if !self.accepts_board_input() {
            return false;
        }
        let selection = match &self.phase {
            Phase::Selecting(selection) => Some(selection.clone()),
            _ => None,
        };
        let own_piece = self
            .rules
            .piece_at(coord)
            .is_some_and(|p| p.color == self.rules.side_to_move());

        match selection {
            None if own_piece => {
                self.select(coord);
                true
            }
            None => false,
            Some(selection) if selection.destinations.contains(&coord) => {
                let request = MoveRequest::new(selection.square, coord);
                let awaits_promotion = self.rules.is_promotion(selection.square, coord);
                self.phase = Phase::Idle;
                self.begin_animation(request, awaits_promotion);
                true
            }
            Some(selection) if selection.square != coord && own_piece => {
                self.select(coord);
                true
            }
            Some(_) => {
                self.phase = Phase::Idle;
                self.signals.push(GameSignal::Deselect);
                true
            }
        }
    }

    fn accepts_board_input(&self) -> bool {
        matches!(self.phase, Phase::Idle | Phase::Selecting(_)) && !self.engine_owns_turn()
    }

    fn select(&mut self, square: Coord) {
        let destinations = self.rules.destinations_from(square);
        self.phase = Phase::Selecting(Selection {
            square,
            destinations,
        });
        self.signals.push(GameSignal::Select);
    }

    // ---- frame tick ----

    /// Advance animations, collect engine replies and fire the engine
    /// trigger. Returns true if anything visible changed.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        let mut changed = self.poll_engine();

        if let Phase::Animating(animation) = &mut self.phase {
            changed = true;
            if animation.advance() {
                let animation = *animation;
                self.finish_animation(animation);
            }
        }

        let fire = self
            .engine_trigger
            .as_mut()
            .is_some_and(|trigger| trigger.poll(now));
        if fire {
            self.engine_trigger = None;
            self.start_engine_search();
            changed = true;
        }

        changed
    }

    // ---- moves ----

    fn begin_animation(&mut self, request: MoveRequest, awaits_promotion: bool) {
        let Some(piece) = self.rules.piece_at(request.from) else {
            tracing::error!("No piece to move for {}", request.to_uci());
            return;
        };
        self.phase = Phase::Animating(Animation::new(
            request,
            piece,
            self.layout.square_center(request.from),
            self.layout.square_center(request.to),
            self.options.animation_speed,
            awaits_promotion,
        ));
    }

    fn finish_animation(&mut self, animation: Animation) {
        let request = animation.request;
        if animation.awaits_promotion {
            self.visual = VisualBoard::from_position(self.rules.position()).with_tentative_move(
                request.from,
                request.to,
                animation.piece,
            );
            self.phase = Phase::PromotionPending(PendingPromotion {
                from: request.from,
                to: request.to,
                color: animation.piece.color,
            });
        } else {
            self.commit(request);
        }
    }

    fn commit(&mut self, request: MoveRequest) {
        match self.rules.push(&request) {
            Ok(played) => {
                tracing::debug!("Played {} ({})", played.san, request.to_uci());
                let signal = if played.capture {
                    GameSignal::Capture
                } else {
                    GameSignal::Move
                };
                self.signals.push(signal);
                self.engine_note = None;
            }
            Err(e) => tracing::error!("{e}; commit skipped"),
        }
        self.visual = VisualBoard::from_position(self.rules.position());
        self.phase = Phase::Idle;
        self.after_position_change();
    }

    /// Freeze on a finished game, otherwise hand the turn to the engine if
    /// it owns it
    fn after_position_change(&mut self) {
        if let Some(outcome) = self.rules.outcome() {
            tracing::info!("{}", outcome.message());
            self.engine_trigger = None;
            self.phase = Phase::Frozen(outcome);
        } else {
            self.schedule_engine_if_due();
        }
    }

    /// Finish a pending promotion with the chosen piece
    pub fn choose_promotion(&mut self, kind: PromotionKind) -> bool {
        let Phase::PromotionPending(pending) = self.phase else {
            return false;
        };
        let request = MoveRequest::new(pending.from, pending.to).with_promotion(kind);
        if self.rules.is_legal(&request) {
            self.commit(request);
        } else {
            tracing::error!("Promotion {} is not legal", request.to_uci());
            self.cancel_promotion();
        }
        true
    }

    /// Abandon a pending promotion; the pawn returns to its square
    pub fn cancel_promotion(&mut self) -> bool {
        if !matches!(self.phase, Phase::PromotionPending(_)) {
            return false;
        }
        self.visual = VisualBoard::from_position(self.rules.position());
        self.phase = Phase::Idle;
        true
    }

    /// Take back the last move, or the last two in engine mode when the
    /// engine has already replied. With fewer moves played, takes back what
    /// there is.
    pub fn undo_last_move(&mut self) -> bool {
        if !matches!(self.phase, Phase::Idle | Phase::Selecting(_)) || self.rules.move_count() == 0
        {
            return false;
        }
        let plies = if self.plays_engine() && self.rules.side_to_move() == self.options.human_color
        {
            2
        } else {
            1
        };
        let undone = (0..plies)
            .take_while(|_| self.rules.pop().is_some())
            .count();
        tracing::debug!("Undid {undone} ply, {} left", self.rules.move_count());

        self.generation += 1;
        self.engine_trigger = None;
        self.engine_note = None;
        self.visual = VisualBoard::from_position(self.rules.position());
        self.phase = Phase::Idle;
        self.after_position_change();
        true
    }

    // ---- engine ----

    fn plays_engine(&self) -> bool {
        self.options.mode == GameMode::HumanVsEngine && matches!(self.engine, EngineSlot::Ready(_))
    }

    /// Whether the side to move is played by a working engine
    pub fn engine_owns_turn(&self) -> bool {
        self.plays_engine() && self.rules.side_to_move() == self.options.human_color.opposite()
    }

    fn schedule_engine_if_due(&mut self) {
        if self.engine_owns_turn() && self.engine_trigger.is_none() {
            self.engine_trigger = Some(DelayedTask::after(self.options.engine_delay));
        }
    }

    fn start_engine_search(&mut self) {
        if !matches!(self.phase, Phase::Idle) || !self.engine_owns_turn() {
            tracing::debug!("Engine trigger abandoned");
            return;
        }
        let EngineSlot::Ready(worker) = &self.engine else {
            return;
        };
        let difficulty = self.options.difficulty;
        let job = EngineJob {
            generation: self.generation,
            position: self.rules.engine_position(),
            skill: difficulty.skill_level(),
            budget: difficulty.time_budget(),
        };
        tracing::info!(
            "Requesting engine move ({}, skill {}, {:?})",
            difficulty.label(),
            job.skill,
            job.budget
        );
        match worker.submit(job) {
            Ok(()) => {
                self.phase = Phase::EngineThinking {
                    generation: self.generation,
                }
            }
            Err(_) => self.mark_engine_terminated(),
        }
    }

    fn poll_engine(&mut self) -> bool {
        let EngineSlot::Ready(worker) = &self.engine else {
            return false;
        };
        let mut replies = Vec::new();
        let mut disconnected = false;
        loop {
            match worker.try_recv() {
                Ok(Some(reply)) => replies.push(reply),
                Ok(None) => break,
                Err(_) => {
                    disconnected = true;
                    break;
                }
            }
        }

        let mut changed = false;
        for reply in replies {
            changed |= self.handle_engine_reply(reply);
        }
        if disconnected {
            self.mark_engine_terminated();
            changed = true;
        }
        changed
    }

    fn handle_engine_reply(&mut self, reply: EngineReply) -> bool {
        if matches!(reply.result, Err(EngineError::Terminated)) {
            self.mark_engine_terminated();
            return true;
        }
        let current = matches!(
            self.phase,
            Phase::EngineThinking { generation } if generation == reply.generation
        );
        if !current || reply.generation != self.generation {
            tracing::debug!("Discarding stale engine reply (generation {})", reply.generation);
            return false;
        }

        self.phase = Phase::Idle;
        match reply.result {
            Ok(request) => self.play_engine_move(request),
            Err(e) => {
                tracing::warn!("Engine produced no move: {e}");
                self.engine_note = Some(e.to_string());
            }
        }
        true
    }

    fn play_engine_move(&mut self, request: MoveRequest) {
        let request = match request.promotion {
            None if self.rules.is_promotion(request.from, request.to) => {
                request.with_promotion(PromotionKind::Queen)
            }
            _ => request,
        };
        if !self.rules.is_legal(&request) {
            tracing::error!("Engine suggested illegal move {}", request.to_uci());
            self.engine_note = Some(format!("illegal engine move {}", request.to_uci()));
            return;
        }
        tracing::info!("Engine plays {}", request.to_uci());
        self.begin_animation(request, false);
    }

    fn mark_engine_terminated(&mut self) {
        if matches!(self.engine, EngineSlot::Terminated) {
            return;
        }
        tracing::error!("Engine terminated; engine turns will be played by hand");
        self.engine = EngineSlot::Terminated;
        self.engine_trigger = None;
        if matches!(self.phase, Phase::EngineThinking { .. }) {
            self.phase = Phase::Idle;
        }
    }

    /// Quit the engine. Only the first call does anything.
    pub fn shutdown(&mut self) {
        self.engine_trigger = None;
        let engine = std::mem::replace(
            &mut self.engine,
            EngineSlot::Unavailable("shut down".to_string()),
        );
        if let EngineSlot::Ready(mut worker) = engine {
            worker.shutdown();
        }
    }

    // ---- restart and settings ----

    /// Start over from the initial position with the current options
    pub fn restart(&mut self) {
        self.rules.reset();
        self.generation += 1;
        self.engine_trigger = None;
        self.engine_note = None;
        self.visual = VisualBoard::from_position(self.rules.position());
        self.layout.flipped = self.options.mode == GameMode::HumanVsEngine
            && self.options.human_color == PieceColor::Black;
        // a custom start position may already be decided
        self.phase = if let Some(outcome) = self.rules.outcome() {
            Phase::Frozen(outcome)
        } else if self.engine_owns_turn() {
            Phase::Overlay(OverlayKind::ConfirmEngineStart)
        } else {
            Phase::Idle
        };
        tracing::info!(
            "New game: {}, {}, human plays {}",
            self.options.mode.label(),
            self.options.difficulty.label(),
            self.options.human_color.name()
        );
    }

    /// "New Game": restart at once if nothing is at stake, otherwise ask first
    pub fn request_new_game(&mut self) -> bool {
        match self.phase {
            Phase::Animating(_) | Phase::PromotionPending(_) => false,
            Phase::Overlay(OverlayKind::ConfirmRestart) => false,
            Phase::Frozen(_) | Phase::Overlay(OverlayKind::ConfirmEngineStart) => {
                self.restart();
                true
            }
            _ if self.rules.move_count() == 0 => {
                self.restart();
                true
            }
            _ => {
                self.generation += 1;
                self.engine_trigger = None;
                self.phase = Phase::Overlay(OverlayKind::ConfirmRestart);
                true
            }
        }
    }

    pub fn confirm_overlay(&mut self) -> bool {
        match self.phase {
            Phase::Overlay(OverlayKind::ConfirmRestart) => self.restart(),
            Phase::Overlay(OverlayKind::ConfirmEngineStart) => {
                self.phase = Phase::Idle;
                self.schedule_engine_if_due();
            }
            _ => return false,
        }
        true
    }

    /// Dismiss a restart confirmation. The engine-start prompt can only be
    /// confirmed.
    pub fn cancel_overlay(&mut self) -> bool {
        if !matches!(self.phase, Phase::Overlay(OverlayKind::ConfirmRestart)) {
            return false;
        }
        self.phase = Phase::Idle;
        self.schedule_engine_if_due();
        true
    }

    fn apply_options(&mut self, options: GameOptions) {
        if options != self.options {
            self.options = options;
            self.restart();
        }
    }

    pub fn set_mode(&mut self, mode: GameMode) {
        self.apply_options(GameOptions { mode, ..self.options });
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.options.mode.toggled());
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.apply_options(GameOptions {
            difficulty,
            ..self.options
        });
    }

    pub fn cycle_difficulty(&mut self) {
        self.set_difficulty(self.options.difficulty.next());
    }

    pub fn set_human_color(&mut self, human_color: PieceColor) {
        self.apply_options(GameOptions {
            human_color,
            ..self.options
        });
    }

    pub fn toggle_human_color(&mut self) {
        self.set_human_color(self.options.human_color.opposite());
    }

    // ---- layout ----

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    /// Store the measured board panel size. Returns true if it changed.
    pub fn set_panel_size(&mut self, size: Size<Pixels>) -> bool {
        if self.layout.panel_size == size {
            return false;
        }
        self.layout.panel_size = size;
        true
    }

    // ---- read-only state for rendering ----

    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    pub fn visual_board(&self) -> &VisualBoard {
        &self.visual
    }

    pub fn selected_square(&self) -> Option<Coord> {
        match &self.phase {
            Phase::Selecting(selection) => Some(selection.square),
            _ => None,
        }
    }

    pub fn destinations(&self) -> Option<&HashSet<Coord>> {
        match &self.phase {
            Phase::Selecting(selection) => Some(&selection.destinations),
            _ => None,
        }
    }

    pub fn animation(&self) -> Option<&Animation> {
        match &self.phase {
            Phase::Animating(animation) => Some(animation),
            _ => None,
        }
    }

    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        match self.phase {
            Phase::PromotionPending(pending) => Some(pending),
            _ => None,
        }
    }

    pub fn overlay(&self) -> Option<OverlayKind> {
        match self.phase {
            Phase::Overlay(kind) => Some(kind),
            _ => None,
        }
    }

    /// Question shown by the current confirmation overlay
    pub fn overlay_prompt(&self) -> Option<String> {
        match self.phase {
            Phase::Overlay(OverlayKind::ConfirmEngineStart) => Some(format!(
                "The AI plays {} and moves first.",
                self.rules.side_to_move().name()
            )),
            Phase::Overlay(OverlayKind::ConfirmRestart) => {
                Some("Abandon this game and start a new one?".to_string())
            }
            _ => None,
        }
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.phase {
            Phase::Frozen(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn hovered(&self) -> Option<Coord> {
        self.hovered
    }

    pub fn last_move(&self) -> Option<(Coord, Coord)> {
        self.rules
            .last_move()
            .map(|played| (played.request.from, played.request.to))
    }

    pub fn position(&self) -> &Chess {
        self.rules.position()
    }

    pub fn history(&self) -> &[PlayedMove] {
        self.rules.history()
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.phase, Phase::Idle | Phase::Selecting(_)) && self.rules.move_count() > 0
    }

    /// Take the sound-worthy events queued since the last call
    pub fn drain_signals(&mut self) -> Vec<GameSignal> {
        std::mem::take(&mut self.signals)
    }

    pub fn engine_ready(&self) -> bool {
        matches!(self.engine, EngineSlot::Ready(_))
    }

    /// One-line engine state for the side panel
    pub fn engine_status(&self) -> String {
        match &self.engine {
            EngineSlot::Ready(_) => "Engine ready".to_string(),
            EngineSlot::Unavailable(reason) => format!("AI unavailable: {reason}"),
            EngineSlot::Terminated => "AI unavailable: engine stopped".to_string(),
        }
    }

    pub fn status_text(&self) -> String {
        let side = self.rules.side_to_move();
        match &self.phase {
            Phase::Frozen(outcome) => outcome.message(),
            Phase::PromotionPending(pending) => {
                format!("{}: choose a promotion piece", pending.color.name())
            }
            Phase::Overlay(OverlayKind::ConfirmEngineStart) => {
                format!("AI plays {} - press OK to start", side.name())
            }
            Phase::Overlay(OverlayKind::ConfirmRestart) => "Start a new game?".to_string(),
            Phase::EngineThinking { .. } => format!("{} (AI) is thinking...", side.name()),
            _ => {
                let mut status = format!("{} to move", side.name());
                if self.rules.is_check() {
                    status.push_str(" - Check!");
                }
                if self.options.mode == GameMode::HumanVsEngine && !self.plays_engine() {
                    status.push_str(" (AI unavailable)");
                } else if let Some(note) = &self.engine_note {
                    status.push_str(&format!(" (AI: {note})"));
                }
                status
            }
        }
    }
}

impl Drop for GameModel {
    fn drop(&mut self) {
        self.shutdown();
    }
}
