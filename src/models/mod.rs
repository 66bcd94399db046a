pub mod animation;
pub mod engine;
pub mod engine_worker;
pub mod game;
pub mod schedule;

pub use engine::{EngineBackend, UciEngine};
pub use game::{GameModel, GameOptions, GameSignal, OverlayKind};
