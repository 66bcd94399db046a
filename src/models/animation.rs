//! In-flight piece movement.

use crate::domain::{Coord, MoveRequest, Piece};
use crate::ui::board_layout::BoardPoint;

/// A piece sliding from its origin square to its destination.
///
/// The move it carries is not applied to the position until the slide is
/// finished.
#[derive(Clone, Copy, Debug)]
pub struct Animation {
    pub request: MoveRequest,
    pub piece: Piece,
    pub start: BoardPoint,
    pub end: BoardPoint,
    pub current: BoardPoint,
    /// Pause for a promotion choice instead of committing on arrival
    pub awaits_promotion: bool,
    speed: f32,
}

impl Animation {
    pub fn new(
        request: MoveRequest,
        piece: Piece,
        start: BoardPoint,
        end: BoardPoint,
        speed: f32,
        awaits_promotion: bool,
    ) -> Self {
        Self {
            request,
            piece,
            start,
            end,
            current: start,
            awaits_promotion,
            speed: speed.max(1.0),
        }
    }

    /// Square left empty while the piece is in the air
    pub fn origin(&self) -> Coord {
        self.request.from
    }

    /// Move one tick toward the destination. Returns true on arrival.
    pub fn advance(&mut self) -> bool {
        let remaining = self.current.distance_to(self.end);
        if remaining < self.speed {
            self.current = self.end;
            return true;
        }
        let step = self.speed / remaining;
        self.current.x += (self.end.x - self.current.x) * step;
        self.current.y += (self.end.y - self.current.y) * step;
        false
    }
}
