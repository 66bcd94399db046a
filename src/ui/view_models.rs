//! View models for rendering the move history.
//!
//! These types are DTOs (Data Transfer Objects) that prepare game state
//! for display in the UI. They live in the UI layer, not the domain layer.

/// Display data for a single half-move
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveDisplay {
    pub san: String,
    /// Whether this move gives check
    pub is_check: bool,
    /// Whether this move gives checkmate
    pub is_checkmate: bool,
}

impl MoveDisplay {
    /// SAN with `+` or `#` appended
    pub fn text(&self) -> String {
        let mut text = self.san.clone();
        if self.is_checkmate {
            text.push('#');
        } else if self.is_check {
            text.push('+');
        }
        text
    }
}

/// One numbered row of the move list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovePairDisplay {
    pub number: u32,
    /// Empty when the game started with Black to move
    pub white: Option<MoveDisplay>,
    pub black: Option<MoveDisplay>,
}
