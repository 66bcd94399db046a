//! Theme constants and colors for the chess UI.

use gpui::{Rgba, rgb};

use crate::domain::Coord;

// Layout constants
pub const BOARD_PADDING: f32 = 20.0;
pub const PIECE_SCALE: f32 = 0.9; // piece size relative to square
pub const DESTINATION_DOT_SCALE: f32 = 0.3;

// Initial panel sizes
pub const INITIAL_LEFT_PANEL: f32 = 600.0;
pub const INITIAL_RIGHT_PANEL: f32 = 300.0;

// Board colors
pub const LIGHT_SQUARE: u32 = 0xEFD9B5;
pub const DARK_SQUARE: u32 = 0xB48764;
pub const SELECTED_SQUARE: u32 = 0x7FA650;
pub const LAST_MOVE_SQUARE: u32 = 0xCDD26A;
pub const HOVER_BORDER: u32 = 0xF5F5F5;
pub const DESTINATION_DOT: u32 = 0x2E4A1C;

// Panel colors
pub const PANEL_BG: u32 = 0x2a2a2a;
pub const MOVE_LIST_BG: u32 = 0x1e1e1e;
pub const BORDER_COLOR: u32 = 0x4a4a4a;
pub const TEXT_PRIMARY: u32 = 0xffffff;
pub const TEXT_SECONDARY: u32 = 0x888888;
pub const TEXT_WARNING: u32 = 0xf87171;
/// RGBA, translucent
pub const OVERLAY_BG: u32 = 0x000000aa;

/// Get the color for a board square based on its position
pub fn square_color((row, col): Coord) -> Rgba {
    if (row + col) % 2 == 0 {
        rgb(LIGHT_SQUARE)
    } else {
        rgb(DARK_SQUARE)
    }
}
