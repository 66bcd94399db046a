mod board_view;
mod move_list;
mod overlays;
mod side_panel;

pub use board_view::{Cancel, ChessBoardView, Confirm, KEY_CONTEXT, NewGame, Promote, Undo};
pub use move_list::render_move_list;
pub use side_panel::render_side_panel;
