//! jq cheat sheet popup and the key hint line

mod cheat_sheet;
pub mod help_line_render;
pub mod help_popup_render;
mod help_state;

pub use cheat_sheet::{CHEAT_SHEET, CheatSheetEntry, JQ_MANUAL_URL, KEY_BINDINGS};
pub use help_state::HelpPopupState;
