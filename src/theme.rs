//! Colors and styles for every pane.
//!
//! Render files use `theme::module::CONSTANT` instead of hardcoding `Color::*`.

use ratatui::style::{Color, Modifier, Style};

/// Shared base colors
pub mod palette {
    use super::*;

    pub const TEXT: Color = Color::Rgb(236, 236, 244);
    pub const TEXT_DIM: Color = Color::Rgb(90, 92, 119);
    pub const TEXT_MUTED: Color = Color::Rgb(130, 133, 158);

    pub const BG_DARK: Color = Color::Rgb(26, 26, 46);

    pub const CYAN: Color = Color::Rgb(0, 217, 255);
    pub const YELLOW: Color = Color::Rgb(255, 217, 61);
    pub const GREEN: Color = Color::Rgb(107, 203, 119);
    pub const MAGENTA: Color = Color::Rgb(198, 120, 221);
    pub const RED: Color = Color::Rgb(224, 108, 117);

    pub const CURSOR: Style = Style::new().add_modifier(Modifier::REVERSED);
}

/// Document editor and query line
pub mod editor {
    use super::*;

    pub const BORDER_FOCUSED: Color = palette::CYAN;
    pub const BORDER_UNFOCUSED: Color = palette::TEXT_DIM;
    pub const TITLE_FOCUSED: Style = Style::new().fg(palette::CYAN).add_modifier(Modifier::BOLD);
    pub const TITLE_UNFOCUSED: Style = Style::new().fg(palette::TEXT_MUTED);
    pub const CURSOR: Style = palette::CURSOR;

    // Document health shown in the document title
    pub const DOCUMENT_OK: Color = palette::GREEN;
    pub const DOCUMENT_INVALID: Color = palette::YELLOW;
    pub const DOCUMENT_UNCHECKED: Color = palette::TEXT_MUTED;
}

/// Output pane
pub mod output {
    use super::*;

    pub const BORDER: Color = palette::TEXT_DIM;
    pub const TITLE: Style = Style::new().fg(palette::TEXT_MUTED);
    pub const TEXT: Color = palette::TEXT;
    pub const SPINNER: Color = palette::MAGENTA;
    pub const SCROLLBAR: Color = palette::CYAN;
}

/// Status line below the query
pub mod status {
    use super::*;

    pub const WARNING: Color = palette::YELLOW;
    pub const ERROR: Color = palette::RED;
    pub const INVOCATION_FAILED: Style = Style::new().fg(palette::RED).add_modifier(Modifier::BOLD);
    pub const NOTIFICATION: Color = palette::TEXT_MUTED;
}

/// Cheat sheet popup
pub mod help {
    use super::*;

    pub const BORDER: Color = palette::CYAN;
    pub const BACKGROUND: Color = palette::BG_DARK;
    pub const SCROLLBAR: Color = palette::CYAN;
    pub const SECTION_HEADER: Style = Style::new().fg(palette::CYAN).add_modifier(Modifier::BOLD);
    pub const SYNTAX: Style = Style::new()
        .fg(palette::YELLOW)
        .add_modifier(Modifier::BOLD);
    pub const EXAMPLE: Color = palette::GREEN;
    pub const DESCRIPTION: Color = palette::TEXT;
    pub const FOOTER: Color = palette::TEXT_DIM;
}

/// Key hints at the bottom of the screen
pub mod help_line {
    use super::*;

    pub const KEY: Color = palette::TEXT_MUTED;
    pub const DESCRIPTION: Color = palette::TEXT_DIM;
    pub const SEPARATOR: Color = palette::TEXT_DIM;
}
