//! Vertical scrollbar drawn on the right border of a pane

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState},
};

/// Render a vertical scrollbar on the right border of `area`
///
/// Nothing is drawn when the content fits in the viewport.
pub fn render_vertical_scrollbar(
    frame: &mut Frame,
    area: Rect,
    total_lines: usize,
    viewport_size: usize,
    scroll_offset: usize,
    color: Color,
) {
    if total_lines <= viewport_size || viewport_size == 0 {
        return;
    }

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(None)
        .end_symbol(None)
        .thumb_style(Style::default().fg(color))
        .track_style(Style::default().fg(color));

    // Ratatui places the thumb at content_length - 1 at most, so pass
    // max_scroll + 1 to let the thumb reach the bottom at max scroll.
    let max_scroll = total_lines.saturating_sub(viewport_size);
    let mut state = ScrollbarState::new(max_scroll + 1)
        .position(scroll_offset.min(max_scroll))
        .viewport_content_length(viewport_size);

    frame.render_stateful_widget(scrollbar, area, &mut state);
}

#[cfg(test)]
#[path = "scrollbar_tests.rs"]
mod scrollbar_tests;
