use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::help::{CHEAT_SHEET, JQ_MANUAL_URL, KEY_BINDINGS};
use crate::query::QueryInvoker;
use crate::theme;
use crate::widgets::{popup, scrollbar};

const SYNTAX_WIDTH: usize = 13;
const EXAMPLE_WIDTH: usize = 34;

/// Render the cheat sheet popup
///
/// Returns the popup area, or None when the terminal is too small.
pub fn render_popup<I: QueryInvoker>(app: &mut App<I>, frame: &mut Frame) -> Option<Rect> {
    let frame_area = frame.area();

    if frame_area.width < 40 || frame_area.height < 12 {
        return None;
    }

    let popup_width = popup::scaled_length(frame_area.width, 80, 60, 100, 4);
    let popup_height = popup::scaled_length(frame_area.height, 80, 12, 30, 2);

    let popup_area = popup::centered_popup(frame_area, popup_width, popup_height);
    popup::clear_area(frame, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" jq Cheat Sheet ", theme::help::SECTION_HEADER))
        .border_style(Style::default().fg(theme::help::BORDER))
        .style(Style::default().bg(theme::help::BACKGROUND));

    let inner_area = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)])
        .split(inner_area);

    let lines = content_lines();
    app.help.update_bounds(lines.len(), chunks[0].height);

    let paragraph = Paragraph::new(Text::from(lines.clone()))
        .scroll((app.help.scroll, 0));
    frame.render_widget(paragraph, chunks[0]);

    scrollbar::render_vertical_scrollbar(
        frame,
        popup_area,
        lines.len(),
        chunks[0].height as usize,
        app.help.scroll as usize,
        theme::help::SCROLLBAR,
    );

    let footer = Line::from(Span::styled(
        format!(" Esc close • ↑/↓ scroll • jq manual: {}", JQ_MANUAL_URL),
        Style::default().fg(theme::help::FOOTER),
    ));
    frame.render_widget(Paragraph::new(footer), chunks[1]);

    Some(popup_area)
}

fn content_lines() -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(CHEAT_SHEET.len() + KEY_BINDINGS.len() + 5);

    lines.push(Line::from(vec![
        Span::styled(
            format!(" {:<SYNTAX_WIDTH$}", "Syntax"),
            theme::help::SECTION_HEADER,
        ),
        Span::styled(
            format!("{:<EXAMPLE_WIDTH$}", "Example"),
            theme::help::SECTION_HEADER,
        ),
        Span::styled("Description", theme::help::SECTION_HEADER),
    ]));

    for row in CHEAT_SHEET {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:<SYNTAX_WIDTH$}", row.syntax),
                theme::help::SYNTAX,
            ),
            Span::styled(
                format!("{:<EXAMPLE_WIDTH$}", row.example),
                Style::default().fg(theme::help::EXAMPLE),
            ),
            Span::styled(
                row.description,
                Style::default().fg(theme::help::DESCRIPTION),
            ),
        ]));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(" Keys", theme::help::SECTION_HEADER)));

    for (key, description) in KEY_BINDINGS {
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<SYNTAX_WIDTH$}", key), theme::help::SYNTAX),
            Span::styled(
                *description,
                Style::default().fg(theme::help::DESCRIPTION),
            ),
        ]));
    }

    lines
}

#[cfg(test)]
#[path = "help_popup_render_tests.rs"]
mod help_popup_render_tests;
