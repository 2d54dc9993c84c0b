use ratatui::{Terminal, backend::TestBackend, layout::Rect, style::Color};

use super::render_vertical_scrollbar;

const THUMB: &str = "█";

fn render_column(total: usize, viewport: usize, scroll_offset: usize, height: u16) -> Vec<String> {
    let mut terminal = Terminal::new(TestBackend::new(5, height)).unwrap();
    terminal
        .draw(|frame| {
            let area = Rect::new(0, 0, 5, height);
            render_vertical_scrollbar(frame, area, total, viewport, scroll_offset, Color::White);
        })
        .unwrap();

    let buffer = terminal.backend().buffer();
    (0..height)
        .map(|y| buffer[(4, y)].symbol().to_string())
        .collect()
}

#[test]
fn test_scrollbar_not_rendered_when_content_fits() {
    let column = render_column(5, 10, 0, 10);
    assert!(column.iter().all(|cell| cell == " "));
}

#[test]
fn test_scrollbar_not_rendered_for_exact_fit() {
    let column = render_column(10, 10, 0, 10);
    assert!(column.iter().all(|cell| cell == " "));
}

#[test]
fn test_scrollbar_not_rendered_for_zero_viewport() {
    let column = render_column(50, 0, 0, 10);
    assert!(column.iter().all(|cell| cell == " "));
}

#[test]
fn test_scrollbar_rendered_when_content_exceeds_viewport() {
    let column = render_column(11, 10, 0, 10);
    assert!(column.iter().any(|cell| cell != " "));
}

#[test]
fn test_thumb_at_top_when_not_scrolled() {
    let column = render_column(30, 12, 0, 12);
    assert_eq!(column[0], THUMB);
    assert_ne!(column[11], THUMB);
}

#[test]
fn test_thumb_at_bottom_at_max_scroll() {
    let column = render_column(30, 12, 18, 12);
    assert_eq!(column[11], THUMB);
    assert_ne!(column[0], THUMB);
}

#[test]
fn test_scroll_past_end_is_clamped() {
    assert_eq!(render_column(30, 12, 30, 12), render_column(30, 12, 18, 12));
}
