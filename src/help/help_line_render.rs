use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{App, Focus};
use crate::query::QueryInvoker;
use crate::theme;

macro_rules! hints {
    ($($key:literal => $desc:literal),+ $(,)?) => {
        vec![$(($key, $desc)),+]
    };
}

fn get_context_hints<I: QueryInvoker>(app: &App<I>) -> Vec<(&'static str, &'static str)> {
    if app.help.visible {
        hints!["Esc/F1" => "Close", "↑/↓" => "Scroll"]
    } else if app.focus == Focus::Query {
        hints![
            "F1" => "Cheat Sheet",
            "Tab" => "Edit Document",
            "F2" => "Indent",
            "F3" => "Sort Keys",
            "F5" => "Rerun",
            "Enter" => "Print Output",
            "Ctrl+Q" => "Print Query",
            "Esc" => "Quit",
        ]
    } else {
        hints![
            "F1" => "Cheat Sheet",
            "Tab" => "Edit Query",
            "F2" => "Indent",
            "F3" => "Sort Keys",
            "F5" => "Rerun",
            "PgUp/PgDn" => "Scroll Output",
            "Esc" => "Quit",
        ]
    }
}

fn build_styled_spans(hints: &[(&'static str, &'static str)]) -> Vec<Span<'static>> {
    let key_style = Style::default().fg(theme::help_line::KEY);
    let desc_style = Style::default().fg(theme::help_line::DESCRIPTION);
    let sep_style = Style::default().fg(theme::help_line::SEPARATOR);

    let mut spans = Vec::with_capacity(hints.len() * 4 + 1);
    spans.push(Span::raw(" "));

    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" \u{2022} ", sep_style));
        }
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(*desc, desc_style));
    }

    spans
}

pub fn render_line<I: QueryInvoker>(app: &App<I>, frame: &mut Frame, area: Rect) {
    let hints = get_context_hints(app);
    let spans = build_styled_spans(&hints);
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_helpers::test_app;

    fn line_text(spans: &[Span<'static>]) -> String {
        spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_query_focus_hints_mention_print_output() {
        let app = test_app(r#"{"a":1}"#);

        let text = line_text(&build_styled_spans(&get_context_hints(&app)));
        assert!(text.contains("Enter Print Output"));
        assert!(text.contains("Tab Edit Document"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_document_focus_hints_mention_scrolling() {
        let mut app = test_app(r#"{"a":1}"#);
        app.focus = Focus::Document;

        let text = line_text(&build_styled_spans(&get_context_hints(&app)));
        assert!(text.contains("PgUp/PgDn Scroll Output"));
        assert!(!text.contains("Print Output"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_help_visible_hints_only_close_and_scroll() {
        let mut app = test_app(r#"{"a":1}"#);
        app.help.toggle();

        let hints = get_context_hints(&app);
        assert_eq!(hints.len(), 2);
        assert_eq!(hints[0], ("Esc/F1", "Close"));
    }

    #[test]
    fn test_hints_separated_by_bullets() {
        let spans = build_styled_spans(&[("A", "one"), ("B", "two")]);
        assert_eq!(line_text(&spans), " A one \u{2022} B two");
    }
}
