//! Landing and dashboard views.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::styles;

pub fn render_landing(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Turn audio into searchable text",
            styles::title_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  Upload a recording and get back a transcript plus an",
            styles::desc_style(),
        )),
        Line::from(Span::styled(
            "  AI-written analysis. Everything you upload stays in your",
            styles::desc_style(),
        )),
        Line::from(Span::styled(
            "  history for later review.",
            styles::desc_style(),
        )),
        Line::from(""),
    ];

    if app.session.is_authenticated() {
        lines.push(Line::from(vec![
            Span::styled("  Press ", styles::muted_style()),
            Span::styled("2", styles::key_style()),
            Span::styled(" for your dashboard or ", styles::muted_style()),
            Span::styled("3", styles::key_style()),
            Span::styled(" to upload a file.", styles::muted_style()),
        ]));
    } else {
        lines.push(Line::from(vec![
            Span::styled("  Press ", styles::muted_style()),
            Span::styled("l", styles::key_style()),
            Span::styled(" to log in or ", styles::muted_style()),
            Span::styled("r", styles::key_style()),
            Span::styled(" to create an account.", styles::muted_style()),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

pub fn render_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("  Dashboard", styles::title_style())),
        Line::from(""),
    ];

    if app.history.loaded {
        let count = app.history.entries.len();
        let label = if count == 1 {
            "  1 transcription on record".to_string()
        } else {
            format!("  {} transcriptions on record", count)
        };
        lines.push(Line::from(Span::styled(label, styles::desc_style())));
    } else {
        lines.push(Line::from(Span::styled(
            "  Visit the history view to load your past transcriptions.",
            styles::muted_style(),
        )));
    }

    lines.push(Line::from(""));
    for (key, desc) in [
        ("3", "Upload a new audio file"),
        ("4", "Browse transcription history"),
        ("o", "Log out"),
    ] {
        lines.push(Line::from(vec![
            Span::styled(format!("  [{}] ", key), styles::key_style()),
            Span::styled(desc, styles::desc_style()),
        ]));
    }

    let block = Block::default()
        .borders(Borders::NONE);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
