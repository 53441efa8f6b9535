//! History view: past transcription records with a detail pane.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::styles;
use crate::utils::format::{format_duration, format_timestamp, preview};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let history = &app.history;

    if history.loading {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "  Loading transcription history...",
                styles::muted_style(),
            ))),
            area,
        );
        return;
    }

    if let Some(ref error) = history.error {
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(format!("  {}", error), styles::error_style())),
                Line::from(vec![
                    Span::styled("  Press ", styles::muted_style()),
                    Span::styled("u", styles::key_style()),
                    Span::styled(" to retry.", styles::muted_style()),
                ]),
            ]),
            area,
        );
        return;
    }

    if history.entries.is_empty() {
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "  No transcriptions found",
                    styles::title_style(),
                )),
                Line::from(Span::styled(
                    "  You haven't uploaded any audio files yet.",
                    styles::muted_style(),
                )),
                Line::from(vec![
                    Span::styled("  Press ", styles::muted_style()),
                    Span::styled("3", styles::key_style()),
                    Span::styled(" to upload your first one.", styles::muted_style()),
                ]),
            ]),
            area,
        );
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    render_list(frame, app, chunks[0]);
    render_detail(frame, app, chunks[1]);
}

fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let width = (area.width as usize).saturating_sub(6).max(8);

    let lines: Vec<Line> = app
        .history
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let marker = if i == app.history.selection { "» " } else { "  " };
            let style = if i == app.history.selection {
                styles::selected_style()
            } else {
                styles::desc_style()
            };
            Line::from(vec![
                Span::styled(marker, styles::highlight_style()),
                Span::styled(preview(&entry.original_file_name, width), style),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(styles::muted_style())
        .title(" Recordings ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    let Some(entry) = app.history.entries.get(app.history.selection) else {
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!("  {}", entry.original_file_name),
            styles::title_style(),
        )),
        Line::from(Span::styled(
            format!("  {}", format_timestamp(&entry.created_date)),
            styles::muted_style(),
        )),
    ];

    if let Some(minutes) = entry.duration {
        lines.push(Line::from(Span::styled(
            format!("  {}", format_duration(minutes)),
            styles::muted_style(),
        )));
    }

    if let Some(ref text) = entry.transcription_preview {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Transcript preview",
            styles::highlight_style(),
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", text),
            styles::desc_style(),
        )));
    }

    if let Some(ref text) = entry.analysis_preview {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Analysis preview",
            styles::highlight_style(),
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", text),
            styles::desc_style(),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  Record #{}", entry.id),
        styles::muted_style(),
    )));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}
