//! Upload view: pick a file, send it, show the transcription result.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Path input + messages
            Constraint::Min(5),    // Result
        ])
        .split(area);

    render_form(frame, app, chunks[0]);
    render_result(frame, app, chunks[1]);
}

fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let upload = &app.upload;

    let cursor = if upload.busy { "" } else { "▌" };
    let mut lines = vec![
        Line::from(vec![
            Span::styled("  Audio file: [", styles::muted_style()),
            Span::styled(
                format!("{}{}", upload.path_input, cursor),
                styles::field_style(!upload.busy),
            ),
            Span::styled("]", styles::muted_style()),
        ]),
        Line::from(vec![
            Span::styled("  Enter", styles::key_style()),
            Span::styled(" transcribe and analyze  ", styles::muted_style()),
            Span::styled("Esc", styles::key_style()),
            Span::styled(" back to dashboard", styles::muted_style()),
        ]),
    ];

    if upload.busy {
        lines.push(Line::from(Span::styled(
            "  Processing... the backend transcribes before it answers.",
            styles::highlight_style(),
        )));
    }
    if let Some(ref error) = upload.error {
        lines.push(Line::from(Span::styled(
            format!("  {}", error),
            styles::error_style(),
        )));
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style())
        .title(" Upload ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_result(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref outcome) = app.upload.outcome else {
        let hint = Paragraph::new(Line::from(Span::styled(
            "  No result yet. Transcribe a file to see it here.",
            styles::muted_style(),
        )));
        frame.render_widget(hint, area);
        return;
    };

    let mut lines = vec![Line::from(Span::styled(
        "  Analysis complete",
        styles::success_style(),
    ))];

    if let Some(summary) = summary_line(&outcome.analysis) {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("  Summary: ", styles::highlight_style()),
            Span::styled(summary.to_string(), styles::desc_style()),
        ]));
    } else if !outcome.analysis.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", outcome.analysis),
            styles::desc_style(),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Transcript",
        styles::highlight_style(),
    )));
    for row in outcome.transcription.lines() {
        lines.push(Line::from(Span::styled(
            format!("  {}", row),
            styles::desc_style(),
        )));
    }

    if let Some(id) = outcome.record_id {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  Saved as record {}", id),
            styles::muted_style(),
        )));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

/// Presentation convenience: pull the text after a `Summary:` label out of
/// the analysis blob. The label is a backend prompt habit, not a contract;
/// when it is missing the caller falls back to the raw analysis.
pub fn summary_line(analysis: &str) -> Option<&str> {
    let idx = analysis.find("Summary:")?;
    let rest = analysis[idx + "Summary:".len()..].trim();
    let line = rest.lines().next().unwrap_or(rest).trim();
    (!line.is_empty()).then_some(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_labelled_summary() {
        let analysis = "Sentiment: positive\nSummary: Strong quarter, margins up.\nTopics: finance";
        assert_eq!(summary_line(analysis), Some("Strong quarter, margins up."));
    }

    #[test]
    fn missing_label_yields_none() {
        assert_eq!(summary_line("Sentiment: positive"), None);
        assert_eq!(summary_line(""), None);
    }

    #[test]
    fn empty_summary_text_yields_none() {
        assert_eq!(summary_line("Summary:   "), None);
    }
}
