use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use voxlog_core::routes::Route;

use crate::app::{App, AppState, AuthFocus};

use super::styles;
use super::views::{history, home, upload};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Navigation
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, chunks[0]);
    render_nav(frame, app, chunks[1]);
    render_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Overlays
    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame);
    }
    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame);
    }
}

fn render_title_bar(frame: &mut Frame, area: Rect) {
    let title = "  voxlog";
    let help_hint = "[?] Help";

    let line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            (area.width as usize).saturating_sub(title.len() + help_hint.len() + 4),
        )),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_nav(frame: &mut Frame, app: &App, area: Rect) {
    let current = app.current_view();
    let authenticated = app.session.is_authenticated();

    let tabs = [
        ("[1] Home", Route::Landing),
        ("[2] Dashboard", Route::Dashboard),
        ("[3] Upload", Route::Upload),
        ("[4] History", Route::History),
    ];

    let mut spans = vec![Span::raw(" ")];
    for (i, (label, route)) in tabs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style()));
        }
        let style = if *route == current {
            styles::tab_style(true)
        } else if route.requires_auth() && !authenticated {
            styles::muted_style()
        } else {
            styles::tab_style(false)
        };
        spans.push(Span::styled(*label, style));
    }

    // Session links on the right
    let right = if authenticated {
        "[o] Logout".to_string()
    } else {
        "[l] Login | [r] Register".to_string()
    };
    let used: usize = spans.iter().map(|s| s.content.len()).sum();
    let padding = (area.width as usize).saturating_sub(used + right.len() + 2);
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(right, styles::muted_style()));

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.current_view() {
        Route::Landing => home::render_landing(frame, app, area),
        Route::Dashboard => home::render_dashboard(frame, app, area),
        Route::Upload => upload::render(frame, app, area),
        Route::History => history::render(frame, app, area),
        Route::Login => render_auth_form(frame, app, area, "Login"),
        Route::Register => render_auth_form(frame, app, area, "Register"),
    }
}

fn render_auth_form(frame: &mut Frame, app: &App, area: Rect, action: &str) {
    let form = &app.auth_form;
    let extra = usize::from(form.error.is_some()) + usize::from(form.notice.is_some());
    let box_area = centered_rect_fixed(52, (12 + extra * 2) as u16, area);

    let mut lines = vec![
        Line::from(Span::styled(
            format!("  {} to voxlog", action),
            styles::title_style(),
        )),
        Line::from(""),
    ];

    let email_focused = form.focus == AuthFocus::Email;
    lines.push(field_line("Email   ", &form.email, email_focused));

    let password_focused = form.focus == AuthFocus::Password;
    let masked: String = form.password.chars().map(|_| '•').collect();
    lines.push(field_line("Password", &masked, password_focused));
    lines.push(Line::from(""));

    if let Some(ref notice) = form.notice {
        lines.push(Line::from(Span::styled(
            format!("  {}", notice),
            styles::success_style(),
        )));
        lines.push(Line::from(""));
    }
    if let Some(ref error) = form.error {
        lines.push(Line::from(Span::styled(
            format!("  {}", error),
            styles::error_style(),
        )));
        lines.push(Line::from(""));
    }

    let button = if form.busy {
        format!("  [ {}... ]", action)
    } else {
        format!("  [ {} ]", action)
    };
    lines.push(Line::from(Span::styled(
        button,
        styles::field_style(form.focus == AuthFocus::Button),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Tab", styles::key_style()),
        Span::styled(" next field  ", styles::muted_style()),
        Span::styled("Enter", styles::key_style()),
        Span::styled(" submit  ", styles::muted_style()),
        Span::styled("Ctrl+R", styles::key_style()),
        Span::styled(" switch mode  ", styles::muted_style()),
        Span::styled("Esc", styles::key_style()),
        Span::styled(" back", styles::muted_style()),
    ]));

    frame.render_widget(Clear, box_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    frame.render_widget(Paragraph::new(lines).block(block), box_area);
}

fn field_line<'a>(label: &'a str, value: &str, focused: bool) -> Line<'a> {
    let cursor = if focused { "▌" } else { "" };
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{}: [", label), styles::muted_style()),
        Span::styled(
            format!("{:<30}", format!("{}{}", value, cursor)),
            styles::field_style(focused),
        ),
        Span::styled("]", styles::muted_style()),
    ])
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left_text = if let Some(ref msg) = app.status_message {
        format!(" {} ", msg)
    } else if app.session.is_authenticated() {
        match app.config.last_email {
            Some(ref email) => format!(" Signed in as {} ", email),
            None => " Signed in ".to_string(),
        }
    } else {
        " Not signed in ".to_string()
    };

    let right_text = " [?] help | [q] quit ";
    let padding = (area.width as usize)
        .saturating_sub(left_text.len())
        .saturating_sub(right_text.len());

    let line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding)),
        Span::styled(right_text, styles::muted_style()),
    ]);

    frame.render_widget(
        Paragraph::new(line).style(styles::status_bar_style()),
        area,
    );
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(48, 18, frame.area());
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let mut lines = vec![
        Line::from(Span::styled("  voxlog", styles::title_style())),
        Line::from(Span::styled(
            format!("  version {}", version),
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style())),
    ];
    for (key, desc) in [
        ("1-4   ", "Switch views"),
        ("l / r ", "Login / register"),
        ("o     ", "Logout"),
        ("Esc   ", "Leave the current form"),
    ] {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}", key), styles::key_style()),
            Span::styled(desc, styles::desc_style()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Actions", styles::highlight_style())));
    for (key, desc) in [
        ("Enter ", "Submit form / start upload"),
        ("u     ", "Refresh history"),
        ("q     ", "Quit"),
    ] {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}", key), styles::key_style()),
            Span::styled(desc, styles::desc_style()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Press ", styles::muted_style()),
        Span::styled("?", styles::key_style()),
        Span::styled(" or ", styles::muted_style()),
        Span::styled("Esc", styles::key_style()),
        Span::styled(" to close", styles::muted_style()),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(32, 5, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled("  Quit voxlog?", styles::title_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled("  [y]", styles::key_style()),
            Span::styled(" yes   ", styles::desc_style()),
            Span::styled("[n]", styles::key_style()),
            Span::styled(" no", styles::desc_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Fixed-size rectangle centered in `area`, clamped to fit.
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
