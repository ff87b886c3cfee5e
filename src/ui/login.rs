use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::dialogs::{error_line, input_line};
use super::layout::centered_rect;
use imgtui::model::auth::{AuthMode, LoginField, LoginForm};

/// Render the login / register screen
pub fn render_login(f: &mut Frame, form: &LoginForm) {
    let (title, action, switch_hint) = match form.mode {
        AuthMode::Login => ("Login", "Log in", "^R: Create an account"),
        AuthMode::Register => ("Register", "Register", "^R: Back to login"),
    };

    let mut lines = vec![
        Line::from(Span::styled(
            "Image Manager",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if let Some(notice) = &form.notice {
        lines.push(Line::from(Span::styled(
            notice.as_str(),
            Style::default().fg(Color::Yellow),
        )));
        lines.push(Line::from(""));
    }

    for field in form.fields() {
        let (label, input) = match field {
            LoginField::Username => ("Username", &form.username),
            LoginField::Email => ("Email", &form.email),
            LoginField::Password => ("Password", &form.password),
        };
        lines.push(input_line(label, input, form.focus == *field));
    }

    lines.push(Line::from(""));
    lines.push(error_line(form.error.as_deref()));

    if form.submitting {
        lines.push(Line::from(Span::styled(
            "Please wait...",
            Style::default().fg(Color::Yellow),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            format!("Enter: {}   Tab: Next field   {}   Esc: Quit", action, switch_hint),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let height = lines.len() as u16 + 2;
    let area = centered_rect(f.area(), 64, height);
    let panel = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(panel, area);
}
