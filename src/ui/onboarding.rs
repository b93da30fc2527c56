use super::key_hint;
use super::layout::centered_rect;
use crate::app::App;
use crate::models::UserRole;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// First-run role picker.
pub fn draw_onboarding(f: &mut Frame, app: &App) {
    let area = centered_rect(70, 70, f.area());
    f.render_widget(Clear, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(area);

    let intro = Paragraph::new(vec![
        Line::from(Span::styled(
            "Welcome to LexAfrica",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from("Tell us who you are so we can tailor your study."),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(intro, chunks[0]);

    let items: Vec<ListItem> = UserRole::ALL
        .iter()
        .map(|role| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    role.title(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("  {}", role.description()),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::BOTTOM | Borders::LEFT | Borders::RIGHT)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(Style::default().fg(Color::Yellow))
        .highlight_symbol("▶ ");
    let mut state = ListState::default();
    state.select(Some(app.onboarding_choice.min(UserRole::ALL.len() - 1)));
    f.render_stateful_widget(list, chunks[1], &mut state);

    let mut hint = key_hint("↑/↓", " Choose  ");
    hint.extend(key_hint("Enter", " Get Started"));
    let help = Paragraph::new(Line::from(hint)).alignment(Alignment::Center);
    f.render_widget(help, chunks[2]);
}
