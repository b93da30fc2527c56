use super::browse::format_attempt_date;
use super::key_hint;
use crate::app::App;
use crate::quiz::PassTier;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn tier_color(tier: PassTier) -> Color {
    match tier {
        PassTier::Perfect => Color::Green,
        PassTier::Good => Color::Yellow,
        PassTier::KeepPracticing => Color::Red,
    }
}

pub fn draw_results(f: &mut Frame, app: &App) {
    let Some(session) = app.engine.session() else {
        return;
    };

    let history_height = if app.recent.is_empty() {
        0
    } else {
        app.recent.len() as u16 + 2
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(7),
            Constraint::Length(history_height),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Quiz Complete!")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let tier = session.tier();
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{}/{}", session.correct_count, session.total()),
            Style::default()
                .fg(tier_color(tier))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            tier.message(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("{}% correct", session.percentage())),
        Line::from(Span::styled(
            session.filter.label().to_string(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    if let Some(best) = &app.best {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Your best: {}% ({})", best.percentage, best.filter_label),
            Style::default().fg(Color::Yellow),
        )));
    }

    let summary = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Results"));
    f.render_widget(summary, chunks[1]);

    if !app.recent.is_empty() {
        let items: Vec<ListItem> = app
            .recent
            .iter()
            .map(|attempt| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<16}", format_attempt_date(attempt.completed_at)),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::from(format!(
                        "{}/{}  {:>3}%  ",
                        attempt.correct, attempt.total, attempt.percentage
                    )),
                    Span::styled(
                        attempt.filter_label.clone(),
                        Style::default().fg(Color::LightBlue),
                    ),
                ]))
            })
            .collect();
        let history =
            List::new(items).block(Block::default().borders(Borders::ALL).title("Recent Attempts"));
        f.render_widget(history, chunks[2]);
    }

    let mut hint = key_hint("r", " Retake Quiz  ");
    hint.extend(key_hint("b", " Browse Questions  "));
    hint.extend(key_hint("q", " Quit"));
    let help = Paragraph::new(Line::from(hint))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[3]);
}
