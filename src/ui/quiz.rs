use super::browse::question_tags;
use super::key_hint;
use crate::app::App;
use crate::quiz::QuizSession;
use crate::ui::layout::calculate_quiz_chunks;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

/// Marker and style for one answer option, given what has been revealed.
pub fn option_marker(
    session: &QuizSession,
    option: &str,
    highlighted: bool,
) -> (&'static str, Style) {
    let question = session.current_question();
    match session.selected.as_deref() {
        None if highlighted => (
            "▶",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        None => (" ", Style::default()),
        Some(_) if question.is_correct(option) => (
            "✓",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Some(picked) if picked == option => (
            "✗",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Some(_) => (" ", Style::default().fg(Color::DarkGray)),
    }
}

pub fn draw_quiz(f: &mut Frame, app: &App) {
    let Some(session) = app.engine.session() else {
        return;
    };
    let layout = calculate_quiz_chunks(f.area());
    let question = session.current_question();

    let progress_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(layout.progress_area);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(format!(
            "Question {} of {} · {}",
            session.current_index + 1,
            session.total(),
            session.filter.label()
        )))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(session.progress_ratio().clamp(0.0, 1.0))
        .label("");
    f.render_widget(gauge, progress_chunks[0]);

    let points = Paragraph::new(format!("{} points", session.correct_count))
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(points, progress_chunks[1]);

    let mut card = Text::from(Line::from(question_tags(question)));
    card.push_line(Line::from(""));
    card.push_line(Line::from(Span::styled(
        question.prompt.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    let card = Paragraph::new(card)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(card, layout.question_area);

    let option_lines: Vec<Line> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let (marker, style) = option_marker(session, option, i == app.selected_option);
            Line::from(vec![
                Span::styled(format!("{} ", marker), style),
                Span::styled(format!("{}. ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(option.clone(), style),
            ])
        })
        .collect();
    let options = Paragraph::new(option_lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Options"));
    f.render_widget(options, layout.options_area);

    if let Some(picked) = session.selected.as_deref() {
        let (verdict, color) = if question.is_correct(picked) {
            ("Correct!", Color::Green)
        } else {
            ("Incorrect", Color::Red)
        };
        let mut text = Text::from(Line::from(Span::styled(
            verdict,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        text.push_line(Line::from(question.explanation.clone()));
        let explanation = Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Explanation"));
        f.render_widget(explanation, layout.explanation_area);
    }

    let mut hint = if session.is_revealed() {
        let label = if session.is_last_question() {
            " See Results  "
        } else {
            " Next Question  "
        };
        key_hint("Enter", label)
    } else {
        let mut spans = key_hint("↑/↓", " Choose  ");
        spans.extend(key_hint("1-9", " Answer  "));
        spans.extend(key_hint("Enter", " Confirm  "));
        spans
    };
    hint.extend(key_hint("Ctrl+T", " LEXA  "));
    hint.extend(key_hint("Esc", " Quit to Browse"));

    let help = Paragraph::new(Line::from(hint))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

pub fn draw_quit_confirmation(f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(5)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Leave Quiz")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let message = Paragraph::new("Return to question browser? Progress will be lost.")
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, chunks[1]);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Yes (Leave)  "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(" No (Continue Quiz)  "),
        Span::styled(
            "Ctrl+C",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Exit App"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
