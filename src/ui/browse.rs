use super::key_hint;
use super::layout::calculate_browse_chunks;
use crate::app::App;
use crate::bank::LAW_CATEGORIES;
use crate::models::{Difficulty, Question};
use crate::utils::truncate_string;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use std::time::{Duration, UNIX_EPOCH};

pub fn format_attempt_date(timestamp: u64) -> String {
    let time = UNIX_EPOCH + Duration::from_secs(timestamp);
    let datetime: chrono::DateTime<chrono::Local> = time.into();
    let today = chrono::Local::now().date_naive();

    if datetime.date_naive() == today {
        datetime.format("Today %H:%M").to_string()
    } else if datetime.date_naive() == today - chrono::Duration::days(1) {
        datetime.format("Yesterday %H:%M").to_string()
    } else {
        datetime.format("%Y-%m-%d").to_string()
    }
}

pub fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => Color::Green,
        Difficulty::Medium => Color::Yellow,
        Difficulty::Hard => Color::Red,
    }
}

pub fn question_tags(question: &Question) -> Vec<Span<'static>> {
    vec![
        Span::styled(
            format!("[{}]", question.category),
            Style::default().fg(Color::LightBlue),
        ),
        Span::from(" "),
        Span::styled(
            format!("[{}]", question.difficulty),
            Style::default().fg(difficulty_color(question.difficulty)),
        ),
    ]
}

fn stat_cell<'a>(label: &'a str, value: String, color: Color) -> Paragraph<'a> {
    Paragraph::new(vec![
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(label, Style::default().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL))
}

pub fn draw_browse(f: &mut Frame, app: &App) {
    let layout = calculate_browse_chunks(f.area());

    let title = Paragraph::new("LexAfrica · Exam Preparation")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let stat_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(layout.stats_area);

    let best = match &app.best {
        Some(best) => format!("{}%", best.percentage),
        None => "-".to_string(),
    };
    f.render_widget(
        stat_cell("Questions", app.engine.bank().len().to_string(), Color::Blue),
        stat_chunks[0],
    );
    f.render_widget(
        stat_cell("Categories", LAW_CATEGORIES.len().to_string(), Color::Magenta),
        stat_chunks[1],
    );
    f.render_widget(
        stat_cell("Avg. Time", "2 min".to_string(), Color::Green),
        stat_chunks[2],
    );
    f.render_widget(stat_cell("Your Best", best, Color::Yellow), stat_chunks[3]);

    let filter_line = Line::from(vec![
        Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.current_filter().label().to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
        Span::from(format!(
            "   ({}/{})",
            app.selected_filter + 1,
            app.filters.len()
        )),
    ]);
    let filters = Paragraph::new(filter_line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Category"));
    f.render_widget(filters, layout.filter_area);

    let questions = app.filtered_questions();
    let text_width = layout.list_area.width.saturating_sub(6) as usize;
    let items: Vec<ListItem> = if questions.is_empty() {
        vec![ListItem::new("No questions in this category yet").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        questions
            .iter()
            .map(|q| {
                ListItem::new(vec![
                    Line::from(truncate_string(&q.prompt, text_width)),
                    Line::from(question_tags(q)),
                ])
            })
            .collect()
    };

    let list_title = format!("Start Practice Quiz ({} questions)", questions.len());
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(list_title)
                .border_style(if app.can_start() {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::DarkGray)
                }),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut list_state = ListState::default();
    if !questions.is_empty() {
        list_state.select(Some(app.selected_question.min(questions.len() - 1)));
    }
    f.render_stateful_widget(list, layout.list_area, &mut list_state);

    let backend = if app.config.backend_configured() {
        Line::from(Span::styled("Backend: on", Style::default().fg(Color::Green)))
    } else {
        Line::from(Span::styled("Backend: off", Style::default().fg(Color::DarkGray)))
    };
    let provider = if app.config.provider_configured() {
        Line::from(Span::styled(
            format!("Gemini: {}", app.config.gemini_model),
            Style::default().fg(Color::Green),
        ))
    } else {
        Line::from(Span::styled(
            "Set GEMINI_API_KEY",
            Style::default().fg(Color::Yellow),
        ))
    };
    let status = Paragraph::new(vec![backend, provider])
        .block(Block::default().borders(Borders::ALL).title("LEXA AI"));
    f.render_widget(status, layout.status_area);

    let mut hint = key_hint("←/→", " Category  ");
    hint.extend(key_hint("↑/↓", " Browse  "));
    if app.can_start() {
        hint.extend(key_hint("Enter", " Start Quiz  "));
    }
    hint.extend(key_hint("Ctrl+T", " LEXA  "));
    hint.extend(key_hint("q", " Quit"));

    let mut help_lines = vec![Line::from(hint)];
    if let Some(best) = &app.best {
        help_lines.push(Line::from(Span::styled(
            format!(
                "Best: {}/{} in {} ({})",
                best.correct,
                best.total,
                best.filter_label,
                format_attempt_date(best.completed_at)
            ),
            Style::default().fg(Color::DarkGray),
        )));
    }
    if let Some(warning) = app.bank_warnings.first() {
        help_lines.push(Line::from(Span::styled(
            truncate_string(warning, text_width),
            Style::default().fg(Color::Red),
        )));
    }

    let help = Paragraph::new(help_lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}
