use super::key_hint;
use super::layout::centered_rect;
use crate::app::ChatWidget;
use crate::models::ChatRole;
use crate::utils::{
    calculate_max_scroll, calculate_wrapped_cursor_position, estimate_text_height, render_markdown,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Rebuild the rendered lines cache from the conversation.
/// Markdown parsing is the costly step, so it only runs when messages change.
pub fn rebuild_chat_cache(chat: &mut ChatWidget) {
    let mut lines: Vec<Line<'static>> = Vec::new();

    for msg in chat.session.messages() {
        match msg.role {
            ChatRole::User => {
                lines.push(Line::from(Span::styled(
                    "You:",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )));
                for line in msg.content.lines() {
                    lines.push(Line::from(format!("  {}", line)));
                }
            }
            ChatRole::Assistant => {
                lines.push(Line::from(Span::styled(
                    "LEXA:",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )));
                for line in render_markdown(&msg.content) {
                    let mut indented: Vec<Span<'static>> = vec![Span::from("  ")];
                    indented.extend(line.spans);
                    lines.push(Line::from(indented));
                }
            }
        }
        lines.push(Line::from(""));
    }

    chat.rendered_lines_cache = lines;
    chat.cached_message_count = chat.session.messages().len();
}

pub fn draw_chat_popup(f: &mut Frame, chat: &mut ChatWidget) {
    let area = centered_rect(80, 85, f.area());
    f.render_widget(Clear, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    if chat.cached_message_count != chat.session.messages().len() {
        rebuild_chat_cache(chat);
    }

    let busy = chat.session.is_busy();
    let mut message_lines = chat.rendered_lines_cache.clone();
    if busy {
        message_lines.push(Line::from(Span::styled(
            "LEXA is thinking...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    let visible_height = chunks[0].height.saturating_sub(2) as usize;
    let text_width = chunks[0].width.saturating_sub(2) as usize;
    let content_text = Text::from(message_lines);
    let content_height = estimate_text_height(&content_text, text_width);
    // word wrapping breaks earlier than the column estimate
    let buffered_height = content_height + content_height / 2;
    let max_scroll = calculate_max_scroll(buffered_height, visible_height);
    chat.max_scroll = max_scroll;

    let scroll = if busy {
        max_scroll
    } else {
        chat.scroll_y.min(max_scroll)
    };
    chat.scroll_y = scroll;

    let messages = Paragraph::new(content_text)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" LEXA · Legal Assistant ")
                .border_style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(messages, chunks[0]);

    let input_text = if chat.input_buffer.is_empty() && !busy {
        Text::from(Span::styled(
            "Ask LEXA a legal question...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Text::from(chat.input_buffer.as_str())
    };
    let input = Paragraph::new(input_text).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Message ")
            .border_style(if busy {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::Yellow)
            }),
    );
    f.render_widget(input, chunks[1]);

    if !busy {
        let input_width = chunks[1].width.saturating_sub(2) as usize;
        let (cursor_line, cursor_col) =
            calculate_wrapped_cursor_position(&chat.input_buffer, chat.cursor_position, input_width);
        f.set_cursor_position((
            chunks[1].x + 1 + cursor_col as u16,
            chunks[1].y + 1 + cursor_line as u16,
        ));
    }

    let mut hint = if busy {
        Vec::new()
    } else {
        key_hint("Enter", " Send  ")
    };
    hint.extend(key_hint("Ctrl+T", ""));
    hint.push(Span::from("/"));
    hint.extend(key_hint("Esc", " Close  "));
    hint.extend(key_hint("↑/↓", " Scroll"));

    let help = Paragraph::new(Line::from(hint))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[2]);
}
