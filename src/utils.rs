use ratatui::text::Text;
use unicode_width::UnicodeWidthChar;

pub mod markdown;

pub use markdown::render_markdown;

/// Shortens `s` to at most `max_chars` characters, ending in "..." when cut.
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Visual lines of `text` wrapped at `max_width` columns, as
/// `(start_byte, end_byte, trimmed_width)`. Mirrors `Wrap { trim: true }`.
fn wrapped_line_spans(text: &str, max_width: usize) -> Vec<(usize, usize, usize)> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut width = 0;
    let mut line = String::new();

    for (idx, ch) in text.char_indices() {
        if ch == '\n' {
            lines.push((start, idx, line.trim_end().chars().count()));
            line.clear();
            width = 0;
            start = idx + 1;
            continue;
        }

        let w = ch.width().unwrap_or(1);
        if width + w > max_width && width > 0 {
            lines.push((start, idx, line.trim_end().chars().count()));
            line.clear();
            width = 0;
            start = idx;
        }
        line.push(ch);
        width += w;
    }

    if !line.is_empty() || text.ends_with('\n') {
        lines.push((start, text.len(), line.trim_end().chars().count()));
    }

    lines
}

/// `(line, column)` of a cursor at byte offset `cursor` once `text` is wrapped.
pub fn calculate_wrapped_cursor_position(
    text: &str,
    cursor: usize,
    max_width: usize,
) -> (usize, usize) {
    if text.is_empty() || cursor == 0 || max_width == 0 {
        return (0, 0);
    }

    let lines = wrapped_line_spans(text, max_width);
    for (line_idx, (start, end, _)) in lines.iter().enumerate() {
        if cursor >= *start && cursor <= *end {
            let col = text[*start..cursor.min(text.len())].chars().count();
            return (line_idx, col);
        }
    }

    match lines.last() {
        Some((_, _, trimmed)) => (lines.len() - 1, *trimmed),
        None => (0, 0),
    }
}

/// Rough rendered height of `text` in a `width`-column paragraph with wrapping.
pub fn estimate_text_height(text: &Text, width: usize) -> usize {
    if width == 0 {
        return text.lines.len();
    }
    text.lines
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum()
}

pub fn calculate_max_scroll(content_height: usize, visible_height: usize) -> u16 {
    content_height
        .saturating_sub(visible_height)
        .min(u16::MAX as usize) as u16
}
