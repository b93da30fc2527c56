use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use regex::Regex;

lazy_static::lazy_static! {
    static ref NUMBERED_ITEM: Regex = Regex::new(r"^(\d+)[.)]\s+(.*)$").unwrap();
    static ref INLINE: Regex = Regex::new(r"\*\*(.+?)\*\*|\*(.+?)\*|`([^`]+)`").unwrap();
    // "Section 36", "s. 5", "[1932]" style statute and law-report references
    static ref CITATION: Regex =
        Regex::new(r"\b(?:[Ss]ections?|[Ss]\.)\s*\d+[A-Za-z]?\b|\[\d{4}\]").unwrap();
}

fn citation_style() -> Style {
    Style::default().fg(Color::LightBlue)
}

/// Renders a LEXA reply for the chat popup.
/// Handles headings, bullet and numbered lists, pipe tables, and
/// **bold** / *italic* / `code` spans. Legal citations are highlighted.
pub fn render_markdown(content: &str) -> Vec<Line<'static>> {
    let lines: Vec<&str> = content.lines().collect();
    let mut out = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if is_table_row(line) && i + 1 < lines.len() && is_table_separator(lines[i + 1]) {
            let header = parse_table_row(line);
            i += 2;
            let mut rows = Vec::new();
            while i < lines.len() && is_table_row(lines[i]) && !is_table_separator(lines[i]) {
                rows.push(parse_table_row(lines[i]));
                i += 1;
            }
            render_table(&header, &rows, &mut out);
            continue;
        }

        let trimmed = line.trim();
        let heading = trimmed
            .strip_prefix("### ")
            .or_else(|| trimmed.strip_prefix("## "))
            .or_else(|| trimmed.strip_prefix("# "));

        if let Some(heading) = heading {
            out.push(Line::from(Span::styled(
                heading.to_string(),
                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )));
        } else if let Some(item) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            let mut spans = vec![Span::from("  • ")];
            spans.extend(parse_inline(item));
            out.push(Line::from(spans));
        } else if let Some(caps) = NUMBERED_ITEM.captures(trimmed) {
            let mut spans = vec![Span::from(format!("  {}. ", &caps[1]))];
            spans.extend(parse_inline(&caps[2]));
            out.push(Line::from(spans));
        } else if trimmed.is_empty() {
            out.push(Line::from(""));
        } else {
            out.push(Line::from(parse_inline(line)));
        }
        i += 1;
    }

    out
}

fn parse_inline(text: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in INLINE.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        push_plain(&text[last..whole.start()], &mut spans);

        if let Some(bold) = caps.get(1) {
            spans.push(Span::styled(
                bold.as_str().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ));
        } else if let Some(italic) = caps.get(2) {
            spans.push(Span::styled(
                italic.as_str().to_string(),
                Style::default().add_modifier(Modifier::ITALIC),
            ));
        } else if let Some(code) = caps.get(3) {
            spans.push(Span::styled(
                code.as_str().to_string(),
                Style::default().add_modifier(Modifier::DIM),
            ));
        }
        last = whole.end();
    }
    push_plain(&text[last..], &mut spans);

    if spans.is_empty() {
        spans.push(Span::from(text.to_string()));
    }
    spans
}

/// Plain text, with citations split out into their own styled spans.
fn push_plain(text: &str, spans: &mut Vec<Span<'static>>) {
    let mut last = 0;
    for m in CITATION.find_iter(text) {
        if m.start() > last {
            spans.push(Span::from(text[last..m.start()].to_string()));
        }
        spans.push(Span::styled(m.as_str().to_string(), citation_style()));
        last = m.end();
    }
    if last < text.len() {
        spans.push(Span::from(text[last..].to_string()));
    }
}

fn is_table_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('|') || (trimmed.contains('|') && trimmed.ends_with('|'))
}

fn is_table_separator(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.contains('-')
        && trimmed
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':' | ' '))
}

fn parse_table_row(line: &str) -> Vec<String> {
    line.trim()
        .trim_matches('|')
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect()
}

/// Tables become "Header: value" blocks so they wrap inside a narrow popup.
fn render_table(header: &[String], rows: &[Vec<String>], out: &mut Vec<Line<'static>>) {
    if rows.is_empty() {
        out.push(Line::from(Span::styled(
            header.join(" │ "),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        return;
    }

    for (row_idx, row) in rows.iter().enumerate() {
        if row_idx > 0 {
            out.push(Line::from(""));
        }
        for (col, cell) in row.iter().enumerate() {
            let name = header.get(col).map(String::as_str).unwrap_or("?");
            let mut spans = vec![Span::styled(
                format!("{}: ", name),
                Style::default().add_modifier(Modifier::BOLD),
            )];
            spans.extend(parse_inline(cell));
            out.push(Line::from(spans));
        }
    }
}
