use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct BrowseLayout {
    pub header_area: Rect,
    pub stats_area: Rect,
    pub filter_area: Rect,
    pub list_area: Rect,
    pub status_area: Rect,
    pub help_area: Rect,
}

pub struct QuizLayout {
    pub progress_area: Rect,
    pub question_area: Rect,
    pub options_area: Rect,
    pub explanation_area: Rect,
    pub help_area: Rect,
}

pub fn calculate_browse_chunks(area: Rect) -> BrowseLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(4),
        ])
        .split(area);

    let footer = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(chunks[4]);

    BrowseLayout {
        header_area: chunks[0],
        stats_area: chunks[1],
        filter_area: chunks[2],
        list_area: chunks[3],
        status_area: footer[0],
        help_area: footer[1],
    }
}

pub fn calculate_quiz_chunks(area: Rect) -> QuizLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Min(6),
            Constraint::Length(6),
            Constraint::Length(3),
        ])
        .split(area);

    QuizLayout {
        progress_area: chunks[0],
        question_area: chunks[1],
        options_area: chunks[2],
        explanation_area: chunks[3],
        help_area: chunks[4],
    }
}

/// A `percent_x` by `percent_y` rectangle centered in `area`, for popups.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
