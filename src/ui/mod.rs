pub mod layout;
mod browse;
mod chat_popup;
mod onboarding;
mod quiz;
mod results;

pub use browse::{draw_browse, format_attempt_date};
pub use chat_popup::{draw_chat_popup, rebuild_chat_cache};
pub use layout::{calculate_browse_chunks, calculate_quiz_chunks, centered_rect};
pub use onboarding::draw_onboarding;
pub use quiz::{draw_quit_confirmation, draw_quiz};
pub use results::draw_results;

use crate::app::App;
use crate::models::AppState;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

/// A key in the help bar followed by what it does.
pub(crate) fn key_hint(key: &'static str, label: &'static str) -> Vec<Span<'static>> {
    vec![
        Span::styled(
            key,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(label),
    ]
}

/// Draws the screen for the current state, with the chat popup on top when open.
pub fn draw(f: &mut Frame, app: &mut App) {
    match app.state {
        AppState::Onboarding => {
            draw_browse(f, app);
            draw_onboarding(f, app);
        }
        AppState::Browse => draw_browse(f, app),
        AppState::Quiz => draw_quiz(f, app),
        AppState::QuizQuitConfirm => draw_quit_confirmation(f),
        AppState::Results => draw_results(f, app),
    }

    if app.chat.open && app.state != AppState::Onboarding {
        draw_chat_popup(f, &mut app.chat);
    }
}
