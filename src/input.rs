use crate::app::App;
use crate::models::{AppState, UserRole};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Routes a key press to the chat popup or the active screen.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if ctrl && key.code == KeyCode::Char('t') && app.state != AppState::Onboarding {
        app.toggle_chat();
        return;
    }

    if app.chat.open {
        handle_chat_input(app, key);
        return;
    }

    match app.state {
        AppState::Onboarding => handle_onboarding_input(app, key),
        AppState::Browse => handle_browse_input(app, key),
        AppState::Quiz => handle_quiz_input(app, key),
        AppState::QuizQuitConfirm => handle_quit_confirm_input(app, key),
        AppState::Results => handle_results_input(app, key),
    }
}

fn handle_chat_input(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Enter {
        app.send_chat();
        return;
    }

    let chat = &mut app.chat;
    match key.code {
        KeyCode::Esc => chat.open = false,
        KeyCode::Up => chat.scroll_y = chat.scroll_y.saturating_sub(1),
        KeyCode::Down => {
            if chat.scroll_y < chat.max_scroll {
                chat.scroll_y += 1;
            }
        }
        KeyCode::Left => chat.cursor_left(),
        KeyCode::Right => chat.cursor_right(),
        KeyCode::Backspace => chat.backspace(),
        KeyCode::Char(c) => chat.insert_char(c),
        _ => {}
    }
}

fn handle_onboarding_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up => app.onboarding_choice = app.onboarding_choice.saturating_sub(1),
        KeyCode::Down => {
            if app.onboarding_choice + 1 < UserRole::ALL.len() {
                app.onboarding_choice += 1;
            }
        }
        KeyCode::Enter => app.finish_onboarding(),
        _ => {}
    }
}

fn handle_browse_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left => app.previous_filter(),
        KeyCode::Right | KeyCode::Tab => app.next_filter(),
        KeyCode::Up => app.selected_question = app.selected_question.saturating_sub(1),
        KeyCode::Down => {
            if app.selected_question + 1 < app.filtered_questions().len() {
                app.selected_question += 1;
            }
        }
        KeyCode::Enter | KeyCode::Char('s') => app.start_quiz(),
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}

fn handle_quiz_input(app: &mut App, key: KeyEvent) {
    let Some(session) = app.engine.session() else {
        app.back_to_browse();
        return;
    };
    let option_count = session.current_question().options.len();
    let revealed = session.is_revealed();

    match key.code {
        KeyCode::Esc => app.state = AppState::QuizQuitConfirm,
        KeyCode::Up if !revealed => app.selected_option = app.selected_option.saturating_sub(1),
        KeyCode::Down if !revealed => {
            if app.selected_option + 1 < option_count {
                app.selected_option += 1;
            }
        }
        KeyCode::Char(c) if !revealed => {
            if let Some(digit) = c.to_digit(10)
                && digit >= 1
                && (digit as usize) <= option_count
            {
                app.selected_option = digit as usize - 1;
                app.engine.answer_index(app.selected_option);
            }
        }
        KeyCode::Enter => app.confirm_option(),
        _ => {}
    }
}

fn handle_quit_confirm_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.back_to_browse(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.state = AppState::Quiz,
        _ => {}
    }
}

fn handle_results_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') => app.restart_quiz(),
        KeyCode::Char('b') | KeyCode::Char('m') => app.back_to_browse(),
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}
