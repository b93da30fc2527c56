//! Whole-screen render checks against ratatui's test backend.

use crate::app::App;
use crate::bank::builtin_questions;
use crate::chat::{ChatReply, ReplySource};
use crate::config::AppConfig;
use crate::db::open_test_db;
use crate::db::settings::Onboarding;
use crate::models::{AppState, UserRole};
use crate::ui;
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

fn returning_app() -> App {
    App::new(
        AppConfig::default(),
        builtin_questions(),
        None,
        Onboarding {
            completed: true,
            role: Some(UserRole::Graduate),
        },
        None,
    )
}

fn render(app: &mut App) -> String {
    let backend = TestBackend::new(110, 40);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| ui::draw(f, app)).unwrap();
    buffer_text(terminal.backend().buffer())
}

fn buffer_text(buffer: &Buffer) -> String {
    let mut out = String::new();
    for row in buffer.content.chunks(buffer.area.width as usize) {
        for cell in row {
            out.push_str(cell.symbol());
        }
        out.push('\n');
    }
    out
}

fn answer_current(app: &mut App, correctly: bool) {
    let question = app.engine.session().unwrap().current_question().clone();
    let index = question
        .options
        .iter()
        .position(|o| question.is_correct(o) == correctly)
        .unwrap();
    app.selected_option = index;
    app.confirm_option();
}

#[test]
fn test_onboarding_modal_lists_roles() {
    let mut app = App::new(
        AppConfig::default(),
        builtin_questions(),
        None,
        Onboarding::default(),
        None,
    );
    let screen = render(&mut app);
    assert!(screen.contains("Welcome to LexAfrica"));
    for role in UserRole::ALL {
        assert!(screen.contains(role.title()), "missing {}", role.title());
    }
}

#[test]
fn test_browse_screen_shows_stats_and_questions() {
    let mut app = returning_app();
    let screen = render(&mut app);
    assert!(screen.contains("Your Best"));
    assert!(screen.contains("Start Practice Quiz (5 questions)"));
    assert!(screen.contains("[Constitutional Law]"));
    assert!(screen.contains("Set GEMINI_API_KEY"));
    assert!(screen.contains("Enter Start Quiz"));
}

#[test]
fn test_browse_empty_category_hides_start() {
    let mut app = returning_app();
    while app.current_filter().label() != "Family Law" {
        app.next_filter();
    }
    let screen = render(&mut app);
    assert!(screen.contains("No questions in this category yet"));
    assert!(!screen.contains("Enter Start Quiz"));
}

#[test]
fn test_quiz_screen_before_and_after_answer() {
    let mut app = returning_app();
    app.start_quiz();

    let screen = render(&mut app);
    assert!(screen.contains("Question 1 of 5"));
    assert!(screen.contains("0 points"));
    assert!(!screen.contains("Explanation"));

    answer_current(&mut app, true);
    let screen = render(&mut app);
    assert!(screen.contains("Correct!"));
    assert!(screen.contains("1 points"));
    assert!(screen.contains("Next Question"));
}

#[test]
fn test_last_question_offers_results() {
    let mut app = returning_app();
    app.start_quiz();
    for _ in 0..4 {
        answer_current(&mut app, true);
        app.confirm_option();
    }
    answer_current(&mut app, false);
    let screen = render(&mut app);
    assert!(screen.contains("Question 5 of 5"));
    assert!(screen.contains("Incorrect"));
    assert!(screen.contains("See Results"));
}

#[test]
fn test_results_screen_for_four_of_five() {
    let mut app = returning_app();
    app.start_quiz();
    for i in 0..5 {
        answer_current(&mut app, i != 2);
        app.confirm_option();
    }
    assert_eq!(app.state, AppState::Results);

    let screen = render(&mut app);
    assert!(screen.contains("4/5"));
    assert!(screen.contains("Good performance! Keep studying!"));
    assert!(screen.contains("80% correct"));
    assert!(screen.contains("Retake Quiz"));
}

#[test]
fn test_quit_confirmation_screen() {
    let mut app = returning_app();
    app.start_quiz();
    app.state = AppState::QuizQuitConfirm;
    let screen = render(&mut app);
    assert!(screen.contains("Leave Quiz"));
    assert!(screen.contains("No (Continue Quiz)"));
}

#[test]
fn test_chat_popup_greeting_and_thinking() {
    let mut app = returning_app();
    app.toggle_chat();

    let screen = render(&mut app);
    assert!(screen.contains("LEXA · Legal Assistant"));
    assert!(screen.contains("Hello! I am LEXA"));
    assert!(screen.contains("Ask LEXA a legal question..."));

    app.chat.session.begin("What is consideration?");
    let screen = render(&mut app);
    assert!(screen.contains("What is consideration?"));
    assert!(screen.contains("LEXA is thinking..."));

    app.chat.session.complete(ChatReply {
        source: ReplySource::Provider,
        text: "Something of value exchanged.".to_string(),
    });
    let screen = render(&mut app);
    assert!(!screen.contains("LEXA is thinking..."));
    assert!(screen.contains("Something of value exchanged."));
}

#[test]
fn test_chat_popup_not_drawn_during_onboarding() {
    let mut app = App::new(
        AppConfig::default(),
        builtin_questions(),
        None,
        Onboarding::default(),
        None,
    );
    app.chat.open = true;
    let screen = render(&mut app);
    assert!(!screen.contains("LEXA · Legal Assistant"));
}

#[test]
fn test_results_screen_lists_recent_attempts() {
    let mut app = App::new(
        AppConfig::default(),
        builtin_questions(),
        Some(open_test_db()),
        Onboarding {
            completed: true,
            role: Some(UserRole::Student),
        },
        None,
    );

    for round in 0..2 {
        if round == 0 {
            app.start_quiz();
        } else {
            app.restart_quiz();
        }
        for i in 0..5 {
            answer_current(&mut app, round == 1 || i != 0);
            app.confirm_option();
        }
    }
    assert_eq!(app.recent.len(), 2);

    let screen = render(&mut app);
    assert!(screen.contains("Recent Attempts"));
    assert!(screen.contains("Today"));
    assert!(screen.contains("5/5  100%  All"));
    assert!(screen.contains("4/5   80%  All"));
}
