use crate::bank::LAW_CATEGORIES;
use crate::chat::ChatSession;
use crate::chat_worker::{ChatRequest, ChatResponse, worker_unavailable_reply};
use crate::config::AppConfig;
use crate::db::attempt::{AttemptSummary, best_attempt, recent_attempts, record_attempt};
use crate::db::settings::{Onboarding, complete_onboarding};
use crate::logger;
use crate::models::{AppState, CategoryFilter, Question, UserRole};
use crate::quiz::{QuizEngine, QuizPhase};
use ratatui::text::Line;
use rusqlite::Connection;
use std::sync::mpsc::Sender;

/// The floating LEXA chat widget: conversation plus its input line.
#[derive(Debug, Default)]
pub struct ChatWidget {
    pub session: ChatSession,
    pub open: bool,
    pub input_buffer: String,
    pub cursor_position: usize,
    pub scroll_y: u16,
    pub max_scroll: u16,
    pub rendered_lines_cache: Vec<Line<'static>>,
    pub cached_message_count: usize,
}

impl ChatWidget {
    pub fn insert_char(&mut self, c: char) {
        self.input_buffer.insert(self.cursor_position, c);
        self.cursor_position += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.input_buffer[..self.cursor_position].chars().next_back() {
            self.cursor_position -= prev.len_utf8();
            self.input_buffer.remove(self.cursor_position);
        }
    }

    pub fn cursor_left(&mut self) {
        if let Some(prev) = self.input_buffer[..self.cursor_position].chars().next_back() {
            self.cursor_position -= prev.len_utf8();
        }
    }

    pub fn cursor_right(&mut self) {
        if let Some(next) = self.input_buffer[self.cursor_position..].chars().next() {
            self.cursor_position += next.len_utf8();
        }
    }
}

pub struct App {
    pub state: AppState,
    pub config: AppConfig,
    pub engine: QuizEngine,
    pub filters: Vec<CategoryFilter>,
    pub selected_filter: usize,
    pub selected_question: usize,
    pub selected_option: usize,
    pub onboarding: Onboarding,
    pub onboarding_choice: usize,
    pub best: Option<AttemptSummary>,
    pub recent: Vec<AttemptSummary>,
    pub bank_warnings: Vec<String>,
    pub chat: ChatWidget,
    pub should_quit: bool,
    db: Option<Connection>,
    chat_tx: Option<Sender<ChatRequest>>,
}

/// `All`, the fixed law categories, then any extra category a loaded deck brings.
pub fn build_filters(bank: &[Question]) -> Vec<CategoryFilter> {
    let mut filters = vec![CategoryFilter::All];
    filters.extend(
        LAW_CATEGORIES
            .iter()
            .map(|c| CategoryFilter::Category(c.to_string())),
    );
    for category in crate::bank::categories_in(bank) {
        let filter = CategoryFilter::Category(category);
        if !filters.contains(&filter) {
            filters.push(filter);
        }
    }
    filters
}

/// Attempts listed under the results summary.
pub const RECENT_ATTEMPT_LIMIT: usize = 5;

fn load_recent(conn: &Connection) -> Vec<AttemptSummary> {
    recent_attempts(conn, RECENT_ATTEMPT_LIMIT).unwrap_or_else(|e| {
        logger::log(&format!("Failed to load recent attempts: {}", e));
        Vec::new()
    })
}

impl App {
    pub fn new(
        config: AppConfig,
        bank: Vec<Question>,
        db: Option<Connection>,
        onboarding: Onboarding,
        chat_tx: Option<Sender<ChatRequest>>,
    ) -> Self {
        let best = db.as_ref().and_then(|conn| best_attempt(conn).ok().flatten());
        let recent = db.as_ref().map(load_recent).unwrap_or_default();
        let state = if onboarding.completed {
            AppState::Browse
        } else {
            AppState::Onboarding
        };

        Self {
            state,
            config,
            filters: build_filters(&bank),
            engine: QuizEngine::new(bank),
            selected_filter: 0,
            selected_question: 0,
            selected_option: 0,
            onboarding,
            onboarding_choice: 0,
            best,
            recent,
            bank_warnings: Vec::new(),
            chat: ChatWidget::default(),
            should_quit: false,
            db,
            chat_tx,
        }
    }

    pub fn current_filter(&self) -> &CategoryFilter {
        &self.filters[self.selected_filter]
    }

    pub fn filtered_questions(&self) -> Vec<&Question> {
        self.engine.filtered(self.current_filter())
    }

    pub fn can_start(&self) -> bool {
        self.engine.can_start(self.current_filter())
    }

    pub fn next_filter(&mut self) {
        self.selected_filter = (self.selected_filter + 1) % self.filters.len();
        self.selected_question = 0;
    }

    pub fn previous_filter(&mut self) {
        self.selected_filter = (self.selected_filter + self.filters.len() - 1) % self.filters.len();
        self.selected_question = 0;
    }

    pub fn finish_onboarding(&mut self) {
        let role = UserRole::ALL[self.onboarding_choice.min(UserRole::ALL.len() - 1)];
        if let Some(conn) = self.db.as_ref()
            && let Err(e) = complete_onboarding(conn, role)
        {
            logger::log(&format!("Failed to persist onboarding: {}", e));
        }
        self.onboarding = Onboarding {
            completed: true,
            role: Some(role),
        };
        self.state = AppState::Browse;
    }

    pub fn start_quiz(&mut self) {
        let filter = self.current_filter().clone();
        if self.engine.start(filter) {
            self.selected_option = 0;
            self.state = AppState::Quiz;
        }
    }

    pub fn restart_quiz(&mut self) {
        if self.engine.restart() {
            self.selected_option = 0;
            self.state = AppState::Quiz;
        }
    }

    pub fn back_to_browse(&mut self) {
        self.engine.back_to_browse();
        self.state = AppState::Browse;
    }

    /// Enter on the quiz screen: answer the highlighted option, or move on once revealed.
    pub fn confirm_option(&mut self) {
        let revealed = self
            .engine
            .session()
            .map(|s| s.is_revealed())
            .unwrap_or(false);

        if revealed {
            self.advance();
        } else {
            self.engine.answer_index(self.selected_option);
        }
    }

    pub fn advance(&mut self) {
        self.engine.advance();
        self.selected_option = 0;
        if self.engine.phase() == QuizPhase::Finished {
            self.on_quiz_finished();
        }
    }

    fn on_quiz_finished(&mut self) {
        self.state = AppState::Results;
        let Some(session) = self.engine.session() else {
            return;
        };
        let Some(conn) = self.db.as_ref() else {
            return;
        };

        match record_attempt(
            conn,
            session.filter.label(),
            session.correct_count,
            session.total(),
        ) {
            Ok(_) => {
                self.best = best_attempt(conn).ok().flatten();
                self.recent = load_recent(conn);
            }
            Err(e) => logger::log(&format!("Failed to record attempt: {}", e)),
        }
    }

    pub fn toggle_chat(&mut self) {
        self.chat.open = !self.chat.open;
    }

    /// Sends the chat input line. The user message shows up immediately; the
    /// reply arrives later through `on_chat_response`.
    pub fn send_chat(&mut self) {
        let Some(text) = self.chat.session.begin(&self.chat.input_buffer) else {
            return;
        };
        self.chat.input_buffer.clear();
        self.chat.cursor_position = 0;

        let delivered = match self.chat_tx.as_ref() {
            Some(tx) => tx.send(ChatRequest::Send { text }).is_ok(),
            None => false,
        };

        if !delivered {
            logger::log("Chat worker unavailable, completing round trip locally");
            self.chat.session.complete(worker_unavailable_reply());
        }
    }

    pub fn on_chat_response(&mut self, response: ChatResponse) {
        match response {
            ChatResponse::Reply(reply) => self.chat.session.complete(reply),
        }
    }

    /// The worker hung up. Any outstanding round trip ends with a diagnostic
    /// and later sends complete locally.
    pub fn on_chat_worker_gone(&mut self) {
        if self.chat_tx.take().is_some() {
            logger::log("Chat worker disconnected");
        }
        if self.chat.session.is_busy() {
            self.chat.session.complete(worker_unavailable_reply());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::builtin_questions;
    use crate::chat::{ChatReply, ReplySource};
    use crate::db::open_test_db;
    use crate::db::settings::load_onboarding;
    use crate::models::ChatRole;
    use std::sync::mpsc;

    fn app_with_db() -> App {
        App::new(
            AppConfig::default(),
            builtin_questions(),
            Some(open_test_db()),
            Onboarding::default(),
            None,
        )
    }

    #[test]
    fn test_first_run_shows_onboarding() {
        let app = app_with_db();
        assert_eq!(app.state, AppState::Onboarding);

        let returning = App::new(
            AppConfig::default(),
            builtin_questions(),
            None,
            Onboarding {
                completed: true,
                role: Some(UserRole::Student),
            },
            None,
        );
        assert_eq!(returning.state, AppState::Browse);
    }

    #[test]
    fn test_finish_onboarding_persists_choice() {
        let mut app = app_with_db();
        app.onboarding_choice = 2;
        app.finish_onboarding();

        assert_eq!(app.state, AppState::Browse);
        assert_eq!(app.onboarding.role, Some(UserRole::Lawyer));
        let stored = load_onboarding(app.db.as_ref().unwrap()).unwrap();
        assert!(stored.completed);
        assert_eq!(stored.role, Some(UserRole::Lawyer));
    }

    #[test]
    fn test_filters_cycle_both_ways() {
        let mut app = app_with_db();
        assert_eq!(app.filters.len(), 1 + LAW_CATEGORIES.len());
        assert_eq!(app.current_filter(), &CategoryFilter::All);

        app.previous_filter();
        assert_eq!(app.current_filter().label(), "Legal Methods");
        app.next_filter();
        app.next_filter();
        assert_eq!(app.current_filter().label(), "Constitutional Law");
    }

    #[test]
    fn test_extra_deck_categories_get_a_filter() {
        let mut bank = builtin_questions();
        let mut extra = bank[0].clone();
        extra.category = "Election Petitions".to_string();
        bank.push(extra);

        let filters = build_filters(&bank);
        assert_eq!(
            filters.last(),
            Some(&CategoryFilter::Category("Election Petitions".to_string()))
        );
    }

    #[test]
    fn test_start_is_disabled_for_empty_category() {
        let mut app = app_with_db();
        app.state = AppState::Browse;
        while app.current_filter().label() != "Family Law" {
            app.next_filter();
        }
        assert!(!app.can_start());
        app.start_quiz();
        assert_eq!(app.state, AppState::Browse);
    }

    #[test]
    fn test_full_quiz_records_attempt() {
        let mut app = app_with_db();
        app.state = AppState::Browse;
        app.start_quiz();
        assert_eq!(app.state, AppState::Quiz);

        for _ in 0..5 {
            let answer = app.engine.session().unwrap().current_question().answer.clone();
            let index = app
                .engine
                .session()
                .unwrap()
                .current_question()
                .options
                .iter()
                .position(|o| *o == answer)
                .unwrap();
            app.selected_option = index;
            app.confirm_option(); // answer
            app.confirm_option(); // next
        }

        assert_eq!(app.state, AppState::Results);
        let best = app.best.as_ref().unwrap();
        assert_eq!(best.percentage, 100);
        assert_eq!(best.filter_label, "All");
        assert_eq!(app.recent.len(), 1);
        assert_eq!(app.recent[0].correct, 5);

        app.restart_quiz();
        assert_eq!(app.state, AppState::Quiz);
        assert_eq!(app.engine.session().unwrap().correct_count, 0);

        app.back_to_browse();
        assert_eq!(app.state, AppState::Browse);
        assert!(app.engine.session().is_none());
    }

    #[test]
    fn test_send_chat_without_worker_clears_busy() {
        let mut app = app_with_db();
        app.chat.input_buffer = "What is a tort?".to_string();
        app.send_chat();

        let messages = app.chat.session.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, ChatRole::User);
        assert_eq!(messages[2].role, ChatRole::Assistant);
        assert!(!app.chat.session.is_busy());
        assert!(app.chat.input_buffer.is_empty());
    }

    #[test]
    fn test_send_chat_forwards_to_worker() {
        let (tx, rx) = mpsc::channel();
        let mut app = App::new(
            AppConfig::default(),
            builtin_questions(),
            None,
            Onboarding::default(),
            Some(tx),
        );

        app.chat.input_buffer = "  ".to_string();
        app.send_chat();
        assert!(rx.try_recv().is_err());

        app.chat.input_buffer = "Explain estoppel".to_string();
        app.send_chat();
        let ChatRequest::Send { text } = rx.try_recv().unwrap();
        assert_eq!(text, "Explain estoppel");
        assert!(app.chat.session.is_busy());

        app.on_chat_response(ChatResponse::Reply(ChatReply {
            source: ReplySource::Provider,
            text: "Estoppel prevents...".to_string(),
        }));
        assert!(!app.chat.session.is_busy());
        assert_eq!(app.chat.session.messages().len(), 3);
    }

    #[test]
    fn test_worker_gone_mid_request_clears_busy() {
        let (tx, rx) = mpsc::channel();
        let mut app = App::new(
            AppConfig::default(),
            builtin_questions(),
            None,
            Onboarding::default(),
            Some(tx),
        );

        app.chat.input_buffer = "What is mens rea?".to_string();
        app.send_chat();
        assert!(app.chat.session.is_busy());
        drop(rx);

        app.on_chat_worker_gone();
        assert!(!app.chat.session.is_busy());
        let messages = app.chat.session.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].role, ChatRole::Assistant);

        // later sends complete locally instead of waiting on a dead worker
        app.chat.input_buffer = "And actus reus?".to_string();
        app.send_chat();
        assert!(!app.chat.session.is_busy());
        assert_eq!(app.chat.session.messages().len(), 5);
    }

    #[test]
    fn test_chat_input_editing_handles_multibyte() {
        let mut chat = ChatWidget::default();
        for c in "£5".chars() {
            chat.insert_char(c);
        }
        chat.cursor_left();
        chat.cursor_left();
        chat.insert_char('x');
        assert_eq!(chat.input_buffer, "x£5");
        chat.cursor_right();
        chat.backspace();
        assert_eq!(chat.input_buffer, "x5");
        chat.cursor_right();
        chat.cursor_right();
        assert_eq!(chat.cursor_position, 2);
    }
}
