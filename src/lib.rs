pub mod app;
pub mod bank;
pub mod chat;
pub mod chat_worker;
pub mod config;
pub mod db;
pub mod input;
pub mod logger;
pub mod models;
pub mod quiz;
pub mod ui;
pub mod utils;

#[cfg(test)]
mod ui_tests;

// Re-exports for convenience
pub use app::App;
pub use bank::{builtin_questions, load_bank, LAW_CATEGORIES};
pub use chat::{ChatController, ChatReply, ChatSession, ReplyResolver, ReplySource};
pub use config::AppConfig;
pub use models::{AppState, CategoryFilter, ChatMessage, ChatRole, Difficulty, Question, UserRole};
pub use quiz::{score_percentage, PassTier, QuizEngine, QuizPhase, QuizSession};
pub use utils::calculate_wrapped_cursor_position;
