pub mod backend;
pub mod controller;
pub mod error;
pub mod gemini;

pub use backend::{ChatBackend, LexaBackendClient};
pub use controller::{
    ChatController, ChatReply, ChatSession, ReplyResolver, ReplySource, GREETING,
};
pub use error::ChatError;
pub use gemini::{GeminiClient, GenerativeProvider, LEXA_SYSTEM_PROMPT};
