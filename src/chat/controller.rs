use super::backend::{ChatBackend, LexaBackendClient};
use super::error::ChatError;
use super::gemini::{GeminiClient, GenerativeProvider, build_prompt};
use crate::config::AppConfig;
use crate::logger;
use crate::models::{ChatMessage, ChatRole};
use std::sync::Arc;
use std::time::Duration;

pub const GREETING: &str = "Hello! I am LEXA, your legal learning assistant. How can I help you with Nigerian or African law today?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Backend,
    Provider,
    Diagnostic,
}

/// The one terminal outcome of a round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub source: ReplySource,
    pub text: String,
}

impl ChatReply {
    pub fn diagnostic(err: &ChatError) -> Self {
        Self {
            source: ReplySource::Diagnostic,
            text: err.diagnostic().to_string(),
        }
    }
}

/// Append-only conversation state owned by one chat widget.
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    busy: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(GREETING)],
            busy: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Synchronous half of a round trip: appends the user message and marks the
    /// session busy. Returns the text to send, or `None` when rejected.
    pub fn begin(&mut self, text: &str) -> Option<String> {
        let text = text.trim();
        if text.is_empty() || self.busy {
            return None;
        }

        self.messages.push(ChatMessage::user(text));
        self.busy = true;
        Some(text.to_string())
    }

    /// Resolves the outstanding round trip with exactly one assistant message.
    pub fn complete(&mut self, reply: ChatReply) {
        if !self.busy {
            logger::log("Dropping chat reply with no round trip outstanding");
            return;
        }
        self.messages.push(ChatMessage::assistant(reply.text));
        self.busy = false;
    }
}

/// Primary-then-fallback reply strategy.
pub struct ReplyResolver {
    backend: Option<Box<dyn ChatBackend>>,
    provider: Box<dyn GenerativeProvider>,
    timeout: Duration,
}

impl ReplyResolver {
    pub fn new(
        backend: Option<Box<dyn ChatBackend>>,
        provider: Box<dyn GenerativeProvider>,
        timeout: Duration,
    ) -> Self {
        Self {
            backend,
            provider,
            timeout,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let backend = config
            .backend_base
            .as_deref()
            .map(|base| Box::new(LexaBackendClient::new(base)) as Box<dyn ChatBackend>);
        Self::new(
            backend,
            Box::new(GeminiClient::from_config(config)),
            config.chat_timeout,
        )
    }

    async fn try_backend(&self, message: &str) -> Result<String, ChatError> {
        let Some(backend) = self.backend.as_ref() else {
            return Err(ChatError::ConfigurationMissing("LEXA_API_URL"));
        };

        // dropping the future on expiry aborts the in-flight request
        tokio::time::timeout(self.timeout, backend.chat(message))
            .await
            .map_err(|_| ChatError::Timeout(self.timeout))?
    }

    /// Always produces exactly one reply; errors become a diagnostic message.
    pub async fn resolve(&self, message: &str) -> ChatReply {
        match self.try_backend(message).await {
            Ok(text) => {
                return ChatReply {
                    source: ReplySource::Backend,
                    text,
                };
            }
            Err(e) => logger::log(&format!("Primary chat path failed, falling back: {}", e)),
        }

        match self.provider.generate(&build_prompt(message)).await {
            Ok(text) => ChatReply {
                source: ReplySource::Provider,
                text,
            },
            Err(e) => {
                logger::log(&format!("Fallback chat path failed: {}", e));
                ChatReply::diagnostic(&e)
            }
        }
    }
}

/// A chat session driven directly by an async caller.
pub struct ChatController {
    session: ChatSession,
    resolver: Arc<ReplyResolver>,
}

impl ChatController {
    pub fn new(resolver: Arc<ReplyResolver>) -> Self {
        Self {
            session: ChatSession::new(),
            resolver,
        }
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.session.messages()
    }

    pub fn is_busy(&self) -> bool {
        self.session.is_busy()
    }

    /// Runs one round trip. Returns `false` if the text was rejected.
    pub async fn send(&mut self, text: &str) -> bool {
        let Some(message) = self.session.begin(text) else {
            return false;
        };
        logger::log(&format!(
            "Chat {} message queued ({} chars)",
            ChatRole::User.as_str(),
            message.len()
        ));

        let reply = self.resolver.resolve(&message).await;
        self.session.complete(reply);
        true
    }
}
