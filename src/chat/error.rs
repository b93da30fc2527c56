use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("{0} is not set")]
    ConfigurationMissing(&'static str),

    #[error("backend did not answer within {0:?}")]
    Timeout(Duration),

    #[error("backend unreachable: {0}")]
    NetworkUnavailable(String),

    #[error("backend returned HTTP {0}")]
    BackendStatus(u16),

    #[error("provider error: {0}")]
    Provider(String),

    #[error("unexpected response body: {0}")]
    MalformedResponse(String),
}

impl ChatError {
    /// Text shown in the chat when every path failed. Never includes the raw error.
    pub fn diagnostic(&self) -> &'static str {
        match self {
            ChatError::ConfigurationMissing(_) => {
                "LEXA is not configured yet. Set GEMINI_API_KEY (or LEXA_API_URL) to enable the legal assistant."
            }
            _ => {
                "I'm sorry, I'm having trouble connecting to my knowledge base right now. Please try again in a moment."
            }
        }
    }
}
