use super::error::ChatError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The primary chat path: the LEXA REST backend.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn chat(&self, message: &str) -> Result<String, ChatError>;
}

#[derive(Debug, Serialize)]
struct ChatRequestBody<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponseBody {
    response: String,
}

#[derive(Debug, Clone)]
pub struct LexaBackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl LexaBackendClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat", self.base_url)
    }
}

pub(crate) fn parse_chat_response(body: &str) -> Result<String, ChatError> {
    serde_json::from_str::<ChatResponseBody>(body)
        .map(|parsed| parsed.response)
        .map_err(|e| ChatError::MalformedResponse(e.to_string()))
}

#[async_trait]
impl ChatBackend for LexaBackendClient {
    async fn chat(&self, message: &str) -> Result<String, ChatError> {
        let res = self
            .client
            .post(self.endpoint())
            .json(&ChatRequestBody { message })
            .send()
            .await
            .map_err(|e| ChatError::NetworkUnavailable(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            return Err(ChatError::BackendStatus(status.as_u16()));
        }

        let body = res
            .text()
            .await
            .map_err(|e| ChatError::NetworkUnavailable(e.to_string()))?;
        parse_chat_response(&body)
    }
}
