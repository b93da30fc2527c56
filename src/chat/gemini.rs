use super::error::ChatError;
use crate::config::AppConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const LEXA_SYSTEM_PROMPT: &str = "You are LEXA, a sophisticated legal AI assistant dedicated to helping Nigerian and African law students. \
    Your goal is to provide clear, authoritative, and educational explanations of legal concepts, case law, and statutes. \
    When answering: \n\
    1. Be precise and cite specific cases or sections of law where possible.\n\
    2. Use a professional but encouraging tutor-like tone.\n\
    3. If a question is outside the scope of law or African legal studies, gently guide the user back to legal topics.\n\
    4. Provide structured responses using bullet points or numbered lists for complex topics.";

/// The fallback chat path: a direct call to a generative-language provider.
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ChatError>;
}

pub fn build_prompt(user_text: &str) -> String {
    format!("{}\n\nUser Question: {}", LEXA_SYSTEM_PROMPT, user_text)
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Deserialize)]
struct GeminiResponsePart {
    text: String,
}

#[derive(Deserialize)]
struct GeminiResponseContent {
    parts: Vec<GeminiResponsePart>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiResponseContent,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

impl GeminiRequest {
    fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

/// Pulls `candidates[0].content.parts[0].text` out of a response body.
pub(crate) fn parse_generate_response(body: &str) -> Result<String, ChatError> {
    let parsed: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| ChatError::MalformedResponse(format!("Gemini: {}", e)))?;

    parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .map(|p| p.text)
        .ok_or_else(|| {
            ChatError::MalformedResponse("Gemini response had no candidate text".to_string())
        })
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_base: String,
    api_key: Option<String>,
    model: String,
}

impl GeminiClient {
    pub fn new(api_base: &str, api_key: Option<String>, model: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key,
            model: model.to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.gemini_api_base,
            config.gemini_api_key.clone(),
            &config.gemini_model,
        )
    }

    fn url(&self, key: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.api_base, self.model, key
        )
    }
}

#[async_trait]
impl GenerativeProvider for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ChatError> {
        let Some(key) = self.api_key.as_deref() else {
            return Err(ChatError::ConfigurationMissing("GEMINI_API_KEY"));
        };

        let res = self
            .client
            .post(self.url(key))
            .json(&GeminiRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|e| ChatError::Provider(e.without_url().to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| ChatError::Provider(e.without_url().to_string()))?;

        if !status.is_success() {
            return Err(ChatError::Provider(format!("HTTP {} - {}", status, body)));
        }

        parse_generate_response(&body)
    }
}
