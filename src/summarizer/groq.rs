use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::{
    build_user_message, effective_prompt, truncate_transcript, validate, SummarizeError,
    SummarizeRequest, Summarizer, SYSTEM_MESSAGE,
};

const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";
const MODEL: &str = "llama-3.3-70b-versatile";
const TEMPERATURE: f64 = 0.2;
const MAX_TOKENS: u32 = 900;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    temperature: f64,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

/// Only the content matters on the way back; anything else the API sends
/// is ignored.
#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

/// Summarizer backed by Groq's OpenAI-compatible chat-completion API.
pub struct GroqSummarizer {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GroqSummarizer {
    /// `base_url` overrides the Groq endpoint, used by tests to point at
    /// a local mock server.
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        let base_url = base_url.unwrap_or_else(|| GROQ_API_BASE.to_string());
        info!("Initialized Groq summarizer with endpoint: {}", base_url);
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url,
        }
    }
}

#[async_trait]
impl Summarizer for GroqSummarizer {
    async fn summarize(&self, request: &SummarizeRequest) -> Result<String, SummarizeError> {
        validate(request)?;

        let instruction = effective_prompt(request.prompt.as_deref());
        let transcript = truncate_transcript(&request.transcript);

        let body = ChatCompletionRequest {
            model: MODEL.to_string(),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_MESSAGE.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: build_user_message(instruction, &transcript),
                },
            ],
        };

        debug!(
            "Requesting completion: model={}, transcript chars={}",
            MODEL,
            transcript.chars().count()
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Groq API request failed with status {}: {}", status, body);
            return Err(SummarizeError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse =
            response.json().await.map_err(|err| {
                error!("Failed to parse Groq response: {}", err);
                SummarizeError::EmptyResult
            })?;

        let summary = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .map(|message| message.content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(SummarizeError::EmptyResult)?;

        info!("Summary generated: {} chars", summary.len());
        Ok(summary)
    }
}
