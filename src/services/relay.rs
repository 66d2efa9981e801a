// src/services/relay.rs
//! Outbound call to the completion API.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::config::{ApiStyle, Config};

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("no API key configured for the completion service")]
    MissingApiKey,

    #[error("request to completion service failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("completion service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode completion response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One system/user exchange with a completion backend.
///
/// `Ok(None)` means the call succeeded but no reply text could be found.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        system_prompt: &str,
        user_text: &str,
    ) -> Result<Option<String>, RelayError>;
}

// Every level is optional: a missing or null field just means "no candidate here".
#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct OutputContent {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Option<Vec<OutputContent>>,
}

/// Union of the chat-completions and responses shapes.
#[derive(Debug, Default, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    choices: Option<Vec<Choice>>,
    #[serde(default)]
    output: Option<Vec<OutputItem>>,
    #[serde(default)]
    output_text: Option<String>,
}

impl CompletionResponse {
    /// First non-blank candidate, in order:
    /// `choices[0].message.content`, `output[0].content[0].text`, `output_text`.
    pub fn reply_text(&self) -> Option<&str> {
        let candidates = [
            self.choices
                .as_deref()
                .and_then(|choices| choices.first())
                .and_then(|c| c.message.as_ref())
                .and_then(|m| m.content.as_deref()),
            self.output
                .as_deref()
                .and_then(|items| items.first())
                .and_then(|o| o.content.as_deref())
                .and_then(|content| content.first())
                .and_then(|c| c.text.as_deref()),
            self.output_text.as_deref(),
        ];
        candidates
            .into_iter()
            .flatten()
            .find(|text| !text.trim().is_empty())
    }
}

/// OpenAI-compatible HTTP client.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    style: ApiStyle,
    temperature: f64,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            style: config.api_style,
            temperature: config.temperature,
        }
    }

    fn request(&self, system_prompt: &str, user_text: &str) -> (String, serde_json::Value) {
        let messages = json!([
            { "role": "system", "content": system_prompt },
            { "role": "user", "content": user_text }
        ]);
        match self.style {
            ApiStyle::ChatCompletions => (
                format!("{}/v1/chat/completions", self.base_url),
                json!({
                    "model": self.model,
                    "temperature": self.temperature,
                    "messages": messages,
                }),
            ),
            ApiStyle::Responses => (
                format!("{}/v1/responses", self.base_url),
                json!({
                    "model": self.model,
                    "input": messages,
                }),
            ),
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_text: &str,
    ) -> Result<Option<String>, RelayError> {
        let api_key = self.api_key.as_deref().ok_or(RelayError::MissingApiKey)?;
        let (url, body) = self.request(system_prompt, user_text);

        tracing::debug!(%url, model = %self.model, "sending completion request");
        let res = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;
        if !status.is_success() {
            return Err(RelayError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: CompletionResponse = serde_json::from_str(&text)?;
        Ok(parsed.reply_text().map(str::to_string))
    }
}
