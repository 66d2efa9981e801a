// src/services/assistant.rs
use crate::error::AppError;
use crate::message::ChatInput;
use crate::services::prompt::{PromptParams, compose, is_fire_incident_query};
use crate::services::relay::CompletionClient;

/// Compose the system prompt, relay it with the user text and pick the reply.
pub async fn answer(client: &dyn CompletionClient, input: &ChatInput) -> Result<String, AppError> {
    let system_prompt = compose(&PromptParams::from(input));

    tracing::debug!(
        lang = input.lang.code(),
        mode = %input.mode,
        incident = is_fire_incident_query(&input.user_text),
        "relaying chat request"
    );

    let reply = client
        .complete(&system_prompt, &input.user_text)
        .await
        .map_err(|e| AppError::from_relay(input.lang, e))?;

    Ok(reply.unwrap_or_else(|| input.lang.empty_reply_fallback().to_string()))
}
