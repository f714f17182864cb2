//! Chat-completions HTTP payload serde models and conversion helpers.

use serde::{Deserialize, Serialize};

use crate::ProviderError;

use super::types::{ChatMessage, CompletionRequest};

pub(crate) fn build_api_request(request: &CompletionRequest) -> CompletionApiRequest {
    let messages = request
        .messages()
        .into_iter()
        .map(CompletionApiMessage::from)
        .collect();

    CompletionApiRequest {
        messages,
        max_tokens: request.max_tokens,
        temperature: request.temperature,
    }
}

/// Extracts `choices[0].message.content`. `Ok(None)` means the field was
/// absent or null.
pub(crate) fn parse_completion_body(body: &str) -> Result<Option<String>, ProviderError> {
    let parsed: CompletionApiResponse = serde_json::from_str(body)
        .map_err(|err| ProviderError::invalid_response(err.to_string()))?;

    let choice = parsed.choices.into_iter().next().ok_or_else(|| {
        ProviderError::invalid_response("completion response did not include choices")
    })?;

    Ok(choice.message.content)
}

#[derive(Debug, Serialize)]
pub(crate) struct CompletionApiRequest {
    pub messages: Vec<CompletionApiMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
pub(crate) struct CompletionApiMessage {
    pub role: &'static str,
    pub content: String,
}

impl From<ChatMessage> for CompletionApiMessage {
    fn from(value: ChatMessage) -> Self {
        Self {
            role: value.role.as_str(),
            content: value.content,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompletionApiResponse {
    pub choices: Vec<CompletionApiChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompletionApiChoice {
    pub message: CompletionApiAssistantMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompletionApiAssistantMessage {
    #[serde(default)]
    pub content: Option<String>,
}
