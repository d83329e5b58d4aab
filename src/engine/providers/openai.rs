// PatroHex Core — OpenAI-Compatible Responder
// One chat-completion POST per user turn. No retry, no streaming, no
// backoff — a failed request becomes a classified error and the
// orchestrator shows its fixed reply string.

use async_trait::async_trait;
use log::{error, info, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::atoms::constants::EMPTY_COMPLETION_REPLY;
use crate::atoms::error::ProviderError;
use crate::atoms::types::{truncate_utf8, Author, ChatMessage, Conversation, Role};
use crate::engine::config::EngineConfig;
use crate::engine::providers::Responder;

// ── Wire types ─────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

// ── Responder struct ───────────────────────────────────────────────────────

pub struct OpenAiResponder {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
    system_prompt: String,
}

impl OpenAiResponder {
    pub fn new(config: &EngineConfig) -> Self {
        OpenAiResponder {
            client: Client::builder()
                .connect_timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            system_prompt: config.system_prompt.clone(),
        }
    }

    /// Map the conversation into the API's message format: exactly one
    /// leading system-role instruction, then every turn in order,
    /// User→user and Assistant→assistant.
    pub fn format_messages(conversation: &Conversation, system_prompt: &str) -> Vec<ChatMessage> {
        let mut formatted = Vec::with_capacity(conversation.len() + 1);
        formatted.push(ChatMessage {
            role: Role::System,
            content: system_prompt.to_string(),
        });
        for turn in conversation.turns() {
            formatted.push(ChatMessage {
                role: match turn.author {
                    Author::User => Role::User,
                    Author::Assistant => Role::Assistant,
                },
                content: turn.text.clone(),
            });
        }
        formatted
    }

    /// First completion's text, or the fixed fallback when the API
    /// returned no usable choice.
    fn extract_reply(completion: CompletionResponse) -> String {
        match completion.choices.into_iter().next() {
            Some(choice) if !choice.message.content.is_empty() => choice.message.content,
            _ => EMPTY_COMPLETION_REPLY.to_string(),
        }
    }
}

/// Pull the human-readable detail out of an OpenAI error payload
/// (`{"error": {"message": ...}}`), falling back to the truncated raw body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| truncate_utf8(body, 200).to_string())
}

// ── Responder impl ─────────────────────────────────────────────────────────

#[async_trait]
impl Responder for OpenAiResponder {
    fn name(&self) -> &str {
        "openai"
    }

    /// Exactly one attempt. A missing key short-circuits before any
    /// network traffic.
    async fn respond(&self, conversation: &Conversation) -> Result<String, ProviderError> {
        let Some(api_key) = &self.api_key else {
            warn!("[core] OpenAI API key missing — request not sent");
            return Err(ProviderError::MissingCredential);
        };

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let body = CompletionRequest {
            model: &self.model,
            messages: Self::format_messages(conversation, &self.system_prompt),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        info!(
            "[core] OpenAI request to {} model={} messages={}",
            url,
            self.model,
            body.messages.len()
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(format!("HTTP request failed: {}", e)))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body_text = response.text().await.unwrap_or_default();
            error!(
                "[core] OpenAI error {}: {}",
                status,
                truncate_utf8(&body_text, 500)
            );
            return Err(ProviderError::from_status(status, api_error_message(&body_text)));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Unexpected(format!("Malformed API response: {}", e)))?;

        info!("[core] OpenAI response received");
        Ok(Self::extract_reply(completion))
    }
}
