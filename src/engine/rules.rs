// PatroHex Core — Rule-Based Responder
// Keyword-matched canned replies for when no remote model is in play.
// Strict first-match-wins over an ordered substring table; total over
// any input, so this path has no error case.

use async_trait::async_trait;
use std::time::Duration;

use crate::atoms::constants::THINKING_DELAY_MS;
use crate::atoms::error::ProviderError;
use crate::atoms::types::Conversation;
use crate::engine::providers::Responder;

// ── Rule table ─────────────────────────────────────────────────────────────
// Order matters: the first entry whose keyword list hits wins.
// Matching is substring-based over the lower-cased utterance, so "hi"
// also fires inside words like "this" — behavior kept from the widget.
const RULES: &[(&[&str], &str)] = &[
    (&["hello", "hi"], "Hello! How are you doing today?"),
    (&["how are you"], "I'm doing great, thanks for asking! How about you?"),
    (&["thank"], "You're welcome! Is there anything else I can help with?"),
    (&["bye", "goodbye"], "Goodbye! Have a great day!"),
    (&["weather"], "I don't have access to real-time weather data, but I hope it's nice where you are!"),
    (&["name"], "My name is PatroHex, your friendly AI assistant!"),
    (&["help"], "I can chat with you about various topics. Just type your question or comment!"),
];

const FALLBACK_REPLY: &str = "I'm not sure how to respond to that. Can you try something else?";

/// Pick the reply for one utterance. First-match-wins; never fails.
fn match_rules(input: &str) -> &'static str {
    let lowered = input.to_lowercase();
    for (keywords, reply) in RULES {
        if keywords.iter().any(|k| lowered.contains(k)) {
            return reply;
        }
    }
    FALLBACK_REPLY
}

// ── Responder impl ─────────────────────────────────────────────────────────

pub struct RuleResponder;

impl RuleResponder {
    pub fn new() -> Self {
        RuleResponder
    }
}

impl Default for RuleResponder {
    fn default() -> Self {
        RuleResponder::new()
    }
}

#[async_trait]
impl Responder for RuleResponder {
    fn name(&self) -> &str {
        "rules"
    }

    /// Reply to the latest user turn from the canned table, after the
    /// fixed "thinking" delay that drives the UI typing indicator.
    async fn respond(&self, conversation: &Conversation) -> Result<String, ProviderError> {
        tokio::time::sleep(Duration::from_millis(THINKING_DELAY_MS)).await;
        let input = conversation.latest_user_text().unwrap_or_default();
        Ok(match_rules(input).to_string())
    }
}
