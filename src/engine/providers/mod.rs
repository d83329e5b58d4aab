// PatroHex Core — Responder Registry
// AnyResponder wraps Box<dyn Responder> so the orchestrator can switch
// response strategies without knowing which concrete one is in use.

pub mod openai;

pub use openai::OpenAiResponder;

use async_trait::async_trait;

use crate::atoms::error::ProviderError;
use crate::atoms::types::{Conversation, DispatchMode};
use crate::engine::config::EngineConfig;
use crate::engine::rules::RuleResponder;

// ── Responder trait ────────────────────────────────────────────────────────

/// One strategy for producing an assistant reply to the latest user turn.
/// Implementations read the conversation; only the orchestrator writes it.
#[async_trait]
pub trait Responder: Send + Sync {
    fn name(&self) -> &str;

    async fn respond(&self, conversation: &Conversation) -> Result<String, ProviderError>;
}

// ── Type-erased wrapper ────────────────────────────────────────────────────

/// Type-erased responder. The orchestrator holds `AnyResponder` and calls
/// `.respond()` without knowing which strategy is behind it.
pub struct AnyResponder(Box<dyn Responder>);

impl AnyResponder {
    /// Construct the concrete responder for a dispatch mode.
    pub fn from_mode(mode: DispatchMode, config: &EngineConfig) -> Self {
        match mode {
            DispatchMode::LocalRules => AnyResponder(Box::new(RuleResponder::new())),
            DispatchMode::RemoteModel => AnyResponder(Box::new(OpenAiResponder::new(config))),
        }
    }

    pub async fn respond(&self, conversation: &Conversation) -> Result<String, ProviderError> {
        self.0.respond(conversation).await
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }
}

impl From<Box<dyn Responder>> for AnyResponder {
    fn from(responder: Box<dyn Responder>) -> Self {
        AnyResponder(responder)
    }
}
