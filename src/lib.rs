// PatroHex Core — chat engine library
// Conversation state, keyword-matched replies, and OpenAI dispatch.
// The UI layer owns rendering and input handling; it drives this crate
// through `ChatEngine` and reads `turns()` / `is_typing()` back out.

pub mod atoms;
pub mod engine;

pub use atoms::error::ProviderError;
pub use atoms::types::{Author, ChatMessage, Conversation, DispatchMode, Role, Turn};
pub use engine::chat::ChatEngine;
pub use engine::config::EngineConfig;
pub use engine::providers::{AnyResponder, OpenAiResponder, Responder};
pub use engine::rules::RuleResponder;
