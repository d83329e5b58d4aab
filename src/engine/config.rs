// PatroHex Core — Engine configuration
// Read once at process start. The API key comes from the environment;
// everything else has fixed defaults matching the hosted widget.

use log::info;

use crate::atoms::constants::{
    DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_SYSTEM_PROMPT,
    DEFAULT_TEMPERATURE, ENV_API_KEY, ENV_API_KEY_FALLBACK,
};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Bearer credential for the completion endpoint. `None` means
    /// RemoteModel dispatch short-circuits to the key-missing reply.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    /// System instruction prepended to every remote request.
    pub system_prompt: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            api_key: None,
            base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
        }
    }
}

impl EngineConfig {
    /// Build a config from the environment. `PATROHEX_API_KEY` takes
    /// precedence over `OPENAI_API_KEY`; a blank value counts as absent.
    /// Logs whether a key is present — never the key itself.
    pub fn from_env() -> Self {
        let api_key = normalize_key(std::env::var(ENV_API_KEY).ok())
            .or_else(|| normalize_key(std::env::var(ENV_API_KEY_FALLBACK).ok()));
        info!(
            "[core] OpenAI API key is {}",
            if api_key.is_some() { "present" } else { "missing" }
        );
        EngineConfig { api_key, ..Default::default() }
    }
}

/// Trim the raw env value; empty or whitespace-only keys count as missing.
fn normalize_key(raw: Option<String>) -> Option<String> {
    raw.map(|k| k.trim().to_string()).filter(|k| !k.is_empty())
}
