// ── PatroHex Atoms: Constants ──────────────────────────────────────────────
// All named constants for the crate live here.
// Rationale: collecting constants in one place eliminates magic strings,
// makes auditing easier, and keeps every layer's code self-documenting.

// ── Remote API defaults ────────────────────────────────────────────────────
// Fixed request parameters for the chat-completion call. One request per
// user turn, no retry — these are the only knobs the engine turns.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 150;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are PatroHex, a friendly AI assistant. \
    Keep your responses concise (under 100 words) and helpful. Maintain a cheerful tone.";

// ── Configuration environment variables ────────────────────────────────────
// Read once at process start by `EngineConfig::from_env()`.
// `PATROHEX_API_KEY` wins when both are set.
pub const ENV_API_KEY: &str = "PATROHEX_API_KEY";
pub const ENV_API_KEY_FALLBACK: &str = "OPENAI_API_KEY";

// ── Rule-based responder ───────────────────────────────────────────────────
/// Artificial "thinking" delay before a rule-table reply, in milliseconds.
/// Exists only so the UI's typing indicator has something to indicate.
pub const THINKING_DELAY_MS: u64 = 2_000;

// ── Canned conversation strings ────────────────────────────────────────────
/// Assistant turn every new conversation is seeded with.
pub const GREETING_TURN: &str = "Hi there! I'm PatroHex. How can I help you today?";

// ── Fixed display strings for dispatch outcomes ────────────────────────────
// Every failure the dispatcher can hit maps to exactly one of these.
// They are shown verbatim as assistant turns; none may leak key material.
pub const MISSING_KEY_REPLY: &str =
    "API key is missing. Please set the OPENAI_API_KEY environment variable.";
pub const AUTH_ERROR_REPLY: &str =
    "Authentication error: Your API key may be invalid or expired.";
pub const RATE_LIMIT_REPLY: &str =
    "Rate limit exceeded: Too many requests or you have exceeded your quota.";
pub const SERVER_ERROR_REPLY: &str = "OpenAI server error. Please try again later.";
pub const UNKNOWN_ERROR_DETAIL: &str = "Unknown error occurred";

/// Shown when the API succeeds but returns no usable completion.
pub const EMPTY_COMPLETION_REPLY: &str = "Sorry, I could not generate a response.";

/// Last-resort reply when a dispatch fails in a way the taxonomy
/// doesn't classify (e.g. a malformed success payload).
pub const UNEXPECTED_FAILURE_REPLY: &str =
    "Sorry, I couldn't generate a response. Please try again.";
