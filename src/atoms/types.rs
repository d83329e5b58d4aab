// PatroHex Core — Data model
// The structures that flow through the whole engine: conversation turns,
// the dispatch-mode switch, and the wire-format message pair.
// Independent of any provider or UI layer.

use serde::{Deserialize, Serialize};

use crate::atoms::constants::GREETING_TURN;

// ── Turns ──────────────────────────────────────────────────────────────

/// Who authored a turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Assistant,
}

/// One message in the conversation. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub text: String,
    pub author: Author,
    /// Local wall-clock time of creation, "HH:MM".
    pub created_at: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Turn {
            text: text.into(),
            author: Author::User,
            created_at: current_time(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Turn {
            text: text.into(),
            author: Author::Assistant,
            created_at: current_time(),
        }
    }
}

/// Local time in the "HH:MM" format the UI renders next to each bubble.
fn current_time() -> String {
    chrono::Local::now().format("%H:%M").to_string()
}

// ── Conversation ───────────────────────────────────────────────────────

/// Append-only, chronological sequence of turns. Turns are never edited,
/// removed, or reordered. Only the orchestrator appends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// A fresh conversation, seeded with the assistant's greeting turn.
    pub fn new() -> Self {
        Conversation {
            turns: vec![Turn::assistant(GREETING_TURN)],
        }
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Text of the most recent user-authored turn, if any.
    pub fn latest_user_text(&self) -> Option<&str> {
        self.turns
            .iter()
            .rev()
            .find(|t| t.author == Author::User)
            .map(|t| t.text.as_str())
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Conversation::new()
    }
}

// ── Dispatch mode ──────────────────────────────────────────────────────

/// Which response strategy handles the next user turn.
/// Owned by UI state (the "AI Mode" toggle), read per dispatch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    LocalRules,
    RemoteModel,
}

// ── Wire format ────────────────────────────────────────────────────────

/// Role tag in the remote API's message format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// The role/content pair the chat-completion endpoint expects.
/// Derived from the conversation on demand, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

// ── Helpers ────────────────────────────────────────────────────────────

/// Truncate to at most `max` bytes without splitting a UTF-8 character.
/// Used to keep API error bodies loggable.
pub(crate) fn truncate_utf8(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
