// ── PatroHex Atoms: Error Types ────────────────────────────────────────────
// Single canonical error enum for the dispatch path, built with `thiserror`.
//
// Design rules:
//   • One normalized taxonomy — HTTP outcomes are classified exactly once,
//     in `ProviderError::from_status`; nothing downstream re-inspects codes.
//   • Every variant maps to a fixed user-visible string via
//     `display_string()`; errors never cross the orchestrator boundary raw.
//   • No variant carries secret material (API keys) in its message.

use thiserror::Error;

use crate::atoms::constants::{
    AUTH_ERROR_REPLY, MISSING_KEY_REPLY, RATE_LIMIT_REPLY, SERVER_ERROR_REPLY,
    UNEXPECTED_FAILURE_REPLY, UNKNOWN_ERROR_DETAIL,
};

// ── Primary error enum ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ProviderError {
    /// No API key configured. Terminal local condition — the request is
    /// never sent.
    #[error("API key is not configured")]
    MissingCredential,

    /// HTTP 401 from the completion endpoint.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// HTTP 429 from the completion endpoint.
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// HTTP 5xx from the completion endpoint.
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Network-level failure, or any HTTP status outside the classes above.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A failure outside the transport taxonomy (e.g. a success response
    /// whose body could not be decoded).
    #[error("Unexpected failure: {0}")]
    Unexpected(String),
}

impl ProviderError {
    /// Classify an unsuccessful HTTP response into the taxonomy.
    /// `message` is the error detail extracted from the response body.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => ProviderError::Auth(message),
            429 => ProviderError::RateLimited(message),
            s if s >= 500 => ProviderError::Server { status: s, message },
            s => ProviderError::Transport(format!("API error {}: {}", s, message)),
        }
    }

    /// The fixed assistant-facing reply for this failure class.
    /// Total over the enum — a dispatch failure always yields a string.
    pub fn display_string(&self) -> String {
        match self {
            ProviderError::MissingCredential => MISSING_KEY_REPLY.to_string(),
            ProviderError::Auth(_) => AUTH_ERROR_REPLY.to_string(),
            ProviderError::RateLimited(_) => RATE_LIMIT_REPLY.to_string(),
            ProviderError::Server { .. } => SERVER_ERROR_REPLY.to_string(),
            ProviderError::Transport(msg) => {
                let detail = if msg.is_empty() { UNKNOWN_ERROR_DETAIL } else { msg.as_str() };
                format!("Error: {}", detail)
            }
            ProviderError::Unexpected(_) => UNEXPECTED_FAILURE_REPLY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            ProviderError::from_status(401, "bad key".into()),
            ProviderError::Auth(_)
        ));
        assert!(matches!(
            ProviderError::from_status(429, "quota".into()),
            ProviderError::RateLimited(_)
        ));
        assert!(matches!(
            ProviderError::from_status(500, "boom".into()),
            ProviderError::Server { status: 500, .. }
        ));
        assert!(matches!(
            ProviderError::from_status(503, "overloaded".into()),
            ProviderError::Server { status: 503, .. }
        ));
        // Anything else is a plain transport-level API error
        assert!(matches!(
            ProviderError::from_status(404, "no such model".into()),
            ProviderError::Transport(_)
        ));
    }

    #[test]
    fn test_fixed_display_strings() {
        assert_eq!(
            ProviderError::MissingCredential.display_string(),
            MISSING_KEY_REPLY
        );
        assert_eq!(
            ProviderError::Auth("x".into()).display_string(),
            AUTH_ERROR_REPLY
        );
        assert_eq!(
            ProviderError::RateLimited("x".into()).display_string(),
            RATE_LIMIT_REPLY
        );
        assert_eq!(
            ProviderError::Server { status: 502, message: "x".into() }.display_string(),
            SERVER_ERROR_REPLY
        );
    }

    #[test]
    fn test_transport_interpolates_detail() {
        assert_eq!(
            ProviderError::Transport("connection refused".into()).display_string(),
            "Error: connection refused"
        );
        assert_eq!(
            ProviderError::Transport(String::new()).display_string(),
            format!("Error: {}", UNKNOWN_ERROR_DETAIL)
        );
    }
}
