// PatroHex Core — Chat Orchestrator
// Owns the conversation and the mode switch. One dispatch at a time:
// validate input, append the user turn, run exactly one responder, and
// append exactly one assistant turn — a reply on success, a fixed
// classified string on failure. Errors never escape this layer.

use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::atoms::types::{Conversation, DispatchMode, Turn};
use crate::engine::config::EngineConfig;
use crate::engine::providers::AnyResponder;

pub struct ChatEngine {
    conversation: Conversation,
    mode: DispatchMode,
    config: EngineConfig,
    /// True for the whole in-flight duration of a dispatch. Shared out
    /// via `typing_handle()` so a UI can poll it for the indicator.
    typing: Arc<AtomicBool>,
}

impl ChatEngine {
    /// New engine with a greeting-seeded conversation.
    /// Starts in LocalRules mode, matching the widget's default toggle.
    pub fn new(config: EngineConfig) -> Self {
        ChatEngine {
            conversation: Conversation::new(),
            mode: DispatchMode::LocalRules,
            config,
            typing: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn turns(&self) -> &[Turn] {
        self.conversation.turns()
    }

    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: DispatchMode) {
        info!("[core] dispatch mode set to {:?}", mode);
        self.mode = mode;
    }

    pub fn is_typing(&self) -> bool {
        self.typing.load(Ordering::SeqCst)
    }

    /// Shared handle for UI-side polling of the typing indicator.
    pub fn typing_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.typing)
    }

    /// Dispatch one user turn. Returns false — leaving the conversation
    /// untouched — when the input is blank or a dispatch is already in
    /// flight. Otherwise appends the user turn, produces a reply via the
    /// current mode's responder, appends it, and returns true.
    pub async fn send(&mut self, input: &str) -> bool {
        if input.trim().is_empty() {
            return false;
        }
        // `&mut self` already serializes callers; this guards a UI that
        // re-enters through a cloned typing handle race anyway.
        if self.is_typing() {
            warn!("[core] send ignored: a dispatch is already in flight");
            return false;
        }

        self.conversation.push(Turn::user(input));

        let responder = AnyResponder::from_mode(self.mode, &self.config);
        self.dispatch(responder).await;
        true
    }

    /// Run one responder against the current conversation and append the
    /// resulting assistant turn. The typing flag spans the whole call.
    async fn dispatch(&mut self, responder: AnyResponder) {
        self.typing.store(true, Ordering::SeqCst);
        info!("[core] dispatching via '{}' responder", responder.name());

        let reply = match responder.respond(&self.conversation).await {
            Ok(text) => text,
            Err(e) => {
                warn!("[core] '{}' dispatch failed: {}", responder.name(), e);
                e.display_string()
            }
        };

        self.conversation.push(Turn::assistant(reply));
        self.typing.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::constants::{
        EMPTY_COMPLETION_REPLY, MISSING_KEY_REPLY, RATE_LIMIT_REPLY, THINKING_DELAY_MS,
    };
    use crate::atoms::error::ProviderError;
    use crate::atoms::types::Author;
    use crate::engine::providers::Responder;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicU32;
    use std::time::Duration;

    /// Scripted responder for exercising the orchestrator without a
    /// network. Counts attempts so tests can assert "no retry".
    struct FakeResponder {
        outcome: fn() -> Result<String, ProviderError>,
        attempts: Arc<AtomicU32>,
        typing: Option<Arc<AtomicBool>>,
    }

    #[async_trait]
    impl Responder for FakeResponder {
        fn name(&self) -> &str {
            "fake"
        }

        async fn respond(&self, _conversation: &Conversation) -> Result<String, ProviderError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            if let Some(flag) = &self.typing {
                assert!(flag.load(Ordering::SeqCst), "typing flag not set in flight");
            }
            (self.outcome)()
        }
    }

    fn fake(outcome: fn() -> Result<String, ProviderError>) -> (AnyResponder, Arc<AtomicU32>) {
        let attempts = Arc::new(AtomicU32::new(0));
        let responder = FakeResponder { outcome, attempts: Arc::clone(&attempts), typing: None };
        (AnyResponder::from(Box::new(responder) as Box<dyn Responder>), attempts)
    }

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[tokio::test]
    async fn test_blank_input_is_rejected() {
        init_logging();
        let mut engine = ChatEngine::new(EngineConfig::default());
        let before = engine.turns().len();

        assert!(!engine.send("").await);
        assert!(!engine.send("   ").await);
        assert!(!engine.send("\n\t").await);

        assert_eq!(engine.turns().len(), before);
        assert!(!engine.is_typing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_local_rules_greeting_after_delay() {
        let mut engine = ChatEngine::new(EngineConfig::default());
        let before = engine.turns().len();

        let start = tokio::time::Instant::now();
        assert!(engine.send("Hello there").await);

        assert!(start.elapsed() >= Duration::from_millis(THINKING_DELAY_MS));
        // Exactly one user turn and one assistant turn appended.
        assert_eq!(engine.turns().len(), before + 2);
        let last = engine.turns().last().unwrap();
        assert_eq!(last.author, Author::Assistant);
        assert_eq!(last.text, "Hello! How are you doing today?");
        assert!(!engine.is_typing());
    }

    #[tokio::test]
    async fn test_remote_mode_without_key_yields_fixed_reply() {
        let mut engine = ChatEngine::new(EngineConfig {
            api_key: None,
            base_url: "http://127.0.0.1:1".into(),
            ..Default::default()
        });
        engine.set_mode(DispatchMode::RemoteModel);
        let before = engine.turns().len();

        assert!(engine.send("tell me a story").await);

        assert_eq!(engine.turns().len(), before + 2);
        assert_eq!(engine.turns().last().unwrap().text, MISSING_KEY_REPLY);
    }

    #[tokio::test]
    async fn test_rate_limit_surfaces_as_turn_with_no_retry() {
        let mut engine = ChatEngine::new(EngineConfig::default());
        engine.conversation.push(Turn::user("hello"));
        let before = engine.turns().len();

        let (responder, attempts) =
            fake(|| Err(ProviderError::from_status(429, "quota exceeded".into())));
        engine.dispatch(responder).await;

        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert_eq!(engine.turns().len(), before + 1);
        let last = engine.turns().last().unwrap();
        assert_eq!(last.author, Author::Assistant);
        assert_eq!(last.text, RATE_LIMIT_REPLY);
        assert!(!engine.is_typing());
    }

    #[tokio::test]
    async fn test_empty_completion_reply_is_never_empty() {
        let mut engine = ChatEngine::new(EngineConfig::default());
        engine.conversation.push(Turn::user("hello"));

        let (responder, _) = fake(|| Ok(EMPTY_COMPLETION_REPLY.to_string()));
        engine.dispatch(responder).await;

        let last = engine.turns().last().unwrap();
        assert!(!last.text.is_empty());
        assert_eq!(last.text, EMPTY_COMPLETION_REPLY);
    }

    #[tokio::test]
    async fn test_typing_flag_spans_the_dispatch() {
        let mut engine = ChatEngine::new(EngineConfig::default());
        engine.conversation.push(Turn::user("hello"));

        // The fake asserts the flag is raised while it runs.
        let responder = FakeResponder {
            outcome: || Ok("done".to_string()),
            attempts: Arc::new(AtomicU32::new(0)),
            typing: Some(engine.typing_handle()),
        };
        engine
            .dispatch(AnyResponder::from(Box::new(responder) as Box<dyn Responder>))
            .await;

        assert!(!engine.is_typing());
        assert_eq!(engine.turns().last().unwrap().text, "done");
    }

    #[tokio::test]
    async fn test_every_dispatch_appends_exactly_one_assistant_turn() {
        let outcomes: Vec<fn() -> Result<String, ProviderError>> = vec![
            || Ok("fine".to_string()),
            || Err(ProviderError::MissingCredential),
            || Err(ProviderError::from_status(401, "nope".into())),
            || Err(ProviderError::from_status(503, "down".into())),
            || Err(ProviderError::Transport("connection refused".into())),
            || Err(ProviderError::Unexpected("bad json".into())),
        ];

        for outcome in outcomes {
            let mut engine = ChatEngine::new(EngineConfig::default());
            engine.conversation.push(Turn::user("hello"));
            let before = engine.turns().len();

            let (responder, _) = fake(outcome);
            engine.dispatch(responder).await;

            assert_eq!(engine.turns().len(), before + 1);
            let last = engine.turns().last().unwrap();
            assert_eq!(last.author, Author::Assistant);
            assert!(!last.text.is_empty());
        }
    }
}
