// PatroHex Core — response engine
// One user turn in, one assistant turn out: either a rule-table reply or
// a single OpenAI chat-completion call, selected by DispatchMode.

pub mod chat;
pub mod config;
pub mod providers;
pub mod rules;
