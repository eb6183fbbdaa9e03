//! Message relay and transcript delivery for Concierge.
//!
//! Implements the async ports defined in `concierge-session`: a stateless
//! relay that forwards one user message per request to an upstream
//! chat-completion API (or answers with the live-agent placeholder), and a
//! transcript store that writes delivered conversations to disk.

pub mod openai;
pub mod service;
pub mod transcript;

pub use openai::CompletionClient;
pub use service::{RelayService, LIVE_AGENT_REPLY};
pub use transcript::TranscriptStore;
