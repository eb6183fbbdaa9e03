//! Async ports the controller depends on: message relay and transcript
//! delivery. Implementations live in `concierge-relay`; tests use scripted
//! doubles.

use async_trait::async_trait;

use concierge_core::error::Result;
use concierge_core::types::{Message, TranscriptAck};

/// Failures from the message relay.
///
/// The controller maps these to generic user-facing lines; the raw detail
/// is only ever logged.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("upstream credential is not configured")]
    NotConfigured,
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("upstream error: {0}")]
    Upstream(String),
}

/// The stateless message relay: one request, one reply.
#[async_trait]
pub trait MessageRelay: Send + Sync {
    /// Forward one user message and return the assistant's reply text.
    async fn relay(
        &self,
        message: &str,
        display_name: &str,
        live_agent_mode: bool,
    ) -> std::result::Result<String, RelayError>;
}

/// Destination for a session's full transcript on chat end.
///
/// Delivery failure is non-fatal to the caller.
#[async_trait]
pub trait TranscriptSink: Send + Sync {
    /// Deliver the ordered message list.
    async fn deliver(&self, display_name: &str, messages: &[Message]) -> Result<TranscriptAck>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_error_display() {
        assert_eq!(
            RelayError::NotConfigured.to_string(),
            "upstream credential is not configured"
        );
        assert_eq!(
            RelayError::Transport("connection refused".to_string()).to_string(),
            "transport failure: connection refused"
        );
        assert_eq!(
            RelayError::Upstream("model overloaded".to_string()).to_string(),
            "upstream error: model overloaded"
        );
    }

    #[test]
    fn test_relay_error_debug() {
        let dbg = format!("{:?}", RelayError::NotConfigured);
        assert!(dbg.contains("NotConfigured"));
    }
}
