//! The stateless message relay.
//!
//! One operation: take a user message, return a reply. Live-agent mode
//! answers with a fixed placeholder; no routing or queueing exists behind
//! it, and the queue position is a canned string, not a measurement.
//! Everything else goes to the upstream completion client, which requires
//! a configured credential.

use async_trait::async_trait;

use concierge_core::config::RelayConfig;
use concierge_session::relay::{MessageRelay, RelayError};

use crate::openai::CompletionClient;

/// Placeholder reply for live-agent mode. This is a stub: no agent queue
/// exists and the position is fixed.
pub const LIVE_AGENT_REPLY: &str =
    "A live agent will be with you shortly. Your position in queue: 1";

/// Stateless relay over an optional upstream client.
pub struct RelayService {
    upstream: Option<CompletionClient>,
}

impl RelayService {
    /// Build the service. `api_key` is the resolved credential (config
    /// value or environment); without one the upstream stays unconfigured
    /// and every non-live-agent request fails with `NotConfigured`.
    pub fn new(config: &RelayConfig, api_key: Option<String>) -> Self {
        let upstream = match api_key.filter(|k| !k.trim().is_empty()) {
            Some(key) => Some(CompletionClient::new(config, key)),
            None => {
                tracing::warn!("No upstream API credential configured; relay will reject messages");
                None
            }
        };
        Self { upstream }
    }

    /// Whether an upstream credential is configured.
    pub fn is_configured(&self) -> bool {
        self.upstream.is_some()
    }
}

#[async_trait]
impl MessageRelay for RelayService {
    async fn relay(
        &self,
        message: &str,
        display_name: &str,
        live_agent_mode: bool,
    ) -> Result<String, RelayError> {
        if live_agent_mode {
            tracing::debug!(name = %display_name, "Live-agent placeholder reply");
            return Ok(LIVE_AGENT_REPLY.to_string());
        }

        let upstream = self.upstream.as_ref().ok_or(RelayError::NotConfigured)?;
        tracing::debug!(name = %display_name, chars = message.len(), "Relaying message upstream");
        upstream.complete(message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unconfigured() -> RelayService {
        RelayService::new(&RelayConfig::default(), None)
    }

    #[test]
    fn test_new_without_key_is_unconfigured() {
        assert!(!unconfigured().is_configured());
    }

    #[test]
    fn test_new_with_blank_key_is_unconfigured() {
        let service = RelayService::new(&RelayConfig::default(), Some("   ".to_string()));
        assert!(!service.is_configured());
    }

    #[test]
    fn test_new_with_key_is_configured() {
        let service = RelayService::new(&RelayConfig::default(), Some("sk-test".to_string()));
        assert!(service.is_configured());
    }

    #[tokio::test]
    async fn test_live_agent_mode_returns_placeholder() {
        // The placeholder path never touches the upstream, so it works
        // even with no credential configured.
        let service = unconfigured();
        let reply = service.relay("help", "Ann", true).await.unwrap();
        assert_eq!(reply, LIVE_AGENT_REPLY);
        assert!(reply.contains("position in queue: 1"));
    }

    #[tokio::test]
    async fn test_unconfigured_relay_rejects_message() {
        let service = unconfigured();
        let err = service.relay("hello", "Ann", false).await.unwrap_err();
        assert!(matches!(err, RelayError::NotConfigured));
    }

    #[tokio::test]
    async fn test_live_agent_ignores_configuration_state() {
        let configured = RelayService::new(&RelayConfig::default(), Some("sk-test".to_string()));
        let reply = configured.relay("help", "Ann", true).await.unwrap();
        assert_eq!(reply, LIVE_AGENT_REPLY);
    }
}
