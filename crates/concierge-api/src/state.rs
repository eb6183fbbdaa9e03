//! Application state shared across all route handlers.
//!
//! AppState holds the configuration and relay services. All fields use
//! `Arc` for cheap cloning across handler tasks; nothing here is mutable
//! after startup, since the relay is stateless per request.

use std::sync::Arc;
use std::time::Instant;

use concierge_core::config::ConciergeConfig;
use concierge_relay::{RelayService, TranscriptStore};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<ConciergeConfig>,
    /// The stateless message relay.
    pub relay: Arc<RelayService>,
    /// Transcript delivery sink.
    pub transcripts: Arc<TranscriptStore>,
    /// Expected bearer token for protected endpoints.
    pub api_token: String,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState with the given components.
    pub fn new(
        config: ConciergeConfig,
        relay: RelayService,
        transcripts: TranscriptStore,
        api_token: String,
    ) -> Self {
        Self {
            config: Arc::new(config),
            relay: Arc::new(relay),
            transcripts: Arc::new(transcripts),
            api_token,
            start_time: Instant::now(),
        }
    }
}
