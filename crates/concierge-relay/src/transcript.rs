//! Transcript delivery: write the conversation to disk and log a summary.
//!
//! Delivery failures are reported to the caller but are never fatal to the
//! session that triggered them.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use concierge_core::config::TranscriptConfig;
use concierge_core::error::{ConciergeError, Result};
use concierge_core::types::{Message, TranscriptAck};
use concierge_session::relay::TranscriptSink;

/// On-disk transcript record.
#[derive(Debug, Serialize)]
struct TranscriptRecord<'a> {
    display_name: &'a str,
    ended_at: String,
    messages: &'a [Message],
}

/// Writes delivered transcripts as JSON files under a configured directory.
pub struct TranscriptStore {
    dir: PathBuf,
    enabled: bool,
}

impl TranscriptStore {
    /// Create a store. A relative `save_dir` is resolved under `data_dir`.
    pub fn new(config: &TranscriptConfig, data_dir: &Path) -> Self {
        let save_dir = PathBuf::from(&config.save_dir);
        let dir = if save_dir.is_absolute() {
            save_dir
        } else {
            data_dir.join(save_dir)
        };
        Self {
            dir,
            enabled: config.enabled,
        }
    }

    /// Directory transcripts are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl TranscriptSink for TranscriptStore {
    async fn deliver(&self, display_name: &str, messages: &[Message]) -> Result<TranscriptAck> {
        let ack = TranscriptAck {
            ok: true,
            received: messages.len(),
        };

        if !self.enabled {
            tracing::debug!(
                name = %display_name,
                count = messages.len(),
                "Transcript storage disabled; acknowledging without write"
            );
            return Ok(ack);
        }

        std::fs::create_dir_all(&self.dir)?;

        let record = TranscriptRecord {
            display_name,
            ended_at: Utc::now().to_rfc3339(),
            messages,
        };
        let content = serde_json::to_string_pretty(&record)
            .map_err(|e| ConciergeError::Transcript(e.to_string()))?;

        let filename = format!(
            "transcript-{}-{}.json",
            Utc::now().format("%Y%m%dT%H%M%S"),
            Uuid::new_v4()
        );
        let path = self.dir.join(filename);
        std::fs::write(&path, content)?;

        tracing::info!(
            name = %display_name,
            count = messages.len(),
            path = %path.display(),
            "Transcript saved"
        );
        Ok(ack)
    }
}
