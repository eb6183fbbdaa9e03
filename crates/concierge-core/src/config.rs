use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ConciergeError, Result};

/// Top-level configuration for the Concierge service.
///
/// Loaded from `~/.concierge/config.toml` by default. Each section covers
/// one concern: the widget chrome, the operator-editable message templates,
/// the upstream relay, and transcript delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConciergeConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub widget: WidgetConfig,
    #[serde(default)]
    pub templates: TemplateConfig,
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub transcript: TranscriptConfig,
}

impl Default for ConciergeConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            widget: WidgetConfig::default(),
            templates: TemplateConfig::default(),
            relay: RelayConfig::default(),
            transcript: TranscriptConfig::default(),
        }
    }
}

impl ConciergeConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ConciergeConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ConciergeError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Data directory for the API token and saved transcripts.
    pub data_dir: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// API server port.
    pub port: u16,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.concierge/data".to_string(),
            log_level: "info".to_string(),
            port: 3040,
        }
    }
}

/// Widget chrome: header text, button labels, and feature flags.
///
/// The flags collapse the historical widget variants (minimize-only,
/// end-chat-only, speech-enabled) into one controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub header_text: String,
    pub send_button: String,
    /// Label shown on the send control while a relay call is in flight.
    pub sending_button: String,
    pub change_name_button: String,
    pub end_chat_button: String,
    /// Whether the widget can be collapsed to a bar.
    pub minimizable: bool,
    /// Whether the end-chat control is offered.
    pub endable: bool,
    /// Whether spoken bot replies are offered.
    pub speech: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            header_text: "AI Chatbot".to_string(),
            send_button: "Send".to_string(),
            sending_button: "Sending...".to_string(),
            change_name_button: "Change Name".to_string(),
            end_chat_button: "End Chat".to_string(),
            minimizable: true,
            endable: true,
            speech: true,
        }
    }
}

/// Operator-editable message templates.
///
/// Templates are opaque strings; the engine performs one substitution pass
/// for `%userName%` (or `%oldName%`/`%newName%` in rename confirmations).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// First greeting after the visitor submits a name.
    pub welcome: String,
    /// Greeting for a visitor whose name is already known at load time.
    pub welcome_back: String,
    /// Text shown above the name input.
    pub name_prompt: String,
    /// Placeholder inside the name input.
    pub name_placeholder: String,
    /// Alert shown when a blank name is submitted.
    pub empty_name_alert: String,
    /// Confirmation after a `/name` rename.
    pub name_change_success: String,
    /// Usage hint when `/name` is given without a new name.
    pub name_change_hint: String,
    /// Confirmation question before ending the chat.
    pub end_chat_confirm: String,
    /// Terminal notice after the chat is ended.
    pub chat_ended: String,
    /// Status line when live-agent mode is switched on.
    pub live_agent_on: String,
    /// Status line when live-agent mode is switched off.
    pub live_agent_off: String,
    /// Generic in-transcript line for transport/upstream failures.
    pub relay_error: String,
    /// Generic line when the upstream credential is missing.
    pub not_configured_error: String,
    /// Transient line when transcript delivery fails.
    pub transcript_error: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            welcome: "Welcome, %userName%! How can I help you?".to_string(),
            welcome_back: "Welcome back, %userName%! How can I help you?".to_string(),
            name_prompt:
                "Welcome! Please enter your name to start chatting. You can change it later with /name [new name]."
                    .to_string(),
            name_placeholder: "Your Name".to_string(),
            empty_name_alert: "Please enter your name.".to_string(),
            name_change_success: "Your name has been changed from %oldName% to %newName%."
                .to_string(),
            name_change_hint:
                "Please provide a new name after the /name command. Example: /name John Doe"
                    .to_string(),
            end_chat_confirm: "Are you sure you want to end the chat? A transcript will be sent."
                .to_string(),
            chat_ended: "Chat ended. Thank you!".to_string(),
            live_agent_on: "Live agent mode is on. An agent will join shortly.".to_string(),
            live_agent_off: "Live agent mode is off. You are chatting with the assistant."
                .to_string(),
            relay_error: "Error: Could not reach the assistant. Please try again.".to_string(),
            not_configured_error:
                "The assistant is not available right now. Please contact the site administrator."
                    .to_string(),
            transcript_error: "Error: Could not send the chat transcript.".to_string(),
        }
    }
}

/// Upstream completion relay settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Upstream API credential. `OPENAI_API_KEY` is consulted at startup
    /// when this is unset.
    pub api_key: Option<String>,
    /// Completion model identifier.
    pub model: String,
    /// Fixed system instruction sent with every request.
    pub system_prompt: String,
    /// Bounded output length.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gpt-3.5-turbo".to_string(),
            system_prompt: "You are a helpful customer service assistant.".to_string(),
            max_tokens: 150,
            temperature: 0.7,
            timeout_secs: 15,
        }
    }
}

/// Transcript delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptConfig {
    /// Whether delivered transcripts are written to disk.
    pub enabled: bool,
    /// Directory for transcript files, relative to the data directory
    /// unless absolute.
    pub save_dir: String,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            save_dir: "transcripts".to_string(),
        }
    }
}
