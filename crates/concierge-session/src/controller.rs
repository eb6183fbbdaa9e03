//! Chat controller: gates input behind a known display name, routes each
//! submitted line to the local command interpreter or the message relay,
//! and renders results through the surface.
//!
//! Session phases: `AwaitingName -> Active -> Ended`. `Active` is never
//! entered without a non-empty display name; `Ended` is terminal. A
//! change-name action loops back through `AwaitingName` without touching
//! the live-agent or speech preferences.

use std::sync::Arc;

use concierge_core::config::{TemplateConfig, WidgetConfig};
use concierge_core::template;
use concierge_core::types::Message;

use crate::command::{self, Command};
use crate::error::SessionError;
use crate::relay::{MessageRelay, RelayError, TranscriptSink};
use crate::session::{
    Session, SessionPhase, DISPLAY_NAME_KEY, MINIMIZED_KEY, SPEECH_ENABLED_KEY,
};
use crate::surface::Surface;
use crate::voice;

/// Controller for one widget instance.
pub struct ChatController<S: Surface> {
    surface: S,
    relay: Arc<dyn MessageRelay>,
    transcripts: Arc<dyn TranscriptSink>,
    widget: WidgetConfig,
    templates: TemplateConfig,
    session: Session,
}

impl<S: Surface> ChatController<S> {
    /// Create a controller with a fresh session.
    pub fn new(
        surface: S,
        relay: Arc<dyn MessageRelay>,
        transcripts: Arc<dyn TranscriptSink>,
        widget: WidgetConfig,
        templates: TemplateConfig,
    ) -> Self {
        Self {
            surface,
            relay,
            transcripts,
            widget,
            templates,
            session: Session::new(),
        }
    }

    /// The current session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Restore persisted preferences and render the initial state.
    ///
    /// A visitor whose name is already known skips the prompt and gets the
    /// returning-user greeting immediately.
    pub fn bootstrap(&mut self) {
        self.session.speech_enabled =
            self.widget.speech && self.read_persisted_flag(SPEECH_ENABLED_KEY);

        // Narrow viewports default to the collapsed presentation;
        // otherwise the persisted preference wins.
        self.session.minimized = if self.surface.narrow_viewport() {
            true
        } else {
            self.read_persisted_flag(MINIMIZED_KEY)
        };
        self.surface.set_minimized(self.session.minimized);

        let known_name = self
            .surface
            .read_persisted(DISPLAY_NAME_KEY)
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        match known_name {
            Some(name) => {
                tracing::debug!(name = %name, "Returning visitor");
                self.session.display_name = Some(name.clone());
                self.session.phase = SessionPhase::Active;
                self.set_input(true);
                let greeting = template::personalize(&self.templates.welcome_back, &name);
                self.push_bot(&greeting);
            }
            None => {
                self.session.phase = SessionPhase::AwaitingName;
                self.set_input(false);
                self.surface.prompt_name(
                    &self.templates.name_prompt,
                    &self.templates.name_placeholder,
                    "",
                );
            }
        }
    }

    /// Accept a display name from the prompt.
    ///
    /// Blank input is rejected with an alert and the prompt stays up. On
    /// success the message view is reset and a personalized greeting is
    /// rendered.
    pub fn submit_name(&mut self, raw: &str) -> Result<(), SessionError> {
        if self.session.phase == SessionPhase::Ended {
            return Err(SessionError::ChatEnded);
        }

        let name = raw.trim();
        if name.is_empty() {
            self.surface.alert(&self.templates.empty_name_alert);
            return Err(SessionError::EmptyName);
        }

        self.session.display_name = Some(name.to_string());
        self.surface.persist(DISPLAY_NAME_KEY, name);
        self.session.displayed.clear();
        self.session.transcript.clear();
        self.session.phase = SessionPhase::Active;
        self.set_input(true);

        let greeting = template::personalize(&self.templates.welcome, name);
        self.push_bot(&greeting);
        Ok(())
    }

    /// Handle one submitted chat line.
    ///
    /// Empty input, a missing name, or an ended session are silent no-ops.
    /// `/name ` lines are handled locally; everything else goes through
    /// exactly one relay call, with the input control disabled for the
    /// duration and re-enabled on both outcomes.
    pub async fn submit_message(&mut self, raw: &str) {
        let text = raw.trim();
        if text.is_empty() || !self.session.is_active() {
            return;
        }
        let Some(name) = self.session.display_name.clone() else {
            return;
        };

        match command::parse(text) {
            Command::Rename(new_name) => self.rename(&name, &new_name),
            Command::RenameUsage => {
                let hint = self.templates.name_change_hint.clone();
                self.push_bot(&hint);
            }
            Command::Plain(message) => self.send_to_relay(&name, &message).await,
        }
    }

    /// Flip live-agent mode. The flag rides along on every subsequent
    /// relay request until toggled again.
    pub fn toggle_live_agent(&mut self) {
        if self.session.phase == SessionPhase::Ended {
            return;
        }
        self.session.live_agent_mode = !self.session.live_agent_mode;
        self.surface
            .set_live_agent_indicator(self.session.live_agent_mode);
        let line = if self.session.live_agent_mode {
            self.templates.live_agent_on.clone()
        } else {
            self.templates.live_agent_off.clone()
        };
        // Status line only: announcements never land in the transcript.
        self.push_status(&line);
    }

    /// End the chat after explicit confirmation.
    ///
    /// The accumulated transcript is delivered first (failure is logged
    /// and surfaced as a transient line, never fatal), then the view is
    /// cleared, the terminal notice rendered, and input disabled for good.
    pub async fn end_chat(&mut self) {
        if !self.widget.endable || !self.session.is_active() {
            return;
        }
        if !self.surface.confirm(&self.templates.end_chat_confirm) {
            return;
        }

        let name = self.session.display_name.clone().unwrap_or_default();
        if self.session.transcript.is_empty() {
            tracing::debug!("No conversation to deliver");
        } else {
            match self
                .transcripts
                .deliver(&name, &self.session.transcript)
                .await
            {
                Ok(ack) => {
                    tracing::info!(received = ack.received, "Transcript delivered");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Transcript delivery failed");
                    let line = self.templates.transcript_error.clone();
                    self.push_status(&line);
                }
            }
        }

        self.session.displayed.clear();
        let notice = self.templates.chat_ended.clone();
        self.push_bot(&notice);
        self.session.transcript.clear();
        self.set_input(false);
        self.session.phase = SessionPhase::Ended;
    }

    /// Flip the persisted speech toggle; disabling cancels in-flight
    /// speech immediately.
    pub fn toggle_speech(&mut self) {
        if !self.widget.speech {
            return;
        }
        self.session.speech_enabled = !self.session.speech_enabled;
        self.persist_flag(SPEECH_ENABLED_KEY, self.session.speech_enabled);
        if !self.session.speech_enabled {
            self.surface.cancel_speech();
        }
    }

    /// Flip the persisted collapsed/expanded presentation.
    pub fn toggle_minimize(&mut self) {
        if !self.widget.minimizable {
            return;
        }
        self.session.minimized = !self.session.minimized;
        self.persist_flag(MINIMIZED_KEY, self.session.minimized);
        self.surface.set_minimized(self.session.minimized);
    }

    /// Explicit change-name action: back to the prompt, prefilled with the
    /// current name. Live-agent and speech preferences are untouched.
    pub fn begin_name_change(&mut self) {
        if !self.session.is_active() {
            return;
        }
        self.session.phase = SessionPhase::AwaitingName;
        self.set_input(false);
        let prefill = self.session.display_name.clone().unwrap_or_default();
        self.surface.prompt_name(
            &self.templates.name_prompt,
            &self.templates.name_placeholder,
            &prefill,
        );
    }

    // -- Private helpers --

    fn rename(&mut self, old_name: &str, new_name: &str) {
        self.session.display_name = Some(new_name.to_string());
        self.surface.persist(DISPLAY_NAME_KEY, new_name);
        let confirmation = template::fill(
            &self.templates.name_change_success,
            &[(template::OLD_NAME, old_name), (template::NEW_NAME, new_name)],
        );
        self.push_bot(&confirmation);
    }

    async fn send_to_relay(&mut self, name: &str, message: &str) {
        self.push_user(name, message);

        self.set_input(false);
        let sending = self.widget.sending_button.clone();
        self.surface.set_send_label(&sending);

        let outcome = self
            .relay
            .relay(message, name, self.session.live_agent_mode)
            .await;

        self.set_input(true);
        let send = self.widget.send_button.clone();
        self.surface.set_send_label(&send);

        match outcome {
            Ok(reply) => self.push_bot(&reply),
            Err(e) => {
                // Full detail goes to the log; the transcript only ever
                // carries the short configured line.
                tracing::warn!(error = %e, "Relay call failed");
                let line = match e {
                    RelayError::NotConfigured => self.templates.not_configured_error.clone(),
                    RelayError::Transport(_) | RelayError::Upstream(_) => {
                        self.templates.relay_error.clone()
                    }
                };
                self.push_bot(&line);
            }
        }
    }

    fn push_user(&mut self, name: &str, text: &str) {
        let message = Message::user(name, text);
        self.session.displayed.push(message.clone());
        self.session.transcript.push(message);
        self.surface.render(&self.session.displayed);
    }

    /// Render a bot message; status phrases stay out of the transcript.
    fn push_bot(&mut self, text: &str) {
        let message = Message::bot(text);
        self.session.displayed.push(message.clone());
        if !command::is_status_phrase(text) {
            self.session.transcript.push(message);
        }
        self.surface.render(&self.session.displayed);
        self.speak_if_enabled(text);
    }

    /// Render an informational line that never enters the transcript.
    fn push_status(&mut self, text: &str) {
        self.session.displayed.push(Message::bot(text));
        self.surface.render(&self.session.displayed);
        self.speak_if_enabled(text);
    }

    fn speak_if_enabled(&mut self, text: &str) {
        if !self.session.speech_enabled {
            return;
        }
        let voices = self.surface.voices();
        let picked = voice::pick_voice(&voices).map(|v| v.name.clone());
        self.surface.speak(picked.as_deref(), text);
    }

    fn set_input(&mut self, enabled: bool) {
        self.session.input_enabled = enabled;
        self.surface.set_input_enabled(enabled);
    }

    fn persist_flag(&mut self, key: &str, value: bool) {
        self.surface
            .persist(key, if value { "true" } else { "false" });
    }

    fn read_persisted_flag(&self, key: &str) -> bool {
        self.surface
            .read_persisted(key)
            .map(|v| v == "true")
            .unwrap_or(false)
    }
}

// =============================================================================
// Tests
// =============================================================================
