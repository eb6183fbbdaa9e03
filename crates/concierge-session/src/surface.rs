//! The capability interface between the controller and its host surface.
//!
//! Every page/toolkit concern the controller needs (rendering, the name
//! prompt, confirmation dialogs, input gating, speech, durable key-value
//! storage) goes through this trait. Production surfaces wrap a real UI;
//! tests use a recording double.

use concierge_core::types::Message;

use crate::voice::VoiceProfile;

/// Host-surface capabilities required by [`crate::ChatController`].
pub trait Surface {
    /// Replace the visible message list with the given snapshot.
    fn render(&mut self, messages: &[Message]);

    /// Show the name prompt with the given text, input placeholder, and
    /// prefilled value.
    fn prompt_name(&mut self, prompt: &str, placeholder: &str, prefill: &str);

    /// Surface a blocking notice (e.g. empty-name validation).
    fn alert(&mut self, text: &str);

    /// Ask a yes/no question; `true` means confirmed.
    fn confirm(&mut self, question: &str) -> bool;

    /// Enable or disable the message input and send control.
    fn set_input_enabled(&mut self, enabled: bool);

    /// Change the send control's label (e.g. while a relay call is in
    /// flight).
    fn set_send_label(&mut self, label: &str);

    /// Reflect the live-agent toggle state in the widget chrome.
    fn set_live_agent_indicator(&mut self, active: bool);

    /// Set the collapsed/expanded presentation.
    fn set_minimized(&mut self, minimized: bool);

    /// Speech-synthesis voices offered by the platform.
    fn voices(&self) -> Vec<VoiceProfile>;

    /// Speak text aloud, optionally with a specific voice name.
    fn speak(&mut self, voice: Option<&str>, text: &str);

    /// Cancel any in-flight speech immediately.
    fn cancel_speech(&mut self);

    /// Write a durable key-value pair.
    fn persist(&mut self, key: &str, value: &str);

    /// Read a durable value, if present.
    fn read_persisted(&self, key: &str) -> Option<String>;

    /// Whether the viewport is narrow enough to default to the collapsed
    /// presentation.
    fn narrow_viewport(&self) -> bool {
        false
    }
}
