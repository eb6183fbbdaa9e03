//! The session value owned by the controller.
//!
//! Display name, speech flag, and minimized flag survive page reloads via
//! the surface's durable key-value storage; the transcript is in-memory
//! only and is cleared on chat end.

use concierge_core::types::Message;

/// Durable storage key for the visitor's display name.
pub const DISPLAY_NAME_KEY: &str = "concierge_display_name";
/// Durable storage key for the speech-output toggle.
pub const SPEECH_ENABLED_KEY: &str = "concierge_speech_enabled";
/// Durable storage key for the minimized-presentation toggle.
pub const MINIMIZED_KEY: &str = "concierge_minimized";

/// Lifecycle phase of a chat session.
///
/// `Active` is reachable only after a non-empty display name has been set;
/// `Ended` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for the visitor to supply a display name.
    AwaitingName,
    /// Chat input is unlocked.
    Active,
    /// Chat ended by explicit confirmation; no further input is accepted.
    Ended,
}

/// Local session state for one widget instance.
#[derive(Clone, Debug)]
pub struct Session {
    pub phase: SessionPhase,
    pub display_name: Option<String>,
    /// Exportable conversation buffer. Never contains status phrases.
    pub transcript: Vec<Message>,
    /// What the surface currently shows, including status lines.
    pub displayed: Vec<Message>,
    pub speech_enabled: bool,
    pub minimized: bool,
    pub live_agent_mode: bool,
    pub input_enabled: bool,
}

impl Session {
    /// Create a fresh session awaiting a name.
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::AwaitingName,
            display_name: None,
            transcript: Vec::new(),
            displayed: Vec::new(),
            speech_enabled: false,
            minimized: false,
            live_agent_mode: false,
            input_enabled: false,
        }
    }

    /// Whether the session accepts chat messages.
    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_awaits_name() {
        let session = Session::new();
        assert_eq!(session.phase, SessionPhase::AwaitingName);
        assert!(session.display_name.is_none());
        assert!(session.transcript.is_empty());
        assert!(session.displayed.is_empty());
        assert!(!session.input_enabled);
        assert!(!session.is_active());
    }

    #[test]
    fn test_new_session_flags_default_off() {
        let session = Session::new();
        assert!(!session.speech_enabled);
        assert!(!session.minimized);
        assert!(!session.live_agent_mode);
    }

    #[test]
    fn test_is_active_per_phase() {
        let mut session = Session::new();
        assert!(!session.is_active());
        session.phase = SessionPhase::Active;
        assert!(session.is_active());
        session.phase = SessionPhase::Ended;
        assert!(!session.is_active());
    }

    #[test]
    fn test_storage_keys_are_distinct() {
        let keys = [DISPLAY_NAME_KEY, SPEECH_ENABLED_KEY, MINIMIZED_KEY];
        for (i, a) in keys.iter().enumerate() {
            for b in keys.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
