//! Session/UI controller for the Concierge chat widget.
//!
//! Owns the local session state (display name, transcript buffer, speech
//! and minimize toggles, live-agent flag) and mediates every user-visible
//! transition: name prompt, active chat, ended chat. All rendering,
//! prompting, speech, and durable storage go through the [`Surface`]
//! capability trait so the controller is testable without a page
//! environment; the relay and transcript delivery go through async ports.

pub mod command;
pub mod controller;
pub mod error;
pub mod relay;
pub mod session;
pub mod surface;
pub mod voice;

pub use command::Command;
pub use controller::ChatController;
pub use error::SessionError;
pub use relay::{MessageRelay, RelayError, TranscriptSink};
pub use session::{Session, SessionPhase};
pub use surface::Surface;
pub use voice::VoiceProfile;
