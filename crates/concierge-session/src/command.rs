//! In-band command interpretation for submitted chat lines.
//!
//! The only command is `/name ` (case-sensitive, exactly one space), which
//! renames the visitor locally without contacting the relay. Everything
//! else is a plain message.

/// The rename command prefix, including its trailing space.
const NAME_PREFIX: &str = "/name ";

/// Bot-message phrases that are rendered but never stored in the
/// transcript, so exported transcripts stay free of system noise.
/// Matching is case-insensitive substring.
const STATUS_PHRASES: &[&str] = &["welcome", "your name has been changed", "chat ended"];

/// Interpretation of one submitted line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Rename the visitor to the (trimmed, non-empty) new name.
    Rename(String),
    /// `/name` with nothing after it: show the usage hint.
    RenameUsage,
    /// Anything else: forward to the relay.
    Plain(String),
}

/// Classify a trimmed, non-empty message line.
pub fn parse(text: &str) -> Command {
    if let Some(rest) = text.strip_prefix(NAME_PREFIX) {
        let new_name = rest.trim();
        if new_name.is_empty() {
            Command::RenameUsage
        } else {
            Command::Rename(new_name.to_string())
        }
    } else {
        Command::Plain(text.to_string())
    }
}

/// Whether a bot message is a status phrase excluded from the transcript.
pub fn is_status_phrase(text: &str) -> bool {
    let lower = text.to_lowercase();
    STATUS_PHRASES.iter().any(|phrase| lower.contains(phrase))
}
