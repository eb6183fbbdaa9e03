//! Error types for the session controller.

/// Errors from session operations.
///
/// Both variants are recoverable: the controller re-prompts or ignores the
/// input, and the session stays interactive.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("display name cannot be empty")]
    EmptyName,
    #[error("chat has ended")]
    ChatEnded,
}
