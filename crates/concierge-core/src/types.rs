use chrono::Utc;
use serde::{Deserialize, Serialize};

// =============================================================================
// Enums
// =============================================================================

/// Who authored a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The site visitor.
    User,
    /// The assistant (upstream completion or canned reply).
    Bot,
}

// =============================================================================
// Messages
// =============================================================================

/// Display name used for assistant-authored messages.
pub const BOT_NAME: &str = "Bot";

/// A single chat message. Insertion order is display order; entries are
/// appended only, never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub name: String,
    pub text: String,
    /// ISO-8601 timestamp recorded at creation.
    pub timestamp: String,
}

impl Message {
    /// Create a visitor message stamped with the current time.
    pub fn user(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            name: name.into(),
            text: text.into(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    /// Create an assistant message stamped with the current time.
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            name: BOT_NAME.to_string(),
            text: text.into(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

// =============================================================================
// Relay wire contract
// =============================================================================

/// Request body for the message relay endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest {
    pub message: String,
    pub display_name: String,
    #[serde(default)]
    pub live_agent_mode: bool,
}

/// Success/failure envelope returned by the message relay endpoint.
///
/// Exactly one of `reply` and `error_message` is present, keyed by `ok`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayReply {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    #[serde(rename = "errorMessage", skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl RelayReply {
    /// Build a success envelope carrying the assistant's reply.
    pub fn success(reply: impl Into<String>) -> Self {
        Self {
            ok: true,
            reply: Some(reply.into()),
            error_message: None,
        }
    }

    /// Build a failure envelope carrying a short user-facing message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            reply: None,
            error_message: Some(message.into()),
        }
    }
}

// =============================================================================
// Transcript wire contract
// =============================================================================

/// Request body for the transcript-delivery endpoint: the full ordered
/// message list accumulated by a session.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptRequest {
    pub display_name: String,
    pub messages: Vec<Message>,
}

/// Acknowledgement envelope for transcript delivery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptAck {
    pub ok: bool,
    /// Number of messages accepted.
    pub received: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Message construction ----

    #[test]
    fn test_user_message_fields() {
        let m = Message::user("Ann", "Hello");
        assert_eq!(m.sender, Sender::User);
        assert_eq!(m.name, "Ann");
        assert_eq!(m.text, "Hello");
        assert!(!m.timestamp.is_empty());
    }

    #[test]
    fn test_bot_message_fields() {
        let m = Message::bot("Hi there");
        assert_eq!(m.sender, Sender::Bot);
        assert_eq!(m.name, BOT_NAME);
        assert_eq!(m.text, "Hi there");
    }

    #[test]
    fn test_message_timestamp_parses_as_rfc3339() {
        let m = Message::bot("check");
        assert!(chrono::DateTime::parse_from_rfc3339(&m.timestamp).is_ok());
    }

    #[test]
    fn test_message_serde_round_trip() {
        let m = Message::user("Ann", "Hello");
        let json = serde_json::to_string(&m).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_sender_serializes_snake_case() {
        let json = serde_json::to_string(&Sender::User).unwrap();
        assert_eq!(json, "\"user\"");
        let json = serde_json::to_string(&Sender::Bot).unwrap();
        assert_eq!(json, "\"bot\"");
    }

    // ---- Relay envelope ----

    #[test]
    fn test_relay_reply_success_shape() {
        let reply = RelayReply::success("Hi Ann");
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["ok"], true);
        assert_eq!(json["reply"], "Hi Ann");
        assert!(json.get("errorMessage").is_none());
    }

    #[test]
    fn test_relay_reply_failure_shape() {
        let reply = RelayReply::failure("Could not connect.");
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["errorMessage"], "Could not connect.");
        assert!(json.get("reply").is_none());
    }

    #[test]
    fn test_relay_reply_deserializes_camel_case_error() {
        let reply: RelayReply =
            serde_json::from_str(r#"{"ok":false,"errorMessage":"nope"}"#).unwrap();
        assert!(!reply.ok);
        assert_eq!(reply.error_message.as_deref(), Some("nope"));
    }

    #[test]
    fn test_relay_request_live_agent_defaults_false() {
        let req: RelayRequest =
            serde_json::from_str(r#"{"message":"help","displayName":"Ann"}"#).unwrap();
        assert!(!req.live_agent_mode);
        assert_eq!(req.message, "help");
        assert_eq!(req.display_name, "Ann");
    }

    #[test]
    fn test_relay_request_camel_case_keys() {
        let req = RelayRequest {
            message: "hi".to_string(),
            display_name: "Ann".to_string(),
            live_agent_mode: true,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["displayName"], "Ann");
        assert_eq!(json["liveAgentMode"], true);
    }

    // ---- Transcript envelope ----

    #[test]
    fn test_transcript_request_round_trip() {
        let req = TranscriptRequest {
            display_name: "Ann".to_string(),
            messages: vec![Message::user("Ann", "Hello"), Message::bot("Hi Ann")],
        };
        let json = serde_json::to_string(&req).unwrap();
        let back: TranscriptRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.display_name, "Ann");
        assert_eq!(back.messages.len(), 2);
        assert_eq!(back.messages[1].text, "Hi Ann");
    }

    #[test]
    fn test_transcript_ack_shape() {
        let ack = TranscriptAck {
            ok: true,
            received: 4,
        };
        let json = serde_json::to_value(&ack).unwrap();
        assert_eq!(json["ok"], true);
        assert_eq!(json["received"], 4);
    }
}
