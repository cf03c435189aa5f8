//! WebSocket message types: envelope and commands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level WebSocket message envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsMessage {
    /// Client-provided ID for requests; server-generated for pushed changes.
    pub id: String,
    /// Message type discriminator.
    #[serde(rename = "type")]
    pub msg_type: WsMessageType,
    /// ISO-8601 timestamp.
    pub timestamp: DateTime<Utc>,
    /// Variant-specific payload.
    pub payload: serde_json::Value,
}

impl WsMessage {
    /// Builds a server message stamped with the current time.
    #[must_use]
    pub fn new(id: String, msg_type: WsMessageType, payload: serde_json::Value) -> Self {
        Self {
            id,
            msg_type,
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Builds an error envelope answering request `id`.
    #[must_use]
    pub fn error(id: String, code: u16, message: &str) -> Self {
        Self::new(
            id,
            WsMessageType::Error,
            serde_json::json!({ "code": code, "message": message }),
        )
    }
}

/// Discriminator for WebSocket message types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WsMessageType {
    /// Client → Server command.
    Command,
    /// Server → Client response to a command.
    Response,
    /// Server → Client pushed change.
    Event,
    /// Server → Client error.
    Error,
}

/// Commands carried in the payload of a `command` envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum WsCommand {
    /// Subscribe to changes of specific events.
    Subscribe {
        /// Event ids to follow. `"*"` follows every event.
        event_ids: Vec<SubscriptionTarget>,
    },
    /// Stop following specific events.
    Unsubscribe {
        /// Event ids to drop.
        event_ids: Vec<SubscriptionTarget>,
    },
}

/// One entry of a subscription list: an event id or the `"*"` wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SubscriptionTarget {
    /// A single event id.
    Id(i64),
    /// A string, either `"*"` or a decimal id.
    Text(String),
}

impl SubscriptionTarget {
    /// Returns `true` for the `"*"` wildcard.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Text(s) if s == "*")
    }

    /// Returns the event id, if this entry names one.
    #[must_use]
    pub fn event_id(&self) -> Option<i64> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Text(s) => s.parse().ok(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn parses_subscribe_with_mixed_targets() {
        let json = r#"{"command":"subscribe","event_ids":[1,"2","*"]}"#;
        let Ok(WsCommand::Subscribe { event_ids }) = serde_json::from_str::<WsCommand>(json) else {
            panic!("expected subscribe");
        };
        let ids: Vec<Option<i64>> = event_ids.iter().map(SubscriptionTarget::event_id).collect();
        assert_eq!(ids, vec![Some(1), Some(2), None]);
        assert!(event_ids.iter().any(SubscriptionTarget::is_wildcard));
    }

    #[test]
    fn unknown_command_fails_to_parse() {
        let json = r#"{"command":"book","event_ids":[1]}"#;
        assert!(serde_json::from_str::<WsCommand>(json).is_err());
    }

    #[test]
    fn envelope_type_is_renamed() {
        let msg = WsMessage::error(String::new(), 400, "malformed JSON");
        let json = serde_json::to_string(&msg).unwrap_or_default();
        assert!(json.contains("\"type\":\"error\""));
    }
}
