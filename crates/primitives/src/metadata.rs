//! Contains the [MessageWithMetadata] type.

use crate::message::L1IncomingMessage;

/// A message emitted by the inbox multiplexer, paired with the number of delayed messages that
/// were fully consumed up to and including it.
///
/// Downstream consumers persist and replay this pair, so the serialized field names are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MessageWithMetadata {
    /// The incoming message.
    pub message: L1IncomingMessage,
    /// The running total of delayed messages read.
    pub delayed_messages_read: u64,
}

impl MessageWithMetadata {
    /// Creates a new [MessageWithMetadata].
    pub const fn new(message: L1IncomingMessage, delayed_messages_read: u64) -> Self {
        Self { message, delayed_messages_read }
    }

    /// Returns the invalid placeholder message at the given delayed message count.
    pub fn invalid(delayed_messages_read: u64) -> Self {
        Self::new(L1IncomingMessage::invalid(), delayed_messages_read)
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(MessageWithMetadata::invalid(4)).unwrap();
        assert_eq!(value["delayedMessagesRead"], 4);
        assert_eq!(value["message"]["header"]["kind"], 0xFF);
        assert!(value["message"]["header"].get("baseFeeL1").is_some());
        assert!(value["message"].get("l2Msg").is_some());
    }

    #[test]
    fn test_deserialize_serialized() {
        let msg = MessageWithMetadata::invalid(9);
        let json = serde_json::to_string(&msg).unwrap();
        let back: MessageWithMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }
}
