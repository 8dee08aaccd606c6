//! Contains the [DelayedMessageParser] trait and its standard implementation.

use arb_primitives::message::{L1IncomingMessage, MessageDecodingError};

/// Decodes the raw bytes read from the delayed inbox into an [L1IncomingMessage].
pub trait DelayedMessageParser: Send + Sync {
    /// Parses a delayed message.
    fn parse(&self, data: &[u8]) -> Result<L1IncomingMessage, MessageDecodingError>;
}

/// Parses delayed messages in the standard [L1IncomingMessage] binary format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct L1MessageParser;

impl DelayedMessageParser for L1MessageParser {
    fn parse(&self, data: &[u8]) -> Result<L1IncomingMessage, MessageDecodingError> {
        L1IncomingMessage::decode(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, Bytes};
    use arb_primitives::{kinds::L1MessageKind, message::u64_word};

    #[test]
    fn test_parse_standard_format() {
        let mut message = L1IncomingMessage::invalid();
        message.header.kind = L1MessageKind::EthDeposit.into();
        message.header.poster = address!("00000000000000000000000000000000000000aa");
        message.header.block_number = u64_word(12);
        message.l2_msg = Bytes::from_static(b"deposit");

        assert_eq!(L1MessageParser.parse(&message.encode()).unwrap(), message);
    }

    #[test]
    fn test_parse_short_input() {
        assert_eq!(
            L1MessageParser.parse(&[12; 10]),
            Err(MessageDecodingError::InputTooShort {
                expected: L1IncomingMessage::HEADER_LEN,
                got: 10
            })
        );
    }
}
