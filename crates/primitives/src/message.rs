//! Contains the [L1IncomingMessage] type and its standard wire format.

use crate::kinds::L1MessageKind;
use alloc::vec::Vec;
use alloy_primitives::{Address, Bytes, B256};

/// Encodes a `u64` as a 32-byte big-endian word.
pub fn u64_word(value: u64) -> B256 {
    B256::left_padding_from(&value.to_be_bytes())
}

/// An error decoding an [L1IncomingMessage] from its wire format.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MessageDecodingError {
    /// The input ended before the fixed-size header did.
    #[error("incoming message too short: expected at least {expected} bytes, got {got}")]
    InputTooShort {
        /// The minimum length of an encoded message.
        expected: usize,
        /// The length of the input.
        got: usize,
    },
}

/// The header of an [L1IncomingMessage].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct L1IncomingMessageHeader {
    /// The [L1MessageKind] identifier.
    pub kind: u8,
    /// The account that posted the message on L1.
    pub poster: Address,
    /// The L1 block number, as a 32-byte big-endian word.
    pub block_number: B256,
    /// The L1 timestamp, as a 32-byte big-endian word.
    pub timestamp: B256,
    /// A globally unique identifier for messages without an intrinsic one, zero otherwise.
    pub request_id: B256,
    /// The L1 base fee, as a 32-byte big-endian word.
    #[cfg_attr(feature = "serde", serde(rename = "baseFeeL1"))]
    pub base_fee_l1: B256,
}

impl L1IncomingMessageHeader {
    /// Returns the [L1MessageKind] of the header, if it is a known kind.
    pub fn message_kind(&self) -> Option<L1MessageKind> {
        L1MessageKind::try_from(self.kind).ok()
    }
}

/// A message arriving from L1, either decoded from a sequencer batch or read from the delayed
/// inbox.
///
/// Standard Binary Format
// +---------+--------------------------+
// | Bytes   | Field                    |
// +---------+--------------------------+
// | 1       | Kind                     |
// | 32      | Poster (left padded)     |
// | 32      | Block number             |
// | 32      | Timestamp                |
// | 32      | Request id               |
// | 32      | L1 base fee              |
// | rest    | L2 message               |
// +---------+--------------------------+
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct L1IncomingMessage {
    /// The message header.
    pub header: L1IncomingMessageHeader,
    /// The L2 message payload.
    pub l2_msg: Bytes,
}

impl L1IncomingMessage {
    /// The length of the fixed-size portion of the standard encoding.
    pub const HEADER_LEN: usize = 1 + 32 * 5;

    /// The placeholder emitted in place of malformed input, or for slots with nothing genuine to
    /// emit. Every header field is zero except the [L1MessageKind::Invalid] kind, and the
    /// payload is empty.
    pub fn invalid() -> Self {
        Self {
            header: L1IncomingMessageHeader {
                kind: L1MessageKind::Invalid.into(),
                ..Default::default()
            },
            l2_msg: Bytes::new(),
        }
    }

    /// Returns `true` if this is the invalid placeholder kind.
    pub fn is_invalid(&self) -> bool {
        self.header.kind == u8::from(L1MessageKind::Invalid)
    }

    /// Decodes a message from its standard binary format.
    ///
    /// Only the low 20 bytes of the poster word are read.
    pub fn decode(buf: &[u8]) -> Result<Self, MessageDecodingError> {
        if buf.len() < Self::HEADER_LEN {
            return Err(MessageDecodingError::InputTooShort {
                expected: Self::HEADER_LEN,
                got: buf.len(),
            });
        }

        let word = |index: usize| B256::from_slice(&buf[1 + 32 * index..33 + 32 * index]);
        let header = L1IncomingMessageHeader {
            kind: buf[0],
            poster: Address::from_word(word(0)),
            block_number: word(1),
            timestamp: word(2),
            request_id: word(3),
            base_fee_l1: word(4),
        };

        Ok(Self { header, l2_msg: Bytes::copy_from_slice(&buf[Self::HEADER_LEN..]) })
    }

    /// Encodes the message into its standard binary format.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::HEADER_LEN + self.l2_msg.len());
        out.push(self.header.kind);
        out.extend_from_slice(self.header.poster.into_word().as_slice());
        out.extend_from_slice(self.header.block_number.as_slice());
        out.extend_from_slice(self.header.timestamp.as_slice());
        out.extend_from_slice(self.header.request_id.as_slice());
        out.extend_from_slice(self.header.base_fee_l1.as_slice());
        out.extend_from_slice(&self.l2_msg);
        out
    }
}
