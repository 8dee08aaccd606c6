//! Contains the [SegmentKind] type.

/// The kind of a batch segment, carried in its first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SegmentKind {
    /// An uncompressed L2 message.
    L2Message = 0,
    /// A brotli compressed L2 message.
    L2MessageBrotli = 1,
    /// Consumes the next message from the delayed inbox.
    DelayedMessages = 2,
    /// Advances the running timestamp by an RLP encoded delta.
    AdvanceTimestamp = 3,
    /// Advances the running L1 block number by an RLP encoded delta.
    AdvanceL1BlockNumber = 4,
}

impl SegmentKind {
    /// Returns `true` for segments that only move an accumulator and never occupy a submessage
    /// slot.
    pub const fn is_advance(&self) -> bool {
        matches!(self, Self::AdvanceTimestamp | Self::AdvanceL1BlockNumber)
    }

    /// Returns `true` for segments that produce a message.
    pub const fn is_emitting(&self) -> bool {
        matches!(self, Self::L2Message | Self::L2MessageBrotli | Self::DelayedMessages)
    }

    /// Reads the kind of a raw segment. Returns [None] for empty segments, and the raw byte for
    /// unknown kinds.
    pub fn of(segment: &[u8]) -> Option<Result<Self, u8>> {
        segment.first().map(|kind| Self::try_from(*kind))
    }
}

impl TryFrom<u8> for SegmentKind {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::L2Message),
            1 => Ok(Self::L2MessageBrotli),
            2 => Ok(Self::DelayedMessages),
            3 => Ok(Self::AdvanceTimestamp),
            4 => Ok(Self::AdvanceL1BlockNumber),
            other => Err(other),
        }
    }
}

impl From<SegmentKind> for u8 {
    fn from(kind: SegmentKind) -> Self {
        kind as Self
    }
}
