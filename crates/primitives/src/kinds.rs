//! Message kind identifiers.

/// The kind of an [L1IncomingMessage], carried in the first byte of its header.
///
/// [L1IncomingMessage]: crate::message::L1IncomingMessage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum L1MessageKind {
    /// An L2 message posted by the sequencer or forced through the delayed inbox.
    L2Message = 3,
    /// Marks the end of an L2 block.
    EndOfBlock = 6,
    /// An L2 message whose gas is funded by an L1 deposit.
    L2FundedByL1 = 7,
    /// A rollup protocol event.
    RollupEvent = 8,
    /// A retryable ticket submission.
    SubmitRetryable = 9,
    /// A batch posting report used for gas estimation.
    BatchForGasEstimation = 10,
    /// Chain initialization.
    Initialize = 11,
    /// A plain ETH deposit.
    EthDeposit = 12,
    /// The placeholder kind used for malformed or empty slots.
    Invalid = 0xFF,
}

impl TryFrom<u8> for L1MessageKind {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(Self::L2Message),
            6 => Ok(Self::EndOfBlock),
            7 => Ok(Self::L2FundedByL1),
            8 => Ok(Self::RollupEvent),
            9 => Ok(Self::SubmitRetryable),
            10 => Ok(Self::BatchForGasEstimation),
            11 => Ok(Self::Initialize),
            12 => Ok(Self::EthDeposit),
            0xFF => Ok(Self::Invalid),
            other => Err(other),
        }
    }
}

impl From<L1MessageKind> for u8 {
    fn from(kind: L1MessageKind) -> Self {
        kind as Self
    }
}

/// The kind of an L2 message, carried in the first byte of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum L2MessageKind {
    /// An unsigned transaction from a user, authenticated by its L1 sender.
    UnsignedUserTx = 0,
    /// A contract transaction.
    ContractTx = 1,
    /// A call that does not mutate state.
    NonmutatingCall = 2,
    /// A batch of L2 messages.
    Batch = 3,
    /// A signed transaction.
    SignedTx = 4,
}

impl L2MessageKind {
    /// Returns `true` if messages of this kind carry their own identity (signature or sender
    /// nonce) and therefore do not need a synthesized request id.
    pub const fn is_self_authenticating(&self) -> bool {
        matches!(self, Self::SignedTx | Self::UnsignedUserTx)
    }
}

impl TryFrom<u8> for L2MessageKind {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::UnsignedUserTx),
            1 => Ok(Self::ContractTx),
            2 => Ok(Self::NonmutatingCall),
            3 => Ok(Self::Batch),
            4 => Ok(Self::SignedTx),
            other => Err(other),
        }
    }
}

impl From<L2MessageKind> for u8 {
    fn from(kind: L2MessageKind) -> Self {
        kind as Self
    }
}
