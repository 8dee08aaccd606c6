//! Error types for the inbox.

/// An error decoding a [SequencerBatch].
///
/// Only the absence of the fixed header is an error; malformed segment content degrades to fewer
/// segments instead.
///
/// [SequencerBatch]: crate::batch::SequencerBatch
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
pub enum BatchDecodingError {
    /// The batch is shorter than the 40 byte header.
    #[error("sequencer batch missing L1 header: got {0} bytes")]
    MissingHeader(usize),
}

/// An error returned by [InboxMultiplexer::pop].
///
/// [InboxMultiplexer::pop]: crate::multiplexer::InboxMultiplexer
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InboxError<E> {
    /// The backend failed. The error is passed through untouched.
    #[error("inbox backend error: {0}")]
    Backend(E),
    /// The backend handed out data that can never be a genuine batch.
    #[error("critical inbox error: {0}")]
    Critical(#[from] BatchDecodingError),
}

impl<E> InboxError<E> {
    /// Returns the backend error, if this is one.
    pub const fn as_backend(&self) -> Option<&E> {
        match self {
            Self::Backend(err) => Some(err),
            Self::Critical(_) => None,
        }
    }

    /// Returns `true` if the error is critical.
    pub const fn is_critical(&self) -> bool {
        matches!(self, Self::Critical(_))
    }
}
