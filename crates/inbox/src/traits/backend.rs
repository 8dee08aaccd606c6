//! Contains the [InboxBackend] trait.

use alloy_primitives::Bytes;
use async_trait::async_trait;
use core::fmt::{Debug, Display};

/// Durable access to the two L1 inboxes, along with the read position the multiplexer persists.
///
/// The position is the pair (sequencer batch index, submessage index within that batch). It is
/// the only state the multiplexer needs to survive a restart, alongside its delayed message
/// count.
#[async_trait]
pub trait InboxBackend: Send {
    /// The error type returned by the backend. It is handed to the caller untouched.
    type Error: Debug + Display + Send;

    /// Returns the raw bytes of the sequencer batch at the current position, without advancing.
    async fn peek_sequencer_inbox(&mut self) -> Result<Bytes, Self::Error>;

    /// Returns the index of the current sequencer batch.
    fn sequencer_inbox_position(&self) -> u64;

    /// Moves on to the next sequencer batch.
    fn advance_sequencer_inbox(&mut self);

    /// Returns the submessage index within the current batch.
    fn position_within_message(&self) -> u64;

    /// Sets the submessage index within the current batch.
    fn set_position_within_message(&mut self, position: u64);

    /// Reads the delayed message with the given sequence number.
    async fn read_delayed_inbox(&mut self, seq_num: u64) -> Result<Bytes, Self::Error>;
}
