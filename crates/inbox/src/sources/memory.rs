//! Contains the [MemoryInboxBackend], an [InboxBackend] over in-memory inbox contents.

use crate::traits::InboxBackend;
use alloy_primitives::Bytes;
use async_trait::async_trait;

/// An error from the [MemoryInboxBackend].
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
pub enum MemoryBackendError {
    /// No sequencer batch exists at the requested index.
    #[error("sequencer batch {0} not found")]
    BatchNotFound(u64),
    /// No delayed message exists with the requested sequence number.
    #[error("delayed message {0} not found")]
    DelayedMessageNotFound(u64),
}

/// An [InboxBackend] holding both inboxes and the read position in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryInboxBackend {
    batches: Vec<Bytes>,
    delayed_messages: Vec<Bytes>,
    batch_index: u64,
    position_within_message: u64,
}

impl MemoryInboxBackend {
    /// Creates a new [MemoryInboxBackend] positioned at the start of the first batch.
    pub const fn new(batches: Vec<Bytes>, delayed_messages: Vec<Bytes>) -> Self {
        Self { batches, delayed_messages, batch_index: 0, position_within_message: 0 }
    }

    /// Sets the read position.
    pub fn with_position(mut self, batch_index: u64, position_within_message: u64) -> Self {
        self.batch_index = batch_index;
        self.position_within_message = position_within_message;
        self
    }

    /// Appends a sequencer batch.
    pub fn push_batch(&mut self, batch: Bytes) {
        self.batches.push(batch);
    }

    /// Appends a delayed message.
    pub fn push_delayed_message(&mut self, message: Bytes) {
        self.delayed_messages.push(message);
    }

    /// Returns the read position as (batch index, submessage index).
    pub const fn position(&self) -> (u64, u64) {
        (self.batch_index, self.position_within_message)
    }

    /// Returns `true` once the position has moved past the last batch.
    pub fn is_exhausted(&self) -> bool {
        usize::try_from(self.batch_index).map_or(true, |index| index >= self.batches.len())
    }
}

#[async_trait]
impl InboxBackend for MemoryInboxBackend {
    type Error = MemoryBackendError;

    async fn peek_sequencer_inbox(&mut self) -> Result<Bytes, Self::Error> {
        usize::try_from(self.batch_index)
            .ok()
            .and_then(|index| self.batches.get(index))
            .cloned()
            .ok_or(MemoryBackendError::BatchNotFound(self.batch_index))
    }

    fn sequencer_inbox_position(&self) -> u64 {
        self.batch_index
    }

    fn advance_sequencer_inbox(&mut self) {
        self.batch_index += 1;
    }

    fn position_within_message(&self) -> u64 {
        self.position_within_message
    }

    fn set_position_within_message(&mut self, position: u64) {
        self.position_within_message = position;
    }

    async fn read_delayed_inbox(&mut self, seq_num: u64) -> Result<Bytes, Self::Error> {
        usize::try_from(seq_num)
            .ok()
            .and_then(|index| self.delayed_messages.get(index))
            .cloned()
            .ok_or(MemoryBackendError::DelayedMessageNotFound(seq_num))
    }
}
