//! A mock [InboxBackend] for testing the multiplexer.

use crate::{
    sources::{MemoryBackendError, MemoryInboxBackend},
    traits::InboxBackend,
};
use alloy_primitives::Bytes;
use async_trait::async_trait;

/// An error from the [TestInboxBackend].
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum TestBackendError {
    /// A failure injected by the test.
    #[error("injected {0} failure")]
    Injected(&'static str),
    /// The wrapped memory backend failed.
    #[error(transparent)]
    Memory(#[from] MemoryBackendError),
}

/// A [MemoryInboxBackend] wrapper that records reads and fails on request.
#[derive(Debug, Default)]
pub struct TestInboxBackend {
    /// The wrapped backend.
    pub inner: MemoryInboxBackend,
    /// Fails every batch peek while set.
    pub fail_peek: bool,
    /// Delayed message sequence numbers whose reads fail.
    pub fail_delayed_reads: Vec<u64>,
    /// The number of batch peeks performed.
    pub peeks: usize,
    /// The sequence numbers of every delayed read attempted, in order.
    pub delayed_reads: Vec<u64>,
}

impl TestInboxBackend {
    /// Creates a new [TestInboxBackend] over the given inbox contents.
    pub fn new(batches: Vec<Bytes>, delayed_messages: Vec<Bytes>) -> Self {
        Self { inner: MemoryInboxBackend::new(batches, delayed_messages), ..Default::default() }
    }

    /// Returns the read position as (batch index, submessage index).
    pub const fn position(&self) -> (u64, u64) {
        self.inner.position()
    }
}

#[async_trait]
impl InboxBackend for TestInboxBackend {
    type Error = TestBackendError;

    async fn peek_sequencer_inbox(&mut self) -> Result<Bytes, Self::Error> {
        self.peeks += 1;
        if self.fail_peek {
            return Err(TestBackendError::Injected("peek"));
        }
        Ok(self.inner.peek_sequencer_inbox().await?)
    }

    fn sequencer_inbox_position(&self) -> u64 {
        self.inner.sequencer_inbox_position()
    }

    fn advance_sequencer_inbox(&mut self) {
        self.inner.advance_sequencer_inbox()
    }

    fn position_within_message(&self) -> u64 {
        self.inner.position_within_message()
    }

    fn set_position_within_message(&mut self, position: u64) {
        self.inner.set_position_within_message(position)
    }

    async fn read_delayed_inbox(&mut self, seq_num: u64) -> Result<Bytes, Self::Error> {
        self.delayed_reads.push(seq_num);
        if self.fail_delayed_reads.contains(&seq_num) {
            return Err(TestBackendError::Injected("delayed read"));
        }
        Ok(self.inner.read_delayed_inbox(seq_num).await?)
    }
}
