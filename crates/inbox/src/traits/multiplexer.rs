//! Contains the [MessageMultiplexer] trait.

use arb_primitives::metadata::MessageWithMetadata;
use async_trait::async_trait;

/// Produces the single ordered stream of messages executed on L2.
#[async_trait]
pub trait MessageMultiplexer {
    /// The error type returned by [MessageMultiplexer::pop].
    type Error;

    /// Returns the next message in the stream.
    async fn pop(&mut self) -> Result<MessageWithMetadata, Self::Error>;

    /// Returns the number of delayed messages consumed so far.
    fn delayed_messages_read(&self) -> u64;
}
