//! Contains the [InboxMultiplexer], which merges the sequencer inbox and the delayed inbox into
//! one deterministic message stream.

use crate::{
    batch::SequencerBatch,
    cursor::SegmentCursor,
    errors::InboxError,
    inc,
    interpreter::{Resolution, SegmentInterpreter},
    set,
    traits::{DelayedMessageParser, InboxBackend, L1MessageParser, MessageMultiplexer},
};
use arb_primitives::metadata::MessageWithMetadata;
use async_trait::async_trait;
use tracing::{debug, info};

/// The decoded batch at the backend's current position, with the walk state over it.
///
/// Everything here is rebuilt from the backend on demand, so losing it is harmless.
#[derive(Debug)]
struct CachedBatch {
    index: u64,
    batch: SequencerBatch,
    cursor: SegmentCursor,
}

/// Multiplexes the sequencer inbox and the delayed inbox.
///
/// The durable state is the backend's position together with [Self::delayed_messages_read].
/// Two multiplexers started from the same backend contents, position and delayed count pop the
/// same messages.
#[derive(Debug)]
pub struct InboxMultiplexer<B, P = L1MessageParser> {
    backend: B,
    parser: P,
    delayed_messages_read: u64,
    cached: Option<CachedBatch>,
}

impl<B: InboxBackend> InboxMultiplexer<B> {
    /// Creates a new [InboxMultiplexer] resuming from the backend's position, with
    /// `delayed_messages_read` delayed messages already consumed.
    pub fn new(backend: B, delayed_messages_read: u64) -> Self {
        Self::with_parser(backend, delayed_messages_read, L1MessageParser)
    }
}

impl<B, P> InboxMultiplexer<B, P>
where
    B: InboxBackend,
    P: DelayedMessageParser,
{
    /// Creates a new [InboxMultiplexer] parsing delayed messages with `parser`.
    pub fn with_parser(backend: B, delayed_messages_read: u64, parser: P) -> Self {
        Self { backend, parser, delayed_messages_read, cached: None }
    }

    /// Returns a reference to the backend.
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Consumes the multiplexer, returning the backend.
    pub fn into_backend(self) -> B {
        self.backend
    }

    async fn load_batch(&mut self) -> Result<CachedBatch, InboxError<B::Error>> {
        let data = self.backend.peek_sequencer_inbox().await.map_err(InboxError::Backend)?;
        let index = self.backend.sequencer_inbox_position();
        let batch = SequencerBatch::decode(&data)?;
        debug!(
            target: "multiplexer",
            index,
            segments = batch.segments.len(),
            after_delayed_messages = batch.header.after_delayed_messages,
            "loaded sequencer batch"
        );
        let cursor = SegmentCursor::new(&batch.header);
        Ok(CachedBatch { index, batch, cursor })
    }
}

#[async_trait]
impl<B, P> MessageMultiplexer for InboxMultiplexer<B, P>
where
    B: InboxBackend,
    P: DelayedMessageParser,
{
    type Error = InboxError<B::Error>;

    /// Returns the next message.
    ///
    /// The backend position moves forward on every call that gets past fetching the batch, even
    /// when resolving the slot fails with a backend error. A batch whose header cannot be read is
    /// a critical error and nothing is advanced.
    async fn pop(&mut self) -> Result<MessageWithMetadata, Self::Error> {
        let mut cached = match self.cached.take() {
            Some(cached) => cached,
            None => self.load_batch().await?,
        };

        let target = self.backend.position_within_message();
        let resolution =
            SegmentInterpreter::new(&cached.batch, cached.index, &mut self.backend, &self.parser)
                .resolve(&mut cached.cursor, target, &mut self.delayed_messages_read)
                .await;

        let after = cached.batch.header.after_delayed_messages;
        if self.delayed_messages_read >= after &&
            !cached.batch.has_emitting_segments_after(cached.cursor.segment_index)
        {
            self.delayed_messages_read = after;
            self.backend.set_position_within_message(0);
            self.backend.advance_sequencer_inbox();
            info!(
                target: "multiplexer",
                index = cached.index,
                delayed_messages_read = after,
                "finished sequencer batch"
            );
            inc!(BATCHES_COMPLETED);
        } else {
            self.backend.set_position_within_message(target + 1);
            self.cached = Some(cached);
        }
        set!(DELAYED_MESSAGES_READ, self.delayed_messages_read as i64);

        match resolution.map_err(InboxError::Backend)? {
            Resolution::Message(message) => Ok(message),
            Resolution::Dropped => {
                inc!(MESSAGES_EMITTED, &["invalid"]);
                Ok(MessageWithMetadata::invalid(self.delayed_messages_read))
            }
        }
    }

    fn delayed_messages_read(&self) -> u64 {
        self.delayed_messages_read
    }
}
