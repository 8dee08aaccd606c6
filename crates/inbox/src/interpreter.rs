//! Contains the [SegmentInterpreter], which turns the segment at a submessage index into a
//! message.

use crate::{
    batch::{SegmentKind, SequencerBatch},
    compression::decompress_brotli,
    cursor::{ResolvedSegment, SegmentCursor},
    inc,
    traits::{DelayedMessageParser, InboxBackend},
};
use alloy_primitives::{Bytes, B256};
use arb_primitives::{
    kinds::{L1MessageKind, L2MessageKind},
    message::{u64_word, L1IncomingMessage, L1IncomingMessageHeader},
    metadata::MessageWithMetadata,
    params::{MAX_L2_MESSAGE_SIZE, SEQUENCER_ADDRESS},
};
use tracing::{debug, error, warn};

/// The outcome of resolving a submessage slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The slot produced a message.
    Message(MessageWithMetadata),
    /// The slot held malformed content. The invalid placeholder is emitted in its place.
    Dropped,
}

/// Synthesizes the request id of a sequencer L2 message that carries no identity of its own.
// +---------+--------------------------+
// | Bytes   | Field                    |
// +---------+--------------------------+
// | 1       | 0x40                     |
// | 15      | Zero                     |
// | 8       | Batch index              |
// | 8       | Segment index            |
// +---------+--------------------------+
pub fn sequencer_request_id(batch_index: u64, segment_index: u64) -> B256 {
    let mut id = B256::ZERO;
    id[0] = 1 << 6;
    id[16..24].copy_from_slice(&batch_index.to_be_bytes());
    id[24..].copy_from_slice(&segment_index.to_be_bytes());
    id
}

/// Resolves submessage slots of a single [SequencerBatch].
#[derive(Debug)]
pub struct SegmentInterpreter<'a, B, P> {
    batch: &'a SequencerBatch,
    batch_index: u64,
    backend: &'a mut B,
    parser: &'a P,
}

impl<'a, B, P> SegmentInterpreter<'a, B, P>
where
    B: InboxBackend,
    P: DelayedMessageParser,
{
    /// Creates a new [SegmentInterpreter] over the batch at `batch_index`.
    pub fn new(
        batch: &'a SequencerBatch,
        batch_index: u64,
        backend: &'a mut B,
        parser: &'a P,
    ) -> Self {
        Self { batch, batch_index, backend, parser }
    }

    /// Resolves submessage `target`, walking `cursor` forward to it.
    ///
    /// `delayed_messages_read` is incremented when a delayed message is consumed. Backend errors
    /// are returned as-is; every other failure resolves to [Resolution::Dropped].
    pub async fn resolve(
        &mut self,
        cursor: &mut SegmentCursor,
        target: u64,
        delayed_messages_read: &mut u64,
    ) -> Result<Resolution, B::Error> {
        let segment = cursor.seek(self.batch, target);
        match segment.segment_kind() {
            Ok(SegmentKind::L2Message | SegmentKind::L2MessageBrotli) => {
                Ok(self.l2_message(&segment, *delayed_messages_read))
            }
            Ok(SegmentKind::DelayedMessages) => {
                self.delayed_message(&segment, delayed_messages_read).await
            }
            _ => {
                error!(
                    target: "interpreter",
                    kind = segment.kind,
                    batch = self.batch_index,
                    segment = segment.segment_index,
                    "bad sequencer message segment kind"
                );
                Ok(Resolution::Dropped)
            }
        }
    }

    fn l2_message(&self, segment: &ResolvedSegment, delayed_messages_read: u64) -> Resolution {
        let l2_msg = if segment.segment_kind() == Ok(SegmentKind::L2MessageBrotli) {
            match decompress_brotli(&segment.payload, MAX_L2_MESSAGE_SIZE) {
                Ok(decompressed) => Bytes::from(decompressed),
                Err(err) => {
                    warn!(
                        target: "interpreter",
                        err = %err,
                        batch = self.batch_index,
                        segment = segment.segment_index,
                        delayed_messages_read,
                        "dropping compressed L2 message"
                    );
                    return Resolution::Dropped;
                }
            }
        } else {
            segment.payload.clone()
        };

        let self_authenticating = l2_msg
            .first()
            .and_then(|kind| L2MessageKind::try_from(*kind).ok())
            .is_some_and(|kind| kind.is_self_authenticating());
        let request_id = if self_authenticating {
            B256::ZERO
        } else {
            sequencer_request_id(self.batch_index, segment.segment_index as u64)
        };

        debug!(
            target: "interpreter",
            batch = self.batch_index,
            segment = segment.segment_index,
            timestamp = segment.timestamp,
            block_number = segment.block_number,
            len = l2_msg.len(),
            "resolved sequencer L2 message"
        );
        inc!(MESSAGES_EMITTED, &["l2"]);

        let header = L1IncomingMessageHeader {
            kind: L1MessageKind::L2Message.into(),
            poster: SEQUENCER_ADDRESS,
            block_number: u64_word(segment.block_number),
            timestamp: u64_word(segment.timestamp),
            request_id,
            base_fee_l1: B256::ZERO,
        };
        Resolution::Message(MessageWithMetadata::new(
            L1IncomingMessage { header, l2_msg },
            delayed_messages_read,
        ))
    }

    async fn delayed_message(
        &mut self,
        segment: &ResolvedSegment,
        delayed_messages_read: &mut u64,
    ) -> Result<Resolution, B::Error> {
        let after = self.batch.header.after_delayed_messages;
        if *delayed_messages_read >= after {
            if !segment.is_virtual {
                warn!(
                    target: "interpreter",
                    batch = self.batch_index,
                    segment = segment.segment_index,
                    delayed_messages_read = *delayed_messages_read,
                    after,
                    "attempt to read past batch delayed message count"
                );
            }
            inc!(MESSAGES_EMITTED, &["invalid"]);
            return Ok(Resolution::Message(MessageWithMetadata::invalid(after)));
        }

        let seq_num = *delayed_messages_read;
        let data = self.backend.read_delayed_inbox(seq_num).await?;
        *delayed_messages_read += 1;

        match self.parser.parse(&data) {
            Ok(message) => {
                debug!(
                    target: "interpreter",
                    seq_num,
                    kind = message.header.kind,
                    "read delayed message"
                );
                inc!(MESSAGES_EMITTED, &["delayed"]);
                Ok(Resolution::Message(MessageWithMetadata::new(message, *delayed_messages_read)))
            }
            Err(err) => {
                warn!(
                    target: "interpreter",
                    err = %err,
                    seq_num,
                    "dropping malformed delayed message"
                );
                Ok(Resolution::Dropped)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        batch::BatchHeader,
        test_utils::{
            advance_timestamp_segment, brotli_l2_segment, delayed_segment, l2_segment,
            CollectingLayer, TestBackendError, TestInboxBackend, TraceStorage,
        },
        traits::L1MessageParser,
    };
    use alloy_primitives::{address, b256};
    use tracing::Level;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    const HEADER: BatchHeader = BatchHeader {
        min_timestamp: 100,
        max_timestamp: 200,
        min_l1_block: 5,
        max_l1_block: 5,
        after_delayed_messages: 1,
    };

    fn deposit() -> L1IncomingMessage {
        let mut message = L1IncomingMessage::invalid();
        message.header.kind = L1MessageKind::EthDeposit.into();
        message.header.poster = address!("00000000000000000000000000000000000000bb");
        message.l2_msg = Bytes::from_static(b"deposit");
        message
    }

    async fn resolve(
        batch: &SequencerBatch,
        backend: &mut TestInboxBackend,
        target: u64,
        delayed_messages_read: &mut u64,
    ) -> Result<Resolution, TestBackendError> {
        let mut cursor = SegmentCursor::new(&batch.header);
        SegmentInterpreter::new(batch, 7, backend, &L1MessageParser)
            .resolve(&mut cursor, target, delayed_messages_read)
            .await
    }

    fn message(resolution: Resolution) -> MessageWithMetadata {
        match resolution {
            Resolution::Message(message) => message,
            Resolution::Dropped => panic!("expected a message"),
        }
    }

    #[test]
    fn test_sequencer_request_id() {
        assert_eq!(
            sequencer_request_id(0x0102, 3),
            b256!("4000000000000000000000000000000000000000000001020000000000000003")
        );
    }

    #[tokio::test]
    async fn test_resolve_l2_message() {
        let batch =
            SequencerBatch::new(HEADER, vec![advance_timestamp_segment(50), l2_segment(b"hello")]);
        let mut backend = TestInboxBackend::default();
        let mut read = 0;

        let resolved = message(resolve(&batch, &mut backend, 0, &mut read).await.unwrap());
        let header = &resolved.message.header;
        assert_eq!(header.kind, u8::from(L1MessageKind::L2Message));
        assert_eq!(header.poster, SEQUENCER_ADDRESS);
        assert_eq!(header.timestamp, u64_word(150));
        assert_eq!(header.block_number, u64_word(5));
        assert_eq!(header.base_fee_l1, B256::ZERO);
        // "h" is not a known L2 message kind, so the id is synthesized from segment 1.
        assert_eq!(header.request_id, sequencer_request_id(7, 1));
        assert_eq!(resolved.message.l2_msg, Bytes::from_static(b"hello"));
        assert_eq!(resolved.delayed_messages_read, 0);
        assert!(backend.delayed_reads.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_self_authenticating_messages() {
        let batch = SequencerBatch::new(
            HEADER,
            vec![l2_segment(&[4, 0xAA]), l2_segment(&[0, 0xBB]), l2_segment(&[3, 0xCC])],
        );
        let mut backend = TestInboxBackend::default();
        let mut read = 0;

        let signed = message(resolve(&batch, &mut backend, 0, &mut read).await.unwrap());
        assert_eq!(signed.message.header.request_id, B256::ZERO);
        let unsigned = message(resolve(&batch, &mut backend, 1, &mut read).await.unwrap());
        assert_eq!(unsigned.message.header.request_id, B256::ZERO);
        let nested = message(resolve(&batch, &mut backend, 2, &mut read).await.unwrap());
        assert_eq!(nested.message.header.request_id, sequencer_request_id(7, 2));
    }

    #[tokio::test]
    async fn test_resolve_empty_l2_payload() {
        let batch = SequencerBatch::new(HEADER, vec![l2_segment(&[])]);
        let mut backend = TestInboxBackend::default();
        let mut read = 0;

        let resolved = message(resolve(&batch, &mut backend, 0, &mut read).await.unwrap());
        assert!(resolved.message.l2_msg.is_empty());
        assert_eq!(resolved.message.header.request_id, sequencer_request_id(7, 0));
    }

    #[tokio::test]
    async fn test_resolve_compressed_l2_message() {
        let batch = SequencerBatch::new(HEADER, vec![brotli_l2_segment(&[4, 1, 2, 3])]);
        let mut backend = TestInboxBackend::default();
        let mut read = 0;

        let resolved = message(resolve(&batch, &mut backend, 0, &mut read).await.unwrap());
        assert_eq!(resolved.message.l2_msg, Bytes::from_static(&[4, 1, 2, 3]));
        assert_eq!(resolved.message.header.request_id, B256::ZERO);
    }

    #[tokio::test]
    async fn test_resolve_bad_compressed_l2_message() {
        let trace_store: TraceStorage = Default::default();
        let layer = CollectingLayer::new(trace_store.clone());
        let _guard = tracing_subscriber::Registry::default().with(layer).set_default();

        let batch = SequencerBatch::new(HEADER, vec![Bytes::from_static(&[1, 0x11, 0, 0, 0])]);
        let mut backend = TestInboxBackend::default();
        let mut read = 0;

        let resolution = resolve(&batch, &mut backend, 0, &mut read).await.unwrap();
        assert_eq!(resolution, Resolution::Dropped);
        let logs = trace_store.get_by_level(Level::WARN);
        assert_eq!(logs.len(), 1);
        assert!(logs[0].contains("dropping compressed L2 message"));
    }

    #[tokio::test]
    async fn test_resolve_compressed_l2_message_with_trailing_bytes() {
        let trace_store: TraceStorage = Default::default();
        let layer = CollectingLayer::new(trace_store.clone());
        let _guard = tracing_subscriber::Registry::default().with(layer).set_default();

        let mut segment = brotli_l2_segment(b"\x03payload").to_vec();
        segment.extend_from_slice(&[0xde, 0xad]);
        let batch = SequencerBatch::new(HEADER, vec![Bytes::from(segment)]);
        let mut backend = TestInboxBackend::default();
        let mut read = 0;

        let resolution = resolve(&batch, &mut backend, 0, &mut read).await.unwrap();
        assert_eq!(resolution, Resolution::Dropped);
        let logs = trace_store.get_by_level(Level::WARN);
        assert_eq!(logs.len(), 1);
        assert!(logs[0].contains("dropping compressed L2 message"));
    }

    #[tokio::test]
    async fn test_resolve_compressed_l2_message_truncated_to_max_size() {
        let trace_store: TraceStorage = Default::default();
        let layer = CollectingLayer::new(trace_store.clone());
        let _guard = tracing_subscriber::Registry::default().with(layer).set_default();

        let payload = vec![0x03; MAX_L2_MESSAGE_SIZE as usize + 1000];
        let batch = SequencerBatch::new(HEADER, vec![brotli_l2_segment(&payload)]);
        let mut backend = TestInboxBackend::default();
        let mut read = 0;

        let resolved = message(resolve(&batch, &mut backend, 0, &mut read).await.unwrap());
        assert_eq!(resolved.message.l2_msg.len(), MAX_L2_MESSAGE_SIZE as usize);
        assert_eq!(resolved.message.l2_msg[..], payload[..MAX_L2_MESSAGE_SIZE as usize]);
        assert!(trace_store.get_by_level(Level::WARN).is_empty());
    }

    #[tokio::test]
    async fn test_resolve_unknown_kind() {
        let trace_store: TraceStorage = Default::default();
        let layer = CollectingLayer::new(trace_store.clone());
        let _guard = tracing_subscriber::Registry::default().with(layer).set_default();

        let batch = SequencerBatch::new(HEADER, vec![Bytes::from_static(&[9, 1, 2])]);
        let mut backend = TestInboxBackend::default();
        let mut read = 0;

        let resolution = resolve(&batch, &mut backend, 0, &mut read).await.unwrap();
        assert_eq!(resolution, Resolution::Dropped);
        let logs = trace_store.get_by_level(Level::ERROR);
        assert_eq!(logs.len(), 1);
        assert!(logs[0].contains("bad sequencer message segment kind"));
        assert!(backend.delayed_reads.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_delayed_message() {
        let batch = SequencerBatch::new(HEADER, vec![delayed_segment()]);
        let mut backend = TestInboxBackend::new(vec![], vec![Bytes::from(deposit().encode())]);
        let mut read = 0;

        let resolved = message(resolve(&batch, &mut backend, 0, &mut read).await.unwrap());
        assert_eq!(resolved, MessageWithMetadata::new(deposit(), 1));
        assert_eq!(read, 1);
        assert_eq!(backend.delayed_reads, vec![0]);
    }

    #[tokio::test]
    async fn test_resolve_delayed_message_past_count() {
        let trace_store: TraceStorage = Default::default();
        let layer = CollectingLayer::new(trace_store.clone());
        let _guard = tracing_subscriber::Registry::default().with(layer).set_default();

        let batch = SequencerBatch::new(HEADER, vec![delayed_segment()]);
        let mut backend = TestInboxBackend::default();
        let mut read = 1;

        // An explicit marker warns.
        let resolved = message(resolve(&batch, &mut backend, 0, &mut read).await.unwrap());
        assert_eq!(resolved, MessageWithMetadata::invalid(1));
        assert_eq!(trace_store.get_by_level(Level::WARN).len(), 1);

        // The virtual marker past the end does not.
        let resolved = message(resolve(&batch, &mut backend, 1, &mut read).await.unwrap());
        assert_eq!(resolved, MessageWithMetadata::invalid(1));
        assert_eq!(trace_store.get_by_level(Level::WARN).len(), 1);

        assert_eq!(read, 1);
        assert!(backend.delayed_reads.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_delayed_message_with_zero_count_never_reads() {
        let batch = SequencerBatch::new(
            BatchHeader { after_delayed_messages: 0, ..HEADER },
            vec![delayed_segment()],
        );
        let mut backend = TestInboxBackend::default();
        let mut read = 0;

        let resolved = message(resolve(&batch, &mut backend, 0, &mut read).await.unwrap());
        assert!(resolved.message.is_invalid());
        assert_eq!(resolved.delayed_messages_read, 0);
        assert!(backend.delayed_reads.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_delayed_read_failure() {
        let batch = SequencerBatch::new(HEADER, vec![delayed_segment()]);
        let mut backend = TestInboxBackend::default();
        backend.fail_delayed_reads.push(0);
        let mut read = 0;

        let err = resolve(&batch, &mut backend, 0, &mut read).await.unwrap_err();
        assert_eq!(err, TestBackendError::Injected("delayed read"));
        assert_eq!(read, 0);
    }

    #[tokio::test]
    async fn test_resolve_malformed_delayed_message() {
        let trace_store: TraceStorage = Default::default();
        let layer = CollectingLayer::new(trace_store.clone());
        let _guard = tracing_subscriber::Registry::default().with(layer).set_default();

        let batch = SequencerBatch::new(HEADER, vec![delayed_segment()]);
        let mut backend = TestInboxBackend::new(vec![], vec![Bytes::from_static(&[12, 0, 0])]);
        let mut read = 0;

        let resolution = resolve(&batch, &mut backend, 0, &mut read).await.unwrap();
        assert_eq!(resolution, Resolution::Dropped);
        assert_eq!(read, 1);
        let logs = trace_store.get_by_level(Level::WARN);
        assert_eq!(logs.len(), 1);
        assert!(logs[0].contains("dropping malformed delayed message"));
    }
}
