//! Builders for raw batch segments and encoded batches.

use crate::{
    batch::{BatchHeader, SegmentKind, SequencerBatch},
    compression::compress_brotli,
};
use alloy_primitives::Bytes;
use alloy_rlp::Encodable;

fn segment(kind: SegmentKind, payload: &[u8]) -> Bytes {
    let mut out = Vec::with_capacity(1 + payload.len());
    out.push(kind.into());
    out.extend_from_slice(payload);
    out.into()
}

fn advance_segment(kind: SegmentKind, delta: u64) -> Bytes {
    let mut payload = Vec::new();
    delta.encode(&mut payload);
    segment(kind, &payload)
}

/// An uncompressed L2 message segment.
pub fn l2_segment(payload: &[u8]) -> Bytes {
    segment(SegmentKind::L2Message, payload)
}

/// A brotli compressed L2 message segment.
pub fn brotli_l2_segment(payload: &[u8]) -> Bytes {
    let compressed = compress_brotli(payload).expect("in-memory compression");
    segment(SegmentKind::L2MessageBrotli, &compressed)
}

/// A delayed message marker.
pub fn delayed_segment() -> Bytes {
    segment(SegmentKind::DelayedMessages, &[])
}

/// Advances the running timestamp by `delta`.
pub fn advance_timestamp_segment(delta: u64) -> Bytes {
    advance_segment(SegmentKind::AdvanceTimestamp, delta)
}

/// Advances the running L1 block number by `delta`.
pub fn advance_block_segment(delta: u64) -> Bytes {
    advance_segment(SegmentKind::AdvanceL1BlockNumber, delta)
}

/// Encodes a batch as it would be posted.
pub fn batch_bytes(header: BatchHeader, segments: Vec<Bytes>) -> Bytes {
    SequencerBatch::new(header, segments).encode().expect("in-memory compression")
}
