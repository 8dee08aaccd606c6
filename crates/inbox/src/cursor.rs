//! Contains the [SegmentCursor], the volatile walk state over a batch's segments.

use crate::batch::{BatchHeader, SegmentKind, SequencerBatch};
use alloy_primitives::Bytes;
use alloy_rlp::Decodable;
use tracing::{trace, warn};

/// The position of a walk over a [SequencerBatch]'s segments.
///
/// The cursor is never persisted: it is rebuilt at any time by walking the batch from segment 0
/// up to the persisted submessage index. Walking is forward-only, so a cursor can be reused across
/// calls with increasing targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentCursor {
    /// The index of the current segment. Equal to the segment count once past the end.
    pub segment_index: usize,
    /// The running (unclamped) timestamp.
    pub timestamp: u64,
    /// The running (unclamped) L1 block number.
    pub block_number: u64,
    /// The number of submessage slots walked past.
    pub submessages_seen: u64,
}

/// The segment a [SegmentCursor] stopped at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSegment {
    /// The index of the segment within the batch.
    pub segment_index: usize,
    /// The raw kind byte.
    pub kind: u8,
    /// The segment bytes following the kind byte.
    pub payload: Bytes,
    /// The running timestamp, clamped into the batch bounds.
    pub timestamp: u64,
    /// The running L1 block number, clamped into the batch bounds.
    pub block_number: u64,
    /// Whether this is the implicit delayed message marker past the end of the batch.
    pub is_virtual: bool,
}

impl ResolvedSegment {
    /// Returns the [SegmentKind] of the segment, or the raw byte if it is unknown.
    pub fn segment_kind(&self) -> Result<SegmentKind, u8> {
        SegmentKind::try_from(self.kind)
    }
}

impl SegmentCursor {
    /// Creates a cursor at the start of a batch.
    ///
    /// The accumulators start at the header's lower bounds rather than at zero, so advancing
    /// deltas are offsets from `min_timestamp` and `min_l1_block`. A batch with bounds
    /// `100..=200` and a timestamp advance of `50` resolves its next message at `150`. Starting
    /// from zero would clamp every message before a large enough advance up to the lower bound.
    /// See the cursor seeding entry in `DESIGN.md`.
    pub const fn new(header: &BatchHeader) -> Self {
        Self {
            segment_index: 0,
            timestamp: header.min_timestamp,
            block_number: header.min_l1_block,
            submessages_seen: 0,
        }
    }

    /// Walks forward to the segment holding submessage `target`.
    ///
    /// Empty segments are skipped. Advancing segments move the accumulators and never occupy a
    /// slot. Every other segment, known or not, occupies one slot. Running off the end of the
    /// batch resolves to a virtual delayed message marker.
    pub fn seek(&mut self, batch: &SequencerBatch, target: u64) -> ResolvedSegment {
        while let Some(segment) = batch.segments.get(self.segment_index) {
            match SegmentKind::of(segment) {
                None => {}
                Some(Ok(kind)) if kind.is_advance() => self.advance(kind, &segment[1..]),
                Some(_) if self.submessages_seen < target => self.submessages_seen += 1,
                Some(_) => break,
            }
            self.segment_index += 1;
        }

        let timestamp = batch.header.clamp_timestamp(self.timestamp);
        let block_number = batch.header.clamp_block_number(self.block_number);

        match batch.segments.get(self.segment_index) {
            Some(segment) => ResolvedSegment {
                segment_index: self.segment_index,
                kind: segment[0],
                payload: Bytes::from(segment.0.slice(1..)),
                timestamp,
                block_number,
                is_virtual: false,
            },
            None => ResolvedSegment {
                segment_index: self.segment_index,
                kind: SegmentKind::DelayedMessages.into(),
                payload: Bytes::new(),
                timestamp,
                block_number,
                is_virtual: true,
            },
        }
    }

    fn advance(&mut self, kind: SegmentKind, mut payload: &[u8]) {
        let delta = match u64::decode(&mut payload) {
            Ok(delta) => delta,
            Err(err) => {
                warn!(
                    target: "segment-cursor",
                    err = %err,
                    segment = self.segment_index,
                    "error parsing sequencer advancing segment"
                );
                return;
            }
        };

        trace!(target: "segment-cursor", ?kind, delta, segment = self.segment_index, "advancing");
        if kind == SegmentKind::AdvanceTimestamp {
            self.timestamp = self.timestamp.wrapping_add(delta);
        } else {
            self.block_number = self.block_number.wrapping_add(delta);
        }
    }
}
