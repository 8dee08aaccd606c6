//! This module contains the sequencer batch types: [SequencerBatch], its [BatchHeader], and the
//! [SegmentKind]s of its segments.

use crate::{
    compression::{compress_brotli, decompress_brotli},
    errors::BatchDecodingError,
};
use alloy_primitives::Bytes;
use alloy_rlp::{Decodable, Encodable};
use arb_primitives::params::{BATCH_HEADER_LEN, MAX_DECOMPRESSED_BATCH_SIZE};
use std::io;
use tracing::warn;

mod header;
pub use header::BatchHeader;

mod segment;
pub use segment::SegmentKind;

/// The format tag of a brotli compressed segment list.
pub const BROTLI_SEGMENTS_FORMAT: u8 = 0;

/// A sequencer batch: a [BatchHeader] followed by an ordered list of kind-tagged segments.
///
/// Binary Format
// +---------+--------------------------------------------+
// | Bytes   | Field                                      |
// +---------+--------------------------------------------+
// | 40      | Header                                     |
// | 1       | Format tag (optional)                      |
// | rest    | Brotli stream of concatenated RLP strings  |
// +---------+--------------------------------------------+
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequencerBatch {
    /// The batch header.
    pub header: BatchHeader,
    /// The raw segments. The first byte of each is its [SegmentKind].
    pub segments: Vec<Bytes>,
}

impl SequencerBatch {
    /// Creates a new [SequencerBatch].
    pub const fn new(header: BatchHeader, segments: Vec<Bytes>) -> Self {
        Self { header, segments }
    }

    /// Decodes a batch from its posted bytes.
    ///
    /// Only a missing header is an error. Posted data can never be withdrawn, so unknown formats
    /// and malformed segment streams decode to as many segments as could be recovered.
    pub fn decode(data: &[u8]) -> Result<Self, BatchDecodingError> {
        let header = BatchHeader::decode(data)?;

        let segments = match data.get(BATCH_HEADER_LEN) {
            None => Vec::new(),
            Some(&BROTLI_SEGMENTS_FORMAT) => {
                let compressed = &data[BATCH_HEADER_LEN + 1..];
                let decompressed = decompress_brotli(compressed, MAX_DECOMPRESSED_BATCH_SIZE)
                    .unwrap_or_else(|err| {
                        warn!(target: "batch", err = %err, "error decompressing sequencer batch segments");
                        err.partial
                    });
                decode_segments(&decompressed)
            }
            Some(&format) => {
                warn!(target: "batch", format, "unknown sequencer batch format");
                Vec::new()
            }
        };

        Ok(Self { header, segments })
    }

    /// Encodes the batch with the brotli segment list format.
    pub fn encode(&self) -> io::Result<Bytes> {
        let mut segments = Vec::with_capacity(self.segments.iter().map(|s| s.length()).sum());
        for segment in &self.segments {
            segment.encode(&mut segments);
        }
        let compressed = compress_brotli(&segments)?;

        let mut out = Vec::with_capacity(BATCH_HEADER_LEN + 1 + compressed.len());
        out.extend_from_slice(&self.header.encode());
        out.push(BROTLI_SEGMENTS_FORMAT);
        out.extend_from_slice(&compressed);
        Ok(out.into())
    }

    /// Returns `true` if any segment after `index` produces a message. Empty, advancing and
    /// unknown segments are ignored.
    pub fn has_emitting_segments_after(&self, index: usize) -> bool {
        self.segments.iter().skip(index.saturating_add(1)).any(|segment| {
            matches!(SegmentKind::of(segment), Some(Ok(kind)) if kind.is_emitting())
        })
    }
}

/// Reads RLP byte strings from the decompressed stream until it runs out.
///
/// A truncated trailing item counts as the end of the stream. Any other decoding error is logged
/// and ends the list, keeping the segments decoded so far.
fn decode_segments(mut buf: &[u8]) -> Vec<Bytes> {
    let mut segments = Vec::new();
    while !buf.is_empty() {
        match Bytes::decode(&mut buf) {
            Ok(segment) => segments.push(segment),
            Err(alloy_rlp::Error::InputTooShort) => break,
            Err(err) => {
                warn!(
                    target: "batch",
                    err = %err,
                    decoded = segments.len(),
                    "error parsing sequencer batch segment"
                );
                break;
            }
        }
    }
    segments
}
