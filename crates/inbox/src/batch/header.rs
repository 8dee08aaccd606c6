//! Contains the [BatchHeader] type.

use crate::errors::BatchDecodingError;
use arb_primitives::params::BATCH_HEADER_LEN;

/// The fixed header of a [SequencerBatch].
///
/// The header bounds the timestamps and L1 block numbers of every message in the batch, and
/// records how many delayed messages have been consumed once the batch is fully read.
///
/// [SequencerBatch]: crate::batch::SequencerBatch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BatchHeader {
    /// The lowest timestamp a message in the batch may carry.
    pub min_timestamp: u64,
    /// The highest timestamp a message in the batch may carry.
    pub max_timestamp: u64,
    /// The lowest L1 block number a message in the batch may carry.
    pub min_l1_block: u64,
    /// The highest L1 block number a message in the batch may carry.
    pub max_l1_block: u64,
    /// The total number of delayed messages read after the batch is consumed.
    pub after_delayed_messages: u64,
}

impl BatchHeader {
    /// Decodes the header from the first [BATCH_HEADER_LEN] bytes of `buf`.
    pub fn decode(buf: &[u8]) -> Result<Self, BatchDecodingError> {
        if buf.len() < BATCH_HEADER_LEN {
            return Err(BatchDecodingError::MissingHeader(buf.len()));
        }

        let field = |index: usize| {
            let mut word = [0u8; 8];
            word.copy_from_slice(&buf[index * 8..(index + 1) * 8]);
            u64::from_be_bytes(word)
        };

        Ok(Self {
            min_timestamp: field(0),
            max_timestamp: field(1),
            min_l1_block: field(2),
            max_l1_block: field(3),
            after_delayed_messages: field(4),
        })
    }

    /// Encodes the header into its fixed-size big-endian layout.
    pub fn encode(&self) -> [u8; BATCH_HEADER_LEN] {
        let mut out = [0u8; BATCH_HEADER_LEN];
        let fields = [
            self.min_timestamp,
            self.max_timestamp,
            self.min_l1_block,
            self.max_l1_block,
            self.after_delayed_messages,
        ];
        for (chunk, field) in out.chunks_exact_mut(8).zip(fields) {
            chunk.copy_from_slice(&field.to_be_bytes());
        }
        out
    }

    /// Clamps a timestamp into `[min_timestamp, max_timestamp]`.
    ///
    /// With inverted bounds, values below the lower bound take it and all others take the upper.
    pub const fn clamp_timestamp(&self, timestamp: u64) -> u64 {
        clamp(timestamp, self.min_timestamp, self.max_timestamp)
    }

    /// Clamps an L1 block number into `[min_l1_block, max_l1_block]`.
    ///
    /// With inverted bounds, values below the lower bound take it and all others take the upper.
    pub const fn clamp_block_number(&self, block_number: u64) -> u64 {
        clamp(block_number, self.min_l1_block, self.max_l1_block)
    }
}

// `u64::clamp` panics on inverted bounds, which posted headers may well have.
const fn clamp(value: u64, min: u64, max: u64) -> u64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
