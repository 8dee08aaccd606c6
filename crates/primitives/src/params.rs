//! Fixed addresses and size limits used while deriving messages from the sequencer inbox.

use alloy_primitives::{address, Address};

/// The poster of every message decoded from a sequencer batch.
///
/// The low bytes spell out `sequencer` in ASCII.
pub const SEQUENCER_ADDRESS: Address = address!("a4b000000000000000000073657175656e636572");

/// The maximum size of a single (decompressed) L2 message: 256 KiB.
pub const MAX_L2_MESSAGE_SIZE: u64 = 256 * 1024;

/// The maximum number of bytes a batch's segment stream may decompress to: 16 MiB.
pub const MAX_DECOMPRESSED_BATCH_SIZE: u64 = 16 * 1024 * 1024;

/// The length of the fixed batch header.
// +---------+--------------------------+
// | Bytes   | Field                    |
// +---------+--------------------------+
// | 8       | Min timestamp            |
// | 8       | Max timestamp            |
// | 8       | Min L1 block             |
// | 8       | Max L1 block             |
// | 8       | After delayed messages   |
// +---------+--------------------------+
pub const BATCH_HEADER_LEN: usize = 40;
